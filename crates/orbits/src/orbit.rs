//! Mutable Keplerian orbit state.

use std::f64::consts::TAU;

use orbital_core::vector::{self, Vector3};

use crate::anomaly::{
    eccentric_anomaly_from_mean, mean_anomaly_from_eccentric, mean_anomaly_from_true,
    true_anomaly_from_mean,
};
use crate::body::Body;
use crate::elements::{elements_for_apsides, elements_from_state};
use crate::OrbitError;

/// Elliptic two-body orbit described by classical elements.
///
/// The anomaly is not stored directly: the mean anomaly at the current epoch is
/// `m0 + n (t - ref_epoch)`, so advancing `t` moves the orbiter along the ellipse.
/// Setting an anomaly or reshaping the orbit re-anchors `ref_epoch` at `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeplerianOrbit {
    /// Semi-major axis (km).
    pub a: f64,
    /// Eccentricity, 0 ≤ e < 1.
    pub e: f64,
    /// Inclination (rad).
    pub i: f64,
    /// Right ascension of the ascending node (rad).
    pub raan: f64,
    /// Argument of pericenter (rad).
    pub arg_pe: f64,
    /// Mean anomaly at `ref_epoch` (rad).
    pub m0: f64,
    /// Epoch at which `m0` holds (s).
    pub ref_epoch: f64,
    /// Current epoch (s).
    pub t: f64,
    pub body: Body,
}

impl KeplerianOrbit {
    /// Equatorial orbit with the given shape, at pericenter, at epoch zero.
    pub fn new(body: Body, a: f64, e: f64) -> Result<Self, OrbitError> {
        validate_shape(a, e)?;
        Ok(Self {
            a,
            e,
            i: 0.0,
            raan: 0.0,
            arg_pe: 0.0,
            m0: 0.0,
            ref_epoch: 0.0,
            t: 0.0,
            body,
        })
    }

    /// Circular equatorial orbit of the given radius.
    pub fn circular(body: Body, radius: f64) -> Result<Self, OrbitError> {
        Self::new(body, radius, 0.0)
    }

    /// Equatorial orbit with the given apocenter and pericenter radii.
    pub fn from_apsides(
        body: Body,
        apocenter_radius: f64,
        pericenter_radius: f64,
    ) -> Result<Self, OrbitError> {
        let (a, e) = elements_for_apsides(apocenter_radius, pericenter_radius)?;
        Self::new(body, a, e)
    }

    pub fn with_inclination(mut self, i: f64) -> Self {
        self.i = i;
        self
    }

    pub fn with_raan(mut self, raan: f64) -> Self {
        self.raan = raan;
        self
    }

    pub fn with_arg_pe(mut self, arg_pe: f64) -> Self {
        self.arg_pe = arg_pe;
        self
    }

    pub fn with_mean_anomaly(mut self, mean_anomaly: f64) -> Self {
        self.set_mean_anomaly(mean_anomaly);
        self
    }

    /// Move both the current and the reference epoch, keeping the current anomaly.
    pub fn at_epoch(mut self, t: f64) -> Self {
        let m = self.mean_anomaly();
        self.t = t;
        self.set_mean_anomaly(m);
        self
    }

    /// Mean motion n = sqrt(mu / a^3) (rad/s).
    pub fn mean_motion(&self) -> f64 {
        (self.body.mu_km3_s2 / self.a.powi(3)).sqrt()
    }

    /// Orbital period T = 2π / n (s).
    pub fn period(&self) -> f64 {
        TAU / self.mean_motion()
    }

    pub fn apocenter_radius(&self) -> f64 {
        self.a * (1.0 + self.e)
    }

    pub fn pericenter_radius(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    pub fn apocenter_altitude(&self) -> f64 {
        self.apocenter_radius() - self.body.mean_radius_km
    }

    pub fn pericenter_altitude(&self) -> f64 {
        self.pericenter_radius() - self.body.mean_radius_km
    }

    pub fn semi_latus_rectum(&self) -> f64 {
        self.a * (1.0 - self.e * self.e)
    }

    /// Mean anomaly at the current epoch, in [0, 2π).
    pub fn mean_anomaly(&self) -> f64 {
        (self.m0 + self.mean_motion() * (self.t - self.ref_epoch)).rem_euclid(TAU)
    }

    pub fn set_mean_anomaly(&mut self, mean_anomaly: f64) {
        self.ref_epoch = self.t;
        self.m0 = mean_anomaly.rem_euclid(TAU);
    }

    pub fn eccentric_anomaly(&self) -> f64 {
        eccentric_anomaly_from_mean(self.e, self.mean_anomaly())
    }

    pub fn set_eccentric_anomaly(&mut self, eccentric_anomaly: f64) {
        self.set_mean_anomaly(mean_anomaly_from_eccentric(self.e, eccentric_anomaly));
    }

    pub fn true_anomaly(&self) -> f64 {
        true_anomaly_from_mean(self.e, self.mean_anomaly())
    }

    pub fn set_true_anomaly(&mut self, true_anomaly: f64) {
        self.set_mean_anomaly(mean_anomaly_from_true(self.e, true_anomaly));
    }

    /// Replace `(a, e)` in place while keeping the current mean anomaly.
    pub fn reshape(&mut self, a: f64, e: f64) -> Result<(), OrbitError> {
        validate_shape(a, e)?;
        let m = self.mean_anomaly();
        self.a = a;
        self.e = e;
        self.set_mean_anomaly(m);
        Ok(())
    }

    /// Distance from the focus at the current epoch (km).
    pub fn radius(&self) -> f64 {
        self.a * (1.0 - self.e * self.eccentric_anomaly().cos())
    }

    /// Inertial position at the current epoch (km).
    pub fn position(&self) -> Vector3 {
        let f = self.true_anomaly();
        let r = self.semi_latus_rectum() / (1.0 + self.e * f.cos());
        self.to_inertial(r * f.cos(), r * f.sin())
    }

    /// Inertial velocity at the current epoch (km/s).
    pub fn velocity(&self) -> Vector3 {
        let f = self.true_anomaly();
        let scale = (self.body.mu_km3_s2 / self.semi_latus_rectum()).sqrt();
        self.to_inertial(-scale * f.sin(), scale * (self.e + f.cos()))
    }

    /// Replace the velocity at the current position and epoch, recomputing every element.
    pub fn set_velocity(&mut self, velocity: Vector3) -> Result<(), OrbitError> {
        let position = self.position();
        let elements = elements_from_state(&position, &velocity, self.body.mu_km3_s2)?;
        validate_shape(elements.a, elements.e)?;
        self.a = elements.a;
        self.e = elements.e;
        self.i = elements.i;
        self.raan = elements.raan;
        self.arg_pe = elements.arg_pe;
        self.set_true_anomaly(elements.true_anomaly);
        Ok(())
    }

    /// Add `delta_v` to the current velocity.
    pub fn apply_velocity_change(&mut self, delta_v: &Vector3) -> Result<(), OrbitError> {
        let velocity = vector::add(&self.velocity(), delta_v);
        self.set_velocity(velocity)
    }

    /// Rotate a perifocal-plane vector into the inertial frame.
    fn to_inertial(&self, x: f64, y: f64) -> Vector3 {
        let (so, co) = self.raan.sin_cos();
        let (si, ci) = self.i.sin_cos();
        let (sw, cw) = self.arg_pe.sin_cos();

        let p = [co * cw - so * sw * ci, so * cw + co * sw * ci, sw * si];
        let q = [-co * sw - so * cw * ci, -so * sw + co * cw * ci, cw * si];
        vector::add(&vector::scale(&p, x), &vector::scale(&q, y))
    }
}

fn validate_shape(a: f64, e: f64) -> Result<(), OrbitError> {
    if !(a.is_finite() && a > 0.0) {
        return Err(OrbitError::InvalidSemiMajorAxis(a));
    }
    if !(0.0..1.0).contains(&e) {
        return Err(OrbitError::InvalidEccentricity(e));
    }
    Ok(())
}

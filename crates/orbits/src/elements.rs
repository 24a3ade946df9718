//! Element-level utilities: apsides ↔ (a, e), revolution splitting, and state-vector → elements.

use std::f64::consts::TAU;

use orbital_core::vector::{self, Vector3};

use crate::OrbitError;

/// Below this eccentricity a state vector is treated as circular and the
/// pericenter direction collapses onto the reference direction.
const CIRCULAR_ECCENTRICITY: f64 = 1e-10;
/// Relative node-vector magnitude below which the orbit is treated as equatorial.
const EQUATORIAL_NODE: f64 = 1e-12;

/// Semi-major axis and eccentricity for an apocenter/pericenter radius pair.
///
/// Equal radii give a circular orbit. The pericenter must be positive and not
/// exceed the apocenter.
pub fn elements_for_apsides(
    apocenter_radius: f64,
    pericenter_radius: f64,
) -> Result<(f64, f64), OrbitError> {
    if !apocenter_radius.is_finite()
        || !pericenter_radius.is_finite()
        || pericenter_radius <= 0.0
        || apocenter_radius < pericenter_radius
    {
        return Err(OrbitError::InvalidApsides {
            apocenter_radius,
            pericenter_radius,
        });
    }

    let a = (apocenter_radius + pericenter_radius) / 2.0;
    let e = (apocenter_radius - pericenter_radius) / (apocenter_radius + pericenter_radius);
    Ok((a, e))
}

/// Floor-divide an angle by a full revolution.
///
/// Returns `(whole_revolutions, remainder)` with the remainder in [0, 2π), so
/// `angle == whole_revolutions * 2π + remainder`. Negative angles round toward
/// negative infinity.
pub fn split_revolutions(angle: f64) -> (f64, f64) {
    (angle.div_euclid(TAU), angle.rem_euclid(TAU))
}

/// Classical orbital elements recovered from a Cartesian state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicalElements {
    pub a: f64,
    pub e: f64,
    pub i: f64,
    pub raan: f64,
    pub arg_pe: f64,
    pub true_anomaly: f64,
}

/// Convert a position/velocity pair around a body with gravitational parameter `mu`
/// into classical elements.
///
/// Equatorial orbits take the x axis as the node direction (raan = 0). Circular
/// orbits put the pericenter on the node direction (arg_pe = 0) and report the
/// argument of latitude as the true anomaly.
pub fn elements_from_state(
    r: &Vector3,
    v: &Vector3,
    mu: f64,
) -> Result<ClassicalElements, OrbitError> {
    let r_mag = vector::norm(r);
    let v_sq = vector::dot(v, v);

    let h = vector::cross(r, v);
    let h_mag = vector::norm(&h);
    if h_mag <= 0.0 || r_mag <= 0.0 {
        return Err(OrbitError::DegenerateState);
    }

    let energy = v_sq / 2.0 - mu / r_mag;
    if energy >= 0.0 {
        return Err(OrbitError::Unbound(energy));
    }
    let a = -mu / (2.0 * energy);

    let e_vec = vector::scale(
        &vector::sub(
            &vector::scale(r, v_sq - mu / r_mag),
            &vector::scale(v, vector::dot(r, v)),
        ),
        1.0 / mu,
    );
    let e = vector::norm(&e_vec);

    let h_hat = vector::scale(&h, 1.0 / h_mag);
    let i = h_hat[2].clamp(-1.0, 1.0).acos();

    let node = [-h[1], h[0], 0.0];
    let node_mag = vector::norm(&node);
    let (raan, p_hat) = if node_mag > EQUATORIAL_NODE * h_mag {
        (
            node[1].atan2(node[0]).rem_euclid(TAU),
            vector::scale(&node, 1.0 / node_mag),
        )
    } else {
        (0.0, [1.0, 0.0, 0.0])
    };
    let q_hat = vector::cross(&h_hat, &p_hat);

    if e < CIRCULAR_ECCENTRICITY {
        let latitude = vector::dot(r, &q_hat)
            .atan2(vector::dot(r, &p_hat))
            .rem_euclid(TAU);
        return Ok(ClassicalElements {
            a,
            e: 0.0,
            i,
            raan,
            arg_pe: 0.0,
            true_anomaly: latitude,
        });
    }

    let arg_pe = vector::dot(&e_vec, &q_hat)
        .atan2(vector::dot(&e_vec, &p_hat))
        .rem_euclid(TAU);
    let e_hat = vector::scale(&e_vec, 1.0 / e);
    let perp = vector::cross(&h_hat, &e_hat);
    let true_anomaly = vector::dot(r, &perp)
        .atan2(vector::dot(r, &e_hat))
        .rem_euclid(TAU);

    Ok(ClassicalElements {
        a,
        e,
        i,
        raan,
        arg_pe,
        true_anomaly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn apsides_to_elements() {
        let (a, e) = elements_for_apsides(42_164.0, 6_678.0).unwrap();
        assert!((a - 24_421.0).abs() < 1e-9);
        assert!((a * (1.0 + e) - 42_164.0).abs() < 1e-9);
        assert!((a * (1.0 - e) - 6_678.0).abs() < 1e-9);

        let (a, e) = elements_for_apsides(7_000.0, 7_000.0).unwrap();
        assert_eq!((a, e), (7_000.0, 0.0));
    }

    #[test]
    fn apsides_rejects_swapped_or_nonpositive_radii() {
        assert!(matches!(
            elements_for_apsides(6_000.0, 7_000.0),
            Err(OrbitError::InvalidApsides { .. })
        ));
        assert!(elements_for_apsides(7_000.0, 0.0).is_err());
        assert!(elements_for_apsides(f64::NAN, 7_000.0).is_err());
    }

    #[test]
    fn split_revolutions_floors_like_divmod() {
        let (whole, rem) = split_revolutions(3.0 * TAU + 0.5);
        assert_eq!(whole, 3.0);
        assert!((rem - 0.5).abs() < 1e-12);

        let (whole, rem) = split_revolutions(-0.5);
        assert_eq!(whole, -1.0);
        assert!((rem - (TAU - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn circular_equatorial_state() {
        let mu: f64 = 398_600.4418;
        let r = 7_000.0;
        let speed = (mu / r).sqrt();
        let el = elements_from_state(&[0.0, r, 0.0], &[-speed, 0.0, 0.0], mu).unwrap();
        assert!((el.a - r).abs() < 1e-6);
        assert_eq!(el.e, 0.0);
        assert!(el.i.abs() < 1e-12);
        assert!((el.true_anomaly - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn escape_speed_is_unbound() {
        let mu: f64 = 398_600.4418;
        let r = 7_000.0;
        let escape = (2.0 * mu / r).sqrt() * 1.01;
        assert!(matches!(
            elements_from_state(&[r, 0.0, 0.0], &[0.0, escape, 0.0], mu),
            Err(OrbitError::Unbound(_))
        ));
        assert_eq!(
            elements_from_state(&[r, 0.0, 0.0], &[1.0, 0.0, 0.0], mu),
            Err(OrbitError::DegenerateState)
        );
    }
}

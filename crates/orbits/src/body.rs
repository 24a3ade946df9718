//! Attracting bodies.

/// Central body of a two-body orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    /// Gravitational parameter (km^3/s^2).
    pub mu_km3_s2: f64,
    /// Mean radius used to turn altitudes into radii (km).
    pub mean_radius_km: f64,
}

impl Body {
    pub fn new(name: impl Into<String>, mu_km3_s2: f64, mean_radius_km: f64) -> Self {
        Self {
            name: name.into(),
            mu_km3_s2,
            mean_radius_km,
        }
    }

    pub fn earth() -> Self {
        Self::new("EARTH", 398_600.4418, 6_371.0084)
    }

    pub fn moon() -> Self {
        Self::new("MOON", 4_902.800_066, 1_737.4)
    }

    pub fn mars() -> Self {
        Self::new("MARS", 42_828.375_214, 3_389.5)
    }

    pub fn sun() -> Self {
        Self::new("SUN", 1.327_124_400_18e11, 695_700.0)
    }

    /// Built-in body by case-insensitive name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "EARTH" => Some(Self::earth()),
            "MOON" => Some(Self::moon()),
            "MARS" => Some(Self::mars()),
            "SUN" => Some(Self::sun()),
            _ => None,
        }
    }

    /// Radius corresponding to an altitude above the mean surface.
    pub fn radius_at_altitude(&self, altitude_km: f64) -> f64 {
        self.mean_radius_km + altitude_km
    }
}

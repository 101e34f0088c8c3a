//! Layered analytic atmosphere: `T(h) = a + b·exp(-h/c)` in each lower layer
//! and `T(h) = a - b·h/c` in the top layer, with `T` the vertical depth in
//! g/cm² and `h` the altitude.

use crate::error::{ReconstructionError, Result};

/// Shape of one layer's depth profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerShape {
    Exponential,
    Linear,
}

/// One altitude band of a layered atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereLayer {
    /// Lower edge of the layer (km).
    pub base_km: f64,
    /// Offset `a` (g/cm²).
    pub a: f64,
    /// Scale `b` (g/cm²).
    pub b: f64,
    /// Scale height `c` (km).
    pub c_km: f64,
    pub shape: LayerShape,
}

impl AtmosphereLayer {
    fn thickness(&self, altitude_km: f64) -> f64 {
        match self.shape {
            LayerShape::Exponential => self.a + self.b * (-altitude_km / self.c_km).exp(),
            LayerShape::Linear => self.a - self.b * altitude_km / self.c_km,
        }
    }

    fn altitude(&self, depth: f64) -> f64 {
        match self.shape {
            LayerShape::Exponential => -self.c_km * ((depth - self.a) / self.b).ln(),
            LayerShape::Linear => (self.a - depth) * self.c_km / self.b,
        }
    }

    /// Altitude at which this layer's profile reaches zero depth, if any.
    fn zero_depth_altitude(&self) -> Option<f64> {
        match self.shape {
            LayerShape::Exponential if self.a < 0.0 => Some(self.altitude(0.0)),
            LayerShape::Exponential => None,
            LayerShape::Linear => Some(self.altitude(0.0)),
        }
    }
}

/// `(base_km, a, b, c_km)` of the four exponential U.S. standard layers.
const US_STANDARD_EXPONENTIAL: [(f64, f64, f64, f64); 4] = [
    (0.0, -186.555305, 1222.6562, 9.9418638),
    (4.0, -94.919, 1144.9069, 8.7815355),
    (10.0, 0.61289, 1305.5948, 6.3614304),
    (40.0, 0.0, 540.1778, 7.7217016),
];

/// Piecewise analytic depth profile, valid from the ground (0 km) up to the
/// altitude where the top layer reaches zero depth.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredAtmosphere {
    layers: Vec<AtmosphereLayer>,
    top_km: f64,
}

impl LayeredAtmosphere {
    /// U.S. standard atmosphere after J. Linsley, as used by air-shower
    /// simulations.
    pub fn us_standard() -> Self {
        let mut layers: Vec<AtmosphereLayer> = US_STANDARD_EXPONENTIAL
            .iter()
            .map(|&(base_km, a, b, c_km)| AtmosphereLayer {
                base_km,
                a,
                b,
                c_km,
                shape: LayerShape::Exponential,
            })
            .collect();
        layers.push(AtmosphereLayer {
            base_km: 100.0,
            a: 0.01128292,
            b: 1.0,
            c_km: 10_000.0,
            shape: LayerShape::Linear,
        });
        let top_km = layers[4].altitude(0.0);
        Self { layers, top_km }
    }

    /// Build from layers ordered by increasing base altitude, the first one
    /// starting at 0 km. The top layer must reach zero depth.
    pub fn new(layers: Vec<AtmosphereLayer>) -> Result<Self> {
        let first = layers
            .first()
            .ok_or_else(|| ReconstructionError::InvalidTable("no atmosphere layers".into()))?;
        if first.base_km != 0.0 {
            return Err(ReconstructionError::InvalidTable(format!(
                "first layer must start at 0 km, got {}",
                first.base_km
            )));
        }
        if layers.windows(2).any(|w| w[1].base_km <= w[0].base_km) {
            return Err(ReconstructionError::InvalidTable(
                "layer bases must be strictly increasing".into(),
            ));
        }
        if layers.iter().any(|l| !(l.b > 0.0 && l.c_km > 0.0)) {
            return Err(ReconstructionError::InvalidTable(
                "layer scales b and c must be positive".into(),
            ));
        }
        let top = layers[layers.len() - 1];
        let top_km = top
            .zero_depth_altitude()
            .filter(|&h| h.is_finite() && h > top.base_km)
            .ok_or_else(|| {
                ReconstructionError::InvalidTable("top layer never reaches zero depth".into())
            })?;
        Ok(Self { layers, top_km })
    }

    /// Altitude (km) at which the depth reaches zero.
    pub fn top_km(&self) -> f64 {
        self.top_km
    }

    pub fn layers(&self) -> &[AtmosphereLayer] {
        &self.layers
    }

    fn layer_at(&self, altitude_km: f64) -> &AtmosphereLayer {
        let idx = self.layers.partition_point(|l| l.base_km <= altitude_km);
        &self.layers[idx.saturating_sub(1)]
    }

    /// Vertical depth (g/cm²) above `altitude_km`.
    pub fn thickness(&self, altitude_km: f64) -> Result<f64> {
        if !(0.0..=self.top_km).contains(&altitude_km) {
            return Err(ReconstructionError::OutOfRangeLookup {
                quantity: "altitude_km",
                value: altitude_km,
                min: 0.0,
                max: self.top_km,
            });
        }
        Ok(self.layer_at(altitude_km).thickness(altitude_km).max(0.0))
    }

    /// Altitude (km) above which the vertical depth is `depth`.
    pub fn altitude(&self, depth: f64) -> Result<f64> {
        let ground = self.layers[0].thickness(0.0);
        if !(0.0..=ground).contains(&depth) {
            return Err(ReconstructionError::OutOfRangeLookup {
                quantity: "depth",
                value: depth,
                min: 0.0,
                max: ground,
            });
        }
        // depth decreases with altitude; find the highest layer whose base is
        // at least as deep as the requested depth
        let layer = self
            .layers
            .iter()
            .rev()
            .find(|l| l.thickness(l.base_km) >= depth)
            .unwrap_or(&self.layers[0]);
        Ok(layer.altitude(depth).clamp(0.0, self.top_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_standard_ground_and_top() {
        let atm = LayeredAtmosphere::us_standard();
        let ground = atm.thickness(0.0).unwrap();
        assert!((ground - 1036.1).abs() < 0.1, "ground depth {}", ground);
        assert!((atm.top_km() - 112.8292).abs() < 1e-3);
        assert!(atm.thickness(atm.top_km()).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_continuous_at_layer_boundaries() {
        let atm = LayeredAtmosphere::us_standard();
        for w in atm.layers().windows(2) {
            let h = w[1].base_km;
            let below = w[0].thickness(h);
            let above = w[1].thickness(h);
            assert!(
                (below - above).abs() / below < 1e-3,
                "discontinuity at {} km: {} vs {}",
                h,
                below,
                above,
            );
        }
    }

    #[test]
    fn test_monotonic_and_invertible() {
        let atm = LayeredAtmosphere::us_standard();
        let mut prev = f64::INFINITY;
        for i in 0..=110 {
            let h = i as f64;
            let t = atm.thickness(h).unwrap();
            assert!(t < prev, "depth not decreasing at {} km", h);
            prev = t;
            let back = atm.altitude(t).unwrap();
            assert!((back - h).abs() < 1e-6, "h = {}: inverted to {}", h, back);
        }
    }

    #[test]
    fn test_out_of_range() {
        let atm = LayeredAtmosphere::us_standard();
        assert!(matches!(
            atm.thickness(-0.5),
            Err(ReconstructionError::OutOfRangeLookup { .. })
        ));
        assert!(atm.thickness(150.0).is_err());
        assert!(atm.altitude(2000.0).is_err());
        assert!(atm.altitude(-1.0).is_err());
    }

    #[test]
    fn test_rejects_bad_layers() {
        assert!(LayeredAtmosphere::new(vec![]).is_err());
        let never_zero = AtmosphereLayer {
            base_km: 0.0,
            a: 1.0,
            b: 1000.0,
            c_km: 8.0,
            shape: LayerShape::Exponential,
        };
        assert!(LayeredAtmosphere::new(vec![never_zero]).is_err());
    }
}

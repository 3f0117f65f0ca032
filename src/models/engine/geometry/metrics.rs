use uom::si::f64::{Length, Volume};

use super::{EngineGeometry, GeometryError};

/// Angle-independent figures for an engine build sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticMetrics {
    /// Total swept volume of all cylinders.
    pub displacement: Volume,
    pub bore_stroke_ratio: f64,
    pub rod_ratio: f64,
    /// Crown to gasket surface at TDC; negative when out of the hole.
    pub piston_to_deck: Length,
    pub compression_ratio: f64,
}

impl StaticMetrics {
    /// Computes every static metric of `geometry`.
    ///
    /// # Errors
    ///
    /// Returns the first [`GeometryError`] raised by a ratio.
    pub fn compute(geometry: &EngineGeometry<'_>) -> Result<Self, GeometryError> {
        Ok(Self {
            displacement: geometry.displacement(),
            bore_stroke_ratio: geometry.bore_stroke_ratio()?,
            rod_ratio: geometry.rod_ratio()?,
            piston_to_deck: geometry.piston_to_deck(),
            compression_ratio: geometry.compression_ratio()?,
        })
    }
}

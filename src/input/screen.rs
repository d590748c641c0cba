//! Screen pixel density
//!
//! Gesture thresholds are expressed in centimeters so they feel the same on
//! every display. `ScreenDensity` converts pixel distances into physical units.

/// Inches to centimeters.
const CM_PER_INCH: f32 = 2.54;

/// Pixel density of the screen the touches come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenDensity {
    pixels_per_cm: f32,
}

impl ScreenDensity {
    /// DPI assumed when the platform reports none.
    pub const FALLBACK_DPI: f32 = 72.0;

    /// Build from dots per inch.
    ///
    /// Zero, negative or non-finite values fall back to [`Self::FALLBACK_DPI`].
    #[must_use]
    pub fn from_dpi(dpi: f32) -> Self {
        let dpi = if dpi.is_finite() && dpi > 0.0 {
            dpi
        } else {
            log::warn!(
                "Invalid screen DPI {dpi}, falling back to {}",
                Self::FALLBACK_DPI
            );
            Self::FALLBACK_DPI
        };

        Self {
            pixels_per_cm: dpi / CM_PER_INCH,
        }
    }

    /// Build directly from pixels per centimeter.
    #[must_use]
    pub fn from_pixels_per_cm(pixels_per_cm: f32) -> Self {
        if pixels_per_cm.is_finite() && pixels_per_cm > 0.0 {
            Self { pixels_per_cm }
        } else {
            Self::from_dpi(0.0)
        }
    }

    /// Pixels per centimeter
    #[must_use]
    #[inline]
    pub fn pixels_per_cm(&self) -> f32 {
        self.pixels_per_cm
    }

    /// Convert a pixel length to centimeters.
    #[must_use]
    #[inline]
    pub fn to_cm(&self, pixels: f32) -> f32 {
        pixels / self.pixels_per_cm
    }
}

impl Default for ScreenDensity {
    fn default() -> Self {
        Self::from_dpi(Self::FALLBACK_DPI)
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{LocatorError, Result};

/// Tunable parameters of the localization pipeline.
///
/// The defaults were tuned against one specific board photograph; the size
/// band in particular does not generalize to arbitrary inputs and should be
/// adjusted per part family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LocatorConfig {
    /// Binarization threshold, pixels at or above it become foreground
    pub threshold_level: u8,
    /// Side length of the median denoise kernel, must be odd
    pub denoise_kernel_size: u32,
    /// Lower bound of the re-binarization band, inclusive
    pub range_low: u8,
    /// Upper bound of the re-binarization band, inclusive
    pub range_high: u8,
    /// Smallest accepted bounding-box side, inclusive
    pub min_side: u32,
    /// Largest accepted bounding-box side, inclusive
    pub max_side: u32,
    /// Color used to fill and outline accepted contours
    pub fill_color: [u8; 3],
    /// Color used for bounding rectangles
    pub box_color: [u8; 3],
    /// Line thickness of bounding rectangles
    pub box_thickness: u32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            threshold_level: 110,
            denoise_kernel_size: 23,
            range_low: 135,
            range_high: 255,
            min_side: 20,
            max_side: 100,
            fill_color: [0, 0, 255],
            box_color: [0, 0, 255],
            box_thickness: 5,
        }
    }
}

impl LocatorConfig {
    /// Check the parameter set before assembling a pipeline from it.
    pub fn validate(&self) -> Result<()> {
        if self.denoise_kernel_size == 0 || self.denoise_kernel_size % 2 == 0 {
            return Err(LocatorError::InvalidKernelSize(self.denoise_kernel_size));
        }
        if self.range_low > self.range_high {
            return Err(LocatorError::InvalidRange {
                low: self.range_low,
                high: self.range_high,
            });
        }
        if self.min_side > self.max_side {
            return Err(LocatorError::InvalidSizeBounds {
                min_side: self.min_side,
                max_side: self.max_side,
            });
        }
        if self.box_thickness == 0 {
            return Err(LocatorError::ZeroThickness);
        }
        Ok(())
    }
}

/// The two overlay products of a pipeline run.
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
    PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverlayKind {
    /// Accepted contours filled and outlined on the source image
    Filled,
    /// Accepted bounding rectangles on the source image
    #[strum(serialize = "boxes")]
    BoundingBoxes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        LocatorConfig::default().validate().expect("Defaults should validate");
    }

    #[test]
    fn even_kernel_is_rejected() {
        let config = LocatorConfig { denoise_kernel_size: 8, ..Default::default() };
        assert!(matches!(config.validate(), Err(LocatorError::InvalidKernelSize(8))));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = LocatorConfig { range_low: 200, range_high: 120, ..Default::default() };
        assert!(matches!(config.validate(), Err(LocatorError::InvalidRange { .. })));
    }

    #[test]
    fn inverted_size_band_is_rejected() {
        let config = LocatorConfig { min_side: 150, max_side: 100, ..Default::default() };
        assert!(matches!(config.validate(), Err(LocatorError::InvalidSizeBounds { .. })));
    }

    #[test]
    fn zero_thickness_is_rejected() {
        let config = LocatorConfig { box_thickness: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(LocatorError::ZeroThickness)));
    }

    #[test]
    fn overlay_kind_names_round_trip() {
        assert_eq!(OverlayKind::Filled.to_string(), "filled");
        assert_eq!(OverlayKind::BoundingBoxes.to_string(), "boxes");
        let parsed: OverlayKind = "boxes".parse().expect("Should parse overlay kind");
        assert_eq!(parsed, OverlayKind::BoundingBoxes);
    }
}

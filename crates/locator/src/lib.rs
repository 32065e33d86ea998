//! # Board part localization
//!
//! Extracts and localizes discrete parts on a photographed printed circuit
//! board. The source image is binarized, denoised and re-binarized into a
//! strict 0/255 mask, the outer boundary of every externally visible region
//! is traced, regions are filtered by bounding-box size, and the survivors
//! are rendered as two overlays: filled contours and bounding rectangles.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use locator::{LocatorConfig, load_board_image, locate_parts};
//!
//! let image = load_board_image("board.jpg")?;
//! let parts = locate_parts(&image, &LocatorConfig::default())?;
//!
//! parts.filled_overlay.save("filled.png")?;
//! parts.box_overlay.save("boxes.png")?;
//! parts.save_geojson("regions.geojson")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use locator::Pipeline;
//! use locator::algorithms::{BinaryThresholder, RangeMasker, SizeBandFilter};
//!
//! let pipeline = Pipeline::builder()
//!     .add_preprocessor(BinaryThresholder { level: 96 })
//!     .add_preprocessor(RangeMasker { low: 128, high: 255 })
//!     .set_filter(SizeBandFilter { min_side: 10, max_side: 250 })
//!     .build();
//! ```

// Core modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::{LocatorConfig, OverlayKind};
pub use error::{LocatorError, Result};
pub use pipeline::{LocatedParts, Pipeline, builder::PipelineBuilder};
pub use types::{BoundingBox, Contour, Point, RegionDecision};

use std::path::Path;

use image::RgbImage;

/// Run the reference pipeline for a parameter set.
pub fn locate_parts(image: &RgbImage, config: &LocatorConfig) -> Result<LocatedParts> {
    PipelineBuilder::from_config(config)?.process(image)
}

/// Decode a board photograph into the 3-channel 8-bit image the pipeline
/// expects.
pub fn load_board_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

use image::{GrayImage, Luma};

use crate::{
    error::{LocatorError, Result},
    traits::MaskPreprocessor,
};

/// Fixed-level binarization: pixels at or above `level` become foreground.
#[derive(Debug, Clone)]
pub struct BinaryThresholder {
    pub level: u8,
}

impl Default for BinaryThresholder {
    fn default() -> Self {
        Self { level: 110 }
    }
}

impl MaskPreprocessor for BinaryThresholder {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        let mut mask = GrayImage::new(image.width(), image.height());
        for (x, y, pixel) in image.enumerate_pixels() {
            let value = if pixel.0[0] >= self.level { 255 } else { 0 };
            mask.put_pixel(x, y, Luma([value]));
        }
        Ok(mask)
    }
}

/// Median smoothing pass that removes speckle from a thresholded mask.
#[derive(Debug, Clone)]
pub struct MedianDenoiser {
    /// Side length of the square kernel window, must be odd
    pub kernel_size: u32,
}

impl Default for MedianDenoiser {
    fn default() -> Self {
        Self { kernel_size: 23 }
    }
}

impl MaskPreprocessor for MedianDenoiser {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(LocatorError::InvalidKernelSize(self.kernel_size));
        }
        let radius = self.kernel_size / 2;
        Ok(imageproc::filter::median_filter(image, radius, radius))
    }
}

/// Inclusive intensity band re-binarization. Sharpens a smoothed mask back
/// into strict 0/255; applying it twice with the same bounds is a no-op.
#[derive(Debug, Clone)]
pub struct RangeMasker {
    pub low: u8,
    pub high: u8,
}

impl Default for RangeMasker {
    fn default() -> Self {
        Self { low: 135, high: 255 }
    }
}

impl MaskPreprocessor for RangeMasker {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        if self.low > self.high {
            return Err(LocatorError::InvalidRange { low: self.low, high: self.high });
        }
        let mut mask = GrayImage::new(image.width(), image.height());
        for (x, y, pixel) in image.enumerate_pixels() {
            let value = pixel.0[0];
            let in_band = value >= self.low && value <= self.high;
            mask.put_pixel(x, y, Luma([if in_band { 255 } else { 0 }]));
        }
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image() -> GrayImage {
        GrayImage::from_fn(16, 16, |x, y| Luma([(x * 16 + y) as u8]))
    }

    #[test]
    fn threshold_matches_level_comparison() {
        let mask = BinaryThresholder { level: 110 }
            .preprocess(&gradient_image())
            .expect("Should threshold");

        for (x, y, pixel) in mask.enumerate_pixels() {
            let expected = if (x * 16 + y) as u8 >= 110 { 255 } else { 0 };
            assert_eq!(pixel.0[0], expected, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn threshold_level_is_inclusive() {
        let image = GrayImage::from_pixel(1, 1, Luma([110]));
        let mask = BinaryThresholder { level: 110 }
            .preprocess(&image)
            .expect("Should threshold");
        assert_eq!(mask.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn range_mask_is_inclusive_on_both_bounds() {
        let image = GrayImage::from_fn(5, 1, |x, _| match x {
            0 => Luma([0]),
            1 => Luma([134]),
            2 => Luma([135]),
            3 => Luma([200]),
            _ => Luma([255]),
        });
        let mask = RangeMasker { low: 135, high: 255 }
            .preprocess(&image)
            .expect("Should mask");

        let values: Vec<u8> = mask.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0, 0, 255, 255, 255]);
    }

    #[test]
    fn range_mask_is_idempotent() {
        let masker = RangeMasker { low: 135, high: 255 };
        let once = masker.preprocess(&gradient_image()).expect("Should mask");
        let twice = masker.preprocess(&once).expect("Should mask again");
        assert_eq!(once, twice);
    }

    #[test]
    fn inverted_range_fails() {
        let result = RangeMasker { low: 200, high: 100 }.preprocess(&gradient_image());
        assert!(matches!(result, Err(LocatorError::InvalidRange { low: 200, high: 100 })));
    }

    #[test]
    fn even_median_kernel_fails() {
        let result = MedianDenoiser { kernel_size: 22 }.preprocess(&gradient_image());
        assert!(matches!(result, Err(LocatorError::InvalidKernelSize(22))));
    }

    #[test]
    fn median_removes_isolated_speckle() {
        let mut mask = GrayImage::new(21, 21);
        mask.put_pixel(10, 10, Luma([255]));

        let denoised = MedianDenoiser { kernel_size: 5 }
            .preprocess(&mask)
            .expect("Should denoise");
        assert!(denoised.pixels().all(|p| p.0[0] == 0));
    }
}

use image::{GrayImage, ImageBuffer, Luma, Rgba};
use imageproc::stats::histogram;

use crate::{VectorizeError, VectorizeResult};

/// Mask value for background pixels.
pub const BACKGROUND: u8 = 0;
/// Mask value for foreground (ink) pixels.
pub const FOREGROUND: u8 = 1;

/// Number of pixels in a `width` x `height` plane, rejecting empty or overflowing sizes.
pub fn pixel_count(width: u32, height: u32) -> VectorizeResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&n| n > 0)
        .ok_or(VectorizeError::InvalidDimensions { width, height })
}

/// Reserve an empty byte buffer able to hold `len` bytes without reallocating.
pub(crate) fn reserve_plane(len: usize) -> VectorizeResult<Vec<u8>> {
    let mut plane = Vec::new();
    plane.try_reserve_exact(len)?;
    Ok(plane)
}

/// Fixed-point BT.601-style luminance; the weights sum to 256.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 77 + g as u32 * 150 + b as u32 * 29) >> 8) as u8
}

/// Convert a tightly packed RGBA buffer to a grayscale image. Alpha is ignored.
pub fn to_grayscale(rgba: &[u8], width: u32, height: u32) -> VectorizeResult<GrayImage> {
    let count = pixel_count(width, height)?;
    let expected = count
        .checked_mul(4)
        .ok_or(VectorizeError::InvalidDimensions { width, height })?;
    if rgba.len() != expected {
        return Err(VectorizeError::BufferLength {
            expected,
            found: rgba.len(),
        });
    }

    let view: ImageBuffer<Rgba<u8>, &[u8]> =
        ImageBuffer::from_raw(width, height, rgba).ok_or(VectorizeError::BufferLength {
            expected,
            found: rgba.len(),
        })?;

    let mut gray = reserve_plane(count)?;
    gray.extend(view.pixels().map(|&Rgba([r, g, b, _])| luminance(r, g, b)));

    GrayImage::from_raw(width, height, gray).ok_or(VectorizeError::BufferLength {
        expected: count,
        found: 0,
    })
}

/// Compute the Otsu threshold of a grayscale image.
///
/// The returned level is the first intensity of the bright class, so
/// `gray < threshold` reproduces the variance-maximizing split exactly. Ties
/// keep the lowest split. An image with a single intensity has no split and
/// yields 0, which marks nothing as foreground.
///
/// `imageproc::contrast::otsu_level` is not used here: it returns 0 both for a
/// single-intensity image and for a real split below level 1, and callers need
/// to tell those apart.
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let hist = histogram(gray).channels[0];
    let total: u64 = hist.iter().map(|&c| u64::from(c)).sum();
    if total == 0 {
        return 0;
    }
    let sum: f64 = hist
        .iter()
        .enumerate()
        .map(|(level, &c)| level as f64 * f64::from(c))
        .sum();

    let mut sum_dark = 0.0;
    let mut weight_dark = 0u64;
    let mut max_variance = 0.0;
    let mut split: Option<usize> = None;

    for (level, &count) in hist.iter().enumerate() {
        weight_dark += u64::from(count);
        if weight_dark == 0 {
            continue;
        }
        let weight_bright = total - weight_dark;
        if weight_bright == 0 {
            break;
        }

        sum_dark += level as f64 * f64::from(count);
        let mean_dark = sum_dark / weight_dark as f64;
        let mean_bright = (sum - sum_dark) / weight_bright as f64;
        let diff = mean_dark - mean_bright;
        let variance = weight_dark as f64 * weight_bright as f64 * diff * diff;

        if variance > max_variance {
            max_variance = variance;
            split = Some(level);
        }
    }

    // `level` < 255 whenever the bright class is non-empty.
    split.map_or(0, |level| (level + 1) as u8)
}

/// Binarize a grayscale image: pixels darker than `threshold` become foreground.
pub fn binarize(gray: &GrayImage, threshold: u8) -> VectorizeResult<BinaryMask> {
    let (width, height) = gray.dimensions();
    let mut data = reserve_plane(gray.as_raw().len())?;
    data.extend(gray.as_raw().iter().map(|&g| {
        if g < threshold {
            FOREGROUND
        } else {
            BACKGROUND
        }
    }));
    BinaryMask::from_raw(width, height, data)
}

/// Count the pixels that [`binarize`] would mark as foreground.
pub fn count_foreground(gray: &GrayImage, threshold: u8) -> u64 {
    gray.as_raw().iter().filter(|&&g| g < threshold).count() as u64
}

/// A byte-per-pixel foreground mask with bounds-checked access.
///
/// Reads outside the image return [`BACKGROUND`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BinaryMask {
    /// Wrap raw mask bytes (non-zero = foreground). The length must equal `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> VectorizeResult<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(VectorizeError::BufferLength {
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a mask from a predicate over pixel coordinates.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> VectorizeResult<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        let count = pixel_count(width, height)?;
        let mut data = reserve_plane(count)?;
        for y in 0..height {
            for x in 0..width {
                data.push(if f(x, y) { FOREGROUND } else { BACKGROUND });
            }
        }
        Self::from_raw(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Flat index of `(x, y)`, or `None` when outside the image.
    #[inline]
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Mask value at `(x, y)`; [`BACKGROUND`] outside the image.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> u8 {
        match self.index(x, y) {
            Some(i) if self.data[i] != BACKGROUND => FOREGROUND,
            _ => BACKGROUND,
        }
    }

    #[inline]
    pub fn is_foreground(&self, x: i64, y: i64) -> bool {
        self.get(x, y) == FOREGROUND
    }

    pub fn foreground_count(&self) -> u64 {
        self.data.iter().filter(|&&v| v != BACKGROUND).count() as u64
    }

    /// Render the mask as an image: foreground black, background white.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.is_foreground(i64::from(x), i64::from(y)) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }
}

use serde::{Deserialize, Serialize};

/// An axis aligned 2D box in pixel coordinates.
///
/// The box covers `[xmin, xmax) x [ymin, ymax)`. The ordering of the corners
/// is not checked; an inverted box simply contains no pixel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoundingBox2d {
    /// Left edge, inclusive.
    pub xmin: f64,
    /// Top edge, inclusive.
    pub ymin: f64,
    /// Right edge, exclusive.
    pub xmax: f64,
    /// Bottom edge, exclusive.
    pub ymax: f64,
}

impl BoundingBox2d {
    /// Create a new box from its corners.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Check if a pixel lies in the box, upper bounds excluded.
    ///
    /// NaN pixels are never contained.
    #[inline]
    pub fn contains(&self, pixel: &[f64; 2]) -> bool {
        pixel[0] < self.xmax
            && pixel[0] >= self.xmin
            && pixel[1] < self.ymax
            && pixel[1] >= self.ymin
    }
}

impl From<[f64; 4]> for BoundingBox2d {
    fn from([xmin, ymin, xmax, ymax]: [f64; 4]) -> Self {
        Self::new(xmin, ymin, xmax, ymax)
    }
}

/// The shape of an image as `(height, width, channels)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageShape {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Number of channels.
    pub channels: usize,
}

impl ImageShape {
    /// The box spanning the whole image.
    pub fn bbox(&self) -> BoundingBox2d {
        BoundingBox2d::new(0.0, 0.0, self.width as f64, self.height as f64)
    }
}

impl From<(usize, usize, usize)> for ImageShape {
    fn from((height, width, channels): (usize, usize, usize)) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }
}

impl From<[usize; 3]> for ImageShape {
    fn from([height, width, channels]: [usize; 3]) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_contains_half_open() {
        let bbox = BoundingBox2d::from([10.0, 20.0, 30.0, 40.0]);
        assert!(bbox.contains(&[10.0, 20.0]));
        assert!(bbox.contains(&[29.999, 39.999]));
        assert!(!bbox.contains(&[30.0, 25.0]));
        assert!(!bbox.contains(&[15.0, 40.0]));
        assert!(!bbox.contains(&[9.999, 25.0]));
        assert!(!bbox.contains(&[f64::NAN, 25.0]));
        assert!(!bbox.contains(&[f64::INFINITY, 25.0]));
    }

    #[test]
    fn test_bbox_inverted_is_empty() {
        let bbox = BoundingBox2d::new(30.0, 40.0, 10.0, 20.0);
        assert!(!bbox.contains(&[20.0, 30.0]));
    }

    #[test]
    fn test_image_shape() {
        let shape = ImageShape::from((375, 1242, 3));
        assert_eq!(shape, ImageShape::from([375, 1242, 3]));
        assert_eq!(shape.bbox(), BoundingBox2d::new(0.0, 0.0, 1242.0, 375.0));
    }
}

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// Static axis-aligned rectangle containing every body.
///
/// `x` grows to the right and `y` grows downward, so `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Enclosure {
    /// Create an enclosure after validating that it has finite, positive extent.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self> {
        if !left.is_finite() || !top.is_finite() {
            return Err(Error::InvalidParam("enclosure origin must be finite".into()));
        }
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(Error::InvalidParam(
                "enclosure size must be finite and > 0".into(),
            ));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Lower and upper bound of the enclosure along `axis` (0 = x, 1 = y).
    #[inline]
    pub fn span(&self, axis: usize) -> (f64, f64) {
        if axis == 0 {
            (self.left, self.right())
        } else {
            (self.top, self.bottom())
        }
    }

    /// True if the box at `pos` with extent `size` lies inside the enclosure
    /// grown by `slack` on every side.
    pub fn contains_box(&self, pos: &[f64; DIM], size: &[f64; DIM], slack: f64) -> bool {
        (0..DIM).all(|k| {
            let (lo, hi) = self.span(k);
            pos[k] >= lo - slack && pos[k] + size[k] <= hi + slack
        })
    }
}

/// Strict overlap of two axis-aligned boxes; touching edges do not overlap.
pub fn boxes_intersect(
    a_pos: &[f64; DIM],
    a_size: &[f64; DIM],
    b_pos: &[f64; DIM],
    b_size: &[f64; DIM],
) -> bool {
    (0..DIM).all(|k| a_pos[k] < b_pos[k] + b_size[k] && b_pos[k] < a_pos[k] + a_size[k])
}

/// Strict overlap of a circle with an axis-aligned box.
pub fn circle_intersects_box(
    center: &[f64; DIM],
    radius: f64,
    b_pos: &[f64; DIM],
    b_size: &[f64; DIM],
) -> bool {
    let dist_sq: f64 = (0..DIM)
        .map(|k| {
            let nearest = center[k].clamp(b_pos[k], b_pos[k] + b_size[k]);
            let d = center[k] - nearest;
            d * d
        })
        .sum();
    dist_sq < radius * radius
}

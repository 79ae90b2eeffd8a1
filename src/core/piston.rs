use crate::core::enclosure::{Enclosure, DIM};
use crate::error::{Error, Result};

/// Scale applied to a molecule's kick before it is added to piston velocity.
pub const MOMENTUM_TRANSFER: f64 = 0.1;
/// Fraction of speed kept (with reversed sign) when the piston hits a wall.
pub const WALL_RESTITUTION: f64 = 0.5;
/// Per-tick velocity retention applied unconditionally.
pub const FRICTION: f64 = 0.98;

/// Coefficients governing how the piston responds to kicks, walls and friction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PistonParams {
    pub momentum_transfer: f64,
    pub wall_restitution: f64,
    pub friction: f64,
}

impl Default for PistonParams {
    fn default() -> Self {
        Self {
            momentum_transfer: MOMENTUM_TRANSFER,
            wall_restitution: WALL_RESTITUTION,
            friction: FRICTION,
        }
    }
}

/// The single free-moving rectangular body.
///
/// Fields:
/// - `r`: top-left corner [x, y]
/// - `v`: velocity [vx, vy] in units per tick
/// - `width`, `height`: fixed extent (> 0)
#[derive(Debug, Clone)]
pub struct Piston {
    /// Top-left corner (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    pub width: f64,
    pub height: f64,
    params: PistonParams,
}

impl Piston {
    /// Create a resting piston after validating its size.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `width`/`height` are non-positive or `r` is not finite.
    pub fn new(r: [f64; DIM], width: f64, height: f64, params: PistonParams) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(Error::InvalidParam(
                "piston size must be finite and > 0".into(),
            ));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("piston position must be finite".into()));
        }
        Ok(Self {
            r,
            v: [0.0; DIM],
            width,
            height,
            params,
        })
    }

    /// Create a resting piston centred in `enclosure`.
    pub fn centered(
        enclosure: &Enclosure,
        width: f64,
        height: f64,
        params: PistonParams,
    ) -> Result<Self> {
        let r = [
            enclosure.left + (enclosure.width - width) / 2.0,
            enclosure.top + (enclosure.height - height) / 2.0,
        ];
        Self::new(r, width, height, params)
    }

    #[inline]
    pub fn size(&self) -> [f64; DIM] {
        [self.width, self.height]
    }

    /// Magnitude of the velocity.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.v.iter().map(|&c| c * c).sum::<f64>().sqrt()
    }

    /// Add a scaled kick to the velocity. No bounds checking.
    #[inline]
    pub fn apply_force(&mut self, fx: f64, fy: f64) {
        self.v[0] += fx * self.params.momentum_transfer;
        self.v[1] += fy * self.params.momentum_transfer;
    }

    /// Advance by one tick: lossy wall reflection on the tentative position,
    /// then friction, then commit using the post-friction velocity.
    pub fn advance(&mut self, enclosure: &Enclosure) {
        let size = self.size();
        for k in 0..DIM {
            let tentative = self.r[k] + self.v[k];
            let (lo, hi) = enclosure.span(k);
            if tentative <= lo || tentative + size[k] >= hi {
                self.v[k] = -self.v[k] * self.params.wall_restitution;
            }
        }
        for k in 0..DIM {
            self.v[k] *= self.params.friction;
            self.r[k] += self.v[k];
        }
    }
}

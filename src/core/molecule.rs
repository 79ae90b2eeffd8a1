use crate::core::enclosure::{circle_intersects_box, Enclosure, DIM};
use crate::core::piston::Piston;
use crate::error::{Error, Result};

/// A gas molecule: a circle moving ballistically inside the enclosure.
///
/// Fields:
/// - `id`: stable identifier (creation order)
/// - `r`: top-left corner of the bounding square [x, y]
/// - `v`: velocity [dx, dy] in units per tick
/// - `radius`: circle radius (> 0)
#[derive(Debug, Clone)]
pub struct Molecule {
    /// Stable molecule identifier.
    pub id: u32,
    /// Top-left of the bounding square (x, y).
    pub r: [f64; DIM],
    /// Velocity (dx, dy).
    pub v: [f64; DIM],
    /// Circle radius (> 0).
    pub radius: f64,
}

impl Molecule {
    /// Create a new molecule after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` is non-positive or any component is NaN/inf.
    pub fn new(id: u32, r: [f64; DIM], v: [f64; DIM], radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self { id, r, v, radius })
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    #[inline]
    pub fn center(&self) -> [f64; DIM] {
        [self.r[0] + self.radius, self.r[1] + self.radius]
    }

    /// True if the circle overlaps the piston rectangle.
    #[inline]
    pub fn touches(&self, piston: &Piston) -> bool {
        circle_intersects_box(&self.center(), self.radius, &piston.r, &piston.size())
    }

    /// Kinetic energy for unit mass: 1/2 |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.v.iter().map(|&c| c * c).sum::<f64>()
    }

    /// Advance by one tick.
    ///
    /// Walls are tested against the tentative position and only flip the
    /// velocity; the position is never clamped. On piston contact both
    /// components flip and the piston is kicked with the negation of the
    /// flipped velocity, i.e. along the pre-contact velocity.
    pub fn advance(&mut self, enclosure: &Enclosure, piston: &mut Piston) {
        let d = self.diameter();
        for k in 0..DIM {
            let tentative = self.r[k] + self.v[k];
            let (lo, hi) = enclosure.span(k);
            if tentative <= lo || tentative + d >= hi {
                self.v[k] = -self.v[k];
            }
        }

        if self.touches(piston) {
            self.v[0] = -self.v[0];
            self.v[1] = -self.v[1];
            piston.apply_force(-self.v[0], -self.v[1]);
        }

        for k in 0..DIM {
            self.r[k] += self.v[k];
        }
    }
}

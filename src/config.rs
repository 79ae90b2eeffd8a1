//! Scene and physics configuration.
//!
//! [`SimConfig::default`] reproduces the classic scene: a 200×100 piston
//! centred in a 600×110 enclosure with 50 molecules of radius 5. Every
//! field can be overridden from TOML; missing keys keep their defaults.
//!
//! ```toml
//! molecule_count = 80
//! seed = 7
//!
//! [piston]
//! width = 150.0
//! height = 100.0
//! friction = 0.95
//! ```

use crate::core::piston::{FRICTION, MOMENTUM_TRANSFER, WALL_RESTITUTION};
use crate::core::{Enclosure, PistonParams, DIM};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Piston geometry and response coefficients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PistonConfig {
    pub width: f64,
    pub height: f64,
    /// Scale applied to each molecule kick.
    pub momentum_transfer: f64,
    /// Speed kept (and reversed) on wall contact.
    pub wall_restitution: f64,
    /// Per-tick velocity retention.
    pub friction: f64,
}

impl Default for PistonConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 100.0,
            momentum_transfer: MOMENTUM_TRANSFER,
            wall_restitution: WALL_RESTITUTION,
            friction: FRICTION,
        }
    }
}

impl PistonConfig {
    pub fn params(&self) -> PistonParams {
        PistonParams {
            momentum_transfer: self.momentum_transfer,
            wall_restitution: self.wall_restitution,
            friction: self.friction,
        }
    }
}

/// Enclosure placement; its size is derived from the piston size plus margins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclosureConfig {
    pub left: f64,
    /// Vertical centre line of the enclosure.
    pub center_y: f64,
    pub extra_width: f64,
    pub extra_height: f64,
}

impl Default for EnclosureConfig {
    fn default() -> Self {
        Self {
            left: 100.0,
            center_y: 250.0,
            extra_width: 400.0,
            extra_height: 10.0,
        }
    }
}

/// Full simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub piston: PistonConfig,
    pub enclosure: EnclosureConfig,
    pub molecule_count: usize,
    pub molecule_radius: f64,
    /// Initial velocity components are drawn from [-initial_speed, initial_speed].
    pub initial_speed: f64,
    /// Spawn window inset from the left/top walls.
    pub spawn_margin_near: f64,
    /// Spawn window inset from the right/bottom walls.
    pub spawn_margin_far: f64,
    /// Resample budget per molecule before giving up on placement.
    pub max_placement_attempts: usize,
    /// Nominal driver cadence in milliseconds.
    pub tick_interval_ms: u64,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            piston: PistonConfig::default(),
            enclosure: EnclosureConfig::default(),
            molecule_count: 50,
            molecule_radius: 5.0,
            initial_speed: 2.0,
            spawn_margin_near: 10.0,
            spawn_margin_far: 20.0,
            max_placement_attempts: 100_000,
            tick_interval_ms: 16,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: SimConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Enclosure rectangle derived from the piston size and margins.
    pub fn enclosure(&self) -> Result<Enclosure> {
        let width = self.piston.width + self.enclosure.extra_width;
        let height = self.piston.height + self.enclosure.extra_height;
        Enclosure::new(
            self.enclosure.left,
            self.enclosure.center_y - height / 2.0,
            width,
            height,
        )
    }

    /// Corners of the region molecule top-left positions are sampled from.
    pub fn spawn_window(&self, enclosure: &Enclosure) -> ([f64; DIM], [f64; DIM]) {
        let lo = [
            enclosure.left + self.spawn_margin_near,
            enclosure.top + self.spawn_margin_near,
        ];
        let hi = [
            enclosure.right() - self.spawn_margin_far,
            enclosure.bottom() - self.spawn_margin_far,
        ];
        (lo, hi)
    }

    /// Check every value before a scene is built from it.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("piston.width", self.piston.width),
            ("piston.height", self.piston.height),
            ("molecule_radius", self.molecule_radius),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::InvalidParam(format!("{name} must be finite and > 0")));
            }
        }
        let non_negative = [
            ("enclosure.extra_width", self.enclosure.extra_width),
            ("enclosure.extra_height", self.enclosure.extra_height),
            ("initial_speed", self.initial_speed),
            ("spawn_margin_near", self.spawn_margin_near),
            ("spawn_margin_far", self.spawn_margin_far),
            ("piston.momentum_transfer", self.piston.momentum_transfer),
            ("piston.wall_restitution", self.piston.wall_restitution),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !(2.0 * self.initial_speed).is_finite() {
            return Err(Error::InvalidParam(
                "initial_speed too large: velocity range is not finite".into(),
            ));
        }
        if !self.enclosure.left.is_finite() || !self.enclosure.center_y.is_finite() {
            return Err(Error::InvalidParam("enclosure origin must be finite".into()));
        }
        if !(self.piston.friction.is_finite()
            && self.piston.friction > 0.0
            && self.piston.friction <= 1.0)
        {
            return Err(Error::InvalidParam("piston.friction must be in (0, 1]".into()));
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidParam("max_placement_attempts must be > 0".into()));
        }
        if self.molecule_count > u32::MAX as usize {
            return Err(Error::InvalidParam("molecule_count too large".into()));
        }

        let enclosure = self.enclosure()?;
        let inset = self.spawn_margin_near + self.spawn_margin_far;
        if enclosure.width < inset || enclosure.height < inset {
            return Err(Error::InvalidParam(format!(
                "enclosure {}x{} leaves no spawn window with margins {} and {}",
                enclosure.width, enclosure.height, self.spawn_margin_near, self.spawn_margin_far
            )));
        }
        let (lo, hi) = self.spawn_window(&enclosure);
        for k in 0..DIM {
            let width = hi[k] - lo[k];
            if !lo[k].is_finite() || !hi[k].is_finite() || !width.is_finite() {
                return Err(Error::InvalidParam(format!(
                    "spawn window along axis {k} is not finite: [{}, {}]",
                    lo[k], hi[k]
                )));
            }
        }
        if self.piston.width > enclosure.width || self.piston.height > enclosure.height {
            return Err(Error::InvalidParam(
                "piston does not fit inside the enclosure".into(),
            ));
        }
        Ok(())
    }
}

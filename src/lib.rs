//! Real-time 2D gas simulation: molecules bouncing inside a rigid enclosure
//! and kicking a single free piston.
//!
//! ```no_run
//! use pistonsim::config::SimConfig;
//! use pistonsim::core::Simulation;
//! use pistonsim::event_log::NullEventLog;
//!
//! # fn main() -> pistonsim::error::Result<()> {
//! let mut sim = Simulation::new(&SimConfig::default().with_seed(42), &mut NullEventLog)?;
//! sim.run(600);
//! println!("piston at {:?}", sim.piston.r);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod event_log;

#[cfg(feature = "python")]
mod python;

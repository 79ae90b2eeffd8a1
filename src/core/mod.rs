//! Core physics for the piston simulation.
//!
//! Bodies own their per-tick integration and wall-bounce rules; the
//! [`Simulation`] owns every body and sequences them once per tick.

pub mod enclosure;
pub mod molecule;
pub mod piston;
pub mod sim;

pub use enclosure::{Enclosure, DIM};
pub use molecule::Molecule;
pub use piston::{Piston, PistonParams};
pub use sim::Simulation;

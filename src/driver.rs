//! Fixed-cadence driver and render snapshots.

use crate::config::SimConfig;
use crate::core::{Enclosure, Simulation, DIM};
use crate::error::Result;
use crate::event_log::EventSink;
use std::time::{Duration, Instant};

/// What a renderer needs to draw one molecule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoleculeView {
    pub position: [f64; DIM],
    pub velocity: [f64; DIM],
    pub radius: f64,
}

/// What a renderer needs to draw the piston.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PistonView {
    pub position: [f64; DIM],
    pub velocity: [f64; DIM],
    pub width: f64,
    pub height: f64,
}

/// Owned copy of the drawable state after a tick.
///
/// Frames share nothing with the simulation and can be sent to a render thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub enclosure: Enclosure,
    pub piston: PistonView,
    pub molecules: Vec<MoleculeView>,
}

impl Frame {
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            tick: sim.tick_count(),
            enclosure: *sim.enclosure(),
            piston: PistonView {
                position: sim.piston.r,
                velocity: sim.piston.v,
                width: sim.piston.width,
                height: sim.piston.height,
            },
            molecules: sim
                .molecules
                .iter()
                .map(|m| MoleculeView {
                    position: m.r,
                    velocity: m.v,
                    radius: m.radius,
                })
                .collect(),
        }
    }
}

/// How the driver spaces ticks in wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep out the remainder of each interval.
    RealTime(Duration),
    /// Tick back to back.
    Unpaced,
}

/// Calls [`Simulation::tick`] once per frame and hands each frame to a callback.
pub struct Driver<L: EventSink> {
    sim: Simulation,
    log: L,
}

impl<L: EventSink> Driver<L> {
    /// Build the scene from `config`, recording lifecycle events into `log`.
    pub fn new(config: &SimConfig, mut log: L) -> Result<Self> {
        let sim = Simulation::new(config, &mut log)?;
        Ok(Self { sim, log })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_parts(self) -> (Simulation, L) {
        (self.sim, self.log)
    }

    /// Run `frames` ticks. `on_frame` sees a snapshot after every tick and
    /// may return `false` to stop early. Returns the number of ticks run.
    pub fn run<F>(&mut self, frames: u64, pacing: Pacing, mut on_frame: F) -> u64
    where
        F: FnMut(&Frame) -> bool,
    {
        if self.sim.tick_count() == 0 {
            self.log.record("Simulation started");
        }
        let mut done = 0u64;
        while done < frames {
            let started = Instant::now();
            self.sim.tick();
            done += 1;
            let keep_going = on_frame(&Frame::capture(&self.sim));
            if !keep_going {
                break;
            }
            if let Pacing::RealTime(interval) = pacing {
                if let Some(rest) = interval.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }
        self.log
            .record(&format!("Simulation stopped after {} ticks", self.sim.tick_count()));
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_log::MemoryEventLog;

    #[test]
    fn frames_track_ticks() -> Result<()> {
        let cfg = SimConfig::default().with_seed(11);
        let mut driver = Driver::new(&cfg, MemoryEventLog::default())?;
        let mut seen = Vec::new();
        let ran = driver.run(5, Pacing::Unpaced, |f| {
            seen.push(f.tick);
            assert_eq!(f.molecules.len(), 50);
            true
        });
        assert_eq!(ran, 5);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        let msgs = &driver.log().messages;
        assert_eq!(msgs[3], "Simulation started");
        assert_eq!(msgs[4], "Simulation stopped after 5 ticks");
        Ok(())
    }

    #[test]
    fn start_recorded_once_across_runs() -> Result<()> {
        let cfg = SimConfig::default().with_seed(6);
        let mut driver = Driver::new(&cfg, MemoryEventLog::default())?;
        driver.run(2, Pacing::Unpaced, |_| true);
        driver.run(3, Pacing::Unpaced, |_| true);
        let msgs = &driver.log().messages;
        let starts = msgs.iter().filter(|m| *m == "Simulation started").count();
        assert_eq!(starts, 1);
        assert_eq!(msgs.last().map(String::as_str), Some("Simulation stopped after 5 ticks"));
        Ok(())
    }

    #[test]
    fn callback_can_stop_early() -> Result<()> {
        let cfg = SimConfig::default().with_seed(2);
        let mut driver = Driver::new(&cfg, MemoryEventLog::default())?;
        let ran = driver.run(100, Pacing::Unpaced, |f| f.tick < 3);
        assert_eq!(ran, 3);
        assert_eq!(driver.simulation().tick_count(), 3);
        Ok(())
    }

    #[test]
    fn real_time_pacing_waits() -> Result<()> {
        let cfg = SimConfig::default().with_seed(4);
        let mut driver = Driver::new(&cfg, MemoryEventLog::default())?;
        let start = Instant::now();
        driver.run(3, Pacing::RealTime(Duration::from_millis(5)), |_| true);
        assert!(start.elapsed() >= Duration::from_millis(15));
        Ok(())
    }

    #[test]
    fn frame_is_detached_copy() -> Result<()> {
        let cfg = SimConfig::default().with_seed(8);
        let (mut sim, _) = Driver::new(&cfg, MemoryEventLog::default())?.into_parts();
        let before = Frame::capture(&sim);
        sim.run(20);
        assert_eq!(before.tick, 0);
        assert_eq!(before.piston.position, [300.0, 200.0]);
        assert_eq!(before.enclosure, *sim.enclosure());
        Ok(())
    }
}

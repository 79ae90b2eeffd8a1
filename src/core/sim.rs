use crate::config::SimConfig;
use crate::core::enclosure::{boxes_intersect, Enclosure, DIM};
use crate::core::{Molecule, Piston};
use crate::error::{Error, Result};
use crate::event_log::EventSink;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Fixed-step simulation: a population of molecules and one piston inside a
/// static enclosure.
///
/// The simulation is the only owner of body state. Population is fixed at
/// construction; `tick` never adds or removes molecules.
#[derive(Debug, Clone)]
pub struct Simulation {
    enclosure: Enclosure,
    pub molecules: Vec<Molecule>,
    pub piston: Piston,
    ticks: u64,
}

impl Simulation {
    /// Build the scene described by `config`.
    ///
    /// The piston is centred in the enclosure. Molecules are placed by
    /// rejection sampling inside the spawn window until their bounding
    /// square clears the piston; initial velocity components are uniform in
    /// `[-initial_speed, initial_speed]`.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if the configuration does not validate.
    /// - `Error::Configuration` if a molecule cannot be placed within
    ///   `max_placement_attempts` samples.
    pub fn new(config: &SimConfig, log: &mut dyn EventSink) -> Result<Self> {
        config.validate()?;

        let enclosure = config.enclosure()?;
        log.record("Static cylinder created");

        let piston = Piston::centered(
            &enclosure,
            config.piston.width,
            config.piston.height,
            config.piston.params(),
        )?;
        log.record(&format!(
            "Dynamic solid object created at ({:?}, {:?})",
            piston.r[0], piston.r[1]
        ));

        let mut rng: StdRng = match config.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let radius = config.molecule_radius;
        let side = [2.0 * radius; DIM];
        let (lo, hi) = config.spawn_window(&enclosure);
        let speed = config.initial_speed;

        let mut molecules: Vec<Molecule> = Vec::with_capacity(config.molecule_count);
        for id in 0..(config.molecule_count as u32) {
            let mut attempts = 0usize;
            let r = loop {
                if attempts >= config.max_placement_attempts {
                    return Err(Error::Configuration(format!(
                        "failed to place molecule {} clear of the piston after {} attempts; \
                         shrink the piston or enlarge the enclosure",
                        id, attempts
                    )));
                }
                attempts += 1;
                let mut r = [0.0_f64; DIM];
                for (k, r_k) in r.iter_mut().enumerate() {
                    *r_k = rng.random_range(lo[k]..=hi[k]);
                }
                if !boxes_intersect(&r, &side, &piston.r, &piston.size()) {
                    break r;
                }
            };

            let mut v = [0.0_f64; DIM];
            v.iter_mut()
                .for_each(|x| *x = rng.random_range(-speed..=speed));

            molecules.push(Molecule::new(id, r, v, radius)?);
        }
        log.record("Gas molecules created and positioned");
        log::debug!(
            "scene ready: {} molecules, enclosure {:?}, piston at {:?}",
            molecules.len(),
            enclosure,
            piston.r
        );

        Ok(Self {
            enclosure,
            molecules,
            piston,
            ticks: 0,
        })
    }

    /// Assemble a simulation from explicit bodies (no placement checks).
    pub fn from_parts(enclosure: Enclosure, piston: Piston, molecules: Vec<Molecule>) -> Self {
        Self {
            enclosure,
            molecules,
            piston,
            ticks: 0,
        }
    }

    /// Advance every body by one tick.
    ///
    /// Molecules move first, in creation order, each seeing the piston as
    /// left by the molecules before it; the piston moves last.
    pub fn tick(&mut self) {
        for m in &mut self.molecules {
            m.advance(&self.enclosure, &mut self.piston);
        }
        self.piston.advance(&self.enclosure);
        self.ticks += 1;
    }

    /// Run `n` ticks back to back.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    pub fn enclosure(&self) -> &Enclosure {
        &self.enclosure
    }

    /// Ticks performed since construction.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn num_molecules(&self) -> usize {
        self.molecules.len()
    }

    /// Molecule positions (top-left of bounding square).
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.molecules.iter().map(|m| m.r).collect()
    }

    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.molecules.iter().map(|m| m.v).collect()
    }

    /// Total molecular kinetic energy (unit mass).
    pub fn kinetic_energy(&self) -> f64 {
        self.molecules.iter().map(|m| m.kinetic_energy()).sum()
    }

    /// Verify that every bounding box lies inside the enclosure grown by `slack`.
    ///
    /// Diagnostic only; `tick` never calls it.
    pub fn check_containment(&self, slack: f64) -> Result<()> {
        for m in &self.molecules {
            let d = m.diameter();
            if !self.enclosure.contains_box(&m.r, &[d, d], slack) {
                return Err(Error::OutOfBounds(format!(
                    "molecule {} at {:?} after tick {}",
                    m.id, m.r, self.ticks
                )));
            }
        }
        if !self
            .enclosure
            .contains_box(&self.piston.r, &self.piston.size(), slack)
        {
            return Err(Error::OutOfBounds(format!(
                "piston at {:?} after tick {}",
                self.piston.r, self.ticks
            )));
        }
        Ok(())
    }
}

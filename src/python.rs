use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::SimConfig;
use crate::core::{Simulation, DIM};
use crate::event_log::{EventSink, FileEventLog, NullEventLog};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_array(rows: &[[f64; DIM]]) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((rows.len(), DIM));
    for (i, row) in rows.iter().enumerate() {
        for k in 0..DIM {
            arr[[i, k]] = row[k];
        }
    }
    arr
}

/// Python-facing wrapper around the Rust [`Simulation`].
///
/// API:
/// - __new__(seed=None, config=None, log_path=None)
/// - tick(), run(n)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
/// - get_radii() -> list[float]
/// - get_piston() -> (x, y, width, height, vx, vy)
/// - get_enclosure() -> (left, top, width, height)
#[pyclass]
pub struct PistonSim {
    sim: Simulation,
}

#[pymethods]
impl PistonSim {
    /// Build a scene. `config` is an optional TOML document; `log_path`
    /// receives timestamped lifecycle lines.
    ///
    /// Errors: raises ValueError on invalid configuration or failed placement.
    #[new]
    #[pyo3(signature = (seed=None, config=None, log_path=None))]
    fn new(seed: Option<u64>, config: Option<String>, log_path: Option<String>) -> PyResult<Self> {
        let mut cfg = match config {
            Some(text) => SimConfig::from_toml_str(&text).map_err(py_err)?,
            None => SimConfig::default(),
        };
        if seed.is_some() {
            cfg.seed = seed;
        }
        let mut sink: Box<dyn EventSink> = match log_path {
            Some(p) => Box::new(FileEventLog::new(p)),
            None => Box::new(NullEventLog),
        };
        let sim = Simulation::new(&cfg, sink.as_mut()).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance one tick.
    fn tick(&mut self) {
        self.sim.tick();
    }

    /// Advance `n` ticks (releases the GIL during computation).
    fn run(&mut self, py: Python<'_>, n: u64) {
        py.detach(|| self.sim.run(n));
    }

    fn tick_count(&self) -> u64 {
        self.sim.tick_count()
    }

    fn get_positions<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        to_array(&self.sim.positions()).into_pyarray(py)
    }

    fn get_velocities<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        to_array(&self.sim.velocities()).into_pyarray(py)
    }

    fn get_radii(&self) -> Vec<f64> {
        self.sim.molecules.iter().map(|m| m.radius).collect()
    }

    fn get_piston(&self) -> (f64, f64, f64, f64, f64, f64) {
        let p = &self.sim.piston;
        (p.r[0], p.r[1], p.width, p.height, p.v[0], p.v[1])
    }

    fn get_enclosure(&self) -> (f64, f64, f64, f64) {
        let e = self.sim.enclosure();
        (e.left, e.top, e.width, e.height)
    }

    fn get_kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }
}

/// The pistonsim Python module entry point.
#[pymodule]
fn pistonsim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PistonSim>()?;
    Ok(())
}

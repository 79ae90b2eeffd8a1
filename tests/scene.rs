use pistonsim::config::SimConfig;
use pistonsim::core::enclosure::boxes_intersect;
use pistonsim::core::Simulation;
use pistonsim::error::{Error, Result};
use pistonsim::event_log::{MemoryEventLog, NullEventLog};

/// Spawned molecules never overlap the piston, for a spread of seeds.
#[test]
fn no_overlap_at_spawn() -> Result<()> {
    for seed in [0_u64, 1, 7, 42, 1234, 98765] {
        let sim = Simulation::new(&SimConfig::default().with_seed(seed), &mut NullEventLog)?;
        let p = &sim.piston;
        for m in &sim.molecules {
            let d = m.diameter();
            assert!(
                !boxes_intersect(&m.r, &[d, d], &p.r, &p.size()),
                "seed {seed}: molecule {} at {:?} overlaps piston",
                m.id,
                m.r
            );
        }
    }
    Ok(())
}

/// Same seed, same scene.
#[test]
fn seeded_initialization_is_reproducible() -> Result<()> {
    let cfg = SimConfig::default().with_seed(31337);
    let a = Simulation::new(&cfg, &mut NullEventLog)?;
    let b = Simulation::new(&cfg, &mut NullEventLog)?;
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.velocities(), b.velocities());

    let c = Simulation::new(&SimConfig::default().with_seed(31338), &mut NullEventLog)?;
    assert_ne!(a.positions(), c.positions());
    Ok(())
}

#[test]
fn unseeded_scene_still_valid() -> Result<()> {
    let sim = Simulation::new(&SimConfig::default(), &mut NullEventLog)?;
    assert_eq!(sim.num_molecules(), 50);
    sim.check_containment(0.0)?;
    Ok(())
}

#[test]
fn lifecycle_events_recorded_in_order() -> Result<()> {
    let mut log = MemoryEventLog::default();
    Simulation::new(&SimConfig::default().with_seed(3), &mut log)?;
    assert_eq!(log.messages.len(), 3);
    assert_eq!(log.messages[0], "Static cylinder created");
    assert!(log.messages[1].starts_with("Dynamic solid object created at ("));
    assert_eq!(log.messages[2], "Gas molecules created and positioned");
    Ok(())
}

/// A piston filling the enclosure leaves nowhere to spawn: placement gives up.
#[test]
fn unplaceable_scene_fails_before_ticking() {
    let cfg = SimConfig::from_toml_str(
        r#"
        max_placement_attempts = 2000
        seed = 5

        [enclosure]
        extra_width = 0.0
        extra_height = 0.0
        "#,
    );
    let cfg = match cfg {
        Ok(c) => c,
        Err(e) => panic!("config should parse: {e}"),
    };
    let mut log = MemoryEventLog::default();
    let err = Simulation::new(&cfg, &mut log).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(!log
        .messages
        .iter()
        .any(|m| m == "Gas molecules created and positioned"));
}

#[test]
fn custom_population_and_radius() -> Result<()> {
    let cfg = SimConfig::from_toml_str(
        r#"
        molecule_count = 120
        molecule_radius = 2.5
        initial_speed = 1.0
        seed = 77
        "#,
    )?;
    let sim = Simulation::new(&cfg, &mut NullEventLog)?;
    assert_eq!(sim.num_molecules(), 120);
    for m in &sim.molecules {
        assert_eq!(m.radius, 2.5);
        assert!(m.v.iter().all(|c| c.abs() <= 1.0));
    }
    Ok(())
}

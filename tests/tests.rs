use plsim::simulation::engine::{should_tick, DriverState, FrameDriver, FrameOutcome, FrameScheduler};
use plsim::simulation::forces::{apply_rule, cutoff_radius, pair_force, RuleSet};
use plsim::simulation::integrator::{update_velocity, IntegrationMode};
use plsim::simulation::params::Parameters;
use plsim::simulation::presets::Preset;
use plsim::simulation::scenario::Scenario;
use plsim::simulation::states::{Bounds, GroupId, NVec2, Particle, ParticleColor, ParticleSystem};
use plsim::visualization::renderer::{Background, Surface};
use plsim::{ConfigError, ScenarioConfig};

use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f64 = 1e-12;

/// 800x600 surface: diagonal 1000, so the default cutoff is 160
pub fn test_bounds() -> Bounds {
    Bounds::new(800.0, 600.0)
}

/// Parameters with the cutoff stretched to the whole diagonal
pub fn wide_params() -> Parameters {
    Parameters {
        interaction_fraction: 1.0,
        ..Parameters::default()
    }
}

/// One red and one blue particle at rest
pub fn red_blue(red: (f64, f64), blue: (f64, f64)) -> (ParticleSystem, GroupId, GroupId) {
    let mut sys = ParticleSystem::new();
    let r = sys.add_group(ParticleColor::Red, vec![Particle::at(red.0, red.1, ParticleColor::Red)]);
    let b = sys.add_group(ParticleColor::Blue, vec![Particle::at(blue.0, blue.1, ParticleColor::Blue)]);
    (sys, r, b)
}

fn assert_close(actual: NVec2, expected: NVec2) {
    assert!((actual - expected).norm() < EPS, "expected {:?}, got {:?}", expected, actual);
}

// ==================================================================================
// Rule engine tests
// ==================================================================================

#[test]
fn cutoff_is_fraction_of_diagonal() {
    let p = Parameters::default();
    let r = cutoff_radius(test_bounds(), p.interaction_fraction);
    assert!((r - 160.0).abs() < 1e-9, "cutoff {}", r);
}

#[test]
fn pairs_at_or_beyond_cutoff_are_untouched() {
    let p = Parameters::default();
    for gap in [160.0, 161.0, 300.0] {
        let (mut sys, r, b) = red_blue((100.0, 100.0), (100.0 + gap, 100.0));
        let before = sys.particles.clone();

        apply_rule(&mut sys, test_bounds(), &p, r, b, -1.0, IntegrationMode::Damped);
        apply_rule(&mut sys, test_bounds(), &p, b, r, -1.0, IntegrationMode::Additive);

        assert_eq!(sys.particles, before, "gap {} moved particles", gap);
    }
}

#[test]
fn zero_coefficient_is_a_no_op() {
    let p = Parameters::default();
    for mode in [IntegrationMode::Damped, IntegrationMode::Additive] {
        let (mut sys, r, b) = red_blue((100.0, 100.0), (110.0, 105.0));
        let before = sys.particles.clone();
        apply_rule(&mut sys, test_bounds(), &p, r, b, 0.0, mode);
        assert_eq!(sys.particles, before);
    }
}

#[test]
fn coincident_particles_are_skipped() {
    let a = Particle::at(5.0, 5.0, ParticleColor::Red);
    let b = Particle::at(5.0, 5.0, ParticleColor::Blue);
    assert_eq!(pair_force(&a, &b, -1.0, 100.0), None);

    let (mut sys, r, b) = red_blue((5.0, 5.0), (5.0, 5.0));
    let before = sys.particles.clone();
    apply_rule(&mut sys, test_bounds(), &Parameters::default(), r, b, 3.0, IntegrationMode::Damped);
    assert_eq!(sys.particles, before);
}

#[test]
fn velocity_update_modes() {
    let v = NVec2::new(0.4, -1.0);
    let f = NVec2::new(2.0, 3.0);
    assert_close(update_velocity(v, f, IntegrationMode::Damped, 0.5), (v + f) * 0.5);
    assert_close(update_velocity(v, f, IntegrationMode::Additive, 0.5), v + f * 0.5);
}

#[test]
fn red_blue_end_to_end_damped() {
    let (mut sys, r, b) = red_blue((0.0, 0.0), (10.0, 0.0));
    apply_rule(&mut sys, test_bounds(), &wide_params(), r, b, -1.0, IntegrationMode::Damped);

    // d = 10, force = -0.1, applied x = -0.1 * (0 - 10) = 1.0
    let red = sys.members(r)[0];
    assert_close(red.v, NVec2::new(0.5, 0.0));
    assert_close(red.x, NVec2::new(0.5, 0.0));

    // only the source group moves
    assert_eq!(sys.members(b)[0], Particle::at(10.0, 0.0, ParticleColor::Blue));
}

#[test]
fn red_blue_end_to_end_with_prior_velocity() {
    for (mode, expected_v) in [(IntegrationMode::Damped, 0.6), (IntegrationMode::Additive, 0.7)] {
        let (mut sys, r, b) = red_blue((0.0, 0.0), (10.0, 0.0));
        sys.particles[0].v = NVec2::new(0.2, 0.0);

        apply_rule(&mut sys, test_bounds(), &wide_params(), r, b, -1.0, mode);

        let red = sys.members(r)[0];
        assert_close(red.v, NVec2::new(expected_v, 0.0));
        assert_close(red.x, NVec2::new(expected_v, 0.0));
    }
}

#[test]
fn additive_accumulates_across_rules_in_a_tick() {
    let run = |mode| {
        let (mut sys, r, b) = red_blue((0.0, 0.0), (10.0, 0.0));
        let rules = RuleSet::new(mode).with(r, b, -1.0).with(r, b, -1.0);
        rules.apply(&mut sys, test_bounds(), &wide_params());
        sys.members(r)[0]
    };

    // second contribution is again (1, 0): |f| = |g| under the 1/d law
    let damped = run(IntegrationMode::Damped);
    assert_close(damped.v, NVec2::new(0.75, 0.0));
    assert_close(damped.x, NVec2::new(1.25, 0.0));

    let additive = run(IntegrationMode::Additive);
    assert_close(additive.v, NVec2::new(1.0, 0.0));
    assert_close(additive.x, NVec2::new(1.5, 0.0));
}

#[test]
fn bounce_inverts_x_without_clamping() {
    // g = 4 pushes red left by 2 px, past the left wall
    let (mut sys, r, b) = red_blue((1.0, 50.0), (11.0, 50.0));
    apply_rule(&mut sys, test_bounds(), &wide_params(), r, b, 4.0, IntegrationMode::Damped);

    let red = sys.members(r)[0];
    assert_close(red.x, NVec2::new(-1.0, 50.0));
    assert_close(red.v, NVec2::new(2.0, 0.0));
}

#[test]
fn bounce_inverts_y_independently() {
    let (mut sys, r, b) = red_blue((50.0, 599.5), (50.0, 589.5));
    apply_rule(&mut sys, test_bounds(), &wide_params(), r, b, 4.0, IntegrationMode::Damped);

    let red = sys.members(r)[0];
    assert_close(red.x, NVec2::new(50.0, 601.5));
    assert_close(red.v, NVec2::new(0.0, -2.0));
}

#[test]
fn single_particle_group_does_not_interact_with_itself() {
    let (mut sys, r, _) = red_blue((30.0, 30.0), (500.0, 500.0));
    let before = sys.particles.clone();
    apply_rule(&mut sys, test_bounds(), &wide_params(), r, r, -5.0, IntegrationMode::Additive);
    assert_eq!(sys.particles, before);
}

#[test]
fn positions_update_inside_the_pair_loop() {
    // p0 moves first and overtakes p1, so p1 is then pushed the other way
    let mut sys = ParticleSystem::new();
    let reds = sys.add_group(
        ParticleColor::Red,
        vec![
            Particle::at(100.0, 100.0, ParticleColor::Red),
            Particle::at(100.3, 100.0, ParticleColor::Red),
        ],
    );
    apply_rule(&mut sys, test_bounds(), &wide_params(), reds, reds, -1.0, IntegrationMode::Damped);

    let m = sys.members(reds);
    assert!((m[0].x.x - 100.5).abs() < 1e-9);
    assert!((m[1].x.x - 100.8).abs() < 1e-9, "p1 at {}", m[1].x.x);
}

// ==================================================================================
// Group factory tests
// ==================================================================================

#[test]
fn create_group_spawns_in_bounds_at_rest() {
    let bounds = Bounds::new(300.0, 200.0);
    let mut rng = StdRng::seed_from_u64(42);
    let mut sys = ParticleSystem::new();

    let green = sys.create_group(50, ParticleColor::Green, bounds, &mut rng);
    assert_eq!(sys.len(), 50);
    assert_eq!(sys.members(green).len(), 50);
    for p in sys.members(green) {
        assert!(p.x.x >= 0.0 && p.x.x < bounds.width);
        assert!(p.x.y >= 0.0 && p.x.y < bounds.height);
        assert_eq!(p.v, NVec2::zeros());
        assert_eq!(p.m, 1.0);
        assert_eq!(p.color, ParticleColor::Green);
    }

    let white = sys.create_group(7, ParticleColor::White, bounds, &mut rng);
    assert_eq!(sys.len(), 57);
    assert_eq!(sys.group(white).range, 50..57);

    let empty = sys.create_group(0, ParticleColor::Red, bounds, &mut rng);
    assert!(sys.group(empty).is_empty());
    assert_eq!(sys.len(), 57);
}

#[test]
fn groups_partition_the_flat_collection() {
    let cfg = ScenarioConfig {
        parameters: plsim::configuration::config::ParametersConfig {
            seed: Some(1),
            ..Default::default()
        },
        ..ScenarioConfig::default()
    };
    let scenario = Scenario::build_scenario(&cfg).unwrap();

    let mut covered = 0;
    for g in scenario.system.groups() {
        assert_eq!(g.range.start, covered);
        covered = g.range.end;
    }
    assert_eq!(covered, scenario.system.len());
    assert_eq!(scenario.system.len(), 800);
}

#[test]
fn same_seed_same_start() {
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.seed = Some(99);
    let a = Scenario::build_scenario(&cfg).unwrap();
    let b = Scenario::build_scenario(&cfg).unwrap();
    assert_eq!(a.system.particles, b.system.particles);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn tick_runs_the_preset_and_stays_finite() {
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.seed = Some(3);
    for name in ["nuclei", "fireflies"] {
        cfg.preset = Some(name.to_string());
        let mut scenario = Scenario::build_scenario(&cfg).unwrap();
        let before = scenario.system.particles.clone();
        for _ in 0..3 {
            scenario.tick();
        }
        assert_ne!(scenario.system.particles, before, "{} did nothing", name);
        assert!(scenario.system.particles.iter().all(|p| p.x.x.is_finite() && p.x.y.is_finite()));
    }
}

#[test]
fn preset_needs_every_group_it_names() {
    // nuclei also drives white particles
    let (sys, _, _) = red_blue((0.0, 0.0), (10.0, 0.0));
    let err = Scenario::assemble(Parameters::default(), test_bounds(), sys, &Preset::nuclei()).unwrap_err();
    assert_eq!(err, ConfigError::MissingGroup("white"));
}

#[test]
fn resize_moves_the_walls() {
    let mut scenario = pair_scenario();
    scenario.parameters.interaction_fraction = 1.0;
    scenario.resize(20.0, 10.0);
    assert_eq!(scenario.bounds, Bounds::new(20.0, 10.0));

    // red now starts beyond the right wall and bounces on its first contribution
    scenario.tick();
    let red = scenario.system.particles[0];
    assert!(red.x.x > 20.0);
    assert!(red.v.x < 0.0, "velocity {:?}", red.v);
}

// ==================================================================================
// Frame driver tests
// ==================================================================================

#[derive(Default)]
struct CountingSurface {
    clears: usize,
    discs: usize,
}

impl Surface for CountingSurface {
    fn clear(&mut self, _background: Background) {
        self.clears += 1;
    }

    fn draw_disc(&mut self, _center: NVec2, _diameter: f64, _color: ParticleColor) {
        self.discs += 1;
    }
}

#[derive(Default)]
struct CountingScheduler {
    requests: usize,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

fn pair_scenario() -> Scenario {
    let (sys, _, _) = red_blue((100.0, 100.0), (110.0, 100.0));
    let preset = Preset::new("pair", IntegrationMode::Damped, &[(ParticleColor::Red, ParticleColor::Blue, -1.0)]);
    Scenario::assemble(Parameters::default(), test_bounds(), sys, &preset).unwrap()
}

#[test]
fn driver_throttles_5ms_callbacks_to_60hz() {
    let mut scenario = pair_scenario();
    let mut driver = FrameDriver::new(scenario.parameters.frame_interval_ms());
    let mut surface = CountingSurface::default();
    let mut scheduler = CountingScheduler::default();

    let mut ticked_at = Vec::new();
    for k in 0..=20 {
        let now = 5.0 * k as f64;
        if driver.on_frame(now, &mut scenario, &mut surface, &mut scheduler) == FrameOutcome::Ticked {
            ticked_at.push(now);
        }
    }

    // first frame, then the first timestamp more than 16.67 ms after the last tick
    assert_eq!(ticked_at, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    assert_eq!(surface.clears, 6);
    assert_eq!(surface.discs, 6 * 2);
    // skipped frames still reschedule
    assert_eq!(scheduler.requests, 21);
    assert_eq!(driver.state, DriverState::Running { last_tick: 100.0 });
}

#[test]
fn skipped_frame_leaves_particles_alone() {
    let mut scenario = pair_scenario();
    let mut driver = FrameDriver::new(1000.0 / 60.0);
    let mut surface = CountingSurface::default();
    let mut scheduler = CountingScheduler::default();

    driver.on_frame(1000.0, &mut scenario, &mut surface, &mut scheduler);
    let after_first = scenario.system.particles.clone();

    assert_eq!(driver.on_frame(1010.0, &mut scenario, &mut surface, &mut scheduler), FrameOutcome::Skipped);
    assert_eq!(scenario.system.particles, after_first);
    assert_eq!(scheduler.requests, 2);
}

#[test]
fn tick_decision_is_pure() {
    let interval = 1000.0 / 60.0;
    assert!(should_tick(5.0, None, interval));
    assert!(!should_tick(15.0, Some(0.0), interval));
    assert!(should_tick(17.0, Some(0.0), interval));
}

pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Bounds, GroupId, NVec2, Particle, ParticleColor, ParticleSystem};
pub use simulation::forces::{apply_rule, cutoff_radius, Rule, RuleSet};
pub use simulation::integrator::IntegrationMode;
pub use simulation::presets::Preset;
pub use simulation::engine::{FrameDriver, FrameOutcome, FrameScheduler};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ConfigError, ScenarioConfig};

pub use visualization::renderer::{render, DisplayList, Surface};
pub use visualization::plsim_vis2d::run_2d;

pub use benchmark::benchmark::bench_rule_engine;

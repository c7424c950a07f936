//! Per-pair velocity/position update for a single particle
//!
//! Every pairwise force contribution is integrated immediately:
//! velocity update (damped or additive), explicit Euler drift,
//! then a reflective bounce against the surface edges.

use serde::Deserialize;

use super::states::{Bounds, NVec2, Particle};

/// How a force contribution is folded into the velocity
/// `mode: "damped"` or `mode: "additive"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMode {
    #[serde(rename = "damped")] // v = (v + f) * k, the latest force dominates
    Damped,

    #[serde(rename = "additive")] // v += f * k, accumulates over the tick
    Additive,
}

impl IntegrationMode {
    pub fn name(self) -> &'static str {
        match self {
            IntegrationMode::Damped => "damped",
            IntegrationMode::Additive => "additive",
        }
    }
}

/// New velocity after applying force `f` with blend factor `k`
pub fn update_velocity(v: NVec2, f: NVec2, mode: IntegrationMode, k: f64) -> NVec2 {
    match mode {
        IntegrationMode::Damped => (v + f) * k,
        IntegrationMode::Additive => v + f * k,
    }
}

/// Invert a velocity component whose position left `[0, extent]`.
/// The position is left where it is, so a particle can sit
/// off-surface for a tick before coming back.
pub fn bounce(p: &mut Particle, bounds: Bounds) {
    if p.x.x < 0.0 || p.x.x > bounds.width {
        p.v.x = -p.v.x;
    }
    if p.x.y < 0.0 || p.x.y > bounds.height {
        p.v.y = -p.v.y;
    }
}

/// Fold one force contribution into `p`: velocity, drift, bounce
pub fn step_particle(p: &mut Particle, f: NVec2, mode: IntegrationMode, k: f64, bounds: Bounds) {
    p.v = update_velocity(p.v, f, mode, k);

    // x_n+1 = x_n + v_n+1, unit time step per contribution
    p.x += p.v;

    bounce(p, bounds);
}

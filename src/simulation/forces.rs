//! Pairwise interaction rules for particle life
//!
//! A rule pulls (g < 0) or pushes (g > 0) every particle of a source
//! group relative to every particle of a target group. The force law is
//! `g * m_a * m_b / d` applied along the raw displacement, so the
//! magnitude is constant in `d`. It is not gravity and is kept that way
//! on purpose: the emergent patterns depend on it.

use super::integrator::{step_particle, IntegrationMode};
use super::params::Parameters;
use super::states::{Bounds, GroupId, NVec2, Particle, ParticleSystem};

/// Interaction cutoff: `fraction` of the surface diagonal
pub fn cutoff_radius(bounds: Bounds, fraction: f64) -> f64 {
    bounds.diagonal() * fraction
}

/// Force on `a` due to `b`, or `None` when they coincide or are
/// at least `cutoff` apart
pub fn pair_force(a: &Particle, b: &Particle, g: f64, cutoff: f64) -> Option<NVec2> {
    // displacement from b to a
    let r = a.x - b.x;
    let d = r.norm();

    // d > 0 also guards the division below
    if !(d > 0.0 && d < cutoff) {
        return None;
    }

    let coef = g * a.m * b.m / d;
    Some(coef * r)
}

/// Apply coefficient `g` from group `source` towards group `target`.
///
/// Only particles of `source` move. Each contribution is integrated
/// right away, so later pairs see positions already moved by earlier
/// ones (and with `source == target`, moved partners too).
pub fn apply_rule(
    sys: &mut ParticleSystem,
    bounds: Bounds,
    params: &Parameters,
    source: GroupId,
    target: GroupId,
    g: f64,
    mode: IntegrationMode,
) {
    let cutoff = cutoff_radius(bounds, params.interaction_fraction);
    let k = params.velocity_factor;
    let sources = sys.group(source).range.clone();
    let targets = sys.group(target).range.clone();

    for i in sources {
        for j in targets.clone() {
            if i == j { // same particle, no self interaction
                continue;
            }
            let b = sys.particles[j];
            let a = &mut sys.particles[i];
            if let Some(f) = pair_force(a, &b, g, cutoff) {
                step_particle(a, f, mode, k, bounds);
            }
        }
    }
}

/// One ordered (source, target, g) entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub source: GroupId,
    pub target: GroupId,
    pub g: f64,
}

/// Ordered list of rules sharing an integration mode.
/// Rules run in insertion order; order matters since positions move
/// during every rule.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub mode: IntegrationMode,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new(mode: IntegrationMode) -> Self {
        Self {
            mode,
            rules: Vec::new(),
        }
    }

    /// Append a rule
    pub fn with(mut self, source: GroupId, target: GroupId, g: f64) -> Self {
        self.rules.push(Rule { source, target, g });
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run every rule once against `sys`
    pub fn apply(&self, sys: &mut ParticleSystem, bounds: Bounds, params: &Parameters) {
        for rule in &self.rules {
            apply_rule(sys, bounds, params, rule.source, rule.target, rule.g, self.mode);
        }
    }
}

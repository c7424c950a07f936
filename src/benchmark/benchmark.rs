use std::time::Instant;

use crate::simulation::params::Parameters;
use crate::simulation::presets::{Preset, PRESET_NAMES};
use crate::simulation::states::{Bounds, NVec2, Particle, ParticleColor, ParticleSystem};

const BENCH_SURFACE: (f64, f64) = (1280.0, 720.0);

/// Four groups of `n` particles laid out on a deterministic curve
fn make_system(n: usize, bounds: Bounds) -> ParticleSystem {
    let mut sys = ParticleSystem::new();
    let colors = [ParticleColor::Red, ParticleColor::Blue, ParticleColor::Green, ParticleColor::White];

    for (k, color) in colors.into_iter().enumerate() {
        let particles = (0..n)
            .map(|i| {
                let i_f = (i + k * n) as f64;
                // deterministic positions, no rand needed
                let x = (0.5 + 0.5 * (i_f * 0.37).sin()) * bounds.width;
                let y = (0.5 + 0.5 * (i_f * 0.13).cos()) * bounds.height;
                Particle {
                    x: NVec2::new(x, y),
                    ..Particle::at(0.0, 0.0, color)
                }
            })
            .collect();
        sys.add_group(color, particles);
    }

    sys
}

/// Time one tick of every built-in preset for growing group sizes
pub fn bench_rule_engine() {
    let bounds = Bounds::new(BENCH_SURFACE.0, BENCH_SURFACE.1);
    let params = Parameters::default();
    let ns = [50, 100, 200, 400, 800];
    let steps = 3; // ticks averaged per measurement

    for n in ns {
        let template = make_system(n, bounds);

        for name in PRESET_NAMES {
            // every built-in name resolves against four colored groups
            let Ok(preset) = Preset::builtin(name) else { continue };
            let Ok(rules) = preset.resolve(&template) else { continue };
            let mut sys = template.clone();

            // Warm up
            rules.apply(&mut sys, bounds, &params);

            let t0 = Instant::now();
            for _ in 0..steps {
                rules.apply(&mut sys, bounds, &params);
            }
            let per_tick = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

            println!("N/group = {:4}, preset = {:9}, tick = {:9.3} ms", n, name, per_tick);
        }
    }
}

//! Backend-agnostic particle renderer
//!
//! `render` clears a [`Surface`] and draws every particle as a disc.
//! [`DisplayList`] is the in-memory surface the Bevy viewer presents.

use bevy::prelude::Resource;

use crate::simulation::states::{NVec2, Particle, ParticleColor};

/// Opaque fill color of the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Black,
}

/// Anything that can be cleared and drawn on
pub trait Surface {
    /// Fill the whole surface
    fn clear(&mut self, background: Background);

    /// Filled disc of `diameter` centered at `center`, in surface coordinates
    fn draw_disc(&mut self, center: NVec2, diameter: f64, color: ParticleColor);
}

#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    pub background: Background,
    pub particle_size: f64,
}

/// Clear the surface and draw every particle, in order.
/// Off-surface particles are passed through unclipped.
pub fn render<S: Surface + ?Sized>(particles: &[Particle], surface: &mut S, style: RenderStyle) {
    surface.clear(style.background);
    for p in particles {
        surface.draw_disc(p.x, style.particle_size, p.color);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: NVec2,
    pub diameter: f64,
    pub color: ParticleColor,
}

/// Retained draw list: last clear color plus discs drawn since
#[derive(Resource, Debug, Clone, Default)]
pub struct DisplayList {
    pub background: Option<Background>,
    pub discs: Vec<Disc>,
    pub dirty: bool, // set on clear, reset by the presenter
}

impl Surface for DisplayList {
    fn clear(&mut self, background: Background) {
        self.background = Some(background);
        self.discs.clear();
        self.dirty = true;
    }

    fn draw_disc(&mut self, center: NVec2, diameter: f64, color: ParticleColor) {
        self.discs.push(Disc {
            center,
            diameter,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_clears_then_draws_everything() {
        let particles = vec![
            Particle::at(1.0, 2.0, ParticleColor::Red),
            Particle::at(-50.0, 9000.0, ParticleColor::Blue), // off surface
        ];
        let mut list = DisplayList::default();
        list.draw_disc(NVec2::zeros(), 1.0, ParticleColor::Green); // stale

        let style = RenderStyle {
            background: Background::Black,
            particle_size: 5.0,
        };
        render(&particles, &mut list, style);

        assert_eq!(list.background, Some(Background::Black));
        assert!(list.dirty);
        assert_eq!(list.discs.len(), 2);
        assert_eq!(list.discs[1].center, NVec2::new(-50.0, 9000.0));
        assert_eq!(list.discs[1].color, ParticleColor::Blue);
        assert!(list.discs.iter().all(|d| d.diameter == 5.0));
    }
}

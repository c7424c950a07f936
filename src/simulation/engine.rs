//! Frame driver: throttles simulation ticks to a target rate
//!
//! The host calls [`FrameDriver::on_frame`] once per frame with a
//! monotonic timestamp in milliseconds. A frame either runs one tick plus
//! one render pass, or does nothing; both reschedule the next frame.

use bevy::prelude::Resource;

use crate::simulation::scenario::Scenario;
use crate::visualization::renderer::{render, Background, RenderStyle, Surface};

/// Host primitive that arranges for the next frame callback
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverState {
    Idle, // no frame seen yet
    Running { last_tick: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Ticked,
    Skipped,
}

/// Tick on the first frame, then only once strictly more than
/// `interval` ms have passed since the last accepted tick
pub fn should_tick(now: f64, last_tick: Option<f64>, interval: f64) -> bool {
    match last_tick {
        None => true,
        Some(last) => now - last > interval,
    }
}

#[derive(Resource, Debug, Clone)]
pub struct FrameDriver {
    pub state: DriverState,
    pub interval: f64, // ms between ticks
    pub background: Background,
}

impl FrameDriver {
    pub fn new(interval: f64) -> Self {
        Self {
            state: DriverState::Idle,
            interval,
            background: Background::Black,
        }
    }

    pub fn last_tick(&self) -> Option<f64> {
        match self.state {
            DriverState::Idle => None,
            DriverState::Running { last_tick } => Some(last_tick),
        }
    }

    pub fn on_frame<S, F>(
        &mut self,
        now: f64,
        scenario: &mut Scenario,
        surface: &mut S,
        scheduler: &mut F,
    ) -> FrameOutcome
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let outcome = if should_tick(now, self.last_tick(), self.interval) {
            self.state = DriverState::Running { last_tick: now };
            scenario.tick();
            let style = RenderStyle {
                background: self.background,
                particle_size: scenario.parameters.particle_size,
            };
            render(&scenario.system.particles, surface, style);
            FrameOutcome::Ticked
        } else {
            FrameOutcome::Skipped
        };

        scheduler.request_frame();
        outcome
    }
}

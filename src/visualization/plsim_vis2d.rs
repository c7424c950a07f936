use std::collections::HashMap;

use bevy::log::{debug, info};
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{RequestRedraw, WindowResized};

use crate::simulation::engine::{FrameDriver, FrameScheduler};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Bounds, NVec2, ParticleColor};
use crate::visualization::renderer::{Background, DisplayList};

/// Pool slot `i` shows `DisplayList::discs[i]`
#[derive(Component)]
struct DiscSlot(pub usize);

/// Shared unit-diameter disc mesh and one material per particle color
#[derive(Resource)]
struct Palette {
    mesh: Mesh2dHandle,
    materials: HashMap<ParticleColor, Handle<ColorMaterial>>,
}

const COLORS: [ParticleColor; 6] = [
    ParticleColor::Red,
    ParticleColor::Blue,
    ParticleColor::Green,
    ParticleColor::White,
    ParticleColor::Yellow,
    ParticleColor::Purple,
];

pub fn run_2d(scenario: Scenario) {
    let driver = FrameDriver::new(scenario.parameters.frame_interval_ms());
    let window = Window {
        title: format!("plsim - {}", scenario.preset_name),
        resolution: (scenario.bounds.width as f32, scenario.bounds.height as f32).into(),
        ..Default::default()
    };

    App::new()
        .insert_resource(scenario)
        .insert_resource(driver)
        .insert_resource(DisplayList::default())
        .insert_resource(ClearColor(background_color(Background::Black)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..Default::default()
        }))
        .add_systems(Startup, (announce_system, setup_surface_system))
        .add_systems(Update, (resize_system, frame_system, present_system).chain())
        .run();
}

fn particle_color(color: ParticleColor) -> Color {
    match color {
        ParticleColor::Red => Color::srgb(1.0, 0.0, 0.0),
        ParticleColor::Blue => Color::srgb(0.0, 0.0, 1.0),
        ParticleColor::Green => Color::srgb(0.0, 0.5, 0.0),
        ParticleColor::White => Color::srgb(1.0, 1.0, 1.0),
        ParticleColor::Yellow => Color::srgb(1.0, 1.0, 0.0),
        ParticleColor::Purple => Color::srgb(0.5, 0.0, 0.5),
    }
}

fn background_color(background: Background) -> Color {
    match background {
        Background::Black => Color::srgb(0.0, 0.0, 0.0),
    }
}

/// Surface pixels (origin top-left, y down) to world (origin center, y up)
fn to_world(p: NVec2, bounds: Bounds) -> Vec3 {
    let x = p.x - 0.5 * bounds.width;
    let y = 0.5 * bounds.height - p.y;
    Vec3::new(x as f32, y as f32, 0.0)
}

// LogPlugin only exists once the app runs, so the summary is logged from here
fn announce_system(scenario: Res<Scenario>) {
    info!("run_2d: starting Bevy 2D viewer with {} particles", scenario.system.len());
    info!("{}", scenario.summary());
}

fn setup_surface_system(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let mesh = Mesh2dHandle(meshes.add(Circle::new(0.5)));
    let by_color = COLORS
        .iter()
        .map(|&c| (c, materials.add(ColorMaterial::from(particle_color(c)))))
        .collect();
    commands.insert_resource(Palette {
        mesh,
        materials: by_color,
    });
}

fn resize_system(mut events: EventReader<WindowResized>, mut scenario: ResMut<Scenario>) {
    for ev in events.read() {
        debug!("surface resized to {}x{}", ev.width, ev.height);
        scenario.resize(ev.width as f64, ev.height as f64);
    }
}

/// Asks winit for another frame
struct RedrawScheduler<'a, 'w> {
    redraw: &'a mut EventWriter<'w, RequestRedraw>,
}

impl FrameScheduler for RedrawScheduler<'_, '_> {
    fn request_frame(&mut self) {
        self.redraw.send(RequestRedraw);
    }
}

fn frame_system(
    time: Res<Time>,
    mut driver: ResMut<FrameDriver>,
    mut scenario: ResMut<Scenario>,
    mut list: ResMut<DisplayList>,
    mut redraw: EventWriter<RequestRedraw>,
) {
    let now = time.elapsed_seconds_f64() * 1000.0;
    let mut scheduler = RedrawScheduler { redraw: &mut redraw };
    driver.on_frame(now, &mut *scenario, &mut *list, &mut scheduler);
}

/// Mirror the display list onto a pool of disc entities
#[allow(clippy::too_many_arguments)]
fn present_system(
    mut commands: Commands,
    mut list: ResMut<DisplayList>,
    palette: Option<Res<Palette>>,
    scenario: Res<Scenario>,
    mut clear: ResMut<ClearColor>,
    mut slots: Query<(&DiscSlot, &mut Transform, &mut Handle<ColorMaterial>, &mut Visibility)>,
    mut pool_size: Local<usize>,
) {
    let Some(palette) = palette else { return };
    if !list.dirty {
        return;
    }
    list.dirty = false;

    if let Some(background) = list.background {
        clear.0 = background_color(background);
    }

    let bounds = scenario.bounds;
    for (DiscSlot(i), mut transform, mut material, mut visibility) in &mut slots {
        match list.discs.get(*i) {
            Some(disc) => {
                let d = disc.diameter as f32;
                *transform = Transform::from_translation(to_world(disc.center, bounds)).with_scale(Vec3::new(d, d, 1.0));
                *material = palette.materials[&disc.color].clone();
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    // New slots show up in the query from the next frame on
    for (i, disc) in list.discs.iter().enumerate().skip(*pool_size) {
        let d = disc.diameter as f32;
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: palette.mesh.clone(),
                material: palette.materials[&disc.color].clone(),
                transform: Transform::from_translation(to_world(disc.center, bounds)).with_scale(Vec3::new(d, d, 1.0)),
                ..Default::default()
            },
            DiscSlot(i),
        ));
    }
    *pool_size = (*pool_size).max(list.discs.len());
}

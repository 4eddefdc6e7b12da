use bevy::math::primitives::{Cuboid, Sphere};
use bevy::prelude::*;

use crate::configuration::config::ViewerConfig;
use crate::simulation::engine::SimulationEngine;
use crate::simulation::scenario::Scenario;

/// Component tagging each sphere with its body index into the engine's live bodies
#[derive(Component)]
struct BodyIndex3(pub usize);

/// Bevy resource wrapping the engine together with the control-surface state
#[derive(Resource)]
struct SimulationHost {
    engine: SimulationEngine,
    speed: f64,
    paused: bool,
    selected: Option<usize>, // None = no selection
    viewer: ViewerConfig,
}

impl SimulationHost {
    /// Index handed to setters; out of range when nothing is selected
    fn selection_index(&self) -> usize {
        self.selected.unwrap_or(usize::MAX)
    }
}

/// Open a window and run `scenario` in real time
///
/// Keys: Space pause, R reset, Up/Down speed x2 / x0.5, Tab select next body,
/// F toggle fixed, +/- scale the selected body's mass
pub fn run_3d(scenario: Scenario) {
    info!("run_3d: starting Bevy 3D viewer with {} bodies", scenario.bodies.len());

    let speed = scenario.speed;
    let viewer = scenario.viewer.clone();
    let host = SimulationHost {
        engine: scenario.into_engine(),
        speed,
        paused: false,
        selected: None,
        viewer,
    };

    App::new()
        .insert_resource(host)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (controls_3d, physics_step_3d, sync_transforms_3d).chain())
        .run();
}

/// Startup system: spawn camera, light, axes and one sphere per body
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    host: Res<SimulationHost>,
) {
    let cfg = &host.viewer;

    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, -0.4 * cfg.camera_distance, cfg.camera_distance)
            .looking_at(Vec3::ZERO, Vec3::Z),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 2.0 * cfg.camera_distance,
            ..Default::default()
        },
        transform: Transform::from_xyz(100.0, 100.0, cfg.camera_distance),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials, cfg.scale);

    // Unit spheres, sized every frame from the body radius
    let sphere = meshes.add(Sphere::new(1.0).mesh());
    for (i, b) in host.engine.bodies().iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: sphere.clone(),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(b.color.x as f32, b.color.y as f32, b.color.z as f32),
                    unlit: true,
                    ..Default::default()
                }),
                transform: body_transform(b.position.x, b.position.y, b.position.z, b.radius, cfg),
                ..Default::default()
            },
            BodyIndex3(i),
        ));
    }
}

/// Keyboard control surface
fn controls_3d(keys: Res<ButtonInput<KeyCode>>, mut host: ResMut<SimulationHost>) {
    if keys.just_pressed(KeyCode::Space) {
        host.paused = !host.paused;
        info!(paused = host.paused, "toggled pause");
    }
    if keys.just_pressed(KeyCode::KeyR) {
        host.engine.reset();
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        host.speed *= 2.0;
        info!(speed = host.speed, "speed multiplier");
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        host.speed *= 0.5;
        info!(speed = host.speed, "speed multiplier");
    }

    if keys.just_pressed(KeyCode::Tab) {
        let count = host.engine.count();
        host.selected = match host.selected {
            _ if count == 0 => None,
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
            None => Some(0),
        };
        if let Some(i) = host.selected {
            let names = host.engine.names();
            if let Ok(body) = host.engine.body_at(i) {
                info!("selected {}:\n{}", names[i], body);
            }
        } else {
            info!("selection cleared");
        }
    }

    if keys.just_pressed(KeyCode::KeyF) {
        if let Some(i) = host.selected {
            let fixed = host.engine.body(i).map(|b| b.fixed).unwrap_or(false);
            host.engine.set_fixed(i, !fixed);
        }
    }

    let mass_factor = if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        Some(2.0)
    } else if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        Some(0.5)
    } else {
        None
    };
    if let Some(factor) = mass_factor {
        let index = host.selection_index();
        let mass = host.engine.body(index).map(|b| b.mass * factor).unwrap_or(1.0);
        host.engine.set_mass(index, mass);
    }
}

/// Per-frame physics: feed the frame time into the fixed-step accumulator
fn physics_step_3d(time: Res<Time>, mut host: ResMut<SimulationHost>) {
    if host.paused {
        return;
    }
    let speed = host.speed;
    host.engine.advance(time.delta_seconds_f64(), speed);
}

fn sync_transforms_3d(host: Res<SimulationHost>, mut query: Query<(&BodyIndex3, &mut Transform)>) {
    let bodies = host.engine.bodies();
    for (BodyIndex3(i), mut transform) in &mut query {
        if let Some(b) = bodies.get(*i) {
            *transform = body_transform(b.position.x, b.position.y, b.position.z, b.radius, &host.viewer);
        }
    }
}

fn body_transform(x: f64, y: f64, z: f64, radius: f64, cfg: &ViewerConfig) -> Transform {
    // Ensure a minimum visual radius so tiny bodies are still visible
    let r = (radius as f32).max(cfg.min_radius) * cfg.scale;
    Transform::from_xyz(x as f32 * cfg.scale, y as f32 * cfg.scale, z as f32 * cfg.scale).with_scale(Vec3::splat(r))
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>, scale: f32) {
    // Axis length and thickness, in *world* units
    let axis_len = 10.0 * scale;
    let axis_thickness = 0.009 * scale;

    let axes = [
        (Cuboid::new(axis_len, axis_thickness, axis_thickness), Color::srgb(1.0, 0.0, 0.0)),
        (Cuboid::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.0, 1.0, 0.0)),
        (Cuboid::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.0, 0.0, 1.0)),
    ];

    for (cuboid, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(cuboid.mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }
}

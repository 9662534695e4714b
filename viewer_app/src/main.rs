//! Space scene viewer
//!
//! Loads the scene's triangle-mesh models, builds the world (skybox, two
//! planets, five asteroids, player ship), and drives the per-frame
//! scene/camera/collision update loop. Window creation, GPU submission,
//! and the text overlay are external collaborators; this binary runs the
//! core loop headless against a scripted input timeline and logs the scene
//! state it produces.

mod collision;
mod config;
mod frame;
mod projectile;
mod world;

use config::ViewerConfig;
use scene_engine::prelude::*;
use std::time::Duration;
use thiserror::Error;
use world::World;

/// Fatal startup errors; the steady-state tick cannot fail
#[derive(Error, Debug)]
enum ViewerError {
    /// A scene model failed to load
    #[error("failed to load model '{name}': {source}")]
    Model {
        /// Mesh name
        name: String,
        /// Underlying loader error
        #[source]
        source: scene_engine::assets::obj_loader::ObjError,
    },
    /// A required mesh was missing from the registry
    #[error("mesh '{0}' missing from the registry")]
    MissingMesh(String),
}

/// The models every scene needs, in load order
const SCENE_MODELS: [&str; 4] = ["sphere", "ship", "plane", "asteroid"];

fn main() -> Result<(), ViewerError> {
    env_logger::init();

    let config = ViewerConfig::load_or_default("viewer.toml");
    log::info!(
        "starting viewer: {}x{} '{}'",
        config.window.width,
        config.window.height,
        config.window.title
    );

    let registry = load_models(&config.assets)?;
    let sphere_aabb = *registry
        .get("sphere")
        .ok_or_else(|| ViewerError::MissingMesh("sphere".into()))?;
    let asteroid_aabb = *registry
        .get("asteroid")
        .ok_or_else(|| ViewerError::MissingMesh("asteroid".into()))?;

    let mut timer = Timer::new();
    let mut world = World::new(sphere_aabb, asteroid_aabb, config.camera.clone(), 0.0);
    let mut tracker = InputTracker::new();
    let mut script = demo_script();

    let aspect = config.window.aspect_ratio();
    let frame_budget = Duration::from_secs_f32(1.0 / config.demo.frame_rate);
    log::info!(
        "running scripted demo for {:.0} s at {:.0} fps",
        config.demo.duration_secs,
        config.demo.frame_rate
    );

    loop {
        timer.update();
        let now = timer.total_time();
        let dt = timer.delta_time();

        script.drive(&mut tracker, now);
        frame::tick(&mut world, tracker.state_mut(), now, dt);

        let draw_list = frame::build_draw_list(&world, now, aspect, tracker.state().perspective);

        if timer.frame_count() % 60 == 0 {
            log::info!(
                "t={:5.1}s camera={:?} mode={:?} asteroids={} drawables={}",
                now,
                world.camera.position,
                world.camera.mode,
                world.visible_asteroids(),
                draw_list.len()
            );
        }

        if tracker.state().quit || now >= f64::from(config.demo.duration_secs) {
            break;
        }
        std::thread::sleep(frame_budget);
    }

    log::info!(
        "demo finished after {} frames; {} asteroids left",
        timer.frame_count(),
        world.visible_asteroids()
    );
    Ok(())
}

/// Load all scene models and register their bounding boxes
fn load_models(assets: &config::AssetConfig) -> Result<AabbRegistry, ViewerError> {
    let dir = assets.resolve_model_dir();
    let mut registry = AabbRegistry::new();

    for name in SCENE_MODELS {
        let path = format!("{dir}/{name}.obj");
        let mesh = ObjLoader::load_obj(&path).map_err(|source| ViewerError::Model {
            name: name.to_string(),
            source,
        })?;
        log::info!(
            "loaded '{}' ({} vertices, bounds {:?}..{:?})",
            path,
            mesh.vertices.len(),
            mesh.aabb.min,
            mesh.aabb.max
        );
        registry.register_mesh(&mesh);
    }

    Ok(registry)
}

/// One timed input event of the demo script
enum ScriptEvent {
    /// Key press or release
    Key(KeyCode, bool),
    /// Mouse button press or release
    Button(MouseButton, bool),
    /// Cursor moved to a position
    Cursor(f64, f64),
    /// Scroll wheel
    Scroll(f64),
}

/// A timeline of input events replayed into the tracker
struct DemoScript {
    events: Vec<(f64, ScriptEvent)>,
    next: usize,
}

impl DemoScript {
    /// Feed every event whose time has come
    fn drive(&mut self, tracker: &mut InputTracker, now: f64) {
        while let Some((at, event)) = self.events.get(self.next) {
            if *at > now {
                break;
            }
            match event {
                ScriptEvent::Key(key, pressed) => tracker.handle_key(*key, *pressed),
                ScriptEvent::Button(button, pressed) => {
                    tracker.handle_mouse_button(*button, *pressed);
                }
                ScriptEvent::Cursor(x, y) => tracker.handle_cursor(*x, *y),
                ScriptEvent::Scroll(dy) => tracker.handle_scroll(*dy),
            }
            self.next += 1;
        }
    }
}

/// The demo flight: thrust forward, orbit the view, zoom, lock the nearest
/// asteroid, fire, and unlock again
fn demo_script() -> DemoScript {
    use ScriptEvent::{Button, Cursor, Key, Scroll};

    let events = vec![
        (0.2, Key(KeyCode::W, true)),
        (2.0, Key(KeyCode::W, false)),
        (2.2, Button(MouseButton::Right, true)),
        (2.3, Cursor(640.0, 360.0)),
        (2.6, Cursor(700.0, 340.0)),
        (2.9, Cursor(760.0, 320.0)),
        (3.2, Button(MouseButton::Right, false)),
        (3.5, Scroll(-2.0)),
        (4.0, Key(KeyCode::Space, true)),
        (4.8, Key(KeyCode::Space, false)),
        (5.0, Button(MouseButton::Middle, true)),
        (5.1, Button(MouseButton::Middle, false)),
        (6.0, Button(MouseButton::Left, true)),
        (6.1, Button(MouseButton::Left, false)),
        (8.0, Button(MouseButton::Middle, true)),
        (8.1, Button(MouseButton::Middle, false)),
        (9.0, Key(KeyCode::O, true)),
        (10.0, Key(KeyCode::P, true)),
    ];

    DemoScript { events, next: 0 }
}

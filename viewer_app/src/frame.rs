//! Per-frame update driver and draw-list assembly
//!
//! `tick` applies the scene's fixed update order: camera movement, camera
//! collision resolution, orientation and up-vector update, Bézier
//! animation, projectile update, projectile collision. Everything runs on
//! the single frame-driver thread; every transition is a total function of
//! the current state, this frame's input, and the elapsed time.

use crate::collision::{resolve_camera_position, resolve_projectile_hits};
use crate::projectile::Projectile;
use crate::world::{self, object_tag, World};
use scene_engine::prelude::*;

/// Advance the world by one frame.
///
/// `now` is wall-clock seconds since startup, `dt` the seconds since the
/// previous tick.
pub fn tick(world: &mut World, input: &mut InputState, now: f64, dt: f32) {
    // 1. input-driven camera movement
    world.camera.apply_movement(input, dt);

    // 2. camera collision resolution on the moved position
    let corrected = resolve_camera_position(world.camera.position, world);
    world.camera.set_position(corrected);

    // 3. orientation: pointer/scroll input, then the look-mode update
    let (dx, dy) = input.take_pointer_delta();
    if dx != 0.0 || dy != 0.0 {
        world.camera.on_pointer_drag(dx, dy);
    }
    let scroll = input.take_scroll_delta();
    if scroll != 0.0 {
        world.camera.on_scroll(scroll);
    }
    let targets = world.lock_targets();
    world.camera.update_orientation(input, &targets);

    // 4. Bézier animation
    world.animate(now);

    // 5. projectile spawn and advance; fire edges while one is in flight
    //    are consumed and ignored
    let fire = input.take_fire();
    if fire && !world.projectile.visible {
        world.projectile = Projectile::spawn(&world.camera);
    }
    world.projectile.advance(world.camera.tuning.move_speed, dt);

    // 6. projectile collision
    resolve_projectile_hits(world);
}

/// Assemble the frame's draw list in the scene's draw order
pub fn build_draw_list(world: &World, now: f64, aspect: f32, perspective: bool) -> DrawList {
    let projection = if perspective {
        Projection::Perspective
    } else {
        Projection::Orthographic
    };

    let mut list = DrawList::new(
        world.camera.view_matrix(),
        world.camera.projection_matrix(projection, aspect),
    );

    for asteroid in world.asteroids.iter().filter(|a| a.visible) {
        list.push(asteroid.model_matrix(), object_tag::ASTEROID);
    }

    // small planet first, then the large one
    for planet in world.planets.iter().rev() {
        list.push(planet.model_matrix(now), planet.object);
    }

    for (tag, model) in world::skybox_planes() {
        list.push(model, tag);
    }

    list.push(world::ship_model(&world.camera), object_tag::SHIP);

    if world.projectile.visible {
        list.push(world.projectile.model_matrix(), object_tag::PROJECTILE);
    }

    list
}

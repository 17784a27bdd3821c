//! Actor motion: digital player input and enemy chase AI

use glam::Vec2;

use super::collision::{MoveResult, resolve_against_static};
use super::state::{Actor, MoveIntent, Player, StaticBody};
use crate::direction_to;

/// Player velocity for one tick, straight from the held directions.
///
/// Diagonals are scaled by 1/√2 so they are no faster than axial movement.
/// Opposite keys cancel out.
pub fn player_velocity(intent: &MoveIntent, speed: f32) -> Vec2 {
    let mut vel = Vec2::ZERO;
    if intent.left {
        vel.x -= speed;
    }
    if intent.right {
        vel.x += speed;
    }
    if intent.up {
        vel.y += speed;
    }
    if intent.down {
        vel.y -= speed;
    }
    if vel.x != 0.0 && vel.y != 0.0 {
        vel *= std::f32::consts::FRAC_1_SQRT_2;
    }
    vel
}

/// Refresh the player's velocity from input, then move it against walls
pub fn move_player(player: &mut Player, speed: f32, walls: &[StaticBody]) -> MoveResult {
    let vel = player_velocity(&player.intent, speed);
    let result = resolve_against_static(&mut player.actor.bounds, vel, walls);
    player.actor.vel = result.stop_blocked(vel);
    result
}

/// Step one enemy toward `target`, axis by axis.
///
/// An enemy sitting exactly on its target stays put.
pub fn chase(
    enemy: &mut Actor,
    target: Vec2,
    speed: f32,
    dt: f32,
    walls: &[StaticBody],
) -> MoveResult {
    let Some(dir) = direction_to(enemy.pos(), target) else {
        enemy.vel = Vec2::ZERO;
        return MoveResult::default();
    };
    let result = resolve_against_static(&mut enemy.bounds, dir * speed * dt, walls);
    enemy.vel = result.stop_blocked(dir * speed);
    result
}

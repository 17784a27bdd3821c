//! Fixed timestep simulation tick
//!
//! Drives the Menu -> Playing -> (GameOver | LevelClear) lifecycle and the
//! per-tick world update: oxygen drain, movement, contact checks, effects
//! and camera.

use glam::Vec2;

use super::aabb::Aabb;
use super::collision::{hits_any, overlaps_any};
use super::motion::{chase, move_player};
use super::particles::EffectSystem;
use super::state::{
    Actor, GameEvent, GamePhase, GameWorld, MoveIntent, Pickup, Player, StaticBody,
};
use crate::Color;
use crate::consts::{SPAWN_X, SPAWN_Y};
use crate::level::{LevelData, LevelSource, Placement};
use crate::palette::{BARN_RED, SPRING_GREEN};

/// Discrete input the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Start / retry
    Confirm,
}

impl InputAction {
    fn intent_flag(self, intent: &mut MoveIntent) -> Option<&mut bool> {
        match self {
            InputAction::MoveLeft => Some(&mut intent.left),
            InputAction::MoveRight => Some(&mut intent.right),
            InputAction::MoveUp => Some(&mut intent.up),
            InputAction::MoveDown => Some(&mut intent.down),
            InputAction::Confirm => None,
        }
    }
}

pub type AnimateFn = Box<dyn FnMut(&mut GameWorld, f32)>;
pub type SpawnEffectFn = Box<dyn FnMut(&mut EffectSystem, Vec2, Color)>;

/// Optional extension points. Both default to doing nothing.
pub struct Hooks {
    /// Runs at the end of every playing tick
    pub animate: AnimateFn,
    /// Called on damage and pickup with the effect position and color
    pub spawn_effect: SpawnEffectFn,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            animate: Box::new(|_, _| {}),
            spawn_effect: Box::new(|_, _, _| {}),
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}

impl Hooks {
    /// Walk-cycle animation and particle bursts
    pub fn standard() -> Self {
        Self {
            animate: Box::new(animate_sprites),
            spawn_effect: Box::new(|effects, pos, color| effects.spawn(pos, color)),
        }
    }
}

/// Two-frame walk cycle. The player holds frame 0 while standing still.
pub fn animate_sprites(world: &mut GameWorld, dt: f32) {
    world.anim_timer += dt;
    let frame_time = world.tuning.anim_frame_time;
    let frame = if frame_time > 0.0 {
        ((world.anim_timer / frame_time) as u32 % 2) as u8
    } else {
        0
    };

    if let Some(player) = world.player.as_mut() {
        player.actor.frame = if player.actor.is_moving() { frame } else { 0 };
    }
    for enemy in &mut world.enemies {
        enemy.frame = frame;
    }
}

/// Key down
pub fn handle_press(world: &mut GameWorld, levels: &dyn LevelSource, action: InputAction) {
    match (world.phase, action) {
        (GamePhase::Menu, InputAction::Confirm) => start_new_game(world, levels),
        (GamePhase::GameOver | GamePhase::LevelClear, InputAction::Confirm) => {
            restart(world, levels)
        }
        (GamePhase::Playing, _) => {
            if let Some(flag) = world
                .player
                .as_mut()
                .and_then(|p| action.intent_flag(&mut p.intent))
            {
                *flag = true;
            }
        }
        _ => {}
    }
}

/// Key up. Accepted in every phase so a key released on a menu never stays held.
pub fn handle_release(world: &mut GameWorld, action: InputAction) {
    if let Some(flag) = world
        .player
        .as_mut()
        .and_then(|p| action.intent_flag(&mut p.intent))
    {
        *flag = false;
    }
}

/// Leave the menu: level 1, fresh level count
pub fn start_new_game(world: &mut GameWorld, levels: &dyn LevelSource) {
    world.level = 1;
    world.level_max = levels.max_level().max(1);
    reset_level(world, levels);
}

/// Retry from level 1 after GameOver or LevelClear
pub fn restart(world: &mut GameWorld, levels: &dyn LevelSource) {
    world.level = 1;
    reset_level(world, levels);
}

/// Move to the next level, or finish the run after the last one
pub fn advance_level(world: &mut GameWorld, levels: &dyn LevelSource) {
    if world.level >= world.level_max {
        log::info!("Level {} was the last one", world.level);
        world.phase = GamePhase::LevelClear;
        world.events.push(GameEvent::AllLevelsCleared);
        return;
    }
    world.level += 1;
    reset_level(world, levels);
}

fn static_bodies(placements: Vec<Placement>) -> Vec<StaticBody> {
    placements
        .into_iter()
        .map(|p| StaticBody {
            bounds: p.bounds,
            texture: p.texture,
        })
        .collect()
}

fn populate(world: &mut GameWorld, data: LevelData) {
    world.walls = static_bodies(data.walls);
    world.exits = static_bodies(data.exits);

    let default_fill = world.tuning.default_pickup_fill;
    let pickups = data
        .pickups
        .into_iter()
        .map(|p| Pickup {
            bounds: p.bounds,
            fill: p.fill.unwrap_or(default_fill),
            texture: p.texture,
        })
        .collect();
    world.pickups = pickups;

    let enemies = data
        .enemy_spawns
        .into_iter()
        .map(|p| Actor::new(p.bounds))
        .collect();
    world.enemies = enemies;
}

/// Discard the current level and load `world.level` from scratch.
///
/// A failed load ends the run in LevelClear.
pub fn reset_level(world: &mut GameWorld, levels: &dyn LevelSource) {
    let held = world.player.as_ref().map(|p| p.intent).unwrap_or_default();

    world.oxygen = world.tuning.starting_oxygen(world.level);
    world.elapsed = 0.0;
    world.anim_timer = 0.0;
    world.clear_level();
    world.death_cue_played = false;
    world.events.push(GameEvent::LevelReset { level: world.level });

    let data = match levels.load(world.level) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Level {} unavailable: {}", world.level, e);
            world.phase = GamePhase::LevelClear;
            world.events.push(GameEvent::AllLevelsCleared);
            return;
        }
    };

    let spawn = data.player_spawn.unwrap_or(Vec2::new(SPAWN_X, SPAWN_Y));
    populate(world, data);

    let (w, h) = world.tuning.player_size;
    let mut player = Player::new(Aabb::new(spawn, w, h));
    player.intent = held;
    world.player = Some(player);
    world.camera.snap(spawn);

    log::info!(
        "Level {} loaded: {} walls, {} exits, {} canisters, {} enemies",
        world.level,
        world.walls.len(),
        world.exits.len(),
        world.pickups.len(),
        world.enemies.len()
    );
    world.events.push(GameEvent::LevelStarted { level: world.level });
    world.phase = GamePhase::Playing;
}

fn update_enemies(world: &mut GameWorld, dt: f32) {
    let Some(target) = world.player.as_ref().map(Player::pos) else {
        return;
    };
    let speed = world.tuning.enemy_speed;
    for enemy in &mut world.enemies {
        chase(enemy, target, speed, dt, &world.walls);
    }
}

/// Enemy contact, canister pickup, exit contact
fn handle_collisions(world: &mut GameWorld, levels: &dyn LevelSource, hooks: &mut Hooks) {
    let Some(bounds) = world.player.as_ref().map(|p| p.actor.bounds) else {
        return;
    };

    // One penalty per tick no matter how many enemies overlap
    if hits_any(&bounds, &world.enemies) {
        world.oxygen -= world.tuning.oxygen_hit_loss;
        (hooks.spawn_effect)(&mut world.effects, bounds.center, BARN_RED);
        world.events.push(GameEvent::PlayerHit { pos: bounds.center });
    }

    for i in overlaps_any(&bounds, &world.pickups).into_iter().rev() {
        let pickup = world.pickups.remove(i);
        world.oxygen = (world.oxygen + pickup.fill).min(world.tuning.max_oxygen);
        (hooks.spawn_effect)(&mut world.effects, pickup.bounds.center, SPRING_GREEN);
        world.events.push(GameEvent::OxygenCollected {
            pos: pickup.bounds.center,
            fill: pickup.fill,
        });
    }

    if hits_any(&bounds, &world.exits) {
        advance_level(world, levels);
    }
}

/// Advance the world by one fixed timestep. Does nothing outside Playing.
pub fn tick(world: &mut GameWorld, levels: &dyn LevelSource, hooks: &mut Hooks, dt: f32) {
    if world.phase != GamePhase::Playing || world.player.is_none() {
        return;
    }

    world.elapsed += dt;
    world.oxygen -= world.tuning.oxygen_drain_per_sec * dt;

    if let Some(player) = world.player.as_mut() {
        move_player(player, world.tuning.player_speed, &world.walls);
    }
    update_enemies(world, dt);
    handle_collisions(world, levels, hooks);

    world.effects.update(dt, &mut world.rng);
    if let Some(focus) = world.player.as_ref().map(Player::pos) {
        world.camera.track(focus, world.tuning.camera_smoothing);
    }

    (hooks.animate)(world, dt);

    // Reaching the exit on the same tick the air runs out still counts
    if world.phase == GamePhase::Playing && world.oxygen <= 0.0 {
        if !world.death_cue_played {
            log::info!("Out of oxygen on level {} after {:.1}s", world.level, world.elapsed);
            world.events.push(GameEvent::OutOfOxygen);
            world.death_cue_played = true;
        }
        world.phase = GamePhase::GameOver;
    }
}

//! Rendering collaborator and frame layout
//!
//! The host implements `Renderer`; `draw_frame` decides what goes on screen
//! each frame. Two passes: a camera-relative world pass, then a
//! screen-relative UI pass.

use std::path::Path;

use glam::Vec2;

use crate::Color;
use crate::assets::{AssetLoadError, AssetPaths, or_placeholder};
use crate::palette::*;
use crate::settings::Settings;
use crate::sim::{Actor, GamePhase, GameWorld, StaticBody};

/// Host-assigned texture id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    /// Drawn when a texture failed to load
    pub const PLACEHOLDER: TextureId = TextureId(u32::MAX);
}

/// Where a sprite's image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteTexture<'a> {
    Loaded(TextureId),
    /// Texture name from level data, resolved by the host
    Named(&'a str),
}

/// Draw groups, in back-to-front order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteLayer {
    Walls,
    Pickups,
    Enemies,
    Exits,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite<'a> {
    pub center: Vec2,
    pub size: Vec2,
    pub texture: SpriteTexture<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: f32,
}

impl TextStyle {
    pub const fn new(color: Color, size: f32) -> Self {
        Self { color, size }
    }
}

/// Host rendering capabilities
pub trait Renderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, AssetLoadError>;
    fn clear(&mut self, color: Color);
    /// Subsequent draws are in world space, shifted by `camera_offset`
    fn begin_world_pass(&mut self, camera_offset: Vec2);
    /// Subsequent draws are in screen space
    fn begin_ui_pass(&mut self);
    fn draw_sprites(&mut self, layer: SpriteLayer, sprites: &[Sprite<'_>]);
    fn draw_particles(&mut self, particles: &[ParticleSprite]);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
    /// Filled rectangle centered on `center`
    fn draw_rect_filled(&mut self, center: Vec2, size: Vec2, color: Color);
}

/// Walk-cycle textures for the actors
#[derive(Debug, Clone)]
pub struct TextureSet {
    pub player: [TextureId; 2],
    pub enemy: [TextureId; 2],
}

impl Default for TextureSet {
    fn default() -> Self {
        Self {
            player: [TextureId::PLACEHOLDER; 2],
            enemy: [TextureId::PLACEHOLDER; 2],
        }
    }
}

impl TextureSet {
    pub fn load(renderer: &mut dyn Renderer, assets_dir: &Path) -> Self {
        let paths = AssetPaths::new(assets_dir);
        let mut load = |name: &str| {
            or_placeholder(renderer.load_texture(&paths.model(name)), TextureId::PLACEHOLDER)
        };
        Self {
            player: [load("player1.png"), load("player2.png")],
            enemy: [load("enemy1.png"), load("enemy2.png")],
        }
    }
}

const BAR_W: f32 = 220.0;
const BAR_H: f32 = 20.0;
const HUD_X: f32 = 20.0;

fn static_sprites(bodies: &[StaticBody]) -> Vec<Sprite<'_>> {
    bodies
        .iter()
        .map(|b| Sprite {
            center: b.bounds.center,
            size: b.bounds.half * 2.0,
            texture: SpriteTexture::Named(&b.texture),
        })
        .collect()
}

fn actor_sprite(actor: &Actor, frames: &[TextureId; 2]) -> Sprite<'static> {
    Sprite {
        center: actor.pos(),
        size: actor.bounds.half * 2.0,
        texture: SpriteTexture::Loaded(frames[(actor.frame as usize) % 2]),
    }
}

fn draw_world(world: &GameWorld, textures: &TextureSet, renderer: &mut dyn Renderer) {
    renderer.begin_world_pass(world.camera.offset);

    renderer.draw_sprites(SpriteLayer::Walls, &static_sprites(&world.walls));
    let pickups: Vec<Sprite<'_>> = world
        .pickups
        .iter()
        .map(|p| Sprite {
            center: p.bounds.center,
            size: p.bounds.half * 2.0,
            texture: SpriteTexture::Named(&p.texture),
        })
        .collect();
    renderer.draw_sprites(SpriteLayer::Pickups, &pickups);
    let enemies: Vec<Sprite<'_>> = world
        .enemies
        .iter()
        .map(|e| actor_sprite(e, &textures.enemy))
        .collect();
    renderer.draw_sprites(SpriteLayer::Enemies, &enemies);
    renderer.draw_sprites(SpriteLayer::Exits, &static_sprites(&world.exits));
    if let Some(player) = &world.player {
        let sprite = actor_sprite(&player.actor, &textures.player);
        renderer.draw_sprites(SpriteLayer::Player, &[sprite]);
    }

    let start_alpha = world.effects.tuning.start_alpha;
    let particles: Vec<ParticleSprite> = world
        .effects
        .emitters
        .iter()
        .flat_map(|e| e.particles.iter())
        .map(|p| {
            let [r, g, b, _] = p.color;
            ParticleSprite {
                pos: p.pos,
                color: [r, g, b, p.alpha(start_alpha)],
            }
        })
        .collect();
    if !particles.is_empty() {
        renderer.draw_particles(&particles);
    }
}

/// Oxygen bar, level, timer and low-oxygen warning
pub fn draw_hud(world: &GameWorld, screen_height: f32, renderer: &mut dyn Renderer) {
    let ratio = world.oxygen_ratio();
    let y0 = screen_height - 40.0;
    let label = TextStyle::new(LIGHT_GRAY, 14.0);

    renderer.draw_rect_filled(
        Vec2::new(HUD_X + BAR_W / 2.0, y0),
        Vec2::new(BAR_W, BAR_H),
        DAVY_GREY,
    );
    if ratio > 0.0 {
        let fill = BAR_W * ratio;
        renderer.draw_rect_filled(
            Vec2::new(HUD_X + fill / 2.0, y0),
            Vec2::new(fill, BAR_H),
            AIR_FORCE_BLUE,
        );
    }
    renderer.draw_text(
        &format!("O2: {:.0}%", world.oxygen.max(0.0)),
        Vec2::new(HUD_X, y0 + 16.0),
        TextStyle::new(WHITE_SMOKE, 14.0),
    );
    renderer.draw_text(&format!("Level: {}", world.level), Vec2::new(HUD_X, y0 - 32.0), label);
    renderer.draw_text(&format!("Time: {:.1}s", world.elapsed), Vec2::new(HUD_X, y0 - 52.0), label);
    if world.is_low_oxygen() {
        renderer.draw_text(
            "Low oxygen!",
            Vec2::new(HUD_X, y0 - 72.0),
            TextStyle::new(APRICOT, 14.0),
        );
    }
}

fn draw_stats(world: &GameWorld, screen_height: f32, renderer: &mut dyn Renderer) {
    let style = TextStyle::new(LIGHT_GRAY, 16.0);
    renderer.draw_text(
        &format!("Time survived: {:.1}s", world.elapsed),
        Vec2::new(120.0, screen_height * 0.38),
        style,
    );
    renderer.draw_text(
        &format!("Last level: {}", world.level),
        Vec2::new(120.0, screen_height * 0.32),
        style,
    );
}

fn draw_ui(world: &GameWorld, settings: &Settings, renderer: &mut dyn Renderer) {
    let h = settings.screen_height;
    let hint = TextStyle::new(LIGHT_GRAY, 16.0);
    renderer.begin_ui_pass();

    match world.phase {
        GamePhase::Menu => {
            renderer.draw_text(
                &settings.title,
                Vec2::new(80.0, h * 0.6),
                TextStyle::new(WHITE, 36.0),
            );
            renderer.draw_text("WASD: move", Vec2::new(120.0, h * 0.5), hint);
            renderer.draw_text("SPACE: start", Vec2::new(120.0, h * 0.45), hint);
        }
        GamePhase::Playing => draw_hud(world, h, renderer),
        GamePhase::GameOver => {
            renderer.draw_text(
                "Out of oxygen",
                Vec2::new(120.0, h * 0.55),
                TextStyle::new(APRICOT, 28.0),
            );
            renderer.draw_text("SPACE: try again", Vec2::new(120.0, h * 0.48), hint);
            draw_stats(world, h, renderer);
        }
        GamePhase::LevelClear => {
            renderer.draw_text(
                "All levels cleared",
                Vec2::new(120.0, h * 0.55),
                TextStyle::new(ELECTRIC_GREEN, 28.0),
            );
            renderer.draw_text("SPACE: play again", Vec2::new(120.0, h * 0.48), hint);
            draw_stats(world, h, renderer);
        }
    }
}

/// Draw one complete frame
pub fn draw_frame(
    world: &GameWorld,
    textures: &TextureSet,
    settings: &Settings,
    renderer: &mut dyn Renderer,
) {
    renderer.clear(BLACK_OLIVE);
    if world.phase != GamePhase::Menu {
        draw_world(world, textures, renderer);
    }
    draw_ui(world, settings, renderer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelData, MemoryLevels, Placement};
    use crate::sim::{Aabb, InputAction, handle_press};
    use crate::tuning::Tuning;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq)]
    enum Cmd {
        World(Vec2),
        Ui,
        Sprites(SpriteLayer, usize),
        Particles(usize),
        Text(String),
        Rect(Vec2),
    }

    /// Records draw calls; every texture load fails
    #[derive(Default)]
    struct Recorder {
        cmds: Vec<Cmd>,
    }

    impl Renderer for Recorder {
        fn load_texture(&mut self, path: &Path) -> Result<TextureId, AssetLoadError> {
            Err(AssetLoadError::Missing(PathBuf::from(path)))
        }
        fn clear(&mut self, _color: Color) {}
        fn begin_world_pass(&mut self, camera_offset: Vec2) {
            self.cmds.push(Cmd::World(camera_offset));
        }
        fn begin_ui_pass(&mut self) {
            self.cmds.push(Cmd::Ui);
        }
        fn draw_sprites(&mut self, layer: SpriteLayer, sprites: &[Sprite<'_>]) {
            self.cmds.push(Cmd::Sprites(layer, sprites.len()));
        }
        fn draw_particles(&mut self, particles: &[ParticleSprite]) {
            self.cmds.push(Cmd::Particles(particles.len()));
        }
        fn draw_text(&mut self, text: &str, _pos: Vec2, _style: TextStyle) {
            self.cmds.push(Cmd::Text(text.to_string()));
        }
        fn draw_rect_filled(&mut self, _center: Vec2, size: Vec2, _color: Color) {
            self.cmds.push(Cmd::Rect(size));
        }
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.cmds
                .iter()
                .filter_map(|c| match c {
                    Cmd::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    fn world_in_level() -> GameWorld {
        let level = LevelData {
            walls: vec![Placement {
                bounds: Aabb::new(Vec2::new(300.0, 300.0), 32.0, 32.0),
                texture: "wall".into(),
            }],
            ..LevelData::default()
        };
        let src = MemoryLevels::new(vec![level]);
        let mut world = GameWorld::new(Tuning::default(), Vec2::new(480.0, 320.0), 1, 3);
        handle_press(&mut world, &src, InputAction::Confirm);
        world
    }

    #[test]
    fn test_missing_textures_use_placeholder() {
        let mut r = Recorder::default();
        let set = TextureSet::load(&mut r, Path::new("assets"));
        assert_eq!(set.player, [TextureId::PLACEHOLDER; 2]);
        assert_eq!(set.enemy, [TextureId::PLACEHOLDER; 2]);
    }

    #[test]
    fn test_menu_has_no_world_pass() {
        let world = GameWorld::new(Tuning::default(), Vec2::ZERO, 1, 3);
        let mut r = Recorder::default();
        draw_frame(&world, &TextureSet::default(), &Settings::default(), &mut r);
        assert!(!r.cmds.iter().any(|c| matches!(c, Cmd::World(_))));
        assert!(r.texts().contains(&"I Can't Breathe"));
    }

    #[test]
    fn test_playing_frame_draws_world_then_hud() {
        let mut world = world_in_level();
        world.oxygen = 50.0;
        let mut r = Recorder::default();
        draw_frame(&world, &TextureSet::default(), &Settings::default(), &mut r);

        let world_idx = r.cmds.iter().position(|c| matches!(c, Cmd::World(_))).unwrap();
        let ui_idx = r.cmds.iter().position(|c| *c == Cmd::Ui).unwrap();
        assert!(world_idx < ui_idx);
        assert!(r.cmds.contains(&Cmd::Sprites(SpriteLayer::Walls, 1)));
        assert!(r.cmds.contains(&Cmd::Sprites(SpriteLayer::Player, 1)));
        // Background bar then half-width fill
        assert!(r.cmds.contains(&Cmd::Rect(Vec2::new(220.0, 20.0))));
        assert!(r.cmds.contains(&Cmd::Rect(Vec2::new(110.0, 20.0))));
        assert!(r.texts().contains(&"O2: 50%"));
        assert!(!r.texts().contains(&"Low oxygen!"));
    }

    #[test]
    fn test_low_oxygen_warning_and_empty_bar() {
        let mut world = world_in_level();
        world.oxygen = -3.0;
        let mut r = Recorder::default();
        draw_hud(&world, 640.0, &mut r);
        assert!(r.texts().contains(&"Low oxygen!"));
        assert!(r.texts().contains(&"O2: 0%"));
        let rects = r.cmds.iter().filter(|c| matches!(c, Cmd::Rect(_))).count();
        assert_eq!(rects, 1);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut world = world_in_level();
        world.phase = GamePhase::GameOver;
        world.elapsed = 12.34;
        let mut r = Recorder::default();
        draw_frame(&world, &TextureSet::default(), &Settings::default(), &mut r);
        let texts = r.texts();
        assert!(texts.contains(&"Out of oxygen"));
        assert!(texts.contains(&"Time survived: 12.3s"));
        assert!(texts.contains(&"Last level: 1"));
    }
}

//! Game orchestrator
//!
//! Owns the world and its collaborators. A host loop calls `on_tick` with the
//! real frame delta and `on_render` once per frame, and forwards key events.

use crate::audio::{AudioBackend, AudioManager};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::level::LevelSource;
use crate::platform::{Key, map_key};
use crate::renderer::{Renderer, TextureSet, draw_frame};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameWorld, Hooks, handle_press, handle_release, tick};

pub struct Game {
    pub world: GameWorld,
    pub settings: Settings,
    levels: Box<dyn LevelSource>,
    hooks: Hooks,
    audio: AudioManager,
    textures: TextureSet,
    accumulator: f32,
}

impl Game {
    pub fn new(
        settings: Settings,
        levels: Box<dyn LevelSource>,
        audio: Box<dyn AudioBackend>,
        seed: u64,
    ) -> Self {
        let level_max = levels.max_level();
        let world = GameWorld::new(
            settings.tuning.clone(),
            settings.half_viewport(),
            level_max,
            seed,
        );
        let audio = AudioManager::new(audio, &settings.assets_dir, settings.volumes.clone());
        log::info!("{} ready, {} level(s)", settings.title, level_max);
        Self {
            world,
            settings,
            levels,
            hooks: Hooks::standard(),
            audio,
            textures: TextureSet::default(),
            accumulator: 0.0,
        }
    }

    /// Replace the extension hooks (animation, effects)
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Load actor textures through the host renderer
    pub fn load_textures(&mut self, renderer: &mut dyn Renderer) {
        self.textures = TextureSet::load(renderer, &self.settings.assets_dir);
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn is_music_playing(&self) -> bool {
        self.audio.is_music_playing()
    }

    /// Advance by a real frame delta using fixed simulation steps.
    ///
    /// Returns the number of steps run.
    pub fn on_tick(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.world, self.levels.as_ref(), &mut self.hooks, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.dispatch_events();
        substeps
    }

    pub fn on_render(&self, renderer: &mut dyn Renderer) {
        draw_frame(&self.world, &self.textures, &self.settings, renderer);
    }

    pub fn on_key_press(&mut self, key: Key) {
        let Some(action) = map_key(key) else {
            return;
        };
        let before = self.world.phase;
        handle_press(&mut self.world, self.levels.as_ref(), action);
        if before != GamePhase::Playing && self.world.phase == GamePhase::Playing {
            self.accumulator = 0.0;
        }
        self.dispatch_events();
    }

    pub fn on_key_release(&mut self, key: Key) {
        if let Some(action) = map_key(key) {
            handle_release(&mut self.world, action);
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.world.drain_events() {
            log::debug!("{:?}", event);
            self.audio.on_event(&event);
        }
    }
}

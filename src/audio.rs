//! Audio triggering
//!
//! The host supplies an `AudioBackend` that can load and play sounds. The
//! `AudioManager` maps simulation events onto cues and owns the music loop.

use std::path::Path;

use crate::assets::{AssetLoadError, AssetPaths};
use crate::settings::Volumes;
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Level started
    Start,
    /// Oxygen canister collected
    Pickup,
    /// Oxygen ran out
    Death,
    /// Background loop
    Music,
}

impl SoundCue {
    pub const ALL: [SoundCue; 4] = [
        SoundCue::Start,
        SoundCue::Pickup,
        SoundCue::Death,
        SoundCue::Music,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Start => "start.wav",
            SoundCue::Pickup => "pickup.wav",
            SoundCue::Death => "death.wav",
            SoundCue::Music => "music.wav",
        }
    }

    /// Configured volume for this cue
    pub fn volume(self, volumes: &Volumes) -> f32 {
        match self {
            SoundCue::Start => volumes.start,
            SoundCue::Pickup => volumes.pickup,
            SoundCue::Death => volumes.death,
            SoundCue::Music => volumes.music,
        }
    }
}

/// Backend-assigned sound id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

/// A playing sound that can be stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(pub u32);

/// Host audio capabilities
pub trait AudioBackend {
    fn load_sound(&mut self, path: &Path) -> Result<SoundId, AssetLoadError>;
    /// Play a sound; looping sounds return a handle for `stop`
    fn play(&mut self, sound: SoundId, volume: f32, looping: bool) -> Option<PlaybackHandle>;
    /// Stop and release a playing sound
    fn stop(&mut self, handle: PlaybackHandle);
}

/// Backend that plays nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn load_sound(&mut self, _path: &Path) -> Result<SoundId, AssetLoadError> {
        Ok(SoundId(0))
    }

    fn play(&mut self, _sound: SoundId, _volume: f32, _looping: bool) -> Option<PlaybackHandle> {
        None
    }

    fn stop(&mut self, _handle: PlaybackHandle) {}
}

/// Loaded cues; a cue that failed to load is silent
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    start: Option<SoundId>,
    pickup: Option<SoundId>,
    death: Option<SoundId>,
    music: Option<SoundId>,
}

impl SoundBank {
    pub fn load(backend: &mut dyn AudioBackend, assets_dir: &Path) -> Self {
        let paths = AssetPaths::new(assets_dir);
        let mut bank = Self::default();
        for cue in SoundCue::ALL {
            let sound = match backend.load_sound(&paths.sound(cue.file_name())) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("{}, {:?} will be silent", e, cue);
                    None
                }
            };
            *bank.slot(cue) = sound;
        }
        bank
    }

    fn slot(&mut self, cue: SoundCue) -> &mut Option<SoundId> {
        match cue {
            SoundCue::Start => &mut self.start,
            SoundCue::Pickup => &mut self.pickup,
            SoundCue::Death => &mut self.death,
            SoundCue::Music => &mut self.music,
        }
    }

    pub fn get(&self, cue: SoundCue) -> Option<SoundId> {
        match cue {
            SoundCue::Start => self.start,
            SoundCue::Pickup => self.pickup,
            SoundCue::Death => self.death,
            SoundCue::Music => self.music,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    bank: SoundBank,
    volumes: Volumes,
    music: Option<PlaybackHandle>,
}

impl AudioManager {
    pub fn new(mut backend: Box<dyn AudioBackend>, assets_dir: &Path, volumes: Volumes) -> Self {
        let bank = SoundBank::load(backend.as_mut(), assets_dir);
        Self {
            backend,
            bank,
            volumes,
            music: None,
        }
    }

    pub fn set_volumes(&mut self, volumes: Volumes) {
        self.volumes = volumes;
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.is_some()
    }

    /// Play a one-shot cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.volumes.effective(cue.volume(&self.volumes));
        if vol <= 0.0 {
            return;
        }
        if let Some(sound) = self.bank.get(cue) {
            self.backend.play(sound, vol, false);
        }
    }

    pub fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(sound) = self.bank.get(SoundCue::Music) else {
            return;
        };
        let vol = self.volumes.effective(self.volumes.music);
        self.music = self.backend.play(sound, vol, true);
    }

    pub fn stop_music(&mut self) {
        if let Some(handle) = self.music.take() {
            self.backend.stop(handle);
        }
    }

    /// React to a simulation event
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LevelReset { .. } => self.stop_music(),
            GameEvent::LevelStarted { .. } => {
                self.play(SoundCue::Start);
                self.start_music();
            }
            GameEvent::OxygenCollected { .. } => self.play(SoundCue::Pickup),
            GameEvent::OutOfOxygen => {
                self.play(SoundCue::Death);
                self.stop_music();
            }
            GameEvent::PlayerHit { .. } | GameEvent::AllLevelsCleared => {}
        }
    }
}

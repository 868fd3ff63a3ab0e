//! Sound cues
//!
//! The simulation only reports `GameEvent`s; this module maps them to cues and
//! hands them to an `AudioSink` at the mixed volume. Actual playback lives
//! behind the sink.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired a shot
    Shoot,
    /// Anything blew up (missile, rock, shot impact, wall)
    Explode,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired => Some(SoundEffect::Shoot),
            GameEvent::Explosion { .. } => Some(SoundEffect::Explode),
            // The impact explosion already carries the sound
            GameEvent::WallDestroyed { .. } => None,
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explode => "explode",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Ticks of silence between a crash and the menu music
pub const MENU_MUSIC_DELAY_TICKS: u32 = 120;

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Level,
}

impl MusicTrack {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu",
            MusicTrack::Level => "level",
        }
    }
}

/// Playback backend
pub trait AudioSink {
    /// Play `effect` at `volume` (0.0 - 1.0, already mixed)
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Switch the looping track; `None` stops it
    fn set_music(&mut self, _track: Option<MusicTrack>, _volume: f32) {}
}

/// Sink that only logs the cues; used by the headless driver
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: usize,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!("sfx {} at {:.2}", effect.as_str(), volume);
    }

    fn set_music(&mut self, track: Option<MusicTrack>, volume: f32) {
        match track {
            Some(track) => log::debug!("music {} at {:.2}", track.as_str(), volume),
            None => log::debug!("music stopped"),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: Option<MusicTrack>,
    /// Ticks spent silent since the run ended
    menu_delay: u32,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music: None,
            menu_delay: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Track currently looping, if any
    pub fn music(&self) -> Option<MusicTrack> {
        self.music
    }

    /// Pick the track for this tick. Level while flying, menu on the title
    /// screen, and a short silence after a crash before the menu comes back.
    pub fn update_music(&mut self, started: bool, game_over: bool) {
        let wanted = match (started, game_over) {
            (true, false) => {
                self.menu_delay = 0;
                Some(MusicTrack::Level)
            }
            (true, true) if self.menu_delay < MENU_MUSIC_DELAY_TICKS => {
                self.menu_delay += 1;
                None
            }
            _ => Some(MusicTrack::Menu),
        };
        if wanted != self.music {
            self.music = wanted;
            let vol = if self.muted {
                0.0
            } else {
                self.master_volume * self.music_volume
            };
            self.sink.set_music(wanted, vol);
        }
    }

    /// Play the cue for every event that has one
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

//! Playback state for the simulated transport
//!
//! There is no real audio output; a timing structure advances the position
//! while playing and the main loop polls it for end-of-song.

use std::time::Instant;

/// Default volume on first run.
pub const DEFAULT_VOLUME_PERCENT: u8 = 100;

/// Which catalog entry is selected and whether it is playing.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaybackState {
    pub current: Option<usize>,
    pub is_playing: bool,
}

/// Internal timing state for smooth progress updates.
#[derive(Clone)]
pub struct PlaybackTiming {
    pub position_ms: u32,
    pub last_update: Instant,
    pub is_playing: bool,
    pub duration_ms: u32,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_ms: 0,
            last_update: Instant::now(),
            is_playing: false,
            duration_ms: 0,
        }
    }
}

impl PlaybackTiming {
    pub fn current_position_ms(&self) -> u32 {
        if self.is_playing && self.duration_ms > 0 {
            let elapsed = self.last_update.elapsed().as_millis() as u32;
            self.position_ms.saturating_add(elapsed).min(self.duration_ms)
        } else {
            self.position_ms.min(self.duration_ms)
        }
    }

    /// Restart timing for a new song of the given length.
    pub fn start(&mut self, duration_ms: u32) {
        self.position_ms = 0;
        self.duration_ms = duration_ms;
        self.is_playing = true;
        self.last_update = Instant::now();
    }

    /// Freeze or resume at the current position.
    pub fn set_playing(&mut self, playing: bool) {
        self.position_ms = self.current_position_ms();
        self.is_playing = playing;
        self.last_update = Instant::now();
    }

    pub fn seek_to(&mut self, position_ms: u32) {
        self.position_ms = position_ms.min(self.duration_ms);
        self.last_update = Instant::now();
    }

    /// End-of-song check; the controller advances to the next song when this
    /// fires.
    pub fn has_ended(&self) -> bool {
        self.is_playing && self.duration_ms > 0 && self.current_position_ms() >= self.duration_ms
    }
}

/// Complete playback information for rendering the bottom bar.
#[derive(Clone, Debug)]
pub struct PlaybackInfo {
    pub title: Option<String>,
    pub progress_ms: u32,
    pub duration_ms: u32,
    pub is_playing: bool,
    pub volume: u8,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            title: None,
            progress_ms: 0,
            duration_ms: 0,
            is_playing: false,
            volume: DEFAULT_VOLUME_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_timing_does_not_advance() {
        let mut timing = PlaybackTiming::default();
        timing.start(1000);
        timing.set_playing(false);
        let frozen = timing.current_position_ms();
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(timing.current_position_ms(), frozen);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut timing = PlaybackTiming::default();
        timing.start(1000);
        timing.seek_to(5000);
        assert_eq!(timing.position_ms, 1000);
    }
}

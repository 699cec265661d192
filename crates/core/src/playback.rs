//! Video watch monitoring.
//!
//! [`VideoWatchMonitor`] follows one video's transport state and playback
//! position, and reports a single [`WatchCompleted`] event once the watched
//! fraction reaches the configured threshold. Volume, mute and fullscreen are
//! tracked alongside but never influence completion.

use crate::policy::CompletionPolicy;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Transport state of the monitored video.
///
/// `Completed` is terminal: once the threshold has been reached the monitor
/// ignores further transport changes and never reports completion again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Completed,
}

/// Emitted exactly once, when the watched fraction first reaches the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchCompleted {
    pub position: f64,
    pub duration: f64,
    pub watched_fraction: f64,
}

//
// ─── VOLUME ────────────────────────────────────────────────────────────────────
//

/// Volume and mute, independent of the transport state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: f64,
    muted: bool,
    restore_level: f64,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            level: 1.0,
            muted: false,
            restore_level: 1.0,
        }
    }
}

impl Volume {
    /// Sets the level, clamped to `[0, 1]`. A level of exactly 0 mutes.
    pub fn set_level(&mut self, level: f64) {
        let level = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.level = level;
        self.muted = level == 0.0;
        if level > 0.0 {
            self.restore_level = level;
        }
    }

    /// Mutes, or unmutes back to the last non-zero level.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            self.level = self.restore_level;
        } else {
            if self.level > 0.0 {
                self.restore_level = self.level;
            }
            self.muted = true;
        }
    }

    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level actually applied to the media element.
    #[must_use]
    pub fn effective(&self) -> f64 {
        if self.muted { 0.0 } else { self.level }
    }
}

//
// ─── MONITOR ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct VideoWatchMonitor {
    threshold: f64,
    state: PlaybackState,
    position: f64,
    duration: f64,
    volume: Volume,
    fullscreen: bool,
}

impl VideoWatchMonitor {
    #[must_use]
    pub fn new(policy: &CompletionPolicy) -> Self {
        Self {
            threshold: policy.watch_threshold(),
            state: PlaybackState::Idle,
            position: 0.0,
            duration: 0.0,
            volume: Volume::default(),
            fullscreen: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == PlaybackState::Completed
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Starts or resumes playback. Returns whether the state changed.
    pub fn play(&mut self) -> bool {
        match self.state {
            PlaybackState::Idle | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                true
            }
            PlaybackState::Playing | PlaybackState::Completed => false,
        }
    }

    /// Pauses playback. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            true
        } else {
            false
        }
    }

    /// Play/pause button behaviour.
    pub fn toggle_play(&mut self) -> bool {
        if self.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Media reached its end on its own.
    pub fn on_ended(&mut self) {
        self.pause();
    }

    /// Records the total duration once media metadata is known.
    ///
    /// Negative or non-finite durations are stored as 0, which disables
    /// completion until a usable duration arrives.
    pub fn on_metadata(&mut self, duration: f64) {
        self.duration = sanitize(duration);
    }

    /// Moves the playhead without evaluating completion.
    pub fn seek(&mut self, position: f64) {
        self.position = sanitize(position);
    }

    /// Handles a playback-position tick.
    ///
    /// Completion is only evaluated while playing; the event is returned the
    /// first time the watched fraction reaches the threshold and never again.
    pub fn on_position(&mut self, position: f64) -> Option<WatchCompleted> {
        self.position = sanitize(position);
        if self.state != PlaybackState::Playing {
            return None;
        }

        let watched_fraction = self.watched_fraction();
        if watched_fraction < self.threshold {
            return None;
        }

        self.state = PlaybackState::Completed;
        Some(WatchCompleted {
            position: self.position,
            duration: self.duration,
            watched_fraction,
        })
    }

    /// `position / duration`, or 0 when the duration is unknown.
    #[must_use]
    pub fn watched_fraction(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.position / self.duration
    }

    pub fn set_volume(&mut self, level: f64) {
        self.volume.set_level(level);
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
    }

    #[must_use]
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Returns the new fullscreen flag.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// `"current / total"` readout, e.g. `"1:05 / 10:00"`.
    #[must_use]
    pub fn time_readout(&self) -> String {
        format!(
            "{} / {}",
            format_timestamp(self.position),
            format_timestamp(self.duration)
        )
    }
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Formats seconds as `m:ss`. Fractions are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_timestamp(seconds: f64) -> String {
    let total = sanitize(seconds).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_monitor(duration: f64) -> VideoWatchMonitor {
        let mut monitor = VideoWatchMonitor::new(&CompletionPolicy::default());
        monitor.on_metadata(duration);
        assert!(monitor.play());
        monitor
    }

    #[test]
    fn fires_once_at_ninety_percent() {
        let mut monitor = playing_monitor(100.0);

        assert!(monitor.on_position(10.0).is_none());
        assert!(monitor.on_position(50.0).is_none());
        assert!(monitor.on_position(89.0).is_none());

        let event = monitor.on_position(90.0).expect("completion at 90%");
        assert_eq!(event.position, 90.0);
        assert_eq!(event.duration, 100.0);
        assert!((event.watched_fraction - 0.9).abs() < f64::EPSILON);
        assert_eq!(monitor.state(), PlaybackState::Completed);

        assert!(monitor.on_position(95.0).is_none());
        assert!(monitor.on_position(100.0).is_none());
    }

    #[test]
    fn zero_duration_never_completes() {
        let mut monitor = playing_monitor(0.0);
        for position in [0.0, 1.0, 90.0, 1e9, f64::INFINITY] {
            assert!(monitor.on_position(position).is_none());
        }
        assert_eq!(monitor.state(), PlaybackState::Playing);
        assert_eq!(monitor.watched_fraction(), 0.0);
    }

    #[test]
    fn unknown_duration_is_treated_as_zero() {
        let mut monitor = playing_monitor(f64::NAN);
        assert_eq!(monitor.duration(), 0.0);
        assert!(monitor.on_position(50.0).is_none());
    }

    #[test]
    fn seek_does_not_complete_until_next_tick() {
        let mut monitor = playing_monitor(100.0);
        monitor.seek(95.0);
        assert_eq!(monitor.position(), 95.0);
        assert_eq!(monitor.state(), PlaybackState::Playing);

        assert!(monitor.on_position(95.5).is_some());
    }

    #[test]
    fn ticks_while_paused_do_not_complete() {
        let mut monitor = playing_monitor(100.0);
        assert!(monitor.pause());
        assert!(monitor.on_position(99.0).is_none());
        assert_eq!(monitor.state(), PlaybackState::Paused);

        assert!(monitor.play());
        assert!(monitor.on_position(99.0).is_some());
    }

    #[test]
    fn idle_monitor_ignores_ticks() {
        let mut monitor = VideoWatchMonitor::new(&CompletionPolicy::default());
        monitor.on_metadata(10.0);
        assert!(monitor.on_position(10.0).is_none());
        assert_eq!(monitor.state(), PlaybackState::Idle);
    }

    #[test]
    fn transport_transitions() {
        let mut monitor = VideoWatchMonitor::new(&CompletionPolicy::default());
        assert!(!monitor.pause());
        assert!(monitor.toggle_play());
        assert!(monitor.is_playing());
        assert!(monitor.toggle_play());
        assert_eq!(monitor.state(), PlaybackState::Paused);
        monitor.play();
        monitor.on_ended();
        assert_eq!(monitor.state(), PlaybackState::Paused);
    }

    #[test]
    fn completed_is_terminal() {
        let mut monitor = playing_monitor(10.0);
        assert!(monitor.on_position(10.0).is_some());
        assert!(!monitor.pause());
        assert!(!monitor.play());
        monitor.on_ended();
        assert_eq!(monitor.state(), PlaybackState::Completed);
    }

    #[test]
    fn custom_threshold_is_honoured() {
        let policy = CompletionPolicy::new(0.5, crate::policy::QuizCompletionRule::AllAnswered)
            .unwrap();
        let mut monitor = VideoWatchMonitor::new(&policy);
        monitor.on_metadata(60.0);
        monitor.play();
        assert!(monitor.on_position(29.0).is_none());
        assert!(monitor.on_position(30.0).is_some());
    }

    #[test]
    fn mute_restores_previous_volume() {
        let mut monitor = VideoWatchMonitor::new(&CompletionPolicy::default());
        monitor.set_volume(0.6);
        monitor.toggle_mute();
        assert!(monitor.volume().is_muted());
        assert_eq!(monitor.volume().effective(), 0.0);

        monitor.toggle_mute();
        assert!(!monitor.volume().is_muted());
        assert_eq!(monitor.volume().effective(), 0.6);
    }

    #[test]
    fn zero_volume_counts_as_muted() {
        let mut volume = Volume::default();
        volume.set_level(0.4);
        volume.set_level(0.0);
        assert!(volume.is_muted());

        volume.toggle_mute();
        assert!(!volume.is_muted());
        assert_eq!(volume.level(), 0.4);

        volume.set_level(3.0);
        assert_eq!(volume.level(), 1.0);
    }

    #[test]
    fn fullscreen_toggles() {
        let mut monitor = VideoWatchMonitor::new(&CompletionPolicy::default());
        assert!(monitor.toggle_fullscreen());
        assert!(!monitor.toggle_fullscreen());
        assert!(!monitor.is_fullscreen());
    }

    #[test]
    fn timestamps_format_as_minutes_and_seconds() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(65.9), "1:05");
        assert_eq!(format_timestamp(600.0), "10:00");
        assert_eq!(format_timestamp(f64::NAN), "0:00");

        let mut monitor = playing_monitor(600.0);
        monitor.seek(65.0);
        assert_eq!(monitor.time_readout(), "1:05 / 10:00");
    }
}

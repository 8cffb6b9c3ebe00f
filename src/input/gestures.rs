use crate::{
    core::config::TiledScrollConfig,
    core::constants::{DOUBLE_TAP_DISTANCE, DOUBLE_TAP_TIMEOUT_MS},
    core::geo::Point,
    input::events::{TapGesture, TouchEvent},
};
use instant::Instant;
use std::time::Duration;

/// Configuration for tap recognition
#[derive(Debug, Clone)]
pub struct TapConfig {
    /// Maximum time between the taps of a double tap
    pub double_tap_timeout: Duration,
    /// Maximum distance between the taps of a double tap
    pub double_tap_distance_threshold: f64,
    /// Hold single taps until the double-tap window has passed without a second tap
    pub require_double_tap_to_fail: bool,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            double_tap_timeout: Duration::from_millis(DOUBLE_TAP_TIMEOUT_MS),
            double_tap_distance_threshold: DOUBLE_TAP_DISTANCE,
            require_double_tap_to_fail: false,
        }
    }
}

impl TapConfig {
    pub fn from_config(config: &TiledScrollConfig) -> Self {
        Self {
            require_double_tap_to_fail: config.tap_requires_double_tap_to_fail,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTap {
    location: Point,
    timestamp: Instant,
    /// Already reported as a single tap
    reported: bool,
}

/// Turns raw touch-ups into single, double and two-finger taps.
///
/// Without `require_double_tap_to_fail` the first tap of a double tap is also
/// reported as a single tap. With it, single taps are held back and only come out of
/// [`TapRecognizer::poll`] (or the next touch) once the double-tap window closes.
#[derive(Debug, Clone)]
pub struct TapRecognizer {
    pub enabled: bool,
    config: TapConfig,
    last_tap: Option<PendingTap>,
}

impl TapRecognizer {
    pub fn new() -> Self {
        Self::with_config(TapConfig::default())
    }

    pub fn with_config(config: TapConfig) -> Self {
        Self {
            enabled: true,
            config,
            last_tap: None,
        }
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    pub fn set_require_double_tap_to_fail(&mut self, require: bool) {
        self.config.require_double_tap_to_fail = require;
    }

    /// Processes a touch-up and returns the taps it completes
    pub fn process(&mut self, event: TouchEvent) -> Vec<TapGesture> {
        let mut taps = Vec::new();
        if !self.enabled || event.touch_count == 0 {
            return taps;
        }

        if event.touch_count >= 2 {
            self.flush(&mut taps);
            taps.push(TapGesture::two_finger(event.location));
            return taps;
        }

        match self.last_tap {
            Some(last) if self.completes_double_tap(&last, &event) => {
                self.last_tap = None;
                taps.push(TapGesture::double(event.location));
            }
            _ => {
                self.flush(&mut taps);
                let reported = !self.config.require_double_tap_to_fail;
                if reported {
                    taps.push(TapGesture::single(event.location));
                }
                self.last_tap = Some(PendingTap {
                    location: event.location,
                    timestamp: event.timestamp,
                    reported,
                });
            }
        }

        taps
    }

    /// Releases a held single tap once the double-tap window has closed
    pub fn poll(&mut self, now: Instant) -> Option<TapGesture> {
        let last = self.last_tap?;
        if now.duration_since(last.timestamp) <= self.config.double_tap_timeout {
            return None;
        }
        self.last_tap = None;
        (!last.reported).then(|| TapGesture::single(last.location))
    }

    /// Whether a single tap is being held back
    pub fn has_pending_tap(&self) -> bool {
        self.last_tap.map_or(false, |tap| !tap.reported)
    }

    pub fn reset(&mut self) {
        self.last_tap = None;
    }

    fn completes_double_tap(&self, last: &PendingTap, event: &TouchEvent) -> bool {
        event.timestamp.duration_since(last.timestamp) <= self.config.double_tap_timeout
            && last.location.distance_to(&event.location)
                <= self.config.double_tap_distance_threshold
    }

    fn flush(&mut self, taps: &mut Vec<TapGesture>) {
        if let Some(last) = self.last_tap.take() {
            if !last.reported {
                taps.push(TapGesture::single(last.location));
            }
        }
    }
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

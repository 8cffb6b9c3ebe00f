//! Configuration surface of the tiled scroll view
//!
//! All fields are plain data; dependent side effects (maximum zoom scale, tiled
//! surface levels, reconciliation after a margin change) are applied by the
//! explicit setters on [`TiledScrollView`](crate::core::scroll_view::TiledScrollView).

use crate::core::constants::{
    DEFAULT_LEVELS_OF_DETAIL, DEFAULT_LEVELS_OF_ZOOM, FADE_IN_DURATION_MS, MUTE_ANIMATION_TIME_MS,
    MAX_LEVELS, TILE_SIZE, VISIBILITY_MARGIN,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiledScrollConfig {
    /// Recenter the viewport on background single taps
    pub center_single_tap: bool,
    pub zooms_in_on_double_tap: bool,
    /// Double-tap zoom centers on the touch instead of keeping the current center
    pub zooms_to_touch_location: bool,
    pub zooms_out_on_two_finger_tap: bool,
    /// Hold single taps back until the double-tap window has passed
    pub tap_requires_double_tap_to_fail: bool,
    pub levels_of_zoom: u32,
    pub levels_of_detail: u32,
    pub visibility_margin: f64,
    pub mute_duration_ms: u64,
    pub fade_in_duration_ms: u64,
    pub tile_size: f64,
    /// Outline every drawn tile (debugging aid)
    pub annotates_tiles: bool,
}

impl Default for TiledScrollConfig {
    fn default() -> Self {
        Self {
            center_single_tap: true,
            zooms_in_on_double_tap: true,
            zooms_to_touch_location: false,
            zooms_out_on_two_finger_tap: true,
            tap_requires_double_tap_to_fail: false,
            levels_of_zoom: DEFAULT_LEVELS_OF_ZOOM,
            levels_of_detail: DEFAULT_LEVELS_OF_DETAIL,
            visibility_margin: VISIBILITY_MARGIN,
            mute_duration_ms: MUTE_ANIMATION_TIME_MS,
            fade_in_duration_ms: FADE_IN_DURATION_MS,
            tile_size: TILE_SIZE,
            annotates_tiles: false,
        }
    }
}

impl TiledScrollConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the engine cannot work with.
    ///
    /// `levels_of_detail == 1` is accepted with a warning: it renders, but with
    /// visible artifacts.
    pub fn validate(&self) -> Result<()> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(Error::Config(format!(
                "tile size must be positive, got {}",
                self.tile_size
            )));
        }
        if !(self.visibility_margin.is_finite() && self.visibility_margin >= 0.0) {
            return Err(Error::Config(format!(
                "visibility margin must be non-negative, got {}",
                self.visibility_margin
            )));
        }
        if self.levels_of_zoom > MAX_LEVELS {
            return Err(Error::Config(format!(
                "levels of zoom must be at most {}, got {}",
                MAX_LEVELS, self.levels_of_zoom
            )));
        }
        if self.levels_of_detail > MAX_LEVELS {
            return Err(Error::Config(format!(
                "levels of detail must be at most {}, got {}",
                MAX_LEVELS, self.levels_of_detail
            )));
        }
        if self.levels_of_detail == 1 {
            log::warn!("levels_of_detail == 1 causes strange rendering behaviour");
        }
        Ok(())
    }

    /// Maximum zoom scale implied by `levels_of_zoom`
    pub fn maximum_zoom_scale(&self) -> f64 {
        2_f64.powi(self.levels_of_zoom as i32)
    }

    pub fn mute_duration(&self) -> Duration {
        Duration::from_millis(self.mute_duration_ms)
    }

    pub fn fade_in_duration(&self) -> Duration {
        Duration::from_millis(self.fade_in_duration_ms)
    }
}

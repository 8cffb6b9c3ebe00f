//! Engine-wide defaults. Keeping them in a single place makes the magic numbers easy to tweak.

/// Default square tile size in content units.
pub const TILE_SIZE: f64 = 256.0;

/// Distance beyond the viewport edge at which annotation views are already materialized.
pub const VISIBILITY_MARGIN: f64 = 25.0;

/// How long annotation updates stay muted around a tap-driven zoom animation.
pub const MUTE_ANIMATION_TIME_MS: u64 = 100;

/// Duration of the opacity fade played when an annotation view appears.
pub const FADE_IN_DURATION_MS: u64 = 300;

/// Number of zoom levels above 1.0 (the maximum zoom scale is `2^levels`).
pub const DEFAULT_LEVELS_OF_ZOOM: u32 = 2;

/// Number of magnified tile levels the tiled surface renders.
pub const DEFAULT_LEVELS_OF_DETAIL: u32 = 2;

/// Upper bound for `levels_of_zoom` and `levels_of_detail`.
pub const MAX_LEVELS: u32 = 30;

/// Maximum time between two taps for them to count as a double tap.
pub const DOUBLE_TAP_TIMEOUT_MS: u64 = 300;

/// Maximum distance between two taps for them to count as a double tap.
pub const DOUBLE_TAP_DISTANCE: f64 = 50.0;

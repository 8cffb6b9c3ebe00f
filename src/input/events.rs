use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Kinds of tap the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TapKind {
    /// One finger, one tap
    Single,
    /// One finger, two taps in quick succession
    Double,
    /// Two fingers, one tap
    TwoFinger,
}

/// A recognized tap, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapGesture {
    pub kind: TapKind,
    pub location: Point,
    pub touch_count: u8,
}

impl TapGesture {
    pub fn single(location: Point) -> Self {
        Self {
            kind: TapKind::Single,
            location,
            touch_count: 1,
        }
    }

    pub fn double(location: Point) -> Self {
        Self {
            kind: TapKind::Double,
            location,
            touch_count: 1,
        }
    }

    pub fn two_finger(location: Point) -> Self {
        Self {
            kind: TapKind::TwoFinger,
            location,
            touch_count: 2,
        }
    }
}

/// A raw touch-up reported by the host: fingers lifted after a short touch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub location: Point,
    pub touch_count: u8,
    pub timestamp: instant::Instant,
}

impl TouchEvent {
    pub fn new(location: Point, touch_count: u8, timestamp: instant::Instant) -> Self {
        Self {
            location,
            touch_count,
            timestamp,
        }
    }
}

/// What a single tap did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// An annotation view was hit and became the selection
    Selected(crate::annotations::AnnotationId),
    /// Nothing selectable was hit; the tap went to the surface
    Background,
    /// Zoom gesture handled (double or two-finger tap)
    Zoomed,
    /// Dropped because annotation updates are muted
    Ignored,
}

impl TapOutcome {
    pub fn is_handled(&self) -> bool {
        !matches!(self, TapOutcome::Ignored)
    }
}

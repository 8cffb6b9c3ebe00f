//! Prelude module for common tiled-scroll types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tiled_scroll::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::TiledScrollConfig,
    geo::{Point, TileIndex},
    scroll_view::{TickReport, TiledScrollView},
    transform::ViewportTransform,
    viewport::{ScrollState, ScrollableSurface, ViewportFrame},
};

pub use crate::annotations::{
    Annotation, AnnotationId, AnnotationView, AnnotationViewProvider, Delegate, ReconcileReport,
    ReuseIdentifierProvider, ViewId, ViewPool,
};

pub use crate::input::{TapGesture, TapKind, TapOutcome, TouchEvent};

pub use crate::tiles::{DrawReport, TileCanvas, TileImageSource, TileSet, TiledSurface};

#[cfg(feature = "render")]
pub use crate::tiles::RgbaCanvas;

pub use crate::animation::FadeAnimation;

pub use crate::{Error, Result};

pub use std::time::Duration;

pub use instant::Instant;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

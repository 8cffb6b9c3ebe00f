//! # tiled-scroll
//!
//! A headless engine for tiled, zoomable scroll views with annotation markers.
//!
//! The host toolkit owns rendering and scroll physics. This crate maps annotation
//! content positions to the screen, decides which annotation views exist, recycles
//! the ones that scroll away, resolves taps into selection changes and zoom
//! requests, and addresses the tiles a tiled layer needs to draw.

pub mod animation;
pub mod annotations;
pub mod core;
pub mod input;
pub mod prelude;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::TiledScrollConfig,
    geo::{Point, TileIndex},
    scroll_view::{TickReport, TiledScrollView},
    transform::ViewportTransform,
    viewport::{ScrollState, ScrollableSurface, ViewportFrame},
};

pub use annotations::{
    Annotation, AnnotationId, AnnotationView, AnnotationViewProvider, Delegate,
    ReconcileReport, Reconciler, ReuseIdentifierProvider, ViewId, ViewPool,
};

pub use input::{TapGesture, TapKind, TapOutcome, TouchEvent};

pub use tiles::{TileCanvas, TileImageSource, TileSet, TiledSurface};

pub use animation::FadeAnimation;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a caller can recover from.
///
/// Broken pool invariants (recycling an unbound view, showing a view that is
/// already bound elsewhere) are programming errors and panic instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown annotation: {0}")]
    UnknownAnnotation(String),

    #[error("No view available for annotation: {0}")]
    ViewUnavailable(String),

    #[error("Invalid zoom scale: {0}")]
    InvalidZoomScale(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

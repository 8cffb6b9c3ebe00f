pub mod events;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{TapGesture, TapKind, TapOutcome, TouchEvent};
pub use gestures::{TapConfig, TapRecognizer};
pub use handler::{GestureContext, GestureResolver, Selection};

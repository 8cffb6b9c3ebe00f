//! Animation descriptors handed to the host.
//!
//! The engine never runs timers for animations; it describes them and lets the host's
//! animation system (or [`FadeAnimation::opacity_at`]) play them.

pub mod fade;

pub use fade::FadeAnimation;

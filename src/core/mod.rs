pub mod bounds;
pub mod config;
pub mod constants;
pub mod geo;
pub mod scroll_view;
pub mod transform;
pub mod viewport;

//! Configuration types
//!
//! - `base`: [`Config`] and [`Format`]
//! - `display`: [`DisplayConfig`]
//! - `presets`: development, production, test and environment setups

mod base;
mod display;
mod presets;

pub use base::{Config, Format};
pub use display::DisplayConfig;
pub use presets::{ENV_FORMAT, ENV_LEVEL};

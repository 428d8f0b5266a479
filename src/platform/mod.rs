//! Platform abstraction layer: logging setup and frame pacing.

mod desktop;
pub use desktop::*;

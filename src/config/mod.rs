//! Service configuration.

mod app;
pub use app::*;

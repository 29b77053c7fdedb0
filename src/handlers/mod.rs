//! HTTP handlers.

pub mod student;
pub use student::*;

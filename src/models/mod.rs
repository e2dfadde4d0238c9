//! Data models for the center directory.
//!
//! These models match the JSON document shared with other devices field for field.

mod center;
mod contact;
mod document;
mod locale;
pub mod location;
mod payload;

pub use center::*;
pub use contact::*;
pub use document::*;
pub use locale::*;
pub use payload::*;

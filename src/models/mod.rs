//! Data models for the railway operations backend.
//!
//! Wire names are camelCase to match the admin frontend.

mod annonce;
mod folder;
mod news;
mod schedule;
mod upload;

pub use annonce::*;
pub use folder::*;
pub use news::*;
pub use schedule::*;
pub use upload::*;

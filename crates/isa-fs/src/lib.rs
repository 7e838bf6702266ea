//! Filesystem primitives used while unpacking archives into dataset directories.
//!
//! - `workspace.rs` - Scratch directory removed on drop
//! - `primitives/` - Move and listing helpers

mod error;
pub mod primitives;
mod workspace;

pub use error::{Error, Result};
pub use primitives::{list_files, move_contents, move_entry, visible_entries};
pub use workspace::Workspace;

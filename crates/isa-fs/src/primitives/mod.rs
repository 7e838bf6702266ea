pub mod list;
pub mod move_entry;

pub use list::{list_files, visible_entries};
pub use move_entry::{move_contents, move_entry};

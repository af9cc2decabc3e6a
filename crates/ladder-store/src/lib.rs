pub mod file;
pub mod table;

pub use file::{FileVersionStore, VERSION_FILE_NAME};
pub use table::{DEFAULT_VERSION_TABLE, TableVersionStore};

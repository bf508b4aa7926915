mod file_utils;
mod config_reader;
mod bootstrap;

pub use self::file_utils::*;
pub use self::config_reader::*;
pub use self::bootstrap::*;

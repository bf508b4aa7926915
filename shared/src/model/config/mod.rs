mod app_config;
mod library;
mod log;
mod naming;
mod nfo;
mod path_mapping;

pub use self::app_config::*;
pub use self::library::*;
pub use self::log::*;
pub use self::naming::*;
pub use self::nfo::*;
pub use self::path_mapping::*;

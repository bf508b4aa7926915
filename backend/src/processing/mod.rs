mod path_mapper;
mod library_resolver;
mod locator;
mod target_path;
mod freshness;
mod projector;
pub mod processor;

pub use self::path_mapper::*;
pub use self::library_resolver::*;
pub use self::locator::*;
pub use self::target_path::*;
pub use self::freshness::*;
pub use self::projector::*;

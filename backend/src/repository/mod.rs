mod nfo_repository;
mod image_repository;

pub use self::nfo_repository::*;
pub use self::image_repository::*;

pub mod request;
mod plex;

pub use self::plex::*;

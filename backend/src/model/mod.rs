mod config;
mod plex_xml;
mod media;
mod nfo;
mod summary;

pub use self::config::*;
pub use self::plex_xml::*;
pub use self::media::*;
pub use self::nfo::*;
pub use self::summary::*;

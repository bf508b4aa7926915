pub mod macros;
mod export;
mod log;

pub use self::export::*;
pub use self::log::*;

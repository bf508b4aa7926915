mod export;
mod report;

pub use self::export::*;
pub use self::report::*;

mod export_error;

pub use self::export_error::*;

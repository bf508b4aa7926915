use std::error::Error;
use std::fmt::{Display, Formatter, Result};
use crate::utils::sanitize_sensitive_info;

#[macro_export]
macro_rules! config_err {
    ($($arg:tt)*) => {
        $crate::error::ExportError::new($crate::error::ExportErrorKind::Config, format!($($arg)*))
    };
}

pub use config_err;

#[macro_export]
macro_rules! config_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::ExportError::new($crate::error::ExportErrorKind::Config, format!($($arg)*)))
    };
}

pub use config_err_res;

#[macro_export]
macro_rules! section_err {
    ($($arg:tt)*) => {
        $crate::error::ExportError::new($crate::error::ExportErrorKind::Section, format!($($arg)*))
    };
}

pub use section_err;

#[macro_export]
macro_rules! section_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::ExportError::new($crate::error::ExportErrorKind::Section, format!($($arg)*)))
    };
}

pub use section_err_res;

#[macro_export]
macro_rules! item_err {
    ($($arg:tt)*) => {
        $crate::error::ExportError::new($crate::error::ExportErrorKind::Item, format!($($arg)*))
    };
}

pub use item_err;

#[macro_export]
macro_rules! item_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::ExportError::new($crate::error::ExportErrorKind::Item, format!($($arg)*)))
    };
}

pub use item_err_res;

#[macro_export]
macro_rules! artifact_err {
    ($($arg:tt)*) => {
        $crate::error::ExportError::new($crate::error::ExportErrorKind::Artifact, format!($($arg)*))
    };
}

pub use artifact_err;

#[macro_export]
macro_rules! artifact_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::ExportError::new($crate::error::ExportErrorKind::Artifact, format!($($arg)*)))
    };
}

pub use artifact_err_res;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportErrorKind {
    // abort before any library is processed
    Config,
    // abort the whole run
    Section,
    // skip the item, nothing recorded
    Item,
    // recorded as failure, siblings continue
    Artifact,
}

impl ExportErrorKind {
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Config | Self::Section)
    }
}

#[derive(Debug)]
pub struct ExportError {
    pub kind: ExportErrorKind,
    pub message: String,
}

impl ExportError {
    pub const fn new(kind: ExportErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub const fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", sanitize_sensitive_info(&self.message))
    }
}

impl Error for ExportError {}

#[cfg(test)]
mod tests {
    #[test]
    fn test_fatal_kinds() {
        assert!(config_err!("missing {}", "token").is_fatal());
        assert!(section_err!("status {}", 500).is_fatal());
        assert!(!item_err!("gone").is_fatal());
        assert!(!artifact_err!("write failed").is_fatal());
    }

    #[test]
    fn test_display_masks_token() {
        let err = section_err!("failed http://plex:32400/library/sections?X-Plex-Token=abcdef");
        assert_eq!(err.to_string(), "failed http://plex:32400/library/sections?X-Plex-Token=***");
    }
}

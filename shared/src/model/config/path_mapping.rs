use serde::{Deserialize, Serialize};

/// One `plex` -> `local` substitution, applied in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathMappingDto {
    pub plex: String,
    pub local: String,
}

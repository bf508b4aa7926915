use serde::{Deserialize, Serialize};
use crate::utils::default_as_true;

/// Field gates for NFO documents. The first group is on by default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NfoFieldsDto {
    #[serde(default = "default_as_true")]
    pub title: bool,
    #[serde(default = "default_as_true")]
    pub agent_id: bool,
    #[serde(default = "default_as_true")]
    pub tagline: bool,
    #[serde(default = "default_as_true")]
    pub plot: bool,
    #[serde(default = "default_as_true")]
    pub year: bool,
    #[serde(default)]
    pub studio: bool,
    #[serde(default)]
    pub mpaa: bool,
    #[serde(default)]
    pub criticrating: bool,
    #[serde(default)]
    pub customrating: bool,
    #[serde(default)]
    pub runtime: bool,
    #[serde(default)]
    pub releasedate: bool,
    #[serde(default)]
    pub genre: bool,
    #[serde(default)]
    pub country: bool,
    #[serde(default)]
    pub style: bool,
    #[serde(default)]
    pub ratings: bool,
    #[serde(default)]
    pub directors: bool,
    #[serde(default)]
    pub writers: bool,
    #[serde(default)]
    pub roles: bool,
}

impl Default for NfoFieldsDto {
    fn default() -> Self {
        Self {
            title: true,
            agent_id: true,
            tagline: true,
            plot: true,
            year: true,
            studio: false,
            mpaa: false,
            criticrating: false,
            customrating: false,
            runtime: false,
            releasedate: false,
            genre: false,
            country: false,
            style: false,
            ratings: false,
            directors: false,
            writers: false,
            roles: false,
        }
    }
}

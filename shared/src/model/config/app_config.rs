use serde::{Deserialize, Serialize};
use crate::error::{config_err, ExportError};
use crate::model::{LibraryEntryDto, LogConfigDto, NamingMode, NfoFieldsDto, PathMappingDto};
use crate::utils::{is_blank_optional_string, trim_quotes};

/// Content of `config.yml`. The title case keys of older config files are accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConfigDto {
    #[serde(default, alias = "Base URL", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, alias = "Token", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, alias = "Libraries")]
    pub libraries: Vec<LibraryEntryDto>,
    #[serde(default, alias = "Library blacklist")]
    pub library_blacklist: Vec<String>,
    #[serde(default, alias = "Path mapping")]
    pub path_mapping: Vec<PathMappingDto>,
    #[serde(default, alias = "Force overwrite")]
    pub force_overwrite: bool,
    #[serde(default, alias = "Dry run")]
    pub dry_run: bool,
    #[serde(default, alias = "Export NFO")]
    pub export_nfo: bool,
    #[serde(default, alias = "Export poster")]
    pub export_poster: bool,
    #[serde(default, alias = "Export fanart")]
    pub export_fanart: bool,
    #[serde(default, alias = "Export season poster")]
    pub export_season_poster: bool,
    #[serde(default, alias = "Export episode NFO")]
    pub export_episode_nfo: bool,
    #[serde(default, alias = "Movie NFO name type", skip_serializing_if = "Option::is_none")]
    pub movie_nfo_name_type: Option<NamingMode>,
    #[serde(default, alias = "Movie Poster/art name type", skip_serializing_if = "Option::is_none")]
    pub movie_image_name_type: Option<NamingMode>,
    #[serde(flatten)]
    pub nfo: NfoFieldsDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfigDto>,
}

impl ConfigDto {
    pub fn prepare(&mut self) -> Result<(), ExportError> {
        self.base_url = clean_value(self.base_url.take());
        self.token = clean_value(self.token.take());
        if is_blank_optional_string(&self.log_level) {
            self.log_level = None;
        }
        if let Some(log) = self.log.as_mut() {
            log.clean();
        }
        self.library_blacklist.retain(|name| !name.trim().is_empty());
        for mapping in &self.path_mapping {
            if mapping.plex.is_empty() {
                return Err(config_err!("path mapping for local path '{}' has an empty plex path", mapping.local));
            }
        }
        Ok(())
    }
}

fn clean_value(value: Option<String>) -> Option<String> {
    value.map(|v| trim_quotes(&v).to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::ConfigDto;
    use crate::model::{LibraryKind, NamingMode};

    const LEGACY: &str = r"
Base URL: 'http://192.168.1.2:32400'
Token: abc
Libraries: ['Movies', 'Music', 'Music']
Force overwrite: true
Export NFO: true
Export poster: true
Movie NFO name type: Title
Movie Poster/art name type:
Path mapping: [{'plex': '/data_media', 'local': '/volume1/data/media'}]
studio: true
plot: false
log_level:
";

    #[test]
    fn test_read_legacy_keys() {
        let mut cfg: ConfigDto = serde_yaml::from_str(LEGACY).unwrap();
        cfg.prepare().unwrap();
        assert_eq!(cfg.base_url.as_deref(), Some("http://192.168.1.2:32400"));
        assert_eq!(cfg.token.as_deref(), Some("abc"));
        assert_eq!(cfg.libraries.len(), 3);
        assert!(cfg.force_overwrite);
        assert!(cfg.export_nfo && cfg.export_poster);
        assert!(!cfg.export_fanart && !cfg.export_season_poster && !cfg.export_episode_nfo);
        assert_eq!(cfg.movie_nfo_name_type, Some(NamingMode::Title));
        assert_eq!(cfg.movie_image_name_type, None);
        assert_eq!(cfg.path_mapping[0].local, "/volume1/data/media");
        assert!(cfg.nfo.studio);
        assert!(!cfg.nfo.plot);
        assert!(cfg.nfo.title && cfg.nfo.agent_id && cfg.nfo.year);
        assert!(!cfg.nfo.roles);
        assert!(cfg.log_level.is_none());
    }

    #[test]
    fn test_read_snake_case_keys() {
        let yaml = r"
base_url: http://plex:32400
token: xyz
libraries:
  - Shows
  - {name: Music, kind: artist}
export_episode_nfo: true
log:
  log_level: debug
  max_log_files: 3
";
        let mut cfg: ConfigDto = serde_yaml::from_str(yaml).unwrap();
        cfg.prepare().unwrap();
        assert_eq!(cfg.libraries[1].kind(), Some(LibraryKind::Artist));
        assert!(cfg.export_episode_nfo);
        let log = cfg.log.unwrap();
        assert_eq!(log.log_level.as_deref(), Some("debug"));
        assert_eq!(log.max_log_files, 3);
        assert_eq!(log.log_dir.as_deref(), Some("logs"));
    }

    #[test]
    fn test_blank_token_removed() {
        let mut cfg: ConfigDto = serde_yaml::from_str("Token: \"''\"\nBase URL: ''").unwrap();
        cfg.prepare().unwrap();
        assert!(cfg.token.is_none());
        assert!(cfg.base_url.is_none());
    }
}

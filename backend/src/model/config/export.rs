use crate::model::config::macros;
use crate::model::{ArtifactKind, LogConfig};
use log::debug;
use shared::error::{config_err_res, ExportError};
use shared::model::{ConfigDto, LibraryEntryDto, LibraryKind, NamingMode, NfoFieldsDto, PathMappingDto};
use shared::utils::{str_to_bool, trim_quotes, ENV_DRY_RUN, ENV_EXPORT_EPISODE_NFO, ENV_EXPORT_FANART, ENV_EXPORT_NFO,
                    ENV_EXPORT_POSTER, ENV_EXPORT_SEASON_POSTER, ENV_FORCE_OVERWRITE, ENV_MOVIE_IMAGE_NAME_TYPE,
                    ENV_MOVIE_NFO_NAME_TYPE, ENV_PLEX_TOKEN, ENV_PLEX_URL};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NfoField {
    Title,
    AgentId,
    Tagline,
    Plot,
    Year,
    Studio,
    Mpaa,
    CriticRating,
    CustomRating,
    Runtime,
    ReleaseDate,
    Genre,
    Country,
    Style,
    Ratings,
    Directors,
    Writers,
    Roles,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct NfoFields {
    pub title: bool,
    pub agent_id: bool,
    pub tagline: bool,
    pub plot: bool,
    pub year: bool,
    pub studio: bool,
    pub mpaa: bool,
    pub criticrating: bool,
    pub customrating: bool,
    pub runtime: bool,
    pub releasedate: bool,
    pub genre: bool,
    pub country: bool,
    pub style: bool,
    pub ratings: bool,
    pub directors: bool,
    pub writers: bool,
    pub roles: bool,
}

macros::from_impl!(NfoFields);
impl From<&NfoFieldsDto> for NfoFields {
    fn from(dto: &NfoFieldsDto) -> Self {
        Self {
            title: dto.title,
            agent_id: dto.agent_id,
            tagline: dto.tagline,
            plot: dto.plot,
            year: dto.year,
            studio: dto.studio,
            mpaa: dto.mpaa,
            criticrating: dto.criticrating,
            customrating: dto.customrating,
            runtime: dto.runtime,
            releasedate: dto.releasedate,
            genre: dto.genre,
            country: dto.country,
            style: dto.style,
            ratings: dto.ratings,
            directors: dto.directors,
            writers: dto.writers,
            roles: dto.roles,
        }
    }
}

impl Default for NfoFields {
    fn default() -> Self {
        NfoFields::from(NfoFieldsDto::default())
    }
}

impl NfoFields {
    pub const fn is_enabled(&self, field: NfoField) -> bool {
        match field {
            NfoField::Title => self.title,
            NfoField::AgentId => self.agent_id,
            NfoField::Tagline => self.tagline,
            NfoField::Plot => self.plot,
            NfoField::Year => self.year,
            NfoField::Studio => self.studio,
            NfoField::Mpaa => self.mpaa,
            NfoField::CriticRating => self.criticrating,
            NfoField::CustomRating => self.customrating,
            NfoField::Runtime => self.runtime,
            NfoField::ReleaseDate => self.releasedate,
            NfoField::Genre => self.genre,
            NfoField::Country => self.country,
            NfoField::Style => self.style,
            NfoField::Ratings => self.ratings,
            NfoField::Directors => self.directors,
            NfoField::Writers => self.writers,
            NfoField::Roles => self.roles,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExportToggles {
    pub nfo: bool,
    pub poster: bool,
    pub fanart: bool,
    pub season_poster: bool,
    pub episode_nfo: bool,
}

impl ExportToggles {
    pub const fn is_enabled(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Nfo => self.nfo,
            ArtifactKind::EpisodeNfo => self.episode_nfo,
            ArtifactKind::Poster => self.poster,
            ArtifactKind::Fanart => self.fanart,
            ArtifactKind::SeasonPoster => self.season_poster,
        }
    }

    /// Enabled kinds in report order.
    pub fn enabled(&self) -> impl Iterator<Item=ArtifactKind> + '_ {
        ArtifactKind::ALL.into_iter().filter(move |kind| self.is_enabled(*kind))
    }

    fn apply(&mut self, nfo: Option<bool>, poster: Option<bool>, fanart: Option<bool>, season_poster: Option<bool>, episode_nfo: Option<bool>) {
        if let Some(value) = nfo { self.nfo = value; }
        if let Some(value) = poster { self.poster = value; }
        if let Some(value) = fanart { self.fanart = value; }
        if let Some(value) = season_poster { self.season_poster = value; }
        if let Some(value) = episode_nfo { self.episode_nfo = value; }
    }
}

/// Literal `remote` -> `local` substitution rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMappingRule {
    pub remote_prefix: String,
    pub local_prefix: String,
}

impl From<&PathMappingDto> for PathMappingRule {
    fn from(dto: &PathMappingDto) -> Self {
        Self {
            remote_prefix: dto.plex.clone(),
            local_prefix: dto.local.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub name: String,
    pub kind: Option<LibraryKind>,
}

impl From<&LibraryEntryDto> for LibraryEntry {
    fn from(dto: &LibraryEntryDto) -> Self {
        Self {
            name: dto.name().to_string(),
            kind: dto.kind(),
        }
    }
}

/// Values taken from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub force_overwrite: bool,
    pub dry_run: bool,
    pub export_nfo: Option<bool>,
    pub export_poster: Option<bool>,
    pub export_fanart: Option<bool>,
    pub export_season_poster: Option<bool>,
    pub export_episode_nfo: Option<bool>,
    pub movie_nfo_name_type: Option<NamingMode>,
    pub movie_image_name_type: Option<NamingMode>,
}

impl EnvOverrides {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| trim_quotes(&v).to_string()).filter(|v| !v.is_empty());
        let get_bool = |name: &str| get(name).map(|v| str_to_bool(&v));
        Self {
            base_url: get(ENV_PLEX_URL),
            token: get(ENV_PLEX_TOKEN),
            // these two can only switch the behaviour on
            force_overwrite: get_bool(ENV_FORCE_OVERWRITE).unwrap_or(false),
            dry_run: get_bool(ENV_DRY_RUN).unwrap_or(false),
            export_nfo: get_bool(ENV_EXPORT_NFO),
            export_poster: get_bool(ENV_EXPORT_POSTER),
            export_fanart: get_bool(ENV_EXPORT_FANART),
            export_season_poster: get_bool(ENV_EXPORT_SEASON_POSTER),
            export_episode_nfo: get_bool(ENV_EXPORT_EPISODE_NFO),
            movie_nfo_name_type: get(ENV_MOVIE_NFO_NAME_TYPE).map(NamingMode::from),
            movie_image_name_type: get(ENV_MOVIE_IMAGE_NAME_TYPE).map(NamingMode::from),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub libraries: Option<Vec<String>>,
    pub titles: Option<Vec<String>>,
    pub movie_nfo_name_type: Option<NamingMode>,
    pub movie_image_name_type: Option<NamingMode>,
    pub export_nfo: Option<bool>,
    pub export_poster: Option<bool>,
    pub export_fanart: Option<bool>,
    pub export_season_poster: Option<bool>,
    pub export_episode_nfo: Option<bool>,
    pub force_overwrite: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub base_url: String,
    pub token: String,
    pub libraries: Vec<LibraryEntry>,
    pub library_blacklist: Vec<String>,
    pub path_mapping: Vec<PathMappingRule>,
    pub force_overwrite: bool,
    pub dry_run: bool,
    pub exports: ExportToggles,
    pub movie_nfo_name_type: NamingMode,
    pub movie_image_name_type: NamingMode,
    pub nfo_fields: NfoFields,
    pub titles: Option<Vec<String>>,
    pub log: LogConfig,
}

impl From<&ConfigDto> for ExportConfig {
    fn from(dto: &ConfigDto) -> Self {
        let mut log = dto.log.as_ref().map(LogConfig::from).unwrap_or_default();
        if log.log_level.is_none() {
            log.log_level.clone_from(&dto.log_level);
        }
        Self {
            base_url: dto.base_url.clone().unwrap_or_default(),
            token: dto.token.clone().unwrap_or_default(),
            libraries: dto.libraries.iter().map(LibraryEntry::from).collect(),
            library_blacklist: dto.library_blacklist.clone(),
            path_mapping: dto.path_mapping.iter().map(PathMappingRule::from).collect(),
            force_overwrite: dto.force_overwrite,
            dry_run: dto.dry_run,
            exports: ExportToggles {
                nfo: dto.export_nfo,
                poster: dto.export_poster,
                fanart: dto.export_fanart,
                season_poster: dto.export_season_poster,
                episode_nfo: dto.export_episode_nfo,
            },
            movie_nfo_name_type: dto.movie_nfo_name_type.unwrap_or_default(),
            movie_image_name_type: dto.movie_image_name_type.unwrap_or_default(),
            nfo_fields: NfoFields::from(&dto.nfo),
            titles: None,
            log,
        }
    }
}

impl ExportConfig {
    pub fn apply_env(&mut self, env: &EnvOverrides) {
        if let Some(url) = env.base_url.as_ref() {
            self.base_url.clone_from(url);
        }
        if let Some(token) = env.token.as_ref() {
            self.token.clone_from(token);
        }
        if env.force_overwrite {
            debug!("force_overwrite is set to true by environment variable");
            self.force_overwrite = true;
        }
        if env.dry_run {
            debug!("dry_run is set to true by environment variable");
            self.dry_run = true;
        }
        self.exports.apply(env.export_nfo, env.export_poster, env.export_fanart, env.export_season_poster, env.export_episode_nfo);
        if let Some(mode) = env.movie_nfo_name_type {
            self.movie_nfo_name_type = mode;
        }
        if let Some(mode) = env.movie_image_name_type {
            self.movie_image_name_type = mode;
        }
    }

    pub fn apply_args(&mut self, args: &ConfigOverrides) {
        if let Some(url) = args.base_url.as_ref() {
            self.base_url.clone_from(url);
        }
        if let Some(token) = args.token.as_ref() {
            self.token.clone_from(token);
        }
        if let Some(libraries) = args.libraries.as_ref().filter(|l| !l.is_empty()) {
            self.libraries = libraries.iter().map(|name| LibraryEntry { name: name.clone(), kind: None }).collect();
        }
        if let Some(titles) = args.titles.as_ref().filter(|t| !t.is_empty()) {
            self.titles = Some(titles.clone());
        }
        if args.force_overwrite {
            debug!("force_overwrite is set to true by command-line argument");
            self.force_overwrite = true;
        }
        if args.dry_run {
            debug!("dry_run is set to true by command-line argument");
            self.dry_run = true;
        }
        self.exports.apply(args.export_nfo, args.export_poster, args.export_fanart, args.export_season_poster, args.export_episode_nfo);
        if let Some(mode) = args.movie_nfo_name_type {
            self.movie_nfo_name_type = mode;
        }
        if let Some(mode) = args.movie_image_name_type {
            self.movie_image_name_type = mode;
        }
    }

    pub fn validate(&mut self) -> Result<(), ExportError> {
        self.base_url = trim_quotes(&self.base_url).to_string();
        self.token = trim_quotes(&self.token).to_string();
        if self.base_url.is_empty() {
            return config_err_res!("Failed to read Plex url, please check config/variables");
        }
        if self.token.is_empty() {
            return config_err_res!("Failed to read Plex token, please check config/variables");
        }
        self.libraries.retain(|entry| !entry.name.trim().is_empty());
        if self.libraries.is_empty() {
            return config_err_res!("No library name is provided, please check config/variables");
        }
        Ok(())
    }

    /// Title filter given on the command line. Without a filter every title passes.
    pub fn accepts_title(&self, title: Option<&str>) -> bool {
        match self.titles.as_ref() {
            None => true,
            Some(titles) => title.is_some_and(|t| titles.iter().any(|f| f == t)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(yaml: &str) -> ExportConfig {
        let mut dto: ConfigDto = serde_yaml::from_str(yaml).unwrap();
        dto.prepare().unwrap();
        ExportConfig::from(&dto)
    }

    fn env_from(vars: &[(&str, &str)]) -> EnvOverrides {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        EnvOverrides::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_precedence_cli_env_config() {
        let mut config = config_from("Base URL: http://config:32400\nToken: cfg\nLibraries: [Movies]\nExport NFO: true\nMovie NFO name type: title");
        config.apply_env(&env_from(&[("PLEX_URL", "'http://env:32400'"), ("PLEX_TOKEN", "env"), ("EXPORT_NFO", "false")]));
        assert_eq!(config.base_url, "http://env:32400");
        assert_eq!(config.token, "env");
        assert!(!config.exports.nfo);

        config.apply_args(&ConfigOverrides {
            token: Some("cli".to_string()),
            export_nfo: Some(true),
            movie_nfo_name_type: Some(NamingMode::Filename),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.base_url, "http://env:32400");
        assert_eq!(config.token, "cli");
        assert!(config.exports.nfo);
        assert_eq!(config.movie_nfo_name_type, NamingMode::Filename);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_force_overwrite_env_only_enables() {
        let mut config = config_from("Force overwrite: true\nLibraries: [Movies]");
        config.apply_env(&env_from(&[("FORCE_OVERWRITE", "false"), ("DRY_RUN", "yes")]));
        assert!(config.force_overwrite);
        assert!(config.dry_run);
    }

    #[test]
    fn test_validate() {
        let mut config = config_from("Base URL: \"'http://plex:32400'\"\nToken: abc\nLibraries: []");
        let err = config.validate().unwrap_err();
        assert!(err.is_fatal());
        assert!(err.message.contains("No library name"));

        let mut config = config_from("Libraries: [Movies]\nToken: abc");
        assert!(config.validate().unwrap_err().message.contains("Plex url"));

        let mut config = config_from("Base URL: http://plex:32400\nLibraries: [Movies]");
        assert!(config.validate().unwrap_err().message.contains("Plex token"));
    }

    #[test]
    fn test_cli_libraries_and_titles() {
        let mut config = config_from("Libraries: [{name: Music, kind: albums}]");
        assert_eq!(config.libraries[0].kind, Some(LibraryKind::Albums));
        assert!(config.accepts_title(None));
        config.apply_args(&ConfigOverrides {
            libraries: Some(vec!["Movies".to_string()]),
            titles: Some(vec!["The Matrix".to_string()]),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.libraries, vec![LibraryEntry { name: "Movies".to_string(), kind: None }]);
        assert!(config.accepts_title(Some("The Matrix")));
        assert!(!config.accepts_title(Some("Matrix")));
        assert!(!config.accepts_title(None));
    }

    #[test]
    fn test_log_level_fallback() {
        let config = config_from("log_level: verbose\nLibraries: [Movies]");
        assert_eq!(config.log.log_level.as_deref(), Some("verbose"));
        assert_eq!(config.log.max_log_files, 10);
    }

    #[test]
    fn test_nfo_field_gates() {
        let config = config_from("Libraries: [Movies]\nroles: true\ntitle: false");
        assert!(config.nfo_fields.is_enabled(NfoField::Roles));
        assert!(!config.nfo_fields.is_enabled(NfoField::Title));
        assert!(config.nfo_fields.is_enabled(NfoField::AgentId));
        assert!(!config.nfo_fields.is_enabled(NfoField::Studio));
        let toggles = ExportToggles { nfo: true, season_poster: true, ..ExportToggles::default() };
        assert_eq!(toggles.enabled().collect::<Vec<_>>(), vec![ArtifactKind::Nfo, ArtifactKind::SeasonPoster]);
    }
}

use regex::Regex;
use std::sync::atomic::AtomicBool;
use std::sync::LazyLock;

pub const DOCKER_CONFIG_PATH: &str = "/app/config";
pub const CONFIG_FILE: &str = "config.yml";
pub const ENV_FILE: &str = ".env";

pub const ENCODING_GZIP: &str = "gzip";

pub const HEADER_PLEX_TOKEN: &str = "X-Plex-Token";
pub const HEADER_CONTAINER_START: &str = "X-Plex-Container-Start";
pub const HEADER_CONTAINER_SIZE: &str = "X-Plex-Container-Size";

pub const ENV_PLEX_URL: &str = "PLEX_URL";
pub const ENV_PLEX_TOKEN: &str = "PLEX_TOKEN";
pub const ENV_FORCE_OVERWRITE: &str = "FORCE_OVERWRITE";
pub const ENV_DRY_RUN: &str = "DRY_RUN";
pub const ENV_EXPORT_NFO: &str = "EXPORT_NFO";
pub const ENV_EXPORT_POSTER: &str = "EXPORT_POSTER";
pub const ENV_EXPORT_FANART: &str = "EXPORT_FANART";
pub const ENV_EXPORT_SEASON_POSTER: &str = "EXPORT_SEASON_POSTER";
pub const ENV_EXPORT_EPISODE_NFO: &str = "EXPORT_EPISODE_NFO";
pub const ENV_MOVIE_NFO_NAME_TYPE: &str = "MOVIE_NFO_NAME_TYPE";
pub const ENV_MOVIE_IMAGE_NAME_TYPE: &str = "MOVIE_IMAGE_NAME_TYPE";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_APP_LOG: &str = "PLEXPORT_LOG";

pub const WILDCARD_LIBRARY: &str = "*";

pub struct Constants {
    pub re_credentials: Regex,
    pub re_env_var: Regex,
    pub sanitize: AtomicBool,
}

pub static CONSTANTS: LazyLock<Constants> = LazyLock::new(||
    Constants {
        re_credentials: Regex::new(r"(?i)((?:x-plex-token|token)=)[^&\s]*").unwrap(),
        re_env_var: Regex::new(r"\$\{(?P<env>env:)?(?P<var>[a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap(),
        sanitize: AtomicBool::new(true),
    }
);

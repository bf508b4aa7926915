use shared::utils::{ENV_PLEX_TOKEN, ENV_PLEX_URL};
use std::path::{Path, PathBuf};

const ENV_TEMPLATE: &str = "PLEX_URL='http://192.168.1.2:32400'\nPLEX_TOKEN='very-long-token'\n";

const CONFIG_TEMPLATE: &str = r"# config.yml

# Plex url and token. Leave the placeholders when PLEX_URL and PLEX_TOKEN
# are set as environment variables or in the .env file.
base_url: ${PLEX_URL}
token: ${PLEX_TOKEN}

# Libraries to export. Music libraries are listed twice in a row, the first
# entry exports the artist folders, the second the album folders.
# An entry can also name its kind: {name: 'Music', kind: albums}
# Use '*' for every library and library_blacklist to leave some out.
libraries: ['Movies', 'TV Shows', 'Music', 'Music']
library_blacklist: []

# Overwrite files without checking whether they are older than the server's metadata
force_overwrite: false
dry_run: false

export_nfo: true
export_poster: true
export_fanart: false
export_season_poster: false
export_episode_nfo: false

# default, title or filename
#   title:    'The Godfather.nfo', 'The Godfather_poster.jpg'
#   filename: 'The Godfather (1972).nfo', 'The Godfather (1972)_poster.jpg'
#   default:  'movie.nfo', 'poster.jpg'
movie_nfo_name_type: default
movie_image_name_type: default

# Translate paths reported by plex to paths visible to this program
path_mapping: []
#  - plex: /data_media
#    local: /volume1/data/media

# NFO fields
title: true
agent_id: true
tagline: true
plot: true
year: true
studio: false
mpaa: false
criticrating: false
customrating: false
runtime: false
releasedate: false
genre: false
country: false
style: false
ratings: false
directors: false
writers: false
roles: false

log:
  # trace, debug, verbose, info, warn, error
  log_level: info
  log_dir: logs
  max_log_files: 10
";

fn env_credentials_present() -> bool {
    [ENV_PLEX_URL, ENV_PLEX_TOKEN].iter()
        .all(|name| std::env::var(name).is_ok_and(|v| !v.trim().is_empty()))
}

/// Writes the missing `.env` or config template. Returns the created file,
/// the caller stops so the user can fill it in.
pub fn ensure_config_files(env_file: &Path, config_file: &Path) -> std::io::Result<Option<PathBuf>> {
    if !env_credentials_present() && !env_file.exists() {
        std::fs::write(env_file, ENV_TEMPLATE)?;
        return Ok(Some(env_file.to_path_buf()));
    }
    if !config_file.exists() {
        if let Some(parent) = config_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_file, CONFIG_TEMPLATE)?;
        return Ok(Some(config_file.to_path_buf()));
    }
    Ok(None)
}

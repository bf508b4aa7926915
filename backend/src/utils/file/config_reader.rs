use log::error;
use shared::error::{config_err, ExportError};
use shared::model::{ConfigDto, LogLevelConfigDto};
use shared::utils::{CONFIG_FILE, CONSTANTS, DOCKER_CONFIG_PATH, ENV_FILE};
use std::env;
use std::path::{Path, PathBuf};

pub fn get_default_config_path() -> String {
    if Path::new(DOCKER_CONFIG_PATH).is_dir() {
        DOCKER_CONFIG_PATH.to_string()
    } else {
        String::from(".")
    }
}

pub fn get_default_config_file_path(config_path: &str) -> String {
    PathBuf::from(config_path).join(CONFIG_FILE).to_string_lossy().to_string()
}

pub fn get_env_file_path(config_path: &str) -> PathBuf {
    PathBuf::from(config_path).join(ENV_FILE)
}

/// Replaces `${VAR}` and `${env:VAR}` placeholders. Unknown `${VAR}` become empty,
/// unknown `${env:VAR}` stay untouched.
pub fn resolve_env_var_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if value.is_empty() {
        return String::new();
    }
    CONSTANTS.re_env_var.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        match lookup(var_name) {
            Some(resolved) => resolved,
            None if caps.name("env").is_some() => {
                error!("Could not resolve env var '{var_name}'");
                format!("${{env:{var_name}}}")
            }
            None => String::new(),
        }
    }).to_string()
}

pub fn resolve_env_var(value: &str) -> String {
    resolve_env_var_with(value, |name| env::var(name).ok())
}

/// Loads a `.env` file from the config directory, falling back to the working directory.
pub fn load_env_file(config_path: &str) -> bool {
    let env_file = get_env_file_path(config_path);
    let loaded = if env_file.is_file() {
        dotenvy::from_path(&env_file).map(|()| true)
    } else {
        dotenvy::dotenv().map(|_| true)
    };
    loaded.unwrap_or_else(|err| match err {
        dotenvy::Error::Io(_) => false,
        err => {
            error!("Failed to read env file: {err}");
            false
        }
    })
}

fn read_config_content(config_file: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(config_file).map(|content| resolve_env_var(&content))
}

pub fn read_config(config_file: &Path) -> Result<ConfigDto, ExportError> {
    let content = read_config_content(config_file)
        .map_err(|err| config_err!("Can't read the config file: {}: {err}", config_file.display()))?;
    parse_config(&content)
        .map_err(|err| config_err!("Can't read the config file: {}: {err}", config_file.display()))
}

pub fn parse_config(content: &str) -> Result<ConfigDto, ExportError> {
    let mut config: ConfigDto = serde_yaml::from_str(content).map_err(|err| config_err!("{err}"))?;
    config.prepare()?;
    Ok(config)
}

/// Reads only the log settings, used before the logger is initialized.
pub fn read_log_level_config(config_file: &Path) -> Option<LogLevelConfigDto> {
    let content = read_config_content(config_file).ok()?;
    match serde_yaml::from_str::<LogLevelConfigDto>(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("Failed to parse log config file: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(name: &str) -> Option<String> {
        let vars: HashMap<&str, &str> = HashMap::from([("PLEX_URL", "http://plex:32400"), ("PLEX_TOKEN", "abc")]);
        vars.get(name).map(ToString::to_string)
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve_env_var_with("Base URL: ${PLEX_URL}", lookup), "Base URL: http://plex:32400");
        assert_eq!(resolve_env_var_with("Token: ${env:PLEX_TOKEN}", lookup), "Token: abc");
        assert_eq!(resolve_env_var_with("Token: ${MISSING}", lookup), "Token: ");
        assert_eq!(resolve_env_var_with("Token: ${env:MISSING}", lookup), "Token: ${env:MISSING}");
        assert_eq!(resolve_env_var_with("", lookup), "");
    }

    #[test]
    fn test_resolve_process_env() {
        let resolved = resolve_env_var("${env:PATH}");
        assert_eq!(resolved, env::var("PATH").unwrap());
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        std::fs::write(&file, "Base URL: http://plex:32400\nToken: abc\nLibraries: ['Movies']\nExport NFO: true\n").unwrap();
        let config = read_config(&file).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://plex:32400"));
        assert!(config.export_nfo);

        let missing = read_config(&dir.path().join("nope.yml")).unwrap_err();
        assert!(missing.is_fatal());
    }

    #[test]
    fn test_read_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        std::fs::write(&file, "Libraries: ['Movies']\nlog_level: VERBOSE\n").unwrap();
        let config = read_log_level_config(&file).unwrap();
        assert_eq!(config.get_log_level().as_deref(), Some("VERBOSE"));
        assert!(read_log_level_config(&dir.path().join("nope.yml")).is_none());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(parse_config("Libraries: [").is_err());
    }
}

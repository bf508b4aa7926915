use crate::utils::{default_as_true, default_log_dir, default_max_log_files, is_blank_optional_string};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfigDto {
    #[serde(default = "default_as_true")]
    pub sanitize_sensitive_info: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default = "default_log_dir")]
    pub log_dir: Option<String>,
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

impl Default for LogConfigDto {
    fn default() -> Self {
        LogConfigDto {
            sanitize_sensitive_info: default_as_true(),
            log_level: None,
            log_dir: default_log_dir(),
            max_log_files: default_max_log_files(),
        }
    }
}

impl LogConfigDto {
    pub fn clean(&mut self) {
        if is_blank_optional_string(&self.log_level) {
            self.log_level = None;
        }
        if is_blank_optional_string(&self.log_dir) {
            self.log_dir = None;
        }
    }
}

/// Only the log related part of the config file, read before the logger exists.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct LogLevelConfigDto {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log: Option<LogConfigDto>,
}

impl LogLevelConfigDto {
    pub fn get_log_level(&self) -> Option<String> {
        self.log.as_ref().and_then(|l| l.log_level.clone())
            .or_else(|| self.log_level.clone())
            .filter(|l| !l.trim().is_empty())
    }
}

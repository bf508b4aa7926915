use shared::model::{LogConfigDto, LogLevelConfigDto};
use crate::model::config::macros;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub sanitize_sensitive_info: bool,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig::from(&LogConfigDto::default())
    }
}

macros::from_impl!(LogConfig);
impl From<&LogConfigDto> for LogConfig {
    fn from(dto: &LogConfigDto) -> Self {
        Self {
            sanitize_sensitive_info: dto.sanitize_sensitive_info,
            log_level: dto.log_level.clone(),
            log_dir: dto.log_dir.clone(),
            max_log_files: dto.max_log_files,
        }
    }
}

impl From<&LogLevelConfigDto> for LogConfig {
    fn from(dto: &LogLevelConfigDto) -> Self {
        let mut config = dto.log.as_ref().map(LogConfig::from).unwrap_or_default();
        config.log_level = dto.get_log_level();
        config
    }
}

pub const fn default_as_true() -> bool { true }

pub const fn default_max_log_files() -> usize { 10 }

pub fn default_log_dir() -> Option<String> { Some(String::from("logs")) }

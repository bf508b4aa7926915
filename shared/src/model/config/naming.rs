use serde::{Deserialize, Serialize};

/// Output file naming for movie NFOs and images.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NamingMode {
    #[default]
    Default,
    Title,
    Filename,
}

impl From<&str> for NamingMode {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "title" => Self::Title,
            "filename" => Self::Filename,
            _ => Self::Default,
        }
    }
}

impl From<String> for NamingMode {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

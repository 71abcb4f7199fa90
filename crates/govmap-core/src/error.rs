use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovMapError {
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Syntax error at line {line}: {message}")]
    DocumentSyntax { line: usize, message: String },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidConfigValue { key: String, value: String },

    #[error("Failed to parse nations file {path}: {message}")]
    NationParse { path: PathBuf, message: String },

    #[error("Nation not found: {tag}")]
    NationNotFound { tag: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GovMapError>;

impl GovMapError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SourceNotFound { .. } => 2,
            Self::DocumentSyntax { .. } => 3,
            Self::ConfigParse { .. }
            | Self::ConfigKeyNotFound { .. }
            | Self::InvalidConfigValue { .. } => 4,
            Self::NationParse { .. } => 5,
            Self::NationNotFound { .. } => 6,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let missing = GovMapError::SourceNotFound {
            path: PathBuf::from("issues.txt"),
        };
        let syntax = GovMapError::DocumentSyntax {
            line: 3,
            message: "unexpected '}'".to_string(),
        };
        let key = GovMapError::ConfigKeyNotFound {
            key: "sources.unknown".to_string(),
        };
        let io = GovMapError::Io(std::io::Error::other("boom"));

        assert_eq!(missing.exit_code(), 2);
        assert_eq!(syntax.exit_code(), 3);
        assert_eq!(key.exit_code(), 4);
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_display_includes_context() {
        let err = GovMapError::DocumentSyntax {
            line: 12,
            message: "unterminated string".to_string(),
        };
        assert_eq!(err.to_string(), "Syntax error at line 12: unterminated string");
    }
}

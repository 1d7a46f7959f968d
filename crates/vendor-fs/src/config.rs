//! Format-agnostic configuration loading and saving

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Serialization format of a config file, chosen by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a path's extension.
    ///
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Whether the format has a line-comment syntax for headers.
    pub fn supports_comments(&self) -> bool {
        !matches!(self, Self::Json)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => write!(f, "TOML"),
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// Format-agnostic configuration store.
///
/// Automatically detects format from file extension and handles
/// serialization/deserialization transparently. An optional header is
/// emitted as `#` comment lines for formats that support comments.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    header: Option<String>,
}

impl ConfigStore {
    /// Create a new ConfigStore that writes no header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that prefixes every saved file with `header`.
    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
        }
    }

    /// Load configuration from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = ConfigFormat::from_path(path)?;
        let content = io::read_text(path)?;
        Self::parse(path, format, &content)
    }

    /// Load configuration, falling back to `T::default()` when the file is absent.
    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &NormalizedPath,
    ) -> Result<T> {
        let format = ConfigFormat::from_path(path)?;
        match io::read_text_if_exists(path)? {
            Some(content) => Self::parse(path, format, &content),
            None => Ok(T::default()),
        }
    }

    /// Render `value` in the format matching `path`, header included.
    pub fn render<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<String> {
        let format = ConfigFormat::from_path(path)?;
        let serialize_err = |message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.to_string(),
            message,
        };

        let body = match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_err(e.to_string()))?
            }
            ConfigFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(value).map_err(|e| serialize_err(e.to_string()))?;
                json.push('\n');
                json
            }
            ConfigFormat::Yaml => {
                serde_yaml::to_string(value).map_err(|e| serialize_err(e.to_string()))?
            }
        };

        match &self.header {
            Some(header) if format.supports_comments() => {
                let mut out = String::new();
                for line in header.lines() {
                    out.push_str("# ");
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
                out.push_str(&body);
                Ok(out)
            }
            _ => Ok(body),
        }
    }

    /// Save configuration to a file, overwriting it in full.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let content = self.render(path, value)?;
        io::write_text(path, &content)
    }

    fn parse<T: DeserializeOwned>(
        path: &NormalizedPath,
        format: ConfigFormat,
        content: &str,
    ) -> Result<T> {
        let parse_err = |message: String| Error::ConfigParse {
            path: path.to_native(),
            format: format.to_string(),
            message,
        };
        match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))
            }
        }
    }
}

//! CLI configuration loaded from a TOML file.
//!
//! ```toml
//! default_mode = "chronological"
//! preview_chars = 80
//! indent_width = 2
//! fixtures_path = "${HOME}/debates.toml"
//! ```
//!
//! `DEBATE_THREADS_MODE` overrides `default_mode`.

use std::{fs, path::Path, path::PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ViewMode;

pub const MODE_ENV_VAR: &str = "DEBATE_THREADS_MODE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_mode: ViewMode,
    /// Characters of the parent message quoted above a reply.
    pub preview_chars: usize,
    /// Spaces per thread level in text output.
    pub indent_width: usize,
    pub fixtures_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_mode: ViewMode::Threaded,
            preview_chars: 50,
            indent_width: 4,
            fixtures_path: None,
        }
    }
}

impl Config {
    /// Load from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_str(&fs::read_to_string(path)?)?,
            None => Config::default(),
        };
        Ok(config.apply_env_overrides())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        let env_regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
        if let Some(ref fixtures) = config.fixtures_path {
            config.fixtures_path = Some(expand_string(fixtures, &env_regex));
        }
        Ok(config)
    }

    fn apply_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(MODE_ENV_VAR) {
            match raw.parse::<ViewMode>() {
                Ok(mode) => self.default_mode = mode,
                Err(e) => tracing::warn!("ignoring {}: {}", MODE_ENV_VAR, e),
            }
        }
        self
    }

    pub fn fixtures_path(&self) -> Option<PathBuf> {
        self.fixtures_path.as_ref().map(PathBuf::from)
    }
}

/// Expand `${VAR}` from the environment, leaving unknown variables as-is.
fn expand_string(s: &str, regex: &Regex) -> String {
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThreadError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.preview_chars, 50);
        assert_eq!(config.default_mode, ViewMode::Threaded);
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str("default_mode = \"chronological\"\nindent_width = 2\n").unwrap();
        assert_eq!(config.default_mode, ViewMode::Chronological);
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.preview_chars, 50);
    }

    #[test]
    fn test_fixtures_path_expansion() {
        let regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
        assert_eq!(
            expand_string("${DEBATE_THREADS_SURELY_UNSET_VAR}/x.toml", &regex),
            "${DEBATE_THREADS_SURELY_UNSET_VAR}/x.toml"
        );
        let path = std::env::var("PATH").unwrap_or_default();
        assert_eq!(expand_string("${PATH}", &regex), path);
    }

    #[test]
    fn test_mode_env_override() {
        // Only this test touches the variable.
        std::env::set_var(MODE_ENV_VAR, "chronological");
        let overridden = Config::load(None).unwrap();
        std::env::set_var(MODE_ENV_VAR, "sideways");
        let ignored = Config::load(None).unwrap();
        std::env::remove_var(MODE_ENV_VAR);

        assert_eq!(overridden.default_mode, ViewMode::Chronological);
        assert_eq!(ignored.default_mode, ViewMode::Threaded);
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_bad_mode_is_an_error() {
        let err = Config::from_toml_str("default_mode = \"sideways\"").unwrap_err();
        assert!(matches!(err, ThreadError::Toml(_)));
    }
}

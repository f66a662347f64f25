//! Settings: defaults, then an optional TOML file, then `LABYRINTH_*`
//! environment variables. Command-line flags are applied on top by
//! [`Cli::apply`](crate::cli::Cli::apply).

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "labyrinth.toml";

pub const MAX_WIDTH: i32 = 200;
pub const MAX_HEIGHT: i32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },
    #[error(
        "maze size {width}x{height} out of range (1..={max_w} by 1..={max_h})",
        max_w = MAX_WIDTH,
        max_h = MAX_HEIGHT
    )]
    Size { width: i32, height: i32 },
    #[error("wall density {0} must be between 0 and 1")]
    Density(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: i32,
    pub height: i32,
    /// Pause between two search steps, in milliseconds.
    pub delay_ms: u64,
    pub mouse: bool,
    pub log_file: Option<PathBuf>,
    /// Chance that `x` turns an open cell into a wall.
    pub wall_density: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 30,
            height: 20,
            delay_ms: 50,
            mouse: true,
            log_file: None,
            wall_density: 0.3,
        }
    }
}

impl Settings {
    /// Load defaults, the config file, and the process environment.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        settings.apply_env(|var| std::env::var(var).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Override fields from `LABYRINTH_*` variables found through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = env_value(&lookup, "LABYRINTH_WIDTH")? {
            self.width = v;
        }
        if let Some(v) = env_value(&lookup, "LABYRINTH_HEIGHT")? {
            self.height = v;
        }
        if let Some(v) = env_value(&lookup, "LABYRINTH_DELAY_MS")? {
            self.delay_ms = v;
        }
        if let Some(v) = env_value(&lookup, "LABYRINTH_MOUSE")? {
            self.mouse = v;
        }
        if let Some(v) = env_value(&lookup, "LABYRINTH_WALL_DENSITY")? {
            self.wall_density = v;
        }
        if let Some(v) = lookup("LABYRINTH_LOG_FILE") {
            self.log_file = (!v.is_empty()).then(|| PathBuf::from(v));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_WIDTH).contains(&self.width) || !(1..=MAX_HEIGHT).contains(&self.height) {
            return Err(ConfigError::Size {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.wall_density) {
            return Err(ConfigError::Density(self.wall_density));
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn env_value<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Env { var, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_the_classic_board() {
        let s = Settings::default();
        assert_eq!((s.width, s.height), (30, 20));
        assert_eq!(s.delay(), Duration::from_millis(50));
        assert!(s.mouse);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = Settings::from_toml("width = 12\ndelay_ms = 5\n").unwrap();
        assert_eq!(s.width, 12);
        assert_eq!(s.height, 20);
        assert_eq!(s.delay_ms, 5);
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        assert!(Settings::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut s = Settings::from_toml("width = 12").unwrap();
        s.apply_env(env(&[
            ("LABYRINTH_WIDTH", "40"),
            ("LABYRINTH_MOUSE", "false"),
            ("LABYRINTH_LOG_FILE", "/tmp/labyrinth.log"),
        ]))
        .unwrap();
        assert_eq!(s.width, 40);
        assert!(!s.mouse);
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/labyrinth.log")));
    }

    #[test]
    fn bad_env_value_names_the_variable() {
        let mut s = Settings::default();
        let err = s
            .apply_env(env(&[("LABYRINTH_DELAY_MS", "soon")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"soon\" for LABYRINTH_DELAY_MS");
    }

    #[rstest]
    #[case(0, 20)]
    #[case(30, 0)]
    #[case(MAX_WIDTH + 1, 20)]
    #[case(30, MAX_HEIGHT + 1)]
    #[case(-4, -4)]
    fn out_of_range_sizes_fail(#[case] width: i32, #[case] height: i32) {
        let s = Settings {
            width,
            height,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ConfigError::Size { .. })));
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn out_of_range_density_fails(#[case] wall_density: f64) {
        let s = Settings {
            wall_density,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ConfigError::Density(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/labyrinth.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

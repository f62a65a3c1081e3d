use std::path::Path;
use std::str::FromStr;

use configparser::ini::Ini;
use log::{debug, LevelFilter};
use thiserror::Error;

// Defaults
pub const DEFAULT_CONFIG_PATH: &str = "bmrot.ini";
pub const DEFAULT_SOURCE_TAG: &str = "bmfont"; // error tag for descriptors not read from a file
pub const DEFAULT_TURNS: u32 = 1;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

// INI layout (configparser lowercases sections and keys)
const OPTIONS_SECTION: &str = "options";
const TURNS_KEY: &str = "turns";
const LOG_LEVEL_KEY: &str = "loglevel";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config {path:?}: {reason}")]
    Read { path: String, reason: String },
    #[error("invalid value {value:?} for [Options] {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings for the command-line tool. Flags given on the command line win
/// over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Clockwise quarter turns applied before dumping.
    pub turns: u32,
    pub log_level: LevelFilter,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            turns: DEFAULT_TURNS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl Options {
    /// Applies command-line flags on top of the loaded settings: `--turns`
    /// replaces `Turns`, `--verbose` raises the log level to debug.
    pub fn with_cli(mut self, turns: Option<u32>, verbose: bool) -> Self {
        if let Some(turns) = turns {
            self.turns = turns;
        }
        if verbose {
            self.log_level = LevelFilter::Debug;
        }
        self
    }
}

/// Loads options from an INI file. A missing file is not an error and gives
/// the defaults.
///
/// ```ini
/// [Options]
/// Turns=1
/// LogLevel=warn
/// ```
pub fn load(path: &Path) -> Result<Options, ConfigError> {
    if !path.exists() {
        debug!("No config at {:?}, using defaults.", path);
        return Ok(Options::default());
    }
    let mut conf = Ini::new();
    conf.load(path).map_err(|reason| ConfigError::Read {
        path: path.display().to_string(),
        reason,
    })?;
    from_ini(&conf)
}

/// Parses options from INI text.
pub fn from_ini_str(text: &str) -> Result<Options, ConfigError> {
    let mut conf = Ini::new();
    conf.read(text.to_string()).map_err(|reason| ConfigError::Read {
        path: "<string>".to_string(),
        reason,
    })?;
    from_ini(&conf)
}

fn from_ini(conf: &Ini) -> Result<Options, ConfigError> {
    let mut options = Options::default();
    if let Some(v) = conf.get(OPTIONS_SECTION, TURNS_KEY) {
        options.turns = parse_value("Turns", &v)?;
    }
    if let Some(v) = conf.get(OPTIONS_SECTION, LOG_LEVEL_KEY) {
        options.log_level = parse_value("LogLevel", &v)?;
    }
    Ok(options)
}

#[inline(always)]
fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gives_defaults() {
        assert_eq!(from_ini_str("").unwrap(), Options::default());
        assert_eq!(from_ini_str("[Other]\nTurns=3\n").unwrap(), Options::default());
    }

    #[test]
    fn reads_options_case_insensitively() {
        let options = from_ini_str("[Options]\nTurns=2\nLogLevel=debug\n").unwrap();
        assert_eq!(
            options,
            Options {
                turns: 2,
                log_level: LevelFilter::Debug,
            }
        );
        let options = from_ini_str("[options]\nturns = 0\n").unwrap();
        assert_eq!(options.turns, 0);
        assert_eq!(options.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn rejects_bad_values() {
        let err = from_ini_str("[Options]\nTurns=-1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "Turns", .. }));
        let err = from_ini_str("[Options]\nLogLevel=loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "LogLevel", .. }));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let options = load(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn cli_flags_override_file_values() {
        let from_file = from_ini_str("[Options]\nTurns=3\nLogLevel=error\n").unwrap();
        assert_eq!(
            from_file.clone().with_cli(Some(0), true),
            Options {
                turns: 0,
                log_level: LevelFilter::Debug,
            }
        );
        assert_eq!(from_file.clone().with_cli(None, false), from_file);
        assert_eq!(from_file.with_cli(Some(2), false).log_level, LevelFilter::Error);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bmrot.ini");
        std::fs::write(&path, "[Options]\nTurns=3\n").unwrap();
        assert_eq!(load(&path).unwrap().turns, 3);
    }
}

use crate::consts;
use crate::game::{EdgeMode, Grid, GridError};
use log::LevelFilter;
use serde::Deserialize;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Size & edge behavior of the playing field
    #[serde(default)]
    pub(crate) grid: GridConfig,

    /// Gameplay timing & randomness
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Where & how much to log
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("wrapsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Build the playing field described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the configured grid is too small.
    pub(crate) fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.grid.width, self.grid.height, self.grid.edges).map_err(Into::into)
    }

    /// Return the time between movements of the snake
    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(self.game.tick_ms.get())
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GridConfig {
    /// Width of the grid in cells
    pub(crate) width: u16,

    /// Height of the grid in cells
    pub(crate) height: u16,

    /// Whether the snake wraps around the edges or is stopped by them
    pub(crate) edges: EdgeMode,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: consts::DEFAULT_GRID_WIDTH,
            height: consts::DEFAULT_GRID_HEIGHT,
            edges: EdgeMode::default(),
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Milliseconds between movements of the snake
    pub(crate) tick_ms: NonZeroU64,

    /// Seed for the random number generator that places food.  If unset, the
    /// generator is seeded from the operating system.
    pub(crate) seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            tick_ms: NonZeroU64::new(consts::DEFAULT_TICK_MS)
                .expect("DEFAULT_TICK_MS should be nonzero"),
            seed: None,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLogConfig")]
pub(crate) struct LogConfig {
    /// File to write log messages to.  If unset, a file in the local data
    /// directory is used.
    pub(crate) file: Option<PathBuf>,

    /// Most verbose level of messages to log
    pub(crate) level: LevelFilter,
}

impl LogConfig {
    /// Return the file that log messages should be written to: the file given
    /// in the configuration or, if that is not set, the default log file path.
    /// Returns `None` if no path is configured and the default path could not
    /// be computed.
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("wrapsnake").join("wrapsnake.log"))
        })
    }
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawLogConfig {
    file: Option<PathBuf>,
    level: String,
}

impl Default for RawLogConfig {
    fn default() -> RawLogConfig {
        RawLogConfig {
            file: None,
            level: String::from("info"),
        }
    }
}

impl TryFrom<RawLogConfig> for LogConfig {
    type Error = log::ParseLevelError;

    fn try_from(value: RawLogConfig) -> Result<LogConfig, log::ParseLevelError> {
        Ok(LogConfig {
            file: value.file,
            level: LevelFilter::from_str(&value.level)?,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid grid configuration")]
    Grid(#[from] GridError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_str(src: &str) -> Result<Config, ConfigError> {
        let mut tmpfile = NamedTempFile::new().expect("creating temp file should succeed");
        tmpfile
            .write_all(src.as_bytes())
            .expect("writing temp file should succeed");
        Config::load(tmpfile.path(), false)
    }

    #[test]
    fn empty_file() {
        let cfg = load_str("").expect("empty config should parse");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.grid.width, 32);
        assert_eq!(cfg.grid.height, 24);
        assert_eq!(cfg.grid.edges, EdgeMode::Wrap);
        assert_eq!(cfg.tick_period(), Duration::from_millis(100));
        assert_eq!(cfg.game.seed, None);
        assert_eq!(cfg.log.level, LevelFilter::Info);
    }

    #[test]
    fn full_file() {
        let cfg = load_str(concat!(
            "[grid]\n",
            "width = 20\n",
            "height = 10\n",
            "edges = \"solid\"\n",
            "\n",
            "[game]\n",
            "tick-ms = 250\n",
            "seed = 42\n",
            "\n",
            "[log]\n",
            "file = \"/tmp/snake.log\"\n",
            "level = \"debug\"\n",
        ))
        .expect("config should parse");
        assert_eq!(
            cfg,
            Config {
                grid: GridConfig {
                    width: 20,
                    height: 10,
                    edges: EdgeMode::Solid,
                },
                game: GameConfig {
                    tick_ms: NonZeroU64::new(250).expect("250 is nonzero"),
                    seed: Some(42),
                },
                log: LogConfig {
                    file: Some(PathBuf::from("/tmp/snake.log")),
                    level: LevelFilter::Debug,
                },
            }
        );
        assert_eq!(cfg.log.log_file(), Some(PathBuf::from("/tmp/snake.log")));
        let grid = cfg.grid().expect("grid should be valid");
        assert_eq!((grid.width(), grid.height()), (20, 10));
        assert_eq!(grid.edges(), EdgeMode::Solid);
    }

    #[test]
    fn partial_table() {
        let cfg = load_str("[grid]\nwidth = 40\n").expect("config should parse");
        assert_eq!(cfg.grid.width, 40);
        assert_eq!(cfg.grid.height, 24);
        assert_eq!(cfg.grid.edges, EdgeMode::Wrap);
    }

    #[test]
    fn logging_off() {
        let cfg = load_str("[log]\nlevel = \"off\"\n").expect("config should parse");
        assert_eq!(cfg.log.level, LevelFilter::Off);
    }

    #[test]
    fn bad_level() {
        assert!(matches!(
            load_str("[log]\nlevel = \"loud\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn bad_edges() {
        assert!(matches!(
            load_str("[grid]\nedges = \"bouncy\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_tick() {
        assert!(matches!(
            load_str("[game]\ntick-ms = 0\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn grid_too_small() {
        let cfg = load_str("[grid]\nwidth = 2\nheight = 24\n").expect("config should parse");
        assert!(matches!(
            cfg.grid(),
            Err(ConfigError::Grid(GridError::TooSmall {
                width: 2,
                height: 24
            }))
        ));
        let cfg = load_str("[grid]\nwidth = 3\nheight = 3\n").expect("config should parse");
        assert!(cfg.grid().is_ok());
    }

    #[test]
    fn missing_allowed() {
        let tmpdir = tempfile::tempdir().expect("creating temp dir should succeed");
        let path = tmpdir.path().join("config.toml");
        let cfg = Config::load(&path, true).expect("missing config should be allowed");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_not_allowed() {
        let tmpdir = tempfile::tempdir().expect("creating temp dir should succeed");
        let path = tmpdir.path().join("config.toml");
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }
}

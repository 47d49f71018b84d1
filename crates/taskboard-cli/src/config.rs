use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;
use taskboard_core::repository::DEFAULT_MAX_BACKUPS;

pub const CONFIG_FILE: &str = "taskboard.toml";
pub const ENV_PREFIX: &str = "TASKBOARD_";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Board document location
    pub data_file: PathBuf,
    /// Backups kept beside the data file; 0 disables backups
    pub max_backups: usize,
    /// Whether `list` prints the backlog section
    pub show_backlog: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("tasks.json"),
            max_backups: DEFAULT_MAX_BACKUPS,
            show_backlog: true,
        }
    }
}

impl Config {
    /// `taskboard.toml` in the working directory, overridden by
    /// `TASKBOARD_*` environment variables.
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }
}

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Where the data snapshot lives
    pub data_file: PathBuf,
    /// Calendar used when `add` is given no `--calendar`
    pub default_calendar: String,
    /// Color for calendars and events created without an explicit one
    pub default_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("agenda.json"),
            default_calendar: "personal".to_string(),
            default_color: "teal".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("agenda.toml"))
            .merge(Env::prefixed("AGENDA_"))
            .extract()
    }
}

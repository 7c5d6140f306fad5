use std::fs;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use log::{debug, warn};
use serde::Deserialize;

use crate::dictionary::Oversized;

#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    #[serde(default)]
    pub oversized_words: Oversized,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            oversized_words: Oversized::default(),
        }
    }
}

impl Config {
    /// Reads the config at `path`, or the default location when none is
    /// given. A missing file means defaults; a malformed one is reported
    /// and ignored.
    pub fn load(path: Option<&Path>) -> Config {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path(),
        };
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!("no config at {}, using defaults", path.display());
                return Config::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring malformed config {}: {err}", path.display());
                Config::default()
            }
        }
    }
}

fn default_config_path() -> PathBuf {
    let mut path = config_dir().unwrap_or_default();
    path.push("speller");
    path.push("config.json");
    path
}

fn default_dictionary() -> PathBuf {
    PathBuf::from("words.txt")
}

pub fn expand_tilde<P: AsRef<Path>>(path_user_input: P) -> Option<PathBuf> {
    let p = path_user_input.as_ref();
    if !p.starts_with("~") {
        return Some(p.to_path_buf());
    }
    if p == Path::new("~") {
        return dirs::home_dir();
    }
    dirs::home_dir().map(|mut h| {
        if h == Path::new("/") {
            // Corner case: `h` root directory;
            // don't prepend extra `/`, just drop the tilde.
            p.strip_prefix("~").unwrap().to_path_buf()
        } else {
            h.push(p.strip_prefix("~/").unwrap());
            h
        }
    })
}

//! Filter configuration.
//!
//! Settings come in two layers mirroring the host's "valves" model:
//! [`Valves`] are process-wide and fixed when the filter is constructed,
//! while [`UserValves`] are per-user toggles the host may supply with each
//! invocation.

use std::env;
use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::resolver::Selection;

/// The environment variable consulted for the API key at construction time.
const API_KEY_ENV: &str = "GIPHY_API_KEY";

/// Process-wide filter settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Valves {
    /// API key used for GIF searches. An empty key disables lookups.
    #[serde(default)]
    pub giphy_api_key: String,
    /// Publish a status event to the host after each processed response.
    #[serde(default)]
    pub debug_mode: bool,
    /// Processing priority hint consumed by the host pipeline.
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Maximum number of GIFs to retrieve per search.
    #[serde(default = "default_max_gif_results")]
    pub max_gif_results: u32,
}

impl Valves {
    /// Returns the default valves with the API key taken from the
    /// `GIPHY_API_KEY` environment variable, if set.
    #[must_use]
    pub fn from_env() -> Valves {
        Valves {
            giphy_api_key: env::var(API_KEY_ENV).unwrap_or_default(),
            ..Valves::default()
        }
    }
}

impl Default for Valves {
    fn default() -> Valves {
        Valves {
            giphy_api_key: String::new(),
            debug_mode: false,
            priority: default_priority(),
            max_gif_results: default_max_gif_results(),
        }
    }
}

/// Per-user filter settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserValves {
    /// Enables GIF replacement for this user's chats.
    #[serde(default = "default_enable_gif_replace")]
    pub enable_gif_replace: bool,
    /// Picks a random GIF from the search results instead of rotating
    /// through them in order.
    #[serde(default = "default_random_gif")]
    pub random_gif: bool,
}

impl UserValves {
    /// Returns the selection policy encoded by the `random_gif` flag.
    #[must_use]
    pub fn selection(&self) -> Selection {
        if self.random_gif {
            Selection::Random
        } else {
            Selection::Sequential
        }
    }
}

impl Default for UserValves {
    fn default() -> UserValves {
        UserValves {
            enable_gif_replace: default_enable_gif_replace(),
            random_gif: default_random_gif(),
        }
    }
}

/// Filter configuration as loaded by the command-line interface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Process-wide valves.
    #[serde(default)]
    pub valves: Valves,
    /// Valves for the invoking user.
    #[serde(default)]
    pub user: UserValves,
}

impl Config {
    /// Loads the configuration from the given TOML file, layered over the
    /// defaults. A non-empty `GIPHY_API_KEY` in the environment takes
    /// precedence over the file's API key. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the file exists but cannot be
    /// parsed or does not match the configuration shape.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, crate::Error> {
        let mut config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .extract()?;

        if let Ok(key) = env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            config.valves.giphy_api_key = key;
        }

        Ok(config)
    }
}

const fn default_priority() -> i32 {
    5
}

const fn default_max_gif_results() -> u32 {
    10
}

const fn default_enable_gif_replace() -> bool {
    true
}

const fn default_random_gif() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_valves() {
        let valves = Valves::default();

        assert_eq!(valves.giphy_api_key, "");
        assert!(!valves.debug_mode);
        assert_eq!(valves.priority, 5);
        assert_eq!(valves.max_gif_results, 10);
    }

    #[test]
    fn default_user_valves_enable_replacement() {
        let valves = UserValves::default();

        assert!(valves.enable_gif_replace);
        assert!(valves.random_gif);
        assert_eq!(valves.selection(), Selection::Random);
    }

    #[test]
    fn selection_follows_the_random_flag() {
        let valves = UserValves {
            random_gif: false,
            ..UserValves::default()
        };

        assert_eq!(valves.selection(), Selection::Sequential);
    }

    #[test]
    fn valves_from_env_reads_the_api_key() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GIPHY_API_KEY", "jail-key");

            let valves = Valves::from_env();
            assert_eq!(valves.giphy_api_key, "jail-key");

            Ok(())
        });
    }

    #[test]
    fn config_load_layers_file_and_environment() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    [valves]
                    giphy_api_key = "file-key"
                    debug_mode = true
                    max_gif_results = 3

                    [user]
                    random_gif = false
                "#,
            )?;
            jail.set_env("GIPHY_API_KEY", "env-key");

            let config = Config::load("config.toml").expect("config should load");
            assert_eq!(config.valves.giphy_api_key, "env-key");
            assert!(config.valves.debug_mode);
            assert_eq!(config.valves.max_gif_results, 3);
            assert_eq!(config.valves.priority, 5);
            assert!(!config.user.random_gif);
            assert!(config.user.enable_gif_replace);

            Ok(())
        });
    }

    #[test]
    fn config_load_tolerates_a_missing_file() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GIPHY_API_KEY", "");

            let config = Config::load("does-not-exist.toml").expect("defaults should apply");
            assert_eq!(config, Config::default());

            Ok(())
        });
    }
}

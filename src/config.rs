use chrono_tz::Tz;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub season: i32,
    pub games_file: String,
    pub picks_file: String,
    pub teams_file: String,
    /// Zone used to evaluate lock times; the process's local zone when unset
    pub local_timezone: Option<Tz>,
    /// Teams left out of standings (e.g. an admin test team)
    pub hidden_team_ids: Vec<i32>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let season = env_map
            .get("SEASON")
            .ok_or_else(|| ConfigError::MissingEnv("SEASON".to_string()))?
            .parse::<i32>()
            .map_err(|_| {
                ConfigError::InvalidValue("SEASON".to_string(), "must be a year".to_string())
            })?;

        let path = |key: &str, default: &str| {
            env_map
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        let local_timezone = match env_map.get("LOCAL_TIMEZONE").filter(|s| !s.is_empty()) {
            Some(name) => Some(name.parse::<Tz>().map_err(|_| {
                ConfigError::InvalidValue(
                    "LOCAL_TIMEZONE".to_string(),
                    format!("unknown IANA time zone {}", name),
                )
            })?),
            None => None,
        };

        let hidden_team_ids = env_map
            .get("HIDDEN_TEAM_IDS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|id| {
                        id.parse::<i32>().map_err(|_| {
                            ConfigError::InvalidValue(
                                "HIDDEN_TEAM_IDS".to_string(),
                                format!("{} is not a team id", id),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            season,
            games_file: path("GAMES_FILE", "cache/cfb_games.json"),
            picks_file: path("PICKS_FILE", "cache/picks.json"),
            teams_file: path("TEAMS_FILE", "cache/teams.json"),
            local_timezone,
            hidden_team_ids,
        })
    }
}

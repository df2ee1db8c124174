use crate::error::{config_error, AppResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default duration applied when a query carries no end time
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Main configuration structure for the application
#[derive(Debug, Clone)]
pub struct Config {
    /// Calendar names offered when creating events, in preference order
    pub calendars: Vec<String>,
    /// Path of the recent-invitees JSON file
    pub storage_path: PathBuf,
    /// Event duration in minutes when the query gives no end time
    pub default_duration_minutes: i64,
}

/// Optional overrides read from the TOML config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    calendars: Option<Vec<String>>,
    storage_path: Option<PathBuf>,
    default_duration_minutes: Option<i64>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut file_config = FileConfig::default();
        if let Some(path) = Self::config_file_path() {
            if let Ok(content) = fs::read_to_string(&path) {
                file_config = toml::from_str(&content)?;
            }
        }

        // Environment variables win over the config file
        let calendars = match env::var("QUICKEVENT_CALENDARS") {
            Ok(value) => split_calendar_list(&value),
            Err(_) => file_config
                .calendars
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        };

        let calendars = if calendars.is_empty() {
            vec!["Calendar".to_string()]
        } else {
            calendars
        };

        let storage_path = match env::var("QUICKEVENT_STORAGE_PATH") {
            Ok(value) => PathBuf::from(value),
            Err(_) => match file_config.storage_path {
                Some(path) => path,
                None => Self::default_storage_path()?,
            },
        };

        let default_duration_minutes = match env::var("QUICKEVENT_DEFAULT_DURATION_MINUTES") {
            Ok(value) => value
                .parse::<i64>()
                .map_err(|_| config_error("Invalid QUICKEVENT_DEFAULT_DURATION_MINUTES format"))?,
            Err(_) => file_config
                .default_duration_minutes
                .unwrap_or(DEFAULT_DURATION_MINUTES),
        };

        if default_duration_minutes <= 0 {
            return Err(config_error("Default event duration must be positive"));
        }

        Ok(Config {
            calendars,
            storage_path,
            default_duration_minutes,
        })
    }

    /// First configured calendar, used when no calendar name is given
    pub fn default_calendar(&self) -> &str {
        &self.calendars[0]
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quickevent").join("config.toml"))
    }

    fn default_storage_path() -> AppResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| config_error("Could not determine the user config directory"))?;
        Ok(dir.join("quickevent").join("recent-invitees.json"))
    }
}

/// Split a comma-separated calendar list, dropping empty entries
fn split_calendar_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|calendar| calendar.trim().to_string())
        .filter(|calendar| !calendar.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_calendar_list() {
        assert_eq!(
            split_calendar_list("Work, Home ,Personal"),
            vec!["Work", "Home", "Personal"]
        );
        assert_eq!(split_calendar_list(" , ,"), Vec::<String>::new());
        assert_eq!(split_calendar_list("Solo"), vec!["Solo"]);
    }
}

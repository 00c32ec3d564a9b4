use std::collections::HashSet;
use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::fbref::FbrefOptions;
use crate::player_stats::DEFAULT_PARALLELISM;
use crate::radar::FrameKind;

pub const DEFAULT_PLAYERS: [&str; 6] = [
    "Marcus Rashford",
    "Alejandro Garnacho",
    "Amad Diallo",
    "Antony",
    "Rasmus Højlund",
    "Joshua Zirkzee",
];
pub const DEFAULT_LEAGUES: [&str; 1] = ["Big 5 European Leagues Combined"];
pub const DEFAULT_SEASONS: [&str; 1] = ["2024-2025"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Fbref,
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Terminal,
    Json,
    Table,
}

impl OutputMode {
    pub fn draws_chart(self) -> bool {
        !matches!(self, OutputMode::Table)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    pub players: Vec<String>,
    pub leagues: Vec<String>,
    pub seasons: Vec<String>,
    pub frame: FrameKind,
    pub provider: ProviderKind,
    pub output: OutputMode,
    pub request_timeout: Duration,
    pub request_interval: Duration,
    pub fetch_parallelism: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS.iter().map(|s| s.to_string()).collect(),
            leagues: DEFAULT_LEAGUES.iter().map(|s| s.to_string()).collect(),
            seasons: DEFAULT_SEASONS.iter().map(|s| s.to_string()).collect(),
            frame: FrameKind::Polygon,
            provider: ProviderKind::Fbref,
            output: OutputMode::Terminal,
            request_timeout: Duration::from_secs(20),
            request_interval: Duration::from_millis(3000),
            fetch_parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl ComparisonConfig {
    /// Reads overrides from the process environment. `.env` files should be
    /// loaded by the caller first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("PLAYERS") {
            config.players = split_list(&raw);
        }
        if let Some(raw) = lookup("LEAGUES") {
            config.leagues = split_list(&raw);
        }
        if let Some(raw) = lookup("SEASONS") {
            config.seasons = split_list(&raw);
        }
        if let Some(raw) = lookup("RADAR_FRAME") {
            config.frame = raw.parse::<FrameKind>()?;
        }
        if let Some(raw) = lookup("PROVIDER") {
            config.provider = match raw.trim().to_ascii_lowercase().as_str() {
                "fbref" => ProviderKind::Fbref,
                "demo" => ProviderKind::Demo,
                _ => return Err(invalid("PROVIDER", &raw)),
            };
        }
        if let Some(raw) = lookup("OUTPUT") {
            config.output = match raw.trim().to_ascii_lowercase().as_str() {
                "terminal" | "tui" => OutputMode::Terminal,
                "json" => OutputMode::Json,
                "table" => OutputMode::Table,
                _ => return Err(invalid("OUTPUT", &raw)),
            };
        }
        if let Some(raw) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("REQUEST_TIMEOUT_SECS", &raw))?;
            config.request_timeout = Duration::from_secs(secs.clamp(5, 120));
        }
        if let Some(raw) = lookup("REQUEST_INTERVAL_MS") {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("REQUEST_INTERVAL_MS", &raw))?;
            config.request_interval = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("FETCH_PARALLELISM") {
            config.fetch_parallelism = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid("FETCH_PARALLELISM", &raw))?
                .clamp(1, 8);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::Empty { key: "PLAYERS" });
        }
        if self.leagues.is_empty() {
            return Err(ConfigError::Empty { key: "LEAGUES" });
        }
        if self.seasons.is_empty() {
            return Err(ConfigError::Empty { key: "SEASONS" });
        }
        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(player.as_str()) {
                return Err(ConfigError::DuplicatePlayer(player.clone()));
            }
        }
        Ok(())
    }

    pub fn fbref_options(&self) -> FbrefOptions {
        FbrefOptions {
            timeout: self.request_timeout,
            request_interval: self.request_interval,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::RenderError;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_hard_coded_comparison() {
        let config = ComparisonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.players.len(), 6);
        assert_eq!(config.players[4], "Rasmus Højlund");
        assert_eq!(config.leagues, vec!["Big 5 European Leagues Combined"]);
        assert_eq!(config.seasons, vec!["2024-2025"]);
        assert_eq!(config.frame, FrameKind::Polygon);
        assert_eq!(config.output, OutputMode::Terminal);
    }

    #[test]
    fn overrides_are_trimmed_and_split() {
        let config = ComparisonConfig::from_lookup(lookup(&[
            ("PLAYERS", " Bukayo Saka , Cole Palmer,, "),
            ("SEASONS", "2023-2024,2024-2025"),
            ("PROVIDER", "Demo"),
            ("OUTPUT", "json"),
            ("FETCH_PARALLELISM", "64"),
            ("REQUEST_TIMEOUT_SECS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.players, vec!["Bukayo Saka", "Cole Palmer"]);
        assert_eq!(config.seasons.len(), 2);
        assert_eq!(config.provider, ProviderKind::Demo);
        assert_eq!(config.output, OutputMode::Json);
        assert_eq!(config.fetch_parallelism, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unsupported_frame_fails_fast() {
        let err = ComparisonConfig::from_lookup(lookup(&[("RADAR_FRAME", "circle")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Frame(RenderError::UnsupportedFrame("circle".to_string()))
        );
    }

    #[test]
    fn empty_and_duplicate_players_are_rejected() {
        assert_eq!(
            ComparisonConfig::from_lookup(lookup(&[("PLAYERS", " , ")])).unwrap_err(),
            ConfigError::Empty { key: "PLAYERS" }
        );
        assert_eq!(
            ComparisonConfig::from_lookup(lookup(&[("PLAYERS", "Antony,Antony")])).unwrap_err(),
            ConfigError::DuplicatePlayer("Antony".to_string())
        );
    }

    #[test]
    fn table_output_skips_the_chart() {
        let config = ComparisonConfig::from_lookup(lookup(&[("OUTPUT", "table")])).unwrap();
        assert!(!config.output.draws_chart());
        assert!(OutputMode::Json.draws_chart());
        assert!(OutputMode::Terminal.draws_chart());
    }

    #[test]
    fn bad_numbers_name_their_key() {
        let err =
            ComparisonConfig::from_lookup(lookup(&[("REQUEST_INTERVAL_MS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "REQUEST_INTERVAL_MS",
                value: "soon".to_string()
            }
        );
    }
}

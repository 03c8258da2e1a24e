use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/data.json";
pub const DEFAULT_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "https://thenextpick-lzrlaiybi-jovan0042-5768s-projects.vercel.app",
    "https://thenextpick-web.vercel.app",
];

/// Process settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub allowed_origins: Vec<String>,
    pub club: ClubConfig,
}

/// The document served at `/api/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubConfig {
    pub suggestions: SuggestionConfig,
    pub voting: VotingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionConfig {
    pub min_count: usize,
    pub max_count: usize,
    pub default_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingConfig {
    pub point_system: PointSystem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSystem {
    pub enabled: bool,
    /// Points for rank 1, 2, 3, ... in order. Ranks past the end score 0.
    pub points: Vec<u32>,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            suggestions: SuggestionConfig {
                min_count: 3,
                max_count: 5,
                default_count: 3,
            },
            voting: VotingConfig {
                point_system: PointSystem {
                    enabled: true,
                    points: vec![3, 2, 1],
                },
            },
        }
    }
}

impl ClubConfig {
    pub fn required_suggestions(&self) -> usize {
        self.suggestions.default_count
    }

    pub fn point_system(&self) -> &PointSystem {
        &self.voting.point_system
    }
}

impl PointSystem {
    pub fn points_for(&self, rank: i64) -> u32 {
        if !self.enabled || rank < 1 {
            return 0;
        }
        usize::try_from(rank - 1)
            .ok()
            .and_then(|idx| self.points.get(idx).copied())
            .unwrap_or(0)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            club: ClubConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `PORT`, `APP_DATA_PATH`, `ALLOWED_ORIGINS`,
    /// `SUGGESTION_COUNT` and `VOTING_POINTS`. Bad values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup("PORT") {
            match value.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warn!("ignoring invalid PORT {value:?}"),
            }
        }

        if let Some(path) = lookup("APP_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }

        if let Some(value) = lookup("ALLOWED_ORIGINS") {
            let origins: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if origins.is_empty() {
                warn!("ALLOWED_ORIGINS is empty, keeping defaults");
            } else {
                config.allowed_origins = origins;
            }
        }

        if let Some(value) = lookup("SUGGESTION_COUNT") {
            let suggestions = &mut config.club.suggestions;
            match value.parse::<usize>() {
                Ok(count) if (suggestions.min_count..=suggestions.max_count).contains(&count) => {
                    suggestions.default_count = count;
                }
                _ => warn!(
                    "ignoring SUGGESTION_COUNT {value:?}, expected {}..={}",
                    suggestions.min_count, suggestions.max_count
                ),
            }
        }

        if let Some(value) = lookup("VOTING_POINTS") {
            let parsed: Result<Vec<u32>, _> = value
                .split(',')
                .map(|p| p.trim().parse::<u32>())
                .collect();
            match parsed {
                Ok(points) if !points.is_empty() => config.club.voting.point_system.points = points,
                _ => warn!("ignoring invalid VOTING_POINTS {value:?}"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = config_with(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/data.json"));
        assert_eq!(config.allowed_origins.len(), 3);
        assert_eq!(config.club.required_suggestions(), 3);
        assert_eq!(config.club.point_system().points, vec![3, 2, 1]);
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = config_with(&[
            ("PORT", "9090"),
            ("APP_DATA_PATH", "/tmp/club.json"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test"),
            ("SUGGESTION_COUNT", "4"),
            ("VOTING_POINTS", "5,3,1,0"),
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.data_path, PathBuf::from("/tmp/club.json"));
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.club.required_suggestions(), 4);
        assert_eq!(config.club.point_system().points, vec![5, 3, 1, 0]);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = config_with(&[
            ("PORT", "not-a-port"),
            ("SUGGESTION_COUNT", "12"),
            ("VOTING_POINTS", "3,x"),
            ("ALLOWED_ORIGINS", " , "),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.club.required_suggestions(), 3);
        assert_eq!(config.club.point_system().points, vec![3, 2, 1]);
        assert_eq!(config.allowed_origins.len(), 3);
    }

    #[test]
    fn points_by_rank() {
        let points = ClubConfig::default().voting.point_system;
        assert_eq!(points.points_for(1), 3);
        assert_eq!(points.points_for(2), 2);
        assert_eq!(points.points_for(3), 1);
        assert_eq!(points.points_for(4), 0);
        assert_eq!(points.points_for(0), 0);
        assert_eq!(points.points_for(-2), 0);

        let disabled = PointSystem {
            enabled: false,
            ..points
        };
        assert_eq!(disabled.points_for(1), 0);
    }

    #[test]
    fn club_config_wire_format() {
        let value = serde_json::to_value(ClubConfig::default()).unwrap();
        assert_eq!(value["suggestions"]["defaultCount"], 3);
        assert_eq!(value["voting"]["pointSystem"]["enabled"], true);
    }
}

//! Football form features
//!
//! Turns a chronological log of match results into a training table: for every
//! match, each side's aggregate form over its last N matches, plus the result
//! and closing odds.

pub mod data;
pub mod features;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Date format used by the results files (day/month/2-digit year)
pub const DATE_FORMAT: &str = "%d/%m/%y";

/// Default number of prior matches a form vector is computed over
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Parse a date in the results-file format
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| FormError::Parse(format!("invalid date '{}': {}", value, e)))
}

mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(d: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        NaiveDate::parse_from_str(s.trim(), super::DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Full-time result, keyed by the `FTR` codes of the source files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "H")]
    HomeWin,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "A")]
    AwayWin,
}

impl MatchResult {
    pub fn code(&self) -> &'static str {
        match self {
            MatchResult::HomeWin => "H",
            MatchResult::Draw => "D",
            MatchResult::AwayWin => "A",
        }
    }

    /// The side this result favoured, or None for a draw
    pub fn winning_side(&self) -> Option<Side> {
        match self {
            MatchResult::HomeWin => Some(Side::Home),
            MatchResult::AwayWin => Some(Side::Away),
            MatchResult::Draw => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which side of a fixture a team played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Column namespace used in feature rows
    pub fn prefix(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Decimal betting odds for the three outcomes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

/// A single played fixture, as read from one results-file row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "Date", deserialize_with = "date_format::deserialize")]
    pub date: NaiveDate,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    #[serde(rename = "FTR")]
    pub result: MatchResult,
    #[serde(rename = "FTHG")]
    pub home_goals: u32,
    #[serde(rename = "FTAG")]
    pub away_goals: u32,
    #[serde(rename = "HS")]
    pub home_shots: u32,
    #[serde(rename = "AS")]
    pub away_shots: u32,
    #[serde(rename = "HST")]
    pub home_shots_on_target: u32,
    #[serde(rename = "AST")]
    pub away_shots_on_target: u32,
    #[serde(rename = "B365H")]
    pub odds_home: f64,
    #[serde(rename = "B365D")]
    pub odds_draw: f64,
    #[serde(rename = "B365A")]
    pub odds_away: f64,
}

impl MatchRecord {
    /// Check if a team played in this match
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Which side the given team played on, if any
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team == team {
            Some(Side::Home)
        } else if self.away_team == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Team name for a side
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn goals(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_goals,
            Side::Away => self.away_goals,
        }
    }

    pub fn shots(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_shots,
            Side::Away => self.away_shots,
        }
    }

    pub fn shots_on_target(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_shots_on_target,
            Side::Away => self.away_shots_on_target,
        }
    }

    pub fn odds(&self) -> Odds {
        Odds {
            home: self.odds_home,
            draw: self.odds_draw,
            away: self.odds_away,
        }
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FormError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, FormError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub features: FeatureConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub window_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub input_path: String,
    pub output_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            features: FeatureConfig {
                window_size: DEFAULT_WINDOW_SIZE,
            },
            data: DataConfig {
                input_path: "data/results.csv".to_string(),
                output_path: "data/features.csv".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FormError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| FormError::Config(format!("Failed to parse config: {}", e)))?;
        if config.features.window_size == 0 {
            return Err(FormError::Config(
                "features.window_size must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FormError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

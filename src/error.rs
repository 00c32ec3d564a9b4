use thiserror::Error;

use crate::provider::StatType;
use crate::stat_table::ColumnKey;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no {stat_type} data found for player {player}")]
    PlayerNotFound { player: String, stat_type: StatType },

    #[error("{stat_type} table is missing column {column}")]
    SchemaMismatch {
        stat_type: StatType,
        column: ColumnKey,
    },

    // "90s played" of zero would make every per-90 metric non-finite.
    #[error("player {player} has no minutes played (90s = {nineties})")]
    NoMinutesPlayed { player: String, nineties: f64 },

    #[error("unknown league: {0}")]
    UnknownLeague(String),

    #[error("invalid season code: {0}")]
    InvalidSeason(String),

    #[error("table {table_id} not found in {location}")]
    MissingTable { table_id: String, location: String },

    #[error("http {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bad selector: {0}")]
    Selector(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("series {series} has {found} values but the chart has {expected} categories")]
    DimensionMismatch {
        series: String,
        expected: usize,
        found: usize,
    },

    #[error("unknown value for frame: {0}")]
    UnsupportedFrame(String),

    #[error("a radar chart needs at least 3 categories, got {0}")]
    TooFewCategories(usize),

    #[error("series {series} does not share the chart's category keys")]
    InconsistentCategories { series: String },

    #[error("series {series} has a non-finite value for {category}")]
    NonFiniteValue { series: String, category: String },

    #[error("nothing to plot")]
    NoSeries,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must not be empty")]
    Empty { key: &'static str },

    #[error("duplicate player: {0}")]
    DuplicatePlayer(String),

    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error(transparent)]
    Frame(#[from] RenderError),
}

//! Per-90 player comparison: fetch FBref season tables, derive seven attacking
//! metrics per player and draw them on a shared radar chart.

pub mod chart;
pub mod config;
pub mod demo_feed;
pub mod error;
pub mod fbref;
pub mod http_client;
pub mod player_stats;
pub mod provider;
pub mod radar;
pub mod stat_table;
pub mod tui;

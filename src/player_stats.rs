use rayon::prelude::*;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::FetchError;
use crate::fbref::{FbrefOptions, FbrefProvider};
use crate::provider::{StatType, StatsProvider};
use crate::stat_table::{ColumnKey, StatTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    ProgressiveCarries,
    CarriesIntoPenaltyArea,
    SuccessfulTakeOns,
    ShotCreatingActions,
    ExpectedAssists,
    ExpectedGoals,
    KeyPasses,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::ProgressiveCarries,
        Metric::CarriesIntoPenaltyArea,
        Metric::SuccessfulTakeOns,
        Metric::ShotCreatingActions,
        Metric::ExpectedAssists,
        Metric::ExpectedGoals,
        Metric::KeyPasses,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::ProgressiveCarries => "Progressive Carries per 90",
            Metric::CarriesIntoPenaltyArea => "Carries into Penalty Area per 90",
            Metric::SuccessfulTakeOns => "Successful Take-ons per 90",
            Metric::ShotCreatingActions => "Shot Creating Actions per 90",
            Metric::ExpectedAssists => "Expected Assists per 90",
            Metric::ExpectedGoals => "Expected Goals per 90",
            Metric::KeyPasses => "Key Passes per 90",
        }
    }

    pub fn source(self) -> (StatType, ColumnKey) {
        let (stat_type, group, stat) = match self {
            Metric::ProgressiveCarries => (StatType::Possession, "Carries", "PrgC"),
            Metric::CarriesIntoPenaltyArea => (StatType::Possession, "Carries", "CPA"),
            Metric::SuccessfulTakeOns => (StatType::Possession, "Take-Ons", "Succ"),
            Metric::ShotCreatingActions => (StatType::GoalShotCreation, "SCA", "SCA90"),
            Metric::ExpectedAssists => (StatType::Standard, "Expected", "xAG"),
            Metric::ExpectedGoals => (StatType::Standard, "Expected", "xG"),
            Metric::KeyPasses => (StatType::Passing, "KP", ""),
        };
        (stat_type, ColumnKey::new(group, stat))
    }

    /// Season totals divided by 90s played; the rest are read as published.
    pub fn per90_normalized(self) -> bool {
        matches!(
            self,
            Metric::ProgressiveCarries
                | Metric::CarriesIntoPenaltyArea
                | Metric::SuccessfulTakeOns
                | Metric::KeyPasses
        )
    }
}

pub fn minutes_column() -> ColumnKey {
    ColumnKey::new("Playing Time", "90s")
}

/// Ordered metric-name to value mapping. Key order is axis order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    entries: Vec<(String, f64)>,
}

impl PlayerStats {
    pub fn from_entries(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn same_keys(&self, other: &PlayerStats) -> bool {
        self.keys().eq(other.keys())
    }
}

impl Serialize for PlayerStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone)]
pub struct SeasonTables {
    pub standard: StatTable,
    pub passing: StatTable,
    pub gca: StatTable,
    pub possession: StatTable,
}

impl SeasonTables {
    /// Retrieves all four tables on a bounded pool. Any failure aborts the load.
    pub fn load(provider: &dyn StatsProvider, parallelism: usize) -> Result<Self, FetchError> {
        let mut tables = with_fetch_pool(parallelism, || {
            StatType::ALL
                .par_iter()
                .map(|stat_type| {
                    provider
                        .read_player_season_stats(*stat_type)
                        .map(|table| (*stat_type, table))
                })
                .collect::<Result<Vec<_>, FetchError>>()
        })?;

        for (stat_type, table) in &tables {
            log::debug!("{stat_type} columns: {:?}", table.columns());
        }

        let mut take = |wanted: StatType| {
            tables
                .iter()
                .position(|(stat_type, _)| *stat_type == wanted)
                .map(|pos| tables.swap_remove(pos).1)
                .unwrap_or_default()
        };
        Ok(Self {
            standard: take(StatType::Standard),
            passing: take(StatType::Passing),
            gca: take(StatType::GoalShotCreation),
            possession: take(StatType::Possession),
        })
    }

    pub fn table(&self, stat_type: StatType) -> &StatTable {
        match stat_type {
            StatType::Standard => &self.standard,
            StatType::Passing => &self.passing,
            StatType::GoalShotCreation => &self.gca,
            StatType::Possession => &self.possession,
        }
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        for stat_type in StatType::ALL {
            let table = self.table(stat_type);
            for column in stat_type.required_columns() {
                if !table.has_column(&column) {
                    return Err(FetchError::SchemaMismatch { stat_type, column });
                }
            }
        }
        Ok(())
    }

    pub fn player_stats(&self, player: &str) -> Result<PlayerStats, FetchError> {
        self.validate()?;

        let standard = self.standard.filter_player(player);
        if standard.is_empty() {
            return Err(FetchError::PlayerNotFound {
                player: player.to_string(),
                stat_type: StatType::Standard,
            });
        }

        let mut rows = SeasonTables {
            standard,
            passing: StatTable::default(),
            gca: StatTable::default(),
            possession: StatTable::default(),
        };
        for stat_type in [StatType::Passing, StatType::GoalShotCreation, StatType::Possession] {
            let filtered = self.table(stat_type).filter_player(player);
            if filtered.is_empty() {
                return Err(FetchError::PlayerNotFound {
                    player: player.to_string(),
                    stat_type,
                });
            }
            match stat_type {
                StatType::Passing => rows.passing = filtered,
                StatType::GoalShotCreation => rows.gca = filtered,
                _ => rows.possession = filtered,
            }
        }

        if rows.standard.len() > 1 {
            log::debug!("{player} has {} standard rows; using the first", rows.standard.len());
        }

        let nineties = rows
            .standard
            .first_value(&minutes_column())
            .unwrap_or(f64::NAN);
        if !nineties.is_finite() || nineties == 0.0 {
            return Err(FetchError::NoMinutesPlayed {
                player: player.to_string(),
                nineties,
            });
        }

        let mut entries = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            let (stat_type, column) = metric.source();
            let raw = rows
                .table(stat_type)
                .first_value(&column)
                .ok_or(FetchError::SchemaMismatch { stat_type, column })?;
            let value = if metric.per90_normalized() {
                raw / nineties
            } else {
                raw
            };
            entries.push((metric.label().to_string(), value));
        }
        Ok(PlayerStats::from_entries(entries))
    }
}

pub fn fetch_players(
    provider: &dyn StatsProvider,
    players: &[String],
    parallelism: usize,
) -> Result<Vec<(String, Result<PlayerStats, FetchError>)>, FetchError> {
    let tables = SeasonTables::load(provider, parallelism)?;
    tables.validate()?;
    Ok(players
        .iter()
        .map(|name| (name.clone(), tables.player_stats(name)))
        .collect())
}

pub fn fetch_player(
    provider: &dyn StatsProvider,
    player_name: &str,
    parallelism: usize,
) -> Result<PlayerStats, FetchError> {
    SeasonTables::load(provider, parallelism)?.player_stats(player_name)
}

pub fn fetch_player_data<L, S>(
    player_name: &str,
    leagues: &[L],
    seasons: &[S],
) -> Result<PlayerStats, FetchError>
where
    L: AsRef<str>,
    S: AsRef<str>,
{
    let provider = FbrefProvider::new(leagues, seasons, FbrefOptions::default())?;
    fetch_player(&provider, player_name, DEFAULT_PARALLELISM)
}

pub const DEFAULT_PARALLELISM: usize = 4;

fn with_fetch_pool<T>(threads: usize, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads.clamp(1, 8))
        .build()
    {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}

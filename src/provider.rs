use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::FetchError;
use crate::stat_table::{ColumnKey, StatTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    Standard,
    Passing,
    GoalShotCreation,
    Possession,
}

impl StatType {
    pub const ALL: [StatType; 4] = [
        StatType::Standard,
        StatType::Passing,
        StatType::GoalShotCreation,
        StatType::Possession,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatType::Standard => "standard",
            StatType::Passing => "passing",
            StatType::GoalShotCreation => "goal_shot_creation",
            StatType::Possession => "possession",
        }
    }

    /// Columns the metric derivation reads from this table.
    pub fn required_columns(self) -> Vec<ColumnKey> {
        let pairs: &[(&str, &str)] = match self {
            StatType::Standard => &[
                ("Playing Time", "90s"),
                ("Expected", "xAG"),
                ("Expected", "xG"),
            ],
            StatType::Passing => &[("KP", "")],
            StatType::GoalShotCreation => &[("SCA", "SCA90")],
            StatType::Possession => &[
                ("Carries", "PrgC"),
                ("Carries", "CPA"),
                ("Take-Ons", "Succ"),
            ],
        };
        pairs
            .iter()
            .map(|(group, stat)| ColumnKey::new(*group, *stat))
            .collect()
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait StatsProvider: Sync {
    fn read_player_season_stats(&self, stat_type: StatType) -> Result<StatTable, FetchError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    tables: HashMap<StatType, StatTable>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, stat_type: StatType, table: StatTable) -> Self {
        self.tables.insert(stat_type, table);
        self
    }

    pub fn insert(&mut self, stat_type: StatType, table: StatTable) {
        self.tables.insert(stat_type, table);
    }
}

impl StatsProvider for MemoryProvider {
    fn read_player_season_stats(&self, stat_type: StatType) -> Result<StatTable, FetchError> {
        self.tables
            .get(&stat_type)
            .cloned()
            .ok_or_else(|| FetchError::MissingTable {
                table_id: stat_type.as_str().to_string(),
                location: "memory provider".to_string(),
            })
    }
}

use std::fmt;

use serde::Serialize;

/// Two-level column key: `(group, stat)`, e.g. `("Playing Time", "90s")`.
/// Columns without an over-header group are keyed `(stat, "")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnKey {
    pub group: String,
    pub stat: String,
}

impl ColumnKey {
    pub fn new(group: impl Into<String>, stat: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            stat: stat.into(),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', '{}')", self.group, self.stat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RowIndex {
    pub league: String,
    pub season: String,
    pub team: String,
    pub player: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatRow {
    pub index: RowIndex,
    values: Vec<f64>,
}

impl StatRow {
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatTable {
    columns: Vec<ColumnKey>,
    rows: Vec<StatRow>,
}

impl StatTable {
    pub fn new(columns: Vec<ColumnKey>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Short rows are padded with NaN, long rows truncated to the column count.
    pub fn push_row(&mut self, index: RowIndex, mut values: Vec<f64>) {
        values.resize(self.columns.len(), f64::NAN);
        self.rows.push(StatRow { index, values });
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn rows(&self) -> &[StatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_position(&self, key: &ColumnKey) -> Option<usize> {
        self.columns.iter().position(|c| c == key)
    }

    pub fn has_column(&self, key: &ColumnKey) -> bool {
        self.column_position(key).is_some()
    }

    pub fn filter_player(&self, player: &str) -> StatTable {
        StatTable {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.index.player == player)
                .cloned()
                .collect(),
        }
    }

    pub fn value(&self, row: usize, key: &ColumnKey) -> Option<f64> {
        let col = self.column_position(key)?;
        self.rows.get(row).map(|r| r.values[col])
    }

    pub fn first_value(&self, key: &ColumnKey) -> Option<f64> {
        self.value(0, key)
    }

    /// Concatenates `other` below `self`, aligning columns by key. Columns only
    /// one side has are filled with NaN on the other.
    pub fn append(&mut self, other: StatTable) {
        if self.columns.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }

        for key in &other.columns {
            if !self.has_column(key) {
                self.columns.push(key.clone());
                for row in &mut self.rows {
                    row.values.push(f64::NAN);
                }
            }
        }

        let mapping: Vec<usize> = other
            .columns
            .iter()
            .filter_map(|key| self.column_position(key))
            .collect();

        for row in other.rows {
            let mut values = vec![f64::NAN; self.columns.len()];
            for (src, &dst) in mapping.iter().enumerate() {
                values[dst] = row.values[src];
            }
            self.rows.push(StatRow {
                index: row.index,
                values,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(player: &str, team: &str) -> RowIndex {
        RowIndex {
            league: "ENG-Premier League".to_string(),
            season: "2024-2025".to_string(),
            team: team.to_string(),
            player: player.to_string(),
        }
    }

    #[test]
    fn push_row_pads_short_rows() {
        let mut table = StatTable::new(vec![ColumnKey::new("A", "x"), ColumnKey::new("A", "y")]);
        table.push_row(index("P", "T"), vec![1.0]);
        assert_eq!(table.rows()[0].values().len(), 2);
        assert!(table.value(0, &ColumnKey::new("A", "y")).unwrap().is_nan());
    }

    #[test]
    fn filter_player_is_exact_match() {
        let mut table = StatTable::new(vec![ColumnKey::new("A", "x")]);
        table.push_row(index("Rasmus Højlund", "Manchester Utd"), vec![1.0]);
        table.push_row(index("Rasmus Hojlund", "Manchester Utd"), vec![2.0]);
        table.push_row(index("rasmus højlund", "Manchester Utd"), vec![3.0]);

        let filtered = table.filter_player("Rasmus Højlund");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first_value(&ColumnKey::new("A", "x")), Some(1.0));
    }

    #[test]
    fn append_aligns_columns_by_key() {
        let mut left = StatTable::new(vec![ColumnKey::new("A", "x"), ColumnKey::new("A", "y")]);
        left.push_row(index("P1", "T1"), vec![1.0, 2.0]);

        let mut right = StatTable::new(vec![ColumnKey::new("A", "y"), ColumnKey::new("B", "z")]);
        right.push_row(index("P2", "T2"), vec![20.0, 30.0]);

        left.append(right);
        assert_eq!(left.columns().len(), 3);
        assert_eq!(left.len(), 2);
        assert_eq!(left.value(1, &ColumnKey::new("A", "y")), Some(20.0));
        assert_eq!(left.value(1, &ColumnKey::new("B", "z")), Some(30.0));
        assert!(left.value(1, &ColumnKey::new("A", "x")).unwrap().is_nan());
        assert!(left.value(0, &ColumnKey::new("B", "z")).unwrap().is_nan());
    }

    #[test]
    fn append_into_empty_takes_other() {
        let mut empty = StatTable::default();
        let mut other = StatTable::new(vec![ColumnKey::new("A", "x")]);
        other.push_row(index("P", "T"), vec![5.0]);
        empty.append(other);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty.columns().len(), 1);
    }
}

//! Training table assembly
//!
//! One row per match where both sides have a full form window, carrying the
//! result label, the odds and both form vectors.

use super::MatchStore;
use crate::features::{FormAggregator, FormVector};
use crate::{MatchRecord, MatchResult, Odds, Side};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// One cell of a feature row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Label(MatchResult),
    Odds(f64),
    Count(u32),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Label(result) => write!(f, "{}", result),
            FeatureValue::Odds(odds) => write!(f, "{:?}", odds),
            FeatureValue::Count(count) => write!(f, "{}", count),
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Label(result) => serializer.serialize_str(result.code()),
            FeatureValue::Odds(odds) => serializer.serialize_f64(*odds),
            FeatureValue::Count(count) => serializer.serialize_u32(*count),
        }
    }
}

/// A training sample: label, odds and both teams' form
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub result: MatchResult,
    pub odds: Odds,
    pub home: FormVector,
    pub away: FormVector,
}

impl FeatureRow {
    /// Total number of columns
    pub const DIM: usize = 4 + 2 * FormVector::DIM;

    pub fn new(record: &MatchRecord, home: FormVector, away: FormVector) -> Self {
        FeatureRow {
            result: record.result,
            odds: record.odds(),
            home,
            away,
        }
    }

    /// Form vector for one side
    pub fn form(&self, side: Side) -> &FormVector {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Flattened column names, in output order
    pub fn column_names() -> Vec<String> {
        let mut names = vec![
            "result".to_string(),
            "odds-home".to_string(),
            "odds-draw".to_string(),
            "odds-away".to_string(),
        ];
        for side in [Side::Home, Side::Away] {
            names.extend(
                FormVector::STAT_NAMES
                    .iter()
                    .map(|stat| format!("{}-{}", side.prefix(), stat)),
            );
        }
        names
    }

    /// Cell values, aligned with `column_names`
    pub fn values(&self) -> Vec<FeatureValue> {
        let mut values = Vec::with_capacity(Self::DIM);
        values.push(FeatureValue::Label(self.result));
        values.push(FeatureValue::Odds(self.odds.home));
        values.push(FeatureValue::Odds(self.odds.draw));
        values.push(FeatureValue::Odds(self.odds.away));
        for side in [Side::Home, Side::Away] {
            values.extend(self.form(side).to_array().map(FeatureValue::Count));
        }
        values
    }
}

impl Serialize for FeatureRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Self::DIM))?;
        for (name, value) in Self::column_names().iter().zip(self.values()) {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Feature rows for a whole match store
#[derive(Debug, Clone, Default)]
pub struct FeatureDataset {
    rows: Vec<FeatureRow>,
    skipped: usize,
}

impl FeatureDataset {
    /// Build a row for every match where both teams have `window_size` prior
    /// matches. Output keeps the store's order.
    pub fn build(store: &MatchStore, window_size: usize) -> Self {
        let aggregator = FormAggregator::new(store, window_size);
        let mut rows = Vec::new();
        let mut skipped = 0;

        for record in store.records() {
            match Self::featurize(&aggregator, record) {
                Some(row) => rows.push(row),
                None => {
                    log::trace!(
                        "Skipping {} v {} on {}: insufficient history",
                        record.home_team,
                        record.away_team,
                        record.date
                    );
                    skipped += 1;
                }
            }
        }

        log::info!(
            "Built {} feature rows from {} matches ({} skipped, window {})",
            rows.len(),
            store.len(),
            skipped,
            window_size
        );

        FeatureDataset { rows, skipped }
    }

    /// Row for a single match, or None if either side lacks history
    pub fn featurize(
        aggregator: &FormAggregator<'_>,
        record: &MatchRecord,
    ) -> Option<FeatureRow> {
        let home = aggregator.aggregate(&record.home_team, record.date)?;
        let away = aggregator.aggregate(&record.away_team, record.date)?;
        Some(FeatureRow::new(record, home, away))
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Matches dropped for insufficient history
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FeatureRow> {
        self.rows.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_match(
        day: u32,
        home: &str,
        away: &str,
        home_goals: u32,
        away_goals: u32,
    ) -> MatchRecord {
        let result = match home_goals.cmp(&away_goals) {
            std::cmp::Ordering::Greater => MatchResult::HomeWin,
            std::cmp::Ordering::Less => MatchResult::AwayWin,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        };
        MatchRecord {
            date: NaiveDate::from_ymd_opt(2020, 9, day).unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            result,
            home_goals,
            away_goals,
            home_shots: 12,
            away_shots: 9,
            home_shots_on_target: 5,
            away_shots_on_target: 2,
            odds_home: day as f64,
            odds_draw: 3.5,
            odds_away: 4.2,
        }
    }

    /// Round robin between three teams, one match per day
    fn fixture_list() -> Vec<MatchRecord> {
        vec![
            make_match(1, "Fulham", "Leeds", 1, 0),
            make_match(2, "Leeds", "Wolves", 2, 2),
            make_match(3, "Wolves", "Fulham", 0, 3),
            make_match(4, "Leeds", "Fulham", 1, 1),
            make_match(5, "Fulham", "Wolves", 0, 1),
            make_match(6, "Wolves", "Leeds", 2, 4),
        ]
    }

    #[test]
    fn test_column_names() {
        let names = FeatureRow::column_names();
        assert_eq!(names.len(), FeatureRow::DIM);
        assert_eq!(&names[..4], &["result", "odds-home", "odds-draw", "odds-away"]);
        assert_eq!(names[4], "home-wins");
        assert_eq!(names[12], "home-opposition-shots-on-target");
        assert_eq!(names[13], "away-wins");
        assert_eq!(names[21], "away-opposition-shots-on-target");
    }

    #[test]
    fn test_skips_matches_without_history() {
        let store = MatchStore::from_records(fixture_list());
        let dataset = FeatureDataset::build(&store, 2);

        // Days 1-3 lack history for someone; Leeds v Fulham on day 4 is the
        // first match where both sides have two prior games.
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.skipped(), 3);
        assert_eq!(dataset.len() + dataset.skipped(), store.len());
        assert_eq!(dataset.rows()[0].odds.home, 4.0);
        assert_eq!(dataset.rows()[2].odds.home, 6.0);
    }

    #[test]
    fn test_row_contents() {
        let store = MatchStore::from_records(fixture_list());
        let dataset = FeatureDataset::build(&store, 2);
        let row = dataset.get(0).unwrap();

        // Leeds (home) on day 4: lost 0-1 away at Fulham, drew 2-2 with Wolves
        assert_eq!(row.result, MatchResult::Draw);
        assert_eq!(row.home.wins, 0);
        assert_eq!(row.home.draws, 1);
        assert_eq!(row.home.losses, 1);
        assert_eq!(row.home.goals, 2);
        assert_eq!(row.home.opposition_goals, 3);
        assert_eq!(row.home.shots, 9 + 12);

        // Fulham (away) on day 4: beat Leeds 1-0 at home, won 3-0 at Wolves
        assert_eq!(row.away.wins, 2);
        assert_eq!(row.away.goals, 4);
        assert_eq!(row.away.opposition_goals, 0);
        assert_eq!(row.away.shots_on_target, 5 + 2);
    }

    #[test]
    fn test_values_align_with_columns() {
        let store = MatchStore::from_records(fixture_list());
        let dataset = FeatureDataset::build(&store, 2);
        let row = dataset.get(0).unwrap();
        let values = row.values();

        assert_eq!(values.len(), FeatureRow::DIM);
        assert_eq!(values[0], FeatureValue::Label(MatchResult::Draw));
        assert_eq!(values[4], FeatureValue::Count(row.home.wins));
        assert_eq!(values[13], FeatureValue::Count(row.away.wins));
        assert_eq!(values[0].to_string(), "D");
        assert_eq!(values[1].to_string(), "4.0");
        assert_eq!(values[3].to_string(), "4.2");
    }

    #[test]
    fn test_serialize_keeps_column_order() {
        let store = MatchStore::from_records(fixture_list());
        let dataset = FeatureDataset::build(&store, 2);
        let json = serde_json::to_string(dataset.get(0).unwrap()).unwrap();

        assert!(json.starts_with("{\"result\":\"D\",\"odds-home\":4.0,"));
        let home_pos = json.find("\"home-wins\"").unwrap();
        let away_pos = json.find("\"away-wins\"").unwrap();
        assert!(home_pos < away_pos);
    }

    #[test]
    fn test_window_larger_than_history() {
        let store = MatchStore::from_records(fixture_list());
        let dataset = FeatureDataset::build(&store, 10);
        assert!(dataset.is_empty());
        assert_eq!(dataset.skipped(), 6);
    }

    #[test]
    fn test_deterministic() {
        let store = MatchStore::from_records(fixture_list());
        let first = serde_json::to_string(FeatureDataset::build(&store, 1).rows()).unwrap();
        let second = serde_json::to_string(FeatureDataset::build(&store, 1).rows()).unwrap();
        assert_eq!(first, second);
    }
}

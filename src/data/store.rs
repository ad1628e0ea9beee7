//! In-memory match record store
//!
//! Loads results files into an immutable, source-ordered list of matches and
//! answers per-team history queries against it.

use crate::{FormError, MatchRecord, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Ordered, read-only collection of match records
#[derive(Debug, Clone, Default)]
pub struct MatchStore {
    records: Vec<MatchRecord>,
    /// Positions into `records` for each team, ascending
    team_index: HashMap<String, Vec<usize>>,
}

impl MatchStore {
    /// Load a results file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| FormError::Open {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;
        let store = Self::from_reader(file)?;
        log::info!(
            "Loaded {} matches ({} teams) from {}",
            store.len(),
            store.team_index.len(),
            path.as_ref().display()
        );
        Ok(store)
    }

    /// Load results from any CSV source. The first malformed row aborts the load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in rdr.deserialize::<MatchRecord>() {
            records.push(row?);
        }

        Ok(Self::from_records(records))
    }

    /// Build a store from already-parsed records, keeping their order
    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        let mut team_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, record) in records.iter().enumerate() {
            team_index
                .entry(record.home_team.clone())
                .or_default()
                .push(pos);
            if record.away_team != record.home_team {
                team_index
                    .entry(record.away_team.clone())
                    .or_default()
                    .push(pos);
            }
        }

        log::debug!(
            "Indexed {} matches across {} teams",
            records.len(),
            team_index.len()
        );

        MatchStore {
            records,
            team_index,
        }
    }

    /// All matches, in source order
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check whether a team appears anywhere in the store
    pub fn contains_team(&self, team: &str) -> bool {
        self.team_index.contains_key(team)
    }

    /// Distinct team names, sorted
    pub fn teams(&self) -> Vec<&str> {
        self.team_index
            .keys()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Earliest and latest match dates
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }

    /// Matches involving `team` dated strictly before `before`, in source order.
    ///
    /// A match on `before` itself is never returned, so a fixture can't see
    /// its own result or anything played the same day.
    pub fn matches_before(&self, team: &str, before: NaiveDate) -> Vec<&MatchRecord> {
        self.team_index
            .get(team)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&pos| &self.records[pos])
                    .filter(|record| record.date < before)
                    .collect()
            })
            .unwrap_or_default()
    }
}

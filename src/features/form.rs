//! Rolling team form
//!
//! Sums a team's results and shot counts over its most recent matches before
//! a given date.

use super::perspective::{Outcome, TeamMatchPerspective};
use crate::data::MatchStore;
use crate::{MatchRecord, DEFAULT_WINDOW_SIZE};
use chrono::NaiveDate;
use serde::Serialize;

/// Aggregate counts over a window of matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormVector {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals: u32,
    pub opposition_goals: u32,
    pub shots: u32,
    pub shots_on_target: u32,
    pub opposition_shots: u32,
    pub opposition_shots_on_target: u32,
}

impl FormVector {
    pub const DIM: usize = 9;

    /// Column names, in the same order as `to_array`
    pub const STAT_NAMES: [&'static str; Self::DIM] = [
        "wins",
        "draws",
        "losses",
        "goals",
        "opposition-goals",
        "shots",
        "shots-on-target",
        "opposition-shots",
        "opposition-shots-on-target",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Add one match to the running totals
    pub fn update(&mut self, view: &TeamMatchPerspective<'_>) {
        match view.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.goals += view.goals;
        self.opposition_goals += view.opposition_goals;
        self.shots += view.shots;
        self.shots_on_target += view.shots_on_target;
        self.opposition_shots += view.opposition_shots;
        self.opposition_shots_on_target += view.opposition_shots_on_target;
    }

    /// Matches counted so far
    pub fn matches(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn to_array(&self) -> [u32; Self::DIM] {
        [
            self.wins,
            self.draws,
            self.losses,
            self.goals,
            self.opposition_goals,
            self.shots,
            self.shots_on_target,
            self.opposition_shots,
            self.opposition_shots_on_target,
        ]
    }
}

/// Fold a team's matches into one form vector. Records the team didn't play
/// in are ignored.
pub fn accumulate<'a, I>(team: &str, matches: I) -> FormVector
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut form = FormVector::new();
    for record in matches {
        if let Some(view) = TeamMatchPerspective::from_match(record, team) {
            form.update(&view);
        }
    }
    form
}

/// Computes form vectors against a match store
pub struct FormAggregator<'a> {
    store: &'a MatchStore,
    window_size: usize,
}

impl<'a> FormAggregator<'a> {
    pub fn new(store: &'a MatchStore, window_size: usize) -> Self {
        FormAggregator { store, window_size }
    }

    pub fn with_default_window(store: &'a MatchStore) -> Self {
        Self::new(store, DEFAULT_WINDOW_SIZE)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Form over the `window_size` matches immediately before `as_of`.
    ///
    /// Returns None when the team has fewer than `window_size` earlier
    /// matches. That is a normal skip signal, not a failure.
    pub fn aggregate(&self, team: &str, as_of: NaiveDate) -> Option<FormVector> {
        let history = self.store.matches_before(team, as_of);

        if history.len() < self.window_size {
            log::trace!(
                "{}: {} matches before {}, need {}",
                team,
                history.len(),
                as_of,
                self.window_size
            );
            return None;
        }

        let recent = &history[history.len() - self.window_size..];
        Some(accumulate(team, recent.iter().copied()))
    }
}

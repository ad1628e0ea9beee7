//! Single-match view from one team's side
//!
//! Each match in a team's history is re-expressed as "team vs opposition" so
//! form can be summed without caring which side the team played.

use crate::{MatchRecord, Side};

/// Outcome of a match for the perspective team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// A match record seen from a specific team's perspective
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMatchPerspective<'a> {
    /// Side the perspective team played
    pub side: Side,
    pub opposition: &'a str,
    pub outcome: Outcome,
    pub goals: u32,
    pub opposition_goals: u32,
    pub shots: u32,
    pub shots_on_target: u32,
    pub opposition_shots: u32,
    pub opposition_shots_on_target: u32,
}

impl<'a> TeamMatchPerspective<'a> {
    /// Re-express `record` from `team`'s side, or None if the team didn't play
    pub fn from_match(record: &'a MatchRecord, team: &str) -> Option<Self> {
        let side = record.side_of(team)?;
        let other = side.opposite();

        let outcome = match record.result.winning_side() {
            Some(winner) if winner == side => Outcome::Win,
            Some(_) => Outcome::Loss,
            None => Outcome::Draw,
        };

        Some(TeamMatchPerspective {
            side,
            opposition: record.team(other),
            outcome,
            goals: record.goals(side),
            opposition_goals: record.goals(other),
            shots: record.shots(side),
            shots_on_target: record.shots_on_target(side),
            opposition_shots: record.shots(other),
            opposition_shots_on_target: record.shots_on_target(other),
        })
    }

    pub fn is_home(&self) -> bool {
        self.side == Side::Home
    }

    /// Shots on target per shot, 0 when no shots were taken.
    /// Not carried into the aggregated form vector.
    pub fn shot_accuracy(&self) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.shots_on_target as f64 / self.shots as f64
        }
    }
}

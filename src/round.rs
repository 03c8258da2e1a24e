//! Guarded transitions of the current round.
//!
//! Each method either applies the whole transition or returns an error and
//! leaves the document untouched.

use crate::config::ClubConfig;
use crate::models::{ClubState, HistoryEntry, Rankings, Round, Suggestion};
use crate::scoring::{pick_winner, tally};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("Suggestions have already been made for this round.")]
    SuggestionsAlreadySubmitted,
    #[error("Exactly {expected} suggestions are required.")]
    WrongSuggestionCount { expected: usize, actual: usize },
    #[error("Voting is closed for this round")]
    VotingClosed,
    #[error("Voting is already closed")]
    VotingAlreadyClosed,
    #[error("The current round has not been marked as discussed yet")]
    NotDiscussed,
    #[error("The club has no members to pick the next round")]
    NoMembers,
}

impl ClubState {
    pub fn submit_suggestions(
        &mut self,
        suggestions: Vec<Suggestion>,
        config: &ClubConfig,
    ) -> Result<(), RoundError> {
        if !self.current_round.suggestions.is_empty() {
            return Err(RoundError::SuggestionsAlreadySubmitted);
        }
        let expected = config.required_suggestions();
        if suggestions.len() != expected {
            return Err(RoundError::WrongSuggestionCount {
                expected,
                actual: suggestions.len(),
            });
        }
        self.current_round.suggestions = suggestions;
        Ok(())
    }

    /// Replaces the member's whole ranking submission.
    pub fn record_vote(&mut self, member: String, rankings: Rankings) -> Result<(), RoundError> {
        if self.current_round.is_voting_closed {
            return Err(RoundError::VotingClosed);
        }
        self.current_round.votes.insert(member, rankings);
        Ok(())
    }

    /// Scores the votes, stores the winner and closes voting.
    pub fn close_voting(&mut self, config: &ClubConfig) -> Result<Option<Suggestion>, RoundError> {
        let round = &mut self.current_round;
        if round.is_voting_closed {
            return Err(RoundError::VotingAlreadyClosed);
        }
        let scores = tally(&round.votes, config.point_system());
        round.winning_item = pick_winner(&round.suggestions, &scores);
        round.is_voting_closed = true;
        Ok(round.winning_item.clone())
    }

    pub fn mark_completed(&mut self, member: String) {
        self.current_round.completion_status.insert(member, true);
    }

    pub fn mark_discussed(&mut self) {
        self.current_round.is_discussed = true;
    }

    /// Archives the round, hands the pick to the next member and opens a
    /// fresh round. Returns the new picker.
    pub fn advance_round(&mut self, today: NaiveDate) -> Result<String, RoundError> {
        if !self.current_round.is_discussed {
            return Err(RoundError::NotDiscussed);
        }
        let picker = self.current_picker().ok_or(RoundError::NoMembers)?.to_string();

        self.history.push(HistoryEntry {
            winning_item: self.current_round.winning_item.take(),
            picker,
            date_completed: today.format("%Y-%m-%d").to_string(),
        });
        let count = self.members.len();
        self.current_picker_index = (self.current_picker_index % count + 1) % count;
        self.current_round = Round::fresh(&self.members);

        Ok(self.members[self.current_picker_index].clone())
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A suggested item, e.g. `{"title": "...", "author": "..."}`.
pub type Suggestion = BTreeMap<String, String>;

/// One member's ranking submission: suggestion title to rank position.
pub type Rankings = BTreeMap<String, i64>;

pub const SEED_MEMBER: &str = "Member 1";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClubState {
    pub club_name: String,
    pub club_type: String,
    pub members: Vec<String>,
    pub current_picker_index: usize,
    pub current_round: Round,
    pub history: Vec<HistoryEntry>,
}

impl ClubState {
    /// Document written on first start when no state file exists.
    pub fn seed() -> Self {
        let members = vec![SEED_MEMBER.to_string()];
        Self {
            club_name: "The Next Pick".to_string(),
            club_type: "Book Club".to_string(),
            current_round: Round::fresh(&members),
            members,
            ..Self::default()
        }
    }

    pub fn current_picker(&self) -> Option<&str> {
        if self.members.is_empty() {
            return None;
        }
        self.members
            .get(self.current_picker_index % self.members.len())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Round {
    pub suggestions: Vec<Suggestion>,
    pub votes: BTreeMap<String, Rankings>,
    pub is_voting_closed: bool,
    pub winning_item: Option<Suggestion>,
    pub completion_status: BTreeMap<String, bool>,
    pub is_discussed: bool,
}

impl Round {
    /// An open round with every member marked as not yet done.
    pub fn fresh(members: &[String]) -> Self {
        Self {
            completion_status: members.iter().map(|m| (m.clone(), false)).collect(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryEntry {
    pub winning_item: Option<Suggestion>,
    pub picker: String,
    pub date_completed: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub member: String,
    pub rankings: Rankings,
}

#[derive(Debug, Deserialize)]
pub struct CompletionStatusRequest {
    pub member: String,
}

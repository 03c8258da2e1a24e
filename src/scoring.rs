use crate::config::PointSystem;
use crate::models::{Rankings, Suggestion};
use std::collections::BTreeMap;

pub const TITLE_KEY: &str = "title";

/// Sums ranked-choice points per title across every member's rankings.
///
/// Every ranked title gets an entry, even when its rank is worth nothing.
pub fn tally(votes: &BTreeMap<String, Rankings>, points: &PointSystem) -> BTreeMap<String, u32> {
    let mut scores = BTreeMap::new();
    for rankings in votes.values() {
        for (title, rank) in rankings {
            let total: &mut u32 = scores.entry(title.clone()).or_default();
            *total = total.saturating_add(points.points_for(*rank));
        }
    }
    scores
}

/// Picks the suggestion with the highest score.
///
/// Only suggestions somebody ranked are candidates. Ties go to the suggestion
/// submitted first, so the result never depends on map iteration order.
pub fn pick_winner(suggestions: &[Suggestion], scores: &BTreeMap<String, u32>) -> Option<Suggestion> {
    let mut best: Option<(&Suggestion, u32)> = None;
    for suggestion in suggestions {
        let Some(score) = suggestion
            .get(TITLE_KEY)
            .and_then(|title| scores.get(title))
            .copied()
        else {
            continue;
        };
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((suggestion, score));
        }
    }
    best.map(|(suggestion, _)| suggestion.clone())
}

use crate::config::ClubConfig;
use crate::errors::AppError;
use crate::models::{
    ClubState, CompletionStatusRequest, Suggestion, SuggestRequest, VoteRequest,
};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn get_state(State(state): State<AppState>) -> Json<ClubState> {
    Json(state.snapshot().await)
}

pub async fn get_config(State(state): State<AppState>) -> Json<ClubConfig> {
    Json(state.config.as_ref().clone())
}

pub async fn suggest(
    State(state): State<AppState>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(request) = payload?;
    let config = state.config.clone();
    state
        .update(|data| Ok(data.submit_suggestions(request.suggestions, &config)?))
        .await?;

    info!("suggestions submitted");
    Ok("Suggestions submitted successfully.".to_string())
}

pub async fn vote(
    State(state): State<AppState>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(VoteRequest { member, rankings }) = payload?;
    state
        .update(|data| Ok(data.record_vote(member.clone(), rankings)?))
        .await?;

    info!(%member, "vote recorded");
    Ok(format!("Vote from {member} recorded successfully."))
}

pub async fn close_voting(
    State(state): State<AppState>,
) -> Result<Json<Option<Suggestion>>, AppError> {
    let config = state.config.clone();
    let winner = state
        .update(|data| Ok(data.close_voting(&config)?))
        .await?;

    info!(winner = ?winner.as_ref().and_then(|w| w.get("title")), "voting closed");
    Ok(Json(winner))
}

pub async fn completion_status(
    State(state): State<AppState>,
    payload: Result<Json<CompletionStatusRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(CompletionStatusRequest { member }) = payload?;
    state
        .update(|data| {
            data.mark_completed(member.clone());
            Ok(())
        })
        .await?;

    Ok(format!("Completion status for {member} updated."))
}

pub async fn discussed(State(state): State<AppState>) -> Result<String, AppError> {
    state
        .update(|data| {
            data.mark_discussed();
            Ok(())
        })
        .await?;

    Ok("Round marked as discussed.".to_string())
}

pub async fn next_round(State(state): State<AppState>) -> Result<String, AppError> {
    let picker = state
        .update(|data| Ok(data.advance_round(today())?))
        .await?;

    info!(%picker, "new round started");
    Ok(format!("New round started. Picker is now {picker}."))
}

pub async fn reset(
    State(state): State<AppState>,
    payload: Result<Json<ClubState>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(replacement) = payload?;
    state
        .update(|data| {
            *data = replacement;
            Ok(())
        })
        .await?;

    info!("state reset");
    Ok("State has been reset successfully.".to_string())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

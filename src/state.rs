use crate::config::ClubConfig;
use crate::errors::AppError;
use crate::models::ClubState;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub config: Arc<ClubConfig>,
    pub data: Arc<Mutex<ClubState>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, config: ClubConfig, data: ClubState) -> Self {
        Self {
            data_path,
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn snapshot(&self) -> ClubState {
        self.data.lock().await.clone()
    }

    /// Applies `change` to a copy of the document, persists the copy and only
    /// then makes it current. The lock is held throughout, so concurrent
    /// requests are serialized and a rejected change or failed save leaves
    /// memory and disk as they were.
    pub async fn update<T>(
        &self,
        change: impl FnOnce(&mut ClubState) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let output = change(&mut next)?;
        persist_data(&self.data_path, &next).await?;
        *data = next;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::RoundError;

    fn temp_file(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "next_pick_state_{label}_{}_{nanos}.json",
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn update_commits_and_persists() {
        let path = temp_file("commit");
        let state = AppState::new(path.clone(), ClubConfig::default(), ClubState::seed());

        state
            .update(|data| {
                data.mark_discussed();
                Ok(())
            })
            .await
            .unwrap();

        assert!(state.snapshot().await.current_round.is_discussed);
        let on_disk: ClubState = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert!(on_disk.current_round.is_discussed);
    }

    #[tokio::test]
    async fn rejected_change_is_discarded() {
        let path = temp_file("rejected");
        let state = AppState::new(path.clone(), ClubConfig::default(), ClubState::seed());

        let err = state
            .update(|data| {
                data.mark_completed("Member 1".into());
                Err::<(), _>(RoundError::NotDiscussed.into())
            })
            .await
            .unwrap_err();

        assert_eq!(err.status, axum::http::StatusCode::CONFLICT);
        assert_eq!(state.snapshot().await, ClubState::seed());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_state() {
        let path = temp_file("unwritable").join("missing").join("data.json");
        let state = AppState::new(path, ClubConfig::default(), ClubState::seed());

        let err = state
            .update(|data| {
                data.mark_discussed();
                Ok(())
            })
            .await
            .unwrap_err();

        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!state.snapshot().await.current_round.is_discussed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_are_serialized() {
        let path = temp_file("concurrent");
        let state = AppState::new(path.clone(), ClubConfig::default(), ClubState::seed());

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let state = state.clone();
                tokio::spawn(async move {
                    state
                        .update(|data| {
                            Ok(data.record_vote(format!("member-{i}"), Default::default())?)
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let votes = state.snapshot().await.current_round.votes;
        assert_eq!(votes.len(), 16);
        let on_disk: ClubState = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk.current_round.votes, votes);
    }
}

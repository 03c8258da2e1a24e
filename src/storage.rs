use crate::models::ClubState;
use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, info};

/// Reads the state document, writing the seed document if none exists yet.
///
/// A file that exists but does not parse is an error; callers treat it as
/// fatal.
pub async fn load_data(path: &Path) -> io::Result<ClubState> {
    match fs::read(path).await {
        Ok(bytes) => {
            let data = serde_json::from_slice(&bytes).map_err(|err| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("failed to parse {}: {err}", path.display()),
                )
            })?;
            info!("loaded state from {}", path.display());
            Ok(data)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("{} not found, creating default state", path.display());
            let data = ClubState::seed();
            persist_data(path, &data).await?;
            Ok(data)
        }
        Err(err) => Err(err),
    }
}

/// Writes the whole document to a temp file next to `path`, then renames it
/// into place.
pub async fn persist_data(path: &Path, data: &ClubState) -> io::Result<()> {
    let payload = serde_json::to_vec_pretty(data)?;
    let tmp = temp_path(path);
    fs::write(&tmp, payload).await?;
    if let Err(err) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err);
    }
    debug!("state saved to {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("state"));
    name.push(".tmp");
    path.with_file_name(name)
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{self, AppConfig};
use crate::describe::{describe_selection, Report};
use crate::errors::{SelfCheckError, SelfCheckResult};
use crate::host::{HostEvent, HostRequest, Session};
use crate::reviewer::Reviewer;
use crate::scene::snapshot::Snapshot;
use crate::scene::traits::SnapshotScene;

/// Describes the selection stored in a snapshot file.
pub fn describe_snapshot(path: &Path) -> SelfCheckResult<Report> {
    let snapshot = Snapshot::load(path)?;
    Ok(describe_selection(&snapshot.page_name, &snapshot.selection))
}

/// Writes a default `config.toml`, to `path` when given, otherwise to the
/// location `load_config` resolves. Returns the file written.
pub fn init_config(path: Option<&Path>) -> SelfCheckResult<PathBuf> {
    let defaults = AppConfig::default();
    match path {
        Some(path) => {
            config::save_config_to(&defaults, path)?;
            Ok(path.to_path_buf())
        }
        None => config::save_config(&defaults),
    }
}

/// Runs a single analysis over a snapshot file the way the host UI would,
/// returning every event the session posted.
pub async fn review_snapshot(path: &Path, config: &AppConfig) -> SelfCheckResult<Vec<HostEvent>> {
    let scene = Arc::new(SnapshotScene::new(Snapshot::load(path)?));
    let reviewer = Arc::new(Reviewer::from_config(config)?);
    let (session, mut handle) = Session::new(scene, reviewer);
    let task = tokio::spawn(session.run());

    for request in [HostRequest::RunAnalysis, HostRequest::ClosePlugin] {
        handle
            .requests
            .send(request)
            .await
            .map_err(|_| SelfCheckError::Host("session stopped early".into()))?;
    }

    let mut events = Vec::new();
    while let Some(event) = handle.events.recv().await {
        events.push(event);
    }

    task.await
        .map_err(|e| SelfCheckError::Host(format!("session task: {e}")))??;
    Ok(events)
}

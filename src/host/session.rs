use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::describe::{describe_selection, Report};
use crate::errors::{SelfCheckError, SelfCheckResult};
use crate::host::messages::{HostEvent, HostRequest};
use crate::reviewer::{ReviewOutcome, Reviewer};
use crate::scene::traits::SceneSource;

const CHANNEL_CAPACITY: usize = 32;

pub const NOTHING_TO_ANALYZE: &str = "Select at least one element before running an analysis.";

/// Serves one host connection: answers selection requests and runs
/// analyses, strictly one request at a time.
pub struct Session {
    scene: Arc<dyn SceneSource>,
    reviewer: Arc<Reviewer>,
    events: mpsc::Sender<HostEvent>,
    requests: mpsc::Receiver<HostRequest>,
}

/// Host-side ends of a session's channels.
pub struct SessionHandle {
    pub requests: mpsc::Sender<HostRequest>,
    pub events: mpsc::Receiver<HostEvent>,
}

impl Session {
    pub fn new(scene: Arc<dyn SceneSource>, reviewer: Arc<Reviewer>) -> (Self, SessionHandle) {
        let (request_tx, request_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let session = Self {
            scene,
            reviewer,
            events: event_tx,
            requests: request_rx,
        };
        let handle = SessionHandle {
            requests: request_tx,
            events: event_rx,
        };
        (session, handle)
    }

    /// Posts the initial selection, then handles requests until the host
    /// closes the plugin or drops its request sender.
    pub async fn run(mut self) -> SelfCheckResult<()> {
        self.send_selection().await?;

        while let Some(request) = self.requests.recv().await {
            tracing::debug!(?request, "host request");
            match request {
                HostRequest::RequestSelection => self.send_selection().await?,
                HostRequest::RunAnalysis => self.run_analysis().await?,
                HostRequest::ClosePlugin => {
                    tracing::info!("host closed the plugin");
                    break;
                }
            }
        }
        Ok(())
    }

    fn describe(&self) -> Report {
        describe_selection(&self.scene.page_name(), &self.scene.selection())
    }

    async fn emit(&self, event: HostEvent) -> SelfCheckResult<()> {
        self.events
            .send(event)
            .await
            .map_err(|_| SelfCheckError::Host("event channel closed".into()))
    }

    async fn send_selection(&self) -> SelfCheckResult<()> {
        let report = self.describe();
        self.emit(HostEvent::SelectionInfo(report.to_string())).await
    }

    async fn run_analysis(&self) -> SelfCheckResult<()> {
        let text = match self.describe() {
            Report::Empty => {
                return self
                    .emit(HostEvent::AnalysisError(NOTHING_TO_ANALYZE.to_string()))
                    .await;
            }
            Report::Described(text) => text,
        };

        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, report_len = text.len(), "analysis started");
        self.emit(HostEvent::AnalysisLoading(true)).await?;

        let event = match self.reviewer.review(&text).await {
            ReviewOutcome::Verdict(verdict) => HostEvent::AnalysisResult(verdict),
            ReviewOutcome::Unparsed(unparsed) => HostEvent::AnalysisResult(unparsed.to_payload()),
            ReviewOutcome::Failed(failure) => HostEvent::AnalysisError(failure.message()),
        };
        tracing::info!(%run_id, ok = matches!(event, HostEvent::AnalysisResult(_)), "analysis finished");

        // Loading is cleared even if delivering the result failed.
        let delivered = self.emit(event).await;
        self.emit(HostEvent::AnalysisLoading(false)).await?;
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::reviewer::client::Prediction;
    use crate::reviewer::prompt::AnalysisPrompt;
    use crate::reviewer::service::tests::{ok, ScriptedClient};
    use crate::scene::snapshot::Snapshot;
    use crate::scene::traits::SnapshotScene;
    use crate::scene::types::{ElementKind, VisualElement};

    fn start(
        selection: Vec<VisualElement>,
        client: Arc<ScriptedClient>,
    ) -> (tokio::task::JoinHandle<SelfCheckResult<()>>, SessionHandle) {
        let scene = Arc::new(SnapshotScene::new(Snapshot {
            page_name: "Checkout".into(),
            selection,
        }));
        let reviewer = Arc::new(Reviewer::new(client, AnalysisPrompt::builtin(), false).unwrap());
        let (session, handle) = Session::new(scene, reviewer);
        (tokio::spawn(session.run()), handle)
    }

    async fn drain(mut handle: SessionHandle, requests: Vec<HostRequest>) -> Vec<HostEvent> {
        for request in requests {
            // The session may already have shut down after a close request.
            let _ = handle.requests.send(request).await;
        }
        drop(handle.requests);
        let mut events = Vec::new();
        while let Some(event) = handle.events.recv().await {
            events.push(event);
        }
        events
    }

    fn button() -> VisualElement {
        VisualElement::new(ElementKind::Instance, "Pay button", 120.0, 44.0)
    }

    #[tokio::test]
    async fn posts_selection_on_start_and_on_request() {
        let (task, handle) = start(vec![button()], ScriptedClient::new(Vec::new()));
        let events = drain(handle, vec![HostRequest::RequestSelection]).await;
        task.await.unwrap().unwrap();

        assert_eq!(events.len(), 2);
        for event in events {
            let HostEvent::SelectionInfo(text) = event else {
                panic!("expected selection info, got {event:?}");
            };
            assert!(text.contains("=== INSTANCE: Pay button ==="));
            assert!(text.contains("📄 Page: Checkout"));
        }
    }

    #[tokio::test]
    async fn empty_selection_refuses_analysis_without_calling_out() {
        let client = ScriptedClient::new(Vec::new());
        let (task, handle) = start(Vec::new(), client.clone());
        let events = drain(handle, vec![HostRequest::RunAnalysis]).await;
        task.await.unwrap().unwrap();

        assert_eq!(
            events,
            vec![
                HostEvent::SelectionInfo("No elements selected.".into()),
                HostEvent::AnalysisError(NOTHING_TO_ANALYZE.into()),
            ]
        );
        assert!(client.asked().is_empty());
    }

    #[tokio::test]
    async fn analysis_is_bracketed_by_loading_events() {
        let client = ScriptedClient::new(vec![ok(r#"{"text":"```json\n{\"summary\":\"ok\"}\n```"}"#)]);
        let (task, handle) = start(vec![button()], client);
        let events = drain(handle, vec![HostRequest::RunAnalysis, HostRequest::ClosePlugin]).await;
        task.await.unwrap().unwrap();

        assert_eq!(
            &events[1..],
            [
                HostEvent::AnalysisLoading(true),
                HostEvent::AnalysisResult(json!({ "summary": "ok" })),
                HostEvent::AnalysisLoading(false),
            ]
        );
    }

    #[tokio::test]
    async fn failures_become_analysis_errors() {
        let client = ScriptedClient::new(vec![Ok(Prediction {
            status: 502,
            body: "bad gateway".into(),
        })]);
        let (task, handle) = start(vec![button()], client);
        let events = drain(handle, vec![HostRequest::RunAnalysis]).await;
        task.await.unwrap().unwrap();

        let HostEvent::AnalysisError(message) = &events[2] else {
            panic!("expected analysis error, got {:?}", events[2]);
        };
        assert!(message.contains("(502)"));
        assert_eq!(events[3], HostEvent::AnalysisLoading(false));
    }

    #[tokio::test]
    async fn unparsed_answers_are_delivered_as_results() {
        let client = ScriptedClient::new(vec![ok("not json at all")]);
        let (task, handle) = start(vec![button()], client);
        let events = drain(handle, vec![HostRequest::RunAnalysis]).await;
        task.await.unwrap().unwrap();

        let HostEvent::AnalysisResult(payload) = &events[2] else {
            panic!("expected analysis result, got {:?}", events[2]);
        };
        assert_eq!(payload["raw_response"], "not json at all");
    }

    #[tokio::test]
    async fn requests_after_close_are_ignored() {
        let client = ScriptedClient::new(Vec::new());
        let (task, handle) = start(vec![button()], client.clone());
        let events = drain(
            handle,
            vec![HostRequest::ClosePlugin, HostRequest::RunAnalysis],
        )
        .await;
        task.await.unwrap().unwrap();

        assert_eq!(events.len(), 1);
        assert!(client.asked().is_empty());
    }
}

// Dashboard coordinator - Owns the fetch lifecycle and publishes snapshots
use crate::application::dashboard_state::{DashboardState, RequestId};
use crate::application::issue_repository::{FetchError, IssueRepository};
use crate::domain::dashboard::{DashboardSnapshot, Phase};
use crate::domain::issue::Issue;
use crate::domain::viewport::ViewportPolicy;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

const COMMAND_BUFFER: usize = 32;

/// One superseded fetch plus the current one.
const MAX_IN_FLIGHT_FETCHES: usize = 2;

enum Command {
    Activate,
    Refresh,
    SetSelection {
        raw: String,
        reply: oneshot::Sender<Arc<DashboardSnapshot>>,
    },
}

struct FetchCompletion {
    request_id: RequestId,
    result: Result<Vec<Issue>, FetchError>,
}

/// Cloneable access to a running coordinator.
///
/// The coordinator stops, dropping all issue data, once every handle is gone.
#[derive(Clone)]
pub struct DashboardHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Arc<DashboardSnapshot>>,
}

impl DashboardHandle {
    /// Start the initial fetch. Has no effect once the dashboard left `Idle`.
    pub async fn activate(&self) -> anyhow::Result<()> {
        self.send(Command::Activate).await
    }

    /// Start a new fetch cycle, superseding any in-flight one.
    ///
    /// Ignored while a superseded fetch and its replacement are both still running.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        self.send(Command::Refresh).await
    }

    /// Change the category filter and return the resulting snapshot.
    ///
    /// Never triggers a fetch. Unknown categories leave the selection as it was.
    pub async fn set_selection(&self, raw: &str) -> anyhow::Result<Arc<DashboardSnapshot>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::SetSelection {
            raw: raw.to_string(),
            reply,
        })
        .await?;
        rx.await.context("Dashboard coordinator dropped selection reply")
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.snapshots.clone()
    }

    async fn send(&self, command: Command) -> anyhow::Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow::anyhow!("Dashboard coordinator is not running"))
    }
}

/// Single writer of the dashboard snapshot.
///
/// Runs as one task; fetches run in their own tasks and report back over a
/// completion channel tagged with their request id.
pub struct DashboardCoordinator {
    repository: Arc<dyn IssueRepository>,
    state: DashboardState,
    commands: mpsc::Receiver<Command>,
    completions_tx: mpsc::UnboundedSender<FetchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<FetchCompletion>,
    snapshots: watch::Sender<Arc<DashboardSnapshot>>,
    in_flight: usize,
}

impl DashboardCoordinator {
    pub fn spawn(repository: Arc<dyn IssueRepository>, policy: ViewportPolicy) -> DashboardHandle {
        let (commands_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        let mut state = DashboardState::new(policy);
        let (snapshots, snapshots_rx) = watch::channel(Arc::new(state.snapshot()));

        let coordinator = Self {
            repository,
            state,
            commands,
            completions_tx,
            completions_rx,
            snapshots,
            in_flight: 0,
        };
        tokio::spawn(coordinator.run());

        DashboardHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
        }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(completion) = self.completions_rx.recv() => {
                    self.in_flight -= 1;
                    if self.state.complete_fetch(completion.request_id, completion.result) {
                        self.publish();
                    }
                }
            }
        }

        tracing::debug!("Dashboard coordinator stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Activate => {
                if self.state.phase() == Phase::Idle {
                    self.start_fetch();
                } else {
                    tracing::debug!("Dashboard already active, ignoring activation");
                }
            }
            Command::Refresh => {
                if self.in_flight >= MAX_IN_FLIGHT_FETCHES {
                    tracing::debug!(in_flight = self.in_flight, "Fetch limit reached, ignoring refresh");
                } else {
                    self.start_fetch();
                }
            }
            Command::SetSelection { raw, reply } => {
                if self.state.set_selection(&raw) {
                    tracing::debug!(selection = %self.state.selection(), "Selection changed");
                    self.publish();
                }
                let _ = reply.send(self.snapshots.borrow().clone());
            }
        }
    }

    fn start_fetch(&mut self) {
        let request_id = self.state.begin_fetch();
        self.in_flight += 1;
        tracing::debug!(request_id, in_flight = self.in_flight, "Fetching issues");

        let repository = Arc::clone(&self.repository);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = repository.fetch_issues().await;
            let _ = completions.send(FetchCompletion { request_id, result });
        });

        self.publish();
    }

    fn publish(&mut self) {
        self.snapshots.send_replace(Arc::new(self.state.snapshot()));
        tracing::trace!(
            filter_recomputations = self.state.filter_recomputations(),
            "Published dashboard snapshot"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::issue::IssueType;
    use crate::domain::issue::fixtures::issue;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Mutex;

    type Gate = oneshot::Receiver<Result<Vec<Issue>, FetchError>>;

    /// Repository whose responses are released by the test, one gate per call.
    struct GatedRepository {
        gates: Mutex<VecDeque<Gate>>,
        started: mpsc::UnboundedSender<usize>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IssueRepository for GatedRepository {
        async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError> {
            let gate = self.gates.lock().await.pop_front().expect("unexpected fetch");
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.started.send(call);
            gate.await
                .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".to_string())))
        }
    }

    struct Harness {
        handle: DashboardHandle,
        repository: Arc<GatedRepository>,
        releases: VecDeque<oneshot::Sender<Result<Vec<Issue>, FetchError>>>,
        started: mpsc::UnboundedReceiver<usize>,
    }

    fn harness(fetches: usize) -> Harness {
        let mut gates = VecDeque::new();
        let mut releases = VecDeque::new();
        for _ in 0..fetches {
            let (tx, rx) = oneshot::channel();
            gates.push_back(rx);
            releases.push_back(tx);
        }
        let (started_tx, started) = mpsc::unbounded_channel();
        let repository = Arc::new(GatedRepository {
            gates: Mutex::new(gates),
            started: started_tx,
            calls: AtomicUsize::new(0),
        });
        let handle = DashboardCoordinator::spawn(repository.clone(), ViewportPolicy::default());
        Harness {
            handle,
            repository,
            releases,
            started,
        }
    }

    async fn wait_for_phase(handle: &DashboardHandle, phase: Phase) -> Arc<DashboardSnapshot> {
        let mut rx = handle.subscribe();
        let snapshot = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| s.phase == phase))
            .await
            .expect("timed out waiting for phase")
            .expect("coordinator stopped")
            .clone();
        snapshot
    }

    fn ids(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_activation_fetches_once() {
        let mut h = harness(1);
        assert_eq!(h.handle.snapshot().phase, Phase::Idle);

        h.handle.activate().await.unwrap();
        h.handle.activate().await.unwrap();
        h.started.recv().await.unwrap();

        let release = h.releases.pop_front().unwrap();
        release
            .send(Ok(vec![issue("A", IssueType::Road, 1.0, 2.0)]))
            .unwrap();
        let snapshot = wait_for_phase(&h.handle, Phase::Success).await;
        assert_eq!(ids(&snapshot.filtered), vec!["A"]);
        assert_eq!(h.repository.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_selection_never_fetches() {
        let mut h = harness(1);
        h.handle.activate().await.unwrap();
        h.started.recv().await.unwrap();
        h.releases
            .pop_front()
            .unwrap()
            .send(Ok(vec![
                issue("A", IssueType::Road, 1.0, 1.0),
                issue("B", IssueType::Water, 2.0, 2.0),
            ]))
            .unwrap();
        wait_for_phase(&h.handle, Phase::Success).await;

        let snapshot = h.handle.set_selection("water").await.unwrap();
        assert_eq!(ids(&snapshot.filtered), vec!["B"]);
        assert_eq!(snapshot.viewport.center, snapshot.filtered[0].location);

        let snapshot = h.handle.set_selection("bogus").await.unwrap();
        assert_eq!(ids(&snapshot.filtered), vec!["B"]);

        let snapshot = h.handle.set_selection("all").await.unwrap();
        assert_eq!(ids(&snapshot.filtered), vec!["A", "B"]);
        assert_eq!(h.repository.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_error_phase() {
        let mut h = harness(1);
        h.handle.activate().await.unwrap();
        h.started.recv().await.unwrap();
        h.releases
            .pop_front()
            .unwrap()
            .send(Err(FetchError::Transport("operation timed out".to_string())))
            .unwrap();

        let snapshot = wait_for_phase(&h.handle, Phase::Error).await;
        assert!(snapshot.filtered.is_empty());
        assert_eq!(snapshot.error_message.as_deref(), Some("Failed to load issues."));
        assert_eq!(snapshot.viewport, ViewportPolicy::default().overview());
    }

    #[tokio::test]
    async fn test_superseded_fetch_result_is_discarded() {
        let mut h = harness(2);
        h.handle.activate().await.unwrap();
        h.started.recv().await.unwrap();
        h.handle.refresh().await.unwrap();
        h.started.recv().await.unwrap();

        let first = h.releases.pop_front().unwrap();
        let second = h.releases.pop_front().unwrap();

        second
            .send(Ok(vec![issue("new", IssueType::Water, 1.0, 1.0)]))
            .unwrap();
        let snapshot = wait_for_phase(&h.handle, Phase::Success).await;
        assert_eq!(ids(&snapshot.issues), vec!["new"]);

        first
            .send(Ok(vec![issue("old", IssueType::Road, 9.0, 9.0)]))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = h.handle.set_selection("all").await.unwrap();
        assert_eq!(snapshot.phase, Phase::Success);
        assert_eq!(ids(&snapshot.issues), vec!["new"]);
    }

    #[tokio::test]
    async fn test_refresh_ignored_at_fetch_limit() {
        let mut h = harness(3);
        h.handle.activate().await.unwrap();
        h.started.recv().await.unwrap();
        h.handle.refresh().await.unwrap();
        h.started.recv().await.unwrap();

        h.handle.refresh().await.unwrap();
        let extra = tokio::time::timeout(Duration::from_millis(100), h.started.recv()).await;
        assert!(extra.is_err(), "third concurrent fetch should not start");
        assert_eq!(h.repository.calls.load(Ordering::SeqCst), 2);

        // Superseded fetch finishing frees a slot
        h.releases
            .pop_front()
            .unwrap()
            .send(Ok(vec![issue("old", IssueType::Road, 1.0, 1.0)]))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(h.handle.snapshot().phase, Phase::Loading);

        h.handle.refresh().await.unwrap();
        tokio::time::timeout(Duration::from_secs(2), h.started.recv())
            .await
            .expect("refresh should start a fetch once a slot is free")
            .unwrap();
        assert_eq!(h.repository.calls.load(Ordering::SeqCst), 3);

        // Only the latest of the running fetches is applied
        h.releases.pop_front().unwrap().send(Err(FetchError::Status(500))).unwrap();
        h.releases
            .pop_front()
            .unwrap()
            .send(Ok(vec![issue("latest", IssueType::Water, 2.0, 2.0)]))
            .unwrap();
        let snapshot = wait_for_phase(&h.handle, Phase::Success).await;
        assert_eq!(ids(&snapshot.issues), vec!["latest"]);
    }

    #[tokio::test]
    async fn test_coordinator_stops_when_handles_dropped() {
        let h = harness(0);
        let mut rx = h.handle.subscribe();
        drop(h.handle);

        let closed = tokio::time::timeout(Duration::from_secs(2), rx.changed()).await;
        assert!(matches!(closed, Ok(Err(_))));
    }
}

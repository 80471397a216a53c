//! Task action controller
//!
//! Holds the client-side view of the current brief, the streak and whether
//! today's action has been taken. `mark_done` is terminal until the next
//! `load`; `skip` can be repeated and schedules a reload of the next brief.
//!
//! Callers must not start a second `mark_done`/`skip` before the previous one
//! returns. The controller does not serialize overlapping actions.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::client::RequestClient;
use crate::error::ClientError;
use crate::types::{Brief, BriefResponse};

/// Kind of action recorded for the current brief
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionType {
    #[default]
    None,
    Done,
}

impl ActionType {
    fn from_backend(value: Option<&str>) -> Self {
        match value {
            Some("done") => ActionType::Done,
            _ => ActionType::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub action_completed: bool,
    pub action_type: ActionType,
}

/// Controller phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    ActionPending,
    DoneTerminal,
    /// The last load failed; there is no brief to show
    Failed,
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub phase: Phase,
    pub brief: Option<Brief>,
    pub streak: u32,
    pub action: ActionState,
    pub error: Option<String>,
}

impl ControllerState {
    pub fn is_done(&self) -> bool {
        self.action.action_type == ActionType::Done
    }

    /// Actions are offered only for a loaded brief that isn't done
    pub fn can_act(&self) -> bool {
        self.phase == Phase::Loaded && !self.is_done()
    }

    fn apply_brief(&mut self, response: BriefResponse) {
        let user = response.user_state.unwrap_or_default();
        if let Some(streak) = user.streak {
            self.streak = streak;
        }
        self.action = ActionState {
            action_completed: user.action_completed,
            action_type: ActionType::from_backend(user.last_action_type.as_deref()),
        };
        self.brief = Some(response.brief);
        self.phase = if self.is_done() {
            Phase::DoneTerminal
        } else {
            Phase::Loaded
        };
    }
}

/// Result of an action: the streak the caller should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub streak: u32,
    /// False when the action was a no-op because the brief is already done
    pub applied: bool,
}

/// A scheduled reload. `join` is taken by `settle`; `abort` stays so the
/// reload can still be cancelled while someone waits on it.
struct PendingReload {
    abort: AbortHandle,
    join: Option<JoinHandle<()>>,
}

struct Inner {
    client: RequestClient,
    state: RwLock<ControllerState>,
    reload_delay: Duration,
    pending_reload: Mutex<Option<PendingReload>>,
}

impl Inner {
    async fn load(&self) -> Result<(), ClientError> {
        debug!("load: called");
        {
            let mut state = self.state.write().await;
            state.phase = Phase::Loading;
            state.error = None;
        }

        match self.client.get_brief().await {
            Ok(response) => {
                let mut state = self.state.write().await;
                state.apply_brief(response);
                debug!(phase = ?state.phase, streak = state.streak, "load: brief loaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "load: failed to load brief");
                let mut state = self.state.write().await;
                // Action and streak survive so a done brief stays done
                state.brief = None;
                state.error = Some(e.to_string());
                state.phase = Phase::Failed;
                Err(e)
            }
        }
    }
}

/// Owns the brief/streak/action state and applies actions against the backend
///
/// Dropping the controller cancels a pending reload.
pub struct BriefController {
    inner: Arc<Inner>,
}

impl BriefController {
    pub fn new(client: RequestClient, reload_delay: Duration) -> Self {
        debug!(?reload_delay, "BriefController::new: called");
        Self {
            inner: Arc::new(Inner {
                client,
                state: RwLock::new(ControllerState::default()),
                reload_delay,
                pending_reload: Mutex::new(None),
            }),
        }
    }

    /// Current state for rendering
    pub async fn snapshot(&self) -> ControllerState {
        self.inner.state.read().await.clone()
    }

    /// Fetch the current brief and user state
    pub async fn load(&self) -> Result<(), ClientError> {
        self.inner.load().await
    }

    /// Mark the current brief done; a no-op once done
    pub async fn mark_done(&self) -> Result<ActionOutcome, ClientError> {
        debug!("mark_done: called");
        let prior = match self.begin_action().await {
            Ok(prior) => prior,
            Err(outcome) => {
                debug!(streak = outcome.streak, "mark_done: already done, skipping network call");
                return Ok(outcome);
            }
        };

        match self.inner.client.mark_done().await {
            Ok(response) => {
                let mut state = self.inner.state.write().await;
                state.streak = response.streak;
                state.action = ActionState {
                    action_completed: true,
                    action_type: ActionType::Done,
                };
                state.phase = Phase::DoneTerminal;
                info!(streak = response.streak, "Brief marked done");
                Ok(ActionOutcome {
                    streak: response.streak,
                    applied: true,
                })
            }
            Err(e) => {
                self.fail_action(&e, prior).await;
                Err(e)
            }
        }
    }

    /// Skip the current brief and schedule loading the next one
    pub async fn skip(&self) -> Result<ActionOutcome, ClientError> {
        debug!("skip: called");
        let prior = match self.begin_action().await {
            Ok(prior) => prior,
            Err(outcome) => {
                debug!(streak = outcome.streak, "skip: already done, skipping network call");
                return Ok(outcome);
            }
        };

        match self.inner.client.skip().await {
            Ok(response) => {
                {
                    let mut state = self.inner.state.write().await;
                    state.streak = response.streak;
                    state.phase = prior;
                }
                info!(streak = response.streak, "Brief skipped");
                self.schedule_reload().await;
                Ok(ActionOutcome {
                    streak: response.streak,
                    applied: true,
                })
            }
            Err(e) => {
                self.fail_action(&e, prior).await;
                Err(e)
            }
        }
    }

    /// Wait for a scheduled reload to finish, if one is pending
    ///
    /// A `dispose` issued meanwhile still cancels the reload.
    pub async fn settle(&self) {
        let handle = self
            .inner
            .pending_reload
            .lock()
            .await
            .as_mut()
            .and_then(|pending| pending.join.take());
        if let Some(handle) = handle {
            debug!("settle: waiting for pending reload");
            match handle.await {
                Err(e) if !e.is_cancelled() => warn!(error = %e, "settle: reload task failed"),
                _ => {}
            }
        }
    }

    /// Cancel a scheduled reload
    pub async fn dispose(&self) {
        debug!("dispose: called");
        if let Some(pending) = self.inner.pending_reload.lock().await.take() {
            pending.abort.abort();
        }
    }

    /// Enters `ActionPending` and returns the phase to fall back to, or the
    /// no-op outcome when the brief is already done
    async fn begin_action(&self) -> Result<Phase, ActionOutcome> {
        let mut state = self.inner.state.write().await;
        if state.is_done() {
            return Err(ActionOutcome {
                streak: state.streak,
                applied: false,
            });
        }
        let prior = state.phase;
        state.phase = Phase::ActionPending;
        state.error = None;
        Ok(prior)
    }

    async fn fail_action(&self, error: &ClientError, prior: Phase) {
        warn!(error = %error, ?prior, "Action failed");
        let mut state = self.inner.state.write().await;
        state.error = Some(error.to_string());
        state.phase = prior;
    }

    async fn schedule_reload(&self) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let delay = self.inner.reload_delay;
        debug!(?delay, "schedule_reload: called");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match weak.upgrade() {
                // The error is already recorded in controller state
                Some(inner) => {
                    let _ = inner.load().await;
                }
                None => debug!("schedule_reload: controller gone, dropping reload"),
            }
        });

        let next = PendingReload {
            abort: handle.abort_handle(),
            join: Some(handle),
        };
        let mut pending = self.inner.pending_reload.lock().await;
        if let Some(previous) = pending.replace(next) {
            previous.abort.abort();
        }
    }
}

impl Drop for BriefController {
    fn drop(&mut self) {
        if let Some(pending) = self.inner.pending_reload.try_lock().ok().and_then(|mut p| p.take()) {
            pending.abort.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::connection::{ConnectionResolver, ConnectionState, ResolverSettings};
    use crate::transport::mock::MockTransport;
    use crate::transport::{HttpResponse, Method};
    use crate::types::Difficulty;
    use proptest::prelude::*;

    const BRIEF_URL: &str = "https://brief.example.com/api/brief";
    const DONE_URL: &str = "https://brief.example.com/api/action/done";
    const SKIP_URL: &str = "https://brief.example.com/api/action/skip";

    fn controller(mock: &Arc<MockTransport>, reload_delay: Duration) -> BriefController {
        let settings = ResolverSettings {
            mode: Mode::Production,
            configured_address: Some("https://brief.example.com/api".to_string()),
            candidate_host: "localhost".to_string(),
            candidate_ports: vec![],
            api_base_path: "/api".to_string(),
            probe_timeout: Duration::from_millis(100),
        };
        let resolver = Arc::new(ConnectionResolver::new(settings, mock.clone()).unwrap());
        BriefController::new(RequestClient::new(resolver, mock.clone()), reload_delay)
    }

    fn brief(text: &str, difficulty: &str, streak: u32, last_action: Option<&str>) -> serde_json::Value {
        let completed = last_action == Some("done");
        serde_json::json!({
            "brief": {"text": text, "difficulty": difficulty},
            "userState": {"streak": streak, "actionCompleted": completed, "lastActionType": last_action}
        })
    }

    #[tokio::test]
    async fn test_load_then_done_scenario() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .ok_json(Method::Post, DONE_URL, serde_json::json!({"streak": 4}));
        let c = controller(&mock, Duration::from_millis(10));

        c.load().await.unwrap();
        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Loaded);
        assert_eq!(s.streak, 3);
        assert_eq!(s.action.action_type, ActionType::None);
        assert_eq!(s.brief.as_ref().unwrap().difficulty, Difficulty::Hard);
        assert!(s.can_act());

        let outcome = c.mark_done().await.unwrap();
        assert_eq!(outcome, ActionOutcome { streak: 4, applied: true });
        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::DoneTerminal);
        assert_eq!(s.streak, 4);
        assert_eq!(
            s.action,
            ActionState {
                action_completed: true,
                action_type: ActionType::Done
            }
        );

        let outcome = c.mark_done().await.unwrap();
        assert_eq!(outcome, ActionOutcome { streak: 4, applied: false });
        assert_eq!(mock.count(DONE_URL), 1);
    }

    #[tokio::test]
    async fn test_skip_after_done_is_noop() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Walk", "easy", 9, Some("done")));
        let c = controller(&mock, Duration::from_millis(10));

        c.load().await.unwrap();
        assert_eq!(c.snapshot().await.phase, Phase::DoneTerminal);

        let outcome = c.skip().await.unwrap();
        assert_eq!(outcome, ActionOutcome { streak: 9, applied: false });
        assert_eq!(mock.count(SKIP_URL), 0);
        assert_eq!(mock.count(DONE_URL), 0);
    }

    #[tokio::test]
    async fn test_skip_schedules_reload_with_next_brief() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .ok_json(Method::Get, BRIEF_URL, brief("Call a friend", "easy", 3, None))
            .ok_json(Method::Post, SKIP_URL, serde_json::json!({"streak": 3}));
        let c = controller(&mock, Duration::from_millis(10));

        c.load().await.unwrap();
        let outcome = c.skip().await.unwrap();
        assert_eq!(outcome.streak, 3);

        let s = c.snapshot().await;
        assert_eq!(s.action.action_type, ActionType::None);
        assert!(!s.action.action_completed);
        assert_eq!(s.brief.unwrap().text, "Write 500 words");

        c.settle().await;
        let s = c.snapshot().await;
        assert_eq!(s.brief.unwrap().text, "Call a friend");
        assert_eq!(s.phase, Phase::Loaded);
        assert_eq!(mock.count(BRIEF_URL), 2);
    }

    #[tokio::test]
    async fn test_dispose_cancels_pending_reload() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .ok_json(Method::Post, SKIP_URL, serde_json::json!({"streak": 3}));
        let c = controller(&mock, Duration::from_millis(50));

        c.load().await.unwrap();
        c.skip().await.unwrap();
        c.dispose().await;

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(mock.count(BRIEF_URL), 1);
    }

    #[tokio::test]
    async fn test_drop_cancels_pending_reload() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .ok_json(Method::Post, SKIP_URL, serde_json::json!({"streak": 3}));
        let c = controller(&mock, Duration::from_millis(50));

        c.load().await.unwrap();
        c.skip().await.unwrap();
        drop(c);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(mock.count(BRIEF_URL), 1);
    }

    #[tokio::test]
    async fn test_skip_failure_schedules_nothing() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .on(
                Method::Post,
                SKIP_URL,
                Ok(HttpResponse::json(429, serde_json::json!({"error": "Slow down"}))),
            );
        let c = controller(&mock, Duration::from_millis(10));

        c.load().await.unwrap();
        let err = c.skip().await.unwrap_err();
        assert_eq!(err.to_string(), "Slow down");

        let s = c.snapshot().await;
        assert_eq!(s.error.as_deref(), Some("Slow down"));
        assert_eq!(s.phase, Phase::Loaded);
        assert!(c.inner.pending_reload.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_done_failure_returns_to_loaded() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .on(Method::Post, DONE_URL, Ok(HttpResponse::new(500, "")))
            .ok_json(Method::Post, DONE_URL, serde_json::json!({"streak": 4}));
        let c = controller(&mock, Duration::from_millis(10));

        c.load().await.unwrap();
        assert!(c.mark_done().await.is_err());
        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Loaded);
        assert_eq!(s.action.action_type, ActionType::None);
        assert_eq!(s.error.as_deref(), Some("HTTP error! status: 500"));
        assert_eq!(s.streak, 3);

        // Still actionable
        assert_eq!(c.mark_done().await.unwrap().streak, 4);
        assert!(c.snapshot().await.error.is_none());
    }

    #[tokio::test]
    async fn test_load_recovers_after_one_transport_failure() {
        let mock = Arc::new(MockTransport::new());
        mock.refuse(Method::Get, BRIEF_URL)
            .ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None));
        let c = controller(&mock, Duration::from_millis(10));

        c.load().await.unwrap();
        assert_eq!(c.snapshot().await.phase, Phase::Loaded);
        assert_eq!(mock.count(BRIEF_URL), 2);
        assert_eq!(mock.total(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_is_stored() {
        let mock = Arc::new(MockTransport::new());
        mock.refuse(Method::Get, BRIEF_URL);
        let c = controller(&mock, Duration::from_millis(10));

        let err = c.load().await.unwrap_err();
        assert!(err.is_transport());

        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Failed);
        assert!(s.brief.is_none());
        assert_eq!(s.error, Some(err.to_string()));
        assert!(!s.can_act());
        assert_eq!(mock.count(BRIEF_URL), 2);
        assert_eq!(
            c.inner.client.resolver().state().await,
            ConnectionState::default()
        );
    }

    #[tokio::test]
    async fn test_load_without_user_state_resets_action() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Walk", "easy", 5, Some("done")))
            .ok_json(Method::Get, BRIEF_URL, serde_json::json!({"brief": {"text": "Run"}}));
        let c = controller(&mock, Duration::from_millis(10));

        c.load().await.unwrap();
        assert!(c.snapshot().await.is_done());

        c.load().await.unwrap();
        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Loaded);
        assert_eq!(s.action, ActionState::default());
        // Streak is kept when the backend doesn't report one
        assert_eq!(s.streak, 5);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_done_guard() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .refuse(Method::Get, BRIEF_URL)
            .ok_json(Method::Post, DONE_URL, serde_json::json!({"streak": 4}));
        let c = controller(&mock, Duration::from_millis(10));

        c.load().await.unwrap();
        c.mark_done().await.unwrap();
        assert!(c.load().await.unwrap_err().is_transport());

        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Failed);
        assert!(s.brief.is_none());
        assert!(s.is_done());
        assert_eq!(s.streak, 4);

        let outcome = c.mark_done().await.unwrap();
        assert_eq!(outcome, ActionOutcome { streak: 4, applied: false });
        assert_eq!(mock.count(DONE_URL), 1);
    }

    #[tokio::test]
    async fn test_done_failure_without_brief_stays_failed() {
        let mock = Arc::new(MockTransport::new());
        mock.refuse(Method::Get, BRIEF_URL)
            .on(Method::Post, DONE_URL, Ok(HttpResponse::new(500, "")));
        let c = controller(&mock, Duration::from_millis(10));

        assert!(c.load().await.is_err());
        assert!(c.mark_done().await.is_err());

        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Failed);
        assert!(s.brief.is_none());
        assert!(!s.can_act());
        assert_eq!(s.error.as_deref(), Some("HTTP error! status: 500"));
    }

    #[tokio::test]
    async fn test_skip_without_brief_waits_for_reload() {
        let mock = Arc::new(MockTransport::new());
        mock.refuse(Method::Get, BRIEF_URL)
            .refuse(Method::Get, BRIEF_URL)
            .ok_json(Method::Get, BRIEF_URL, brief("Call a friend", "easy", 2, None))
            .ok_json(Method::Post, SKIP_URL, serde_json::json!({"streak": 2}));
        let c = controller(&mock, Duration::from_millis(10));

        assert!(c.load().await.is_err());
        c.skip().await.unwrap();
        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Failed);
        assert!(!s.can_act());

        c.settle().await;
        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Loaded);
        assert_eq!(s.brief.unwrap().text, "Call a friend");
    }

    #[tokio::test]
    async fn test_reload_after_skip_then_done_reflects_done() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .ok_json(Method::Get, BRIEF_URL, brief("Call a friend", "easy", 4, Some("done")))
            .ok_json(Method::Post, SKIP_URL, serde_json::json!({"streak": 3}))
            .ok_json(Method::Post, DONE_URL, serde_json::json!({"streak": 4}));
        let c = controller(&mock, Duration::from_millis(30));

        c.load().await.unwrap();
        c.skip().await.unwrap();
        // Done lands before the scheduled reload fires
        assert!(c.mark_done().await.unwrap().applied);
        assert_eq!(mock.count(BRIEF_URL), 1);

        c.settle().await;
        let s = c.snapshot().await;
        assert_eq!(mock.count(BRIEF_URL), 2);
        assert_eq!(s.phase, Phase::DoneTerminal);
        assert_eq!(s.brief.unwrap().text, "Call a friend");
        assert_eq!(s.streak, 4);

        assert!(!c.mark_done().await.unwrap().applied);
        assert_eq!(mock.count(DONE_URL), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_after_done_keeps_done() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .refuse(Method::Get, BRIEF_URL)
            .ok_json(Method::Post, SKIP_URL, serde_json::json!({"streak": 3}))
            .ok_json(Method::Post, DONE_URL, serde_json::json!({"streak": 4}));
        let c = controller(&mock, Duration::from_millis(30));

        c.load().await.unwrap();
        c.skip().await.unwrap();
        c.mark_done().await.unwrap();

        c.settle().await;
        let s = c.snapshot().await;
        assert_eq!(s.phase, Phase::Failed);
        assert!(s.error.is_some());
        assert!(s.is_done());
        assert_eq!(s.streak, 4);

        assert_eq!(
            c.mark_done().await.unwrap(),
            ActionOutcome { streak: 4, applied: false }
        );
        assert!(!c.skip().await.unwrap().applied);
        assert_eq!(mock.count(DONE_URL), 1);
        assert_eq!(mock.count(SKIP_URL), 1);
    }

    #[tokio::test]
    async fn test_dispose_cancels_reload_while_settling() {
        let mock = Arc::new(MockTransport::new());
        mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 3, None))
            .ok_json(Method::Post, SKIP_URL, serde_json::json!({"streak": 3}));
        let c = controller(&mock, Duration::from_secs(3600));

        c.load().await.unwrap();
        c.skip().await.unwrap();

        let settled = tokio::time::timeout(Duration::from_secs(5), async {
            tokio::join!(c.settle(), async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                c.dispose().await;
            })
        })
        .await;
        assert!(settled.is_ok(), "settle should return once the reload is cancelled");
        assert_eq!(mock.count(BRIEF_URL), 1);
        assert!(c.inner.pending_reload.lock().await.is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_skips_mirror_backend_streak(streaks in prop::collection::vec(0u32..1000, 1..8)) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let mock = Arc::new(MockTransport::new());
                mock.ok_json(Method::Get, BRIEF_URL, brief("Write 500 words", "hard", 0, None));
                for streak in &streaks {
                    mock.ok_json(Method::Post, SKIP_URL, serde_json::json!({"streak": streak}));
                }
                // Long delay keeps reloads from firing mid-sequence
                let c = controller(&mock, Duration::from_secs(3600));
                c.load().await.unwrap();

                for expected in &streaks {
                    let outcome = c.skip().await.unwrap();
                    let s = c.snapshot().await;
                    assert_eq!(outcome.streak, *expected);
                    assert_eq!(s.streak, *expected);
                    assert_eq!(s.action.action_type, ActionType::None);
                    assert!(!s.action.action_completed);
                }
                assert_eq!(mock.count(SKIP_URL), streaks.len());
                c.dispose().await;
            });
        }
    }
}

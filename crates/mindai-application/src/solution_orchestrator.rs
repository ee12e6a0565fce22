//! Solution orchestrator use case.
//!
//! `SolutionOrchestrator` owns the canonical state of the displayed solution
//! and mediates every mutation to it (refine, vote, save). Each action
//! validates its preconditions, calls the generation backend, and on success
//! swaps in the new state and rewrites the durable snapshot in one critical
//! section. Failures leave state untouched and produce exactly one
//! notification.
//!
//! # Concurrency
//!
//! Actions take `&self` and may overlap; the lock is never held across a
//! backend call. A refinement response is validated against the state held
//! when it is applied, so a late response that does not advance the
//! refinement count is rejected instead of overwriting newer state.

use std::sync::Arc;

use mindai_core::error::{ActionError, InitFailure, MindaiError};
use mindai_core::notification::{NotificationSink, Severity};
use mindai_core::solution::{
    RefinementKind, SnapshotStore, SolutionState, SolutionView, Vote, VoteDirection, VotePlan,
    project,
};
use mindai_core::transport::{FeedbackRequest, RefineRequest, SaveRequest, SolutionTransport};
use tokio::sync::RwLock;

const SAVING_LABEL: &str = "Saving...";

/// Result of a successful `vote` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The backend accepted the vote and it is now the recorded judgment.
    Recorded(VoteDirection),
    /// Same direction as before; the judgment was cleared locally.
    Cleared,
    /// The backend accepted the vote, but the solution was replaced while the
    /// request was in flight, so nothing was recorded locally.
    Superseded,
}

/// Result of a successful `save` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Already saved; no request was made.
    AlreadySaved,
    /// The backend saved the solution, but it was replaced by a refinement
    /// while the request was in flight.
    Superseded,
}

/// Holds and mutates the currently displayed solution.
pub struct SolutionOrchestrator {
    state: RwLock<SolutionState>,
    snapshot_store: Arc<dyn SnapshotStore>,
    transport: Arc<dyn SolutionTransport>,
    notifier: Arc<dyn NotificationSink>,
}

impl SolutionOrchestrator {
    /// Starts the orchestrator from the durable snapshot.
    ///
    /// # Returns
    ///
    /// The orchestrator and the initial view.
    ///
    /// # Errors
    ///
    /// `ActionError::Initialization` when no snapshot is stored, it cannot be
    /// read, or it lacks `sessionId`/`problemId`. The caller should send the
    /// user back to problem submission.
    pub async fn initialize(
        snapshot_store: Arc<dyn SnapshotStore>,
        transport: Arc<dyn SolutionTransport>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<(Self, SolutionView), ActionError> {
        let loaded = match snapshot_store.load().await {
            Ok(Some(snapshot)) => SolutionState::from_snapshot(snapshot),
            Ok(None) => Err(ActionError::Initialization(InitFailure::Missing)),
            Err(e) => Err(ActionError::Initialization(InitFailure::Malformed(
                e.to_string(),
            ))),
        };

        let state = match loaded {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = ?err, "Cannot start from stored snapshot");
                notifier.notify(&err.to_string(), Severity::Error);
                return Err(err);
            }
        };

        tracing::info!(
            solution_id = %state.snapshot().solution_id,
            refinement_count = state.snapshot().refinement_count,
            "Solution loaded"
        );

        let view = project(&state, false);
        let orchestrator = Self {
            state: RwLock::new(state),
            snapshot_store,
            transport,
            notifier,
        };
        Ok((orchestrator, view))
    }

    /// Returns the current view.
    pub async fn view(&self) -> SolutionView {
        project(&*self.state.read().await, false)
    }

    /// Returns a copy of the current state.
    pub async fn state(&self) -> SolutionState {
        self.state.read().await.clone()
    }

    /// Requests a regenerated solution.
    ///
    /// On success the new snapshot replaces the current one (vote cleared,
    /// unsaved) and the returned view is flagged for an animated refresh.
    pub async fn refine(&self, kind: RefinementKind) -> Result<SolutionView, ActionError> {
        let request = {
            let state = self.state.read().await;
            if let Err(err) = state.ensure_active() {
                return Err(self.fail(err));
            }
            let snapshot = state.snapshot();
            RefineRequest {
                session_id: snapshot.session_id.clone(),
                problem_id: snapshot.problem_id.clone(),
                refinement_type: kind,
            }
        };

        tracing::debug!(problem_id = %request.problem_id, %kind, "Requesting refinement");
        self.notifier.set_busy(true, Some(kind.loading_message()));
        let response = self.transport.refine(&request).await;
        self.notifier.set_busy(false, None);

        let response =
            response.map_err(|e| self.fail(ActionError::RefinementFailed(e.message)))?;

        let mut state = self.state.write().await;
        let next = state.refined(kind, response).map_err(|e| self.fail(e))?;
        self.snapshot_store
            .store(next.snapshot())
            .await
            .map_err(|e| self.fail(ActionError::RefinementFailed(store_failure(&e))))?;
        *state = next;
        let view = project(&state, true);
        let solution_id = state.snapshot().solution_id.clone();
        drop(state);

        tracing::info!(
            %solution_id,
            refinement_count = view.stats.refinement_count,
            %kind,
            "Refinement applied"
        );
        self.notifier.notify(
            &format!("✨ Solution updated: {}", kind.label()),
            Severity::Success,
        );
        Ok(view)
    }

    /// Records an up/down judgment.
    ///
    /// Voting the recorded direction again clears it locally without a
    /// request.
    pub async fn vote(&self, direction: VoteDirection) -> Result<VoteOutcome, ActionError> {
        let solution_id = {
            let mut state = self.state.write().await;
            match state.plan_vote(direction) {
                VotePlan::ClearLocally => {
                    *state = state.with_vote(Vote::None);
                    tracing::debug!(%direction, "Judgment cleared");
                    return Ok(VoteOutcome::Cleared);
                }
                VotePlan::Submit(_) => state.snapshot().solution_id.clone(),
            }
        };

        let request = FeedbackRequest {
            solution_id: solution_id.clone(),
            vote: direction,
        };
        self.transport
            .submit_feedback(&request)
            .await
            .map_err(|e| self.fail(ActionError::FeedbackFailed(e.message)))?;

        let mut state = self.state.write().await;
        if !state.is_current(&solution_id) {
            drop(state);
            tracing::info!(%solution_id, "Solution replaced while feedback was in flight");
            self.notifier.notify(
                "Feedback recorded for a previous version of this solution.",
                Severity::Info,
            );
            return Ok(VoteOutcome::Superseded);
        }
        *state = state.with_vote(direction.into());
        drop(state);

        tracing::info!(%solution_id, %direction, "Judgment recorded");
        match direction {
            VoteDirection::Up => self
                .notifier
                .notify("Thanks for the positive feedback! 🎉", Severity::Success),
            VoteDirection::Down => self.notifier.notify(
                "Got it. Try one of the refinement options below.",
                Severity::Info,
            ),
        }
        Ok(VoteOutcome::Recorded(direction))
    }

    /// Persists the current solution server-side.
    ///
    /// Once saved, further calls are no-ops until a refinement replaces the
    /// solution.
    pub async fn save(&self) -> Result<SaveOutcome, ActionError> {
        let solution_id = {
            let state = self.state.read().await;
            if state.is_saved() {
                self.notifier.notify("Already saved! ✔️", Severity::Info);
                return Ok(SaveOutcome::AlreadySaved);
            }
            state.snapshot().solution_id.clone()
        };

        let request = SaveRequest {
            solution_id: solution_id.clone(),
        };
        self.notifier.set_busy(true, Some(SAVING_LABEL));
        let result = self.transport.save(&request).await;
        self.notifier.set_busy(false, None);
        result.map_err(|e| self.fail(ActionError::SaveFailed(e.message)))?;

        let mut state = self.state.write().await;
        if !state.is_current(&solution_id) {
            drop(state);
            tracing::info!(%solution_id, "Solution replaced while save was in flight");
            self.notifier.notify(
                "Saved a previous version of this solution.",
                Severity::Info,
            );
            return Ok(SaveOutcome::Superseded);
        }
        *state = state.with_saved();
        drop(state);

        tracing::info!(%solution_id, "Solution saved");
        self.notifier.notify(
            "Your solution and plan have been saved!",
            Severity::Success,
        );
        Ok(SaveOutcome::Saved)
    }

    /// Ends the session: clears the durable snapshot and detaches the state,
    /// so later refinements fail with `SessionExpired`.
    pub async fn end_session(&self) -> Result<(), MindaiError> {
        let mut state = self.state.write().await;
        self.snapshot_store.clear().await?;
        *state = state.expired();
        tracing::info!("Session ended");
        Ok(())
    }

    /// Logs and reports a failure, then hands it back for propagation.
    fn fail(&self, err: ActionError) -> ActionError {
        tracing::warn!(error = ?err, "{}", err);
        self.notifier.notify(&err.to_string(), Severity::Error);
        err
    }
}

fn store_failure(err: &MindaiError) -> String {
    format!("could not store the refined solution ({})", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mindai_core::solution::{Category, RefinementType, SolutionSections, SolutionSnapshot};
    use mindai_core::transport::TransportError;
    use mindai_infrastructure::InMemorySnapshotStore;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn snapshot(count: u32, refinement_type: RefinementType) -> SolutionSnapshot {
        SolutionSnapshot {
            session_id: "session-abcdef123".into(),
            problem_id: "problem-1".into(),
            solution_id: format!("solution-{}", count),
            problem_text: "I keep missing deadlines".into(),
            category: Category::Career,
            refinement_count: count,
            refinement_type,
            sections: SolutionSections {
                interpretation: format!("interpretation v{}", count),
                ..Default::default()
            },
        }
    }

    // Mock transport with scripted refine responses and call counters
    #[derive(Default)]
    struct MockTransport {
        refine_responses: Mutex<VecDeque<Result<SolutionSnapshot, TransportError>>>,
        feedback_result: Mutex<Option<TransportError>>,
        save_result: Mutex<Option<TransportError>>,
        refine_calls: Mutex<Vec<RefineRequest>>,
        feedback_calls: Mutex<Vec<FeedbackRequest>>,
        save_calls: Mutex<Vec<SaveRequest>>,
    }

    impl MockTransport {
        fn push_refine(&self, response: Result<SolutionSnapshot, TransportError>) {
            self.refine_responses.lock().unwrap().push_back(response);
        }

        fn fail_feedback(&self, message: &str) {
            *self.feedback_result.lock().unwrap() = Some(TransportError::new(message));
        }

        fn fail_save(&self, message: &str) {
            *self.save_result.lock().unwrap() = Some(TransportError::new(message));
        }

        fn succeed_save(&self) {
            *self.save_result.lock().unwrap() = None;
        }

        fn refine_count(&self) -> usize {
            self.refine_calls.lock().unwrap().len()
        }

        fn feedback_count(&self) -> usize {
            self.feedback_calls.lock().unwrap().len()
        }

        fn save_count(&self) -> usize {
            self.save_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SolutionTransport for MockTransport {
        async fn refine(&self, request: &RefineRequest) -> Result<SolutionSnapshot, TransportError> {
            self.refine_calls.lock().unwrap().push(request.clone());
            self.refine_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("no scripted response")))
        }

        async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<(), TransportError> {
            self.feedback_calls.lock().unwrap().push(request.clone());
            match self.feedback_result.lock().unwrap().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        async fn save(&self, request: &SaveRequest) -> Result<(), TransportError> {
            self.save_calls.lock().unwrap().push(request.clone());
            match self.save_result.lock().unwrap().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    // Records notifications and busy toggles
    #[derive(Default)]
    struct RecordingSink {
        messages: Mutex<Vec<(String, Severity)>>,
        busy: Mutex<Vec<bool>>,
    }

    impl RecordingSink {
        fn messages(&self) -> Vec<(String, Severity)> {
            self.messages.lock().unwrap().clone()
        }

        fn errors(&self) -> usize {
            self.messages()
                .iter()
                .filter(|(_, severity)| *severity == Severity::Error)
                .count()
        }
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, message: &str, severity: Severity) {
            self.messages
                .lock()
                .unwrap()
                .push((message.to_string(), severity));
        }

        fn set_busy(&self, active: bool, _label: Option<&str>) {
            self.busy.lock().unwrap().push(active);
        }
    }

    struct Fixture {
        orchestrator: SolutionOrchestrator,
        store: Arc<InMemorySnapshotStore>,
        transport: Arc<MockTransport>,
        sink: Arc<RecordingSink>,
    }

    async fn fixture(initial: SolutionSnapshot) -> Fixture {
        let store = Arc::new(InMemorySnapshotStore::with_snapshot(initial));
        let transport = Arc::new(MockTransport::default());
        let sink = Arc::new(RecordingSink::default());
        let (orchestrator, _view) =
            SolutionOrchestrator::initialize(store.clone(), transport.clone(), sink.clone())
                .await
                .unwrap();
        Fixture {
            orchestrator,
            store,
            transport,
            sink,
        }
    }

    #[tokio::test]
    async fn test_initialize_without_snapshot() {
        let store = Arc::new(InMemorySnapshotStore::new());
        let transport = Arc::new(MockTransport::default());
        let sink = Arc::new(RecordingSink::default());

        let result =
            SolutionOrchestrator::initialize(store.clone(), transport.clone(), sink.clone()).await;

        assert!(matches!(
            result,
            Err(ActionError::Initialization(InitFailure::Missing))
        ));
        assert_eq!(sink.errors(), 1);
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(transport.refine_count(), 0);
    }

    #[tokio::test]
    async fn test_initialize_rejects_snapshot_without_ids() {
        let store = Arc::new(InMemorySnapshotStore::with_snapshot(SolutionSnapshot {
            solution_id: "orphan".into(),
            ..Default::default()
        }));
        let sink = Arc::new(RecordingSink::default());

        let result = SolutionOrchestrator::initialize(
            store,
            Arc::new(MockTransport::default()),
            sink.clone(),
        )
        .await;

        assert!(matches!(
            result,
            Err(ActionError::Initialization(InitFailure::Malformed(_)))
        ));
        assert_eq!(sink.errors(), 1);
    }

    #[tokio::test]
    async fn test_initialize_projects_category() {
        let store = Arc::new(InMemorySnapshotStore::with_snapshot(snapshot(
            0,
            RefinementType::Initial,
        )));
        let (_orchestrator, view) = SolutionOrchestrator::initialize(
            store,
            Arc::new(MockTransport::default()),
            Arc::new(RecordingSink::default()),
        )
        .await
        .unwrap();

        assert_eq!(view.category, Category::Career.info());
        assert_eq!(view.stats.last_refined_label, "None");
        assert!(!view.animate);
    }

    #[tokio::test]
    async fn test_refine_success_replaces_state_and_store() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;
        f.orchestrator.vote(VoteDirection::Up).await.unwrap();
        f.orchestrator.save().await.unwrap();
        f.transport
            .push_refine(Ok(snapshot(1, RefinementType::Simpler)));

        let view = f.orchestrator.refine(RefinementKind::Simpler).await.unwrap();

        assert!(view.animate);
        assert_eq!(view.stats.refinement_count, 1);
        assert_eq!(view.vote, Vote::None);
        assert!(!view.saved);
        assert_eq!(
            view.refinement_badge.as_deref(),
            Some("🔄 Refined 1x · Simplified")
        );

        let state = f.orchestrator.state().await;
        assert_eq!(state.snapshot().solution_id, "solution-1");
        assert_eq!(
            f.store.load().await.unwrap().as_ref(),
            Some(state.snapshot())
        );

        let request = f.transport.refine_calls.lock().unwrap()[0].clone();
        assert_eq!(request.session_id, "session-abcdef123");
        assert_eq!(request.problem_id, "problem-1");
        assert_eq!(request.refinement_type, RefinementKind::Simpler);

        assert_eq!(*f.sink.busy.lock().unwrap(), vec![true, false, true, false]);
        assert_eq!(
            f.sink.messages().last().unwrap().0,
            "✨ Solution updated: Simplified"
        );
    }

    #[tokio::test]
    async fn test_refine_failure_leaves_state() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;
        f.transport
            .push_refine(Err(TransportError::with_status(502, "HTTP 502")));
        let before = f.orchestrator.state().await;

        let err = f.orchestrator.refine(RefinementKind::Deeper).await.unwrap_err();

        assert_eq!(err, ActionError::RefinementFailed("HTTP 502".into()));
        assert_eq!(f.orchestrator.state().await, before);
        assert_eq!(f.store.load().await.unwrap().as_ref(), Some(before.snapshot()));
        assert_eq!(f.sink.errors(), 1);
        assert_eq!(f.sink.messages()[0].0, "Failed to refine: HTTP 502");
    }

    // Serves a fixed snapshot but refuses every write
    struct ReadOnlyStore {
        snapshot: SolutionSnapshot,
        writes: Mutex<usize>,
    }

    #[async_trait]
    impl SnapshotStore for ReadOnlyStore {
        async fn load(&self) -> mindai_core::error::Result<Option<SolutionSnapshot>> {
            Ok(Some(self.snapshot.clone()))
        }

        async fn store(&self, _snapshot: &SolutionSnapshot) -> mindai_core::error::Result<()> {
            *self.writes.lock().unwrap() += 1;
            Err(MindaiError::storage("disk full"))
        }

        async fn clear(&self) -> mindai_core::error::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_refine_store_failure_keeps_previous_solution() {
        let store = Arc::new(ReadOnlyStore {
            snapshot: snapshot(0, RefinementType::Initial),
            writes: Mutex::new(0),
        });
        let transport = Arc::new(MockTransport::default());
        let sink = Arc::new(RecordingSink::default());
        let (orchestrator, _) =
            SolutionOrchestrator::initialize(store.clone(), transport.clone(), sink.clone())
                .await
                .unwrap();
        let before = orchestrator.state().await;
        transport.push_refine(Ok(snapshot(1, RefinementType::Refine)));

        let err = orchestrator.refine(RefinementKind::Refine).await.unwrap_err();

        assert!(matches!(err, ActionError::RefinementFailed(_)));
        assert!(err.to_string().contains("disk full"));
        assert_eq!(orchestrator.state().await, before);
        assert_eq!(
            store.load().await.unwrap().unwrap().solution_id,
            "solution-0"
        );
        assert_eq!(*store.writes.lock().unwrap(), 1);
        assert_eq!(sink.errors(), 1);
        assert_eq!(sink.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_refine_rejects_regressed_count() {
        let f = fixture(snapshot(2, RefinementType::Practical)).await;
        f.transport
            .push_refine(Ok(snapshot(2, RefinementType::Practical)));

        let err = f.orchestrator.refine(RefinementKind::Practical).await.unwrap_err();

        assert!(matches!(err, ActionError::Consistency(_)));
        assert_eq!(f.orchestrator.state().await.snapshot().refinement_count, 2);
        assert_eq!(f.store.load().await.unwrap().unwrap().solution_id, "solution-2");
        assert_eq!(f.sink.errors(), 1);
    }

    #[tokio::test]
    async fn test_refine_after_session_end_is_expired() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;
        f.orchestrator.end_session().await.unwrap();

        let err = f.orchestrator.refine(RefinementKind::Refine).await.unwrap_err();

        assert_eq!(err, ActionError::SessionExpired);
        assert_eq!(f.transport.refine_count(), 0);
        assert!(f.store.load().await.unwrap().is_none());
        assert_eq!(
            f.sink.messages()[0].0,
            "Session expired. Please describe your problem again."
        );
    }

    #[tokio::test]
    async fn test_vote_same_direction_toggles_off_locally() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;

        assert_eq!(
            f.orchestrator.vote(VoteDirection::Up).await.unwrap(),
            VoteOutcome::Recorded(VoteDirection::Up)
        );
        assert_eq!(
            f.orchestrator.vote(VoteDirection::Up).await.unwrap(),
            VoteOutcome::Cleared
        );

        assert_eq!(f.transport.feedback_count(), 1);
        assert_eq!(f.orchestrator.state().await.vote(), Vote::None);
    }

    #[tokio::test]
    async fn test_vote_change_direction_calls_backend_each_time() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;

        f.orchestrator.vote(VoteDirection::Up).await.unwrap();
        f.orchestrator.vote(VoteDirection::Down).await.unwrap();

        assert_eq!(f.transport.feedback_count(), 2);
        assert_eq!(f.orchestrator.state().await.vote(), Vote::Down);
        let calls = f.transport.feedback_calls.lock().unwrap().clone();
        assert_eq!(calls[1].vote, VoteDirection::Down);
        assert_eq!(calls[1].solution_id, "solution-0");
    }

    #[tokio::test]
    async fn test_vote_failure_keeps_prior_judgment() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;
        f.orchestrator.vote(VoteDirection::Up).await.unwrap();
        f.transport.fail_feedback("Request failed");

        let err = f.orchestrator.vote(VoteDirection::Down).await.unwrap_err();

        assert_eq!(err, ActionError::FeedbackFailed("Request failed".into()));
        assert_eq!(f.orchestrator.state().await.vote(), Vote::Up);
        assert_eq!(f.sink.errors(), 1);
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;

        assert_eq!(f.orchestrator.save().await.unwrap(), SaveOutcome::Saved);
        assert_eq!(
            f.orchestrator.save().await.unwrap(),
            SaveOutcome::AlreadySaved
        );

        assert_eq!(f.transport.save_count(), 1);
        assert!(f.orchestrator.state().await.is_saved());
        assert_eq!(f.sink.messages().last().unwrap().0, "Already saved! ✔️");
    }

    #[tokio::test]
    async fn test_save_failure_allows_retry() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;
        f.transport.fail_save("HTTP 500");

        let err = f.orchestrator.save().await.unwrap_err();
        assert_eq!(err, ActionError::SaveFailed("HTTP 500".into()));
        assert!(!f.orchestrator.state().await.is_saved());

        f.transport.succeed_save();
        assert_eq!(f.orchestrator.save().await.unwrap(), SaveOutcome::Saved);
        assert_eq!(f.transport.save_count(), 2);
    }

    #[tokio::test]
    async fn test_refinement_count_increases_by_one_per_refinement() {
        let f = fixture(snapshot(0, RefinementType::Initial)).await;
        let kinds = [
            (RefinementKind::Refine, RefinementType::Refine),
            (RefinementKind::Alternative, RefinementType::Alternative),
            (RefinementKind::Deeper, RefinementType::Deeper),
        ];

        for (i, (kind, refinement_type)) in kinds.into_iter().enumerate() {
            f.transport
                .push_refine(Ok(snapshot(i as u32 + 1, refinement_type)));
            let before = f.orchestrator.state().await.snapshot().refinement_count;
            let view = f.orchestrator.refine(kind).await.unwrap();
            assert_eq!(view.stats.refinement_count, before + 1);
        }

        let view = f.orchestrator.view().await;
        assert_eq!(view.stats.last_refined_label, "Deeper Analysis");
        assert!(!view.animate);
    }
}

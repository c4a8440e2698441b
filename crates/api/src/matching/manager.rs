use std::collections::HashMap;
use std::sync::Arc;

use tassign_core::assignment::CommittedAssignment;
use tassign_core::error::CoreError;
use tassign_core::matching::{DraftMatchingState, ReconciledAssignment, ReconciliationCache};
use tassign_core::types::Timestamp;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// State behind one mounted matching view.
pub struct MatchingSession {
    /// Drafts, visibility lists and highlight selection.
    pub state: DraftMatchingState,
    /// Latest committed snapshot pushed by the data layer.
    committed: Arc<Vec<CommittedAssignment>>,
    cache: ReconciliationCache,
    /// When the view was mounted.
    pub mounted_at: Timestamp,
    /// When the committed snapshot was last replaced, if ever.
    pub committed_refreshed_at: Option<Timestamp>,
    /// Last time any request touched this session. Drives idle eviction.
    last_accessed: Timestamp,
}

impl MatchingSession {
    fn new(now: Timestamp) -> Self {
        Self {
            state: DraftMatchingState::new(),
            committed: Arc::new(Vec::new()),
            cache: ReconciliationCache::new(),
            mounted_at: now,
            committed_refreshed_at: None,
            last_accessed: now,
        }
    }

    pub fn committed(&self) -> &Arc<Vec<CommittedAssignment>> {
        &self.committed
    }

    pub fn last_accessed(&self) -> Timestamp {
        self.last_accessed
    }

    /// Swap in a new committed snapshot. The merged view recomputes on the
    /// next read.
    pub fn replace_committed(&mut self, committed: Vec<CommittedAssignment>) {
        self.committed = Arc::new(committed);
        self.committed_refreshed_at = Some(chrono::Utc::now());
    }

    /// Committed assignments merged with the drafts, memoized.
    pub fn reconciled(&mut self) -> Arc<Vec<ReconciledAssignment>> {
        self.cache.get(&self.committed, &self.state)
    }
}

type SessionHandle = Arc<Mutex<MatchingSession>>;

/// Owns every mounted matching session.
///
/// The map lock is held only to look a session up, mount or unmount it.
/// Each session has its own mutex, so work on one view never waits on
/// another, and each operation sees its session whole.
pub struct MatchingSessionManager {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    max_sessions: usize,
}

impl MatchingSessionManager {
    /// Create an empty manager admitting at most `max_sessions` sessions.
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Mount a new matching view. Returns its session id and mount time.
    pub async fn mount(&self) -> Result<(Uuid, Timestamp), CoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(CoreError::Conflict(format!(
                "Matching session limit of {} reached",
                self.max_sessions
            )));
        }

        let id = Uuid::now_v7();
        let now = chrono::Utc::now();
        sessions.insert(id, Arc::new(Mutex::new(MatchingSession::new(now))));
        Ok((id, now))
    }

    /// Unmount a matching view, discarding its drafts.
    pub async fn unmount(&self, id: Uuid) -> Result<(), CoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    /// Run `f` against a session without mutating its draft state.
    pub async fn read<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&MatchingSession) -> T,
    ) -> Result<T, CoreError> {
        let handle = self.handle(id).await?;
        let mut session = handle.lock().await;
        session.last_accessed = chrono::Utc::now();
        Ok(f(&session))
    }

    /// Run `f` against a session with exclusive access to it.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut MatchingSession) -> T,
    ) -> Result<T, CoreError> {
        let handle = self.handle(id).await?;
        let mut session = handle.lock().await;
        session.last_accessed = chrono::Utc::now();
        Ok(f(&mut session))
    }

    /// Unmount every session untouched for longer than `max_idle`.
    ///
    /// Sessions busy with a request are skipped. Returns how many were
    /// evicted.
    pub async fn sweep_idle(&self, max_idle: chrono::Duration) -> usize {
        let cutoff = chrono::Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.last_accessed >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }

    /// Return the current number of mounted sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session. Returns how many were dropped.
    ///
    /// Used during graceful shutdown.
    pub async fn unmount_all(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        count
    }

    async fn handle(&self, id: Uuid) -> Result<SessionHandle, CoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> CoreError {
    CoreError::NotFound {
        entity: "MatchingSession",
        id: id.to_string(),
    }
}

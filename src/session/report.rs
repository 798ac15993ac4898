//! Score reporting to an outside service.
//!
//! The library never talks to the network itself. A host supplies a
//! [`ScoreReporter`]; sessions call it at most once per won game through a
//! [`ScoreDispatch`], and a failure is logged and otherwise ignored. A win
//! always stands whether or not the report got through.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Who is playing locally.
///
/// Only a signed-in player has scores reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerIdentity {
    user_id: Option<String>,
}

impl PlayerIdentity {
    /// Nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// Why a report did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("score service unavailable: {0}")]
    Unavailable(String),

    #[error("score rejected: {0}")]
    Rejected(String),
}

/// Outside collaborator that records points for a user.
pub trait ScoreReporter: Send + Sync {
    fn report_score(&self, user_id: &str, points: u64) -> Result<(), ReportError>;
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopReporter;

impl ScoreReporter for NoopReporter {
    fn report_score(&self, _user_id: &str, _points: u64) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Keeps reports in memory. Can be told to fail, for exercising error paths.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(String, u64)>>,
    failure: Mutex<Option<ReportError>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter whose every call fails with `error`.
    #[must_use]
    pub fn failing(error: ReportError) -> Self {
        let reporter = Self::default();
        reporter.fail_with(Some(error));
        reporter
    }

    pub fn fail_with(&self, error: Option<ReportError>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }

    /// Successful reports so far, oldest first.
    #[must_use]
    pub fn reports(&self) -> Vec<(String, u64)> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ScoreReporter for RecordingReporter {
    fn report_score(&self, user_id: &str, points: u64) -> Result<(), ReportError> {
        if let Some(error) = self.failure.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            return Err(error);
        }
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((user_id.to_owned(), points));
        Ok(())
    }
}

/// What became of a dispatch attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Reported,
    /// This game was already reported.
    AlreadyReported,
    /// Nobody is signed in.
    Anonymous,
    /// The reporter failed; the failure was logged.
    Failed,
}

/// Sends a game's score at most once.
#[derive(Clone)]
pub struct ScoreDispatch {
    identity: PlayerIdentity,
    reporter: Arc<dyn ScoreReporter>,
    sent: bool,
}

impl std::fmt::Debug for ScoreDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreDispatch")
            .field("identity", &self.identity)
            .field("sent", &self.sent)
            .finish_non_exhaustive()
    }
}

impl Default for ScoreDispatch {
    fn default() -> Self {
        Self::new(PlayerIdentity::anonymous(), Arc::new(NoopReporter))
    }
}

impl ScoreDispatch {
    #[must_use]
    pub fn new(identity: PlayerIdentity, reporter: Arc<dyn ScoreReporter>) -> Self {
        Self {
            identity,
            reporter,
            sent: false,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    /// Whether this game has already been dispatched.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// Report `points` for the signed-in player, once per game.
    pub fn dispatch(&mut self, points: u64) -> Dispatch {
        if self.sent {
            return Dispatch::AlreadyReported;
        }
        self.sent = true;

        let Some(user_id) = self.identity.user_id() else {
            tracing::debug!(points, "no signed-in player, score not reported");
            return Dispatch::Anonymous;
        };

        match self.reporter.report_score(user_id, points) {
            Ok(()) => {
                tracing::info!(user_id, points, "score reported");
                Dispatch::Reported
            }
            Err(error) => {
                tracing::warn!(user_id, points, %error, "score report failed");
                Dispatch::Failed
            }
        }
    }

    /// Arm for a new game.
    pub fn reset(&mut self) {
        self.sent = false;
    }
}

//! Apply button state machine and the command layer that feeds it.
//!
//! Display code never talks to the network: it asks [`ApplyButton::begin`]
//! for an [`ApplyCommand`], hands that to an [`ApplyDispatcher`], and feeds
//! the outcome back through [`ApplyButton::finish`].

use async_trait::async_trait;
use thiserror::Error;

use crate::eligibility::{EligibilityResult, Skill};
use crate::error::ApiError;
use crate::models::{ApplyResponse, MissionId, Participation, RequirementsCheck};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyState {
    Ineligible,
    EligibleUnapplied,
    Applying,
    Applied,
    /// Last attempt failed; `message` is shown inline. Retrying is allowed.
    Failed { message: String },
}

/// Pure intent: "apply to mission X".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyCommand {
    pub mission_id: MissionId,
    pub message: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyRejected {
    #[error("missing verified skills: {}", .missing.join(", "))]
    Ineligible { missing: Vec<String> },

    #[error("an application for this mission is already in flight")]
    InFlight,

    #[error("already applied to this mission")]
    AlreadyApplied,
}

#[async_trait]
pub trait ApplyDispatcher: Send + Sync {
    async fn dispatch(&self, command: &ApplyCommand) -> Result<ApplyResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApplyButton {
    mission_id: MissionId,
    state: ApplyState,
    missing: Vec<Skill>,
    participation: Option<Participation>,
}

impl ApplyButton {
    pub fn new(mission_id: MissionId, eligibility: &EligibilityResult) -> Self {
        let state = if eligibility.eligible {
            ApplyState::EligibleUnapplied
        } else {
            ApplyState::Ineligible
        };
        Self {
            mission_id,
            state,
            missing: eligibility.missing.clone(),
            participation: None,
        }
    }

    /// Start from what the backend already knows: an existing application
    /// lands directly in `Applied`.
    pub fn from_requirements(
        mission_id: MissionId,
        eligibility: &EligibilityResult,
        check: &RequirementsCheck,
    ) -> Self {
        let mut button = Self::new(mission_id, eligibility);
        if check.already_applied {
            button.state = ApplyState::Applied;
        }
        button
    }

    pub fn mission_id(&self) -> MissionId {
        self.mission_id
    }

    pub fn state(&self) -> &ApplyState {
        &self.state
    }

    pub fn missing(&self) -> &[Skill] {
        &self.missing
    }

    pub fn participation(&self) -> Option<&Participation> {
        self.participation.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        matches!(
            self.state,
            ApplyState::EligibleUnapplied | ApplyState::Failed { .. }
        )
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ApplyState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Feed a fresh evaluation. In-flight and applied buttons keep their state.
    pub fn reevaluate(&mut self, eligibility: &EligibilityResult) {
        self.missing = eligibility.missing.clone();
        self.state = match (&self.state, eligibility.eligible) {
            (ApplyState::Applying | ApplyState::Applied, _) => return,
            (ApplyState::Ineligible, true) => ApplyState::EligibleUnapplied,
            (ApplyState::EligibleUnapplied | ApplyState::Failed { .. }, false) => {
                ApplyState::Ineligible
            }
            (current, _) => current.clone(),
        };
    }

    pub fn begin(&mut self, message: Option<String>) -> Result<ApplyCommand, ApplyRejected> {
        match self.state {
            ApplyState::Ineligible => {
                return Err(ApplyRejected::Ineligible {
                    missing: self.missing.iter().map(|s| s.name.clone()).collect(),
                })
            }
            ApplyState::Applying => return Err(ApplyRejected::InFlight),
            ApplyState::Applied => return Err(ApplyRejected::AlreadyApplied),
            ApplyState::EligibleUnapplied | ApplyState::Failed { .. } => {}
        }

        self.state = ApplyState::Applying;
        Ok(ApplyCommand {
            mission_id: self.mission_id,
            message,
        })
    }

    pub fn finish(&mut self, outcome: Result<ApplyResponse, ApiError>) -> &ApplyState {
        if self.state != ApplyState::Applying {
            tracing::debug!(
                "ignoring apply outcome for mission {} in state {:?}",
                self.mission_id,
                self.state
            );
            return &self.state;
        }

        self.state = match outcome {
            Ok(response) => {
                self.participation = response.participation;
                ApplyState::Applied
            }
            Err(err) => ApplyState::Failed {
                message: err.to_string(),
            },
        };
        &self.state
    }

    /// Run one full attempt: begin, dispatch, finish.
    pub async fn apply<D>(
        &mut self,
        dispatcher: &D,
        message: Option<String>,
    ) -> Result<&ApplyState, ApplyRejected>
    where
        D: ApplyDispatcher + ?Sized,
    {
        let command = self.begin(message)?;
        let outcome = dispatcher.dispatch(&command).await;
        Ok(self.finish(outcome))
    }
}

use serde_json::Value;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{Applicant, ApplicantId, MissionId, StatusDecision, StatusUpdate};

#[derive(Debug, Clone)]
pub struct ApplicantsClient {
    api: ApiClient,
}

impl ApplicantsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, mission: MissionId) -> Result<Vec<Applicant>, ApiError> {
        self.api
            .get_list(&format!("/api/missions/{mission}/applicants/"))
            .await
    }

    /// Accept or reject one applicant. The backend's reply body is not
    /// relied upon; success means the status was stored.
    pub async fn update_status(
        &self,
        mission: MissionId,
        applicant: ApplicantId,
        decision: StatusDecision,
    ) -> Result<(), ApiError> {
        let path = format!("/api/missions/{mission}/applicants/{applicant}/update-status/");
        let _: Value = self
            .api
            .patch(&path, &StatusUpdate { status: decision })
            .await?;
        tracing::info!("applicant {applicant} on mission {mission} marked {decision:?}");
        Ok(())
    }
}

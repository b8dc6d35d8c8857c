use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::apply::{ApplyCommand, ApplyDispatcher};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{ApplyRequest, ApplyResponse, Mission, MissionId, RequirementsCheck};

/// Mission listings, by whose point of view they are fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionList {
    /// Missions owned by the signed-in organization.
    Mine,
    Accepted,
    Completed,
    Following,
}

impl MissionList {
    pub fn path(self) -> &'static str {
        match self {
            Self::Mine => "/api/missions/my-missions/",
            Self::Accepted => "/api/missions/accepted/",
            Self::Completed => "/api/missions/completed/",
            Self::Following => "/api/missions/following/",
        }
    }
}

impl fmt::Display for MissionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Mine => "My missions",
            Self::Accepted => "Accepted missions",
            Self::Completed => "Completed missions",
            Self::Following => "Followed missions",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct MissionsClient {
    api: ApiClient,
}

impl MissionsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, which: MissionList) -> Result<Vec<Mission>, ApiError> {
        self.api.get_list(which.path()).await
    }

    pub async fn get(&self, id: MissionId) -> Result<Mission, ApiError> {
        self.api.get(&format!("/api/missions/{id}/")).await
    }

    pub async fn check_requirements(&self, id: MissionId) -> Result<RequirementsCheck, ApiError> {
        self.api
            .get(&format!("/api/missions/{id}/check-requirements/"))
            .await
    }

    pub async fn apply(
        &self,
        id: MissionId,
        application_message: Option<String>,
    ) -> Result<ApplyResponse, ApiError> {
        let body = ApplyRequest {
            application_message: application_message.filter(|m| !m.trim().is_empty()),
        };
        let path = format!("/api/missions/{id}/apply/");
        // Any 2xx means the application was stored; an unreadable body only
        // costs us the participation record.
        let body: Value = match self.api.post(&path, &body).await {
            Ok(body) => body,
            Err(ApiError::Decode { reason, .. }) => {
                tracing::warn!("{path}: accepted with unreadable body: {reason}");
                Value::Null
            }
            Err(err) => return Err(err),
        };
        let response = ApplyResponse::from_success_body(&path, &body);
        match &response.participation {
            Some(participation) => tracing::info!(
                "applied to mission {id}: participation {} is {}",
                participation.id,
                participation.status
            ),
            None => tracing::info!("applied to mission {id}: {}", response.message),
        }
        Ok(response)
    }
}

#[async_trait]
impl ApplyDispatcher for MissionsClient {
    async fn dispatch(&self, command: &ApplyCommand) -> Result<ApplyResponse, ApiError> {
        self.apply(command.mission_id, command.message.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_paths_match_backend_routes() {
        assert_eq!(MissionList::Mine.path(), "/api/missions/my-missions/");
        assert_eq!(MissionList::Accepted.path(), "/api/missions/accepted/");
        assert_eq!(MissionList::Completed.path(), "/api/missions/completed/");
        assert_eq!(MissionList::Following.path(), "/api/missions/following/");
    }
}

use std::path::Path;

use crate::eligibility::Skill;
use crate::error::ApiError;
use crate::http::{file_form, ApiClient};
use crate::models::{BulkImportResult, SkillSuggestion, VolunteerSkill};

/// File types the bulk importer understands.
pub const BULK_IMPORT_TYPES: &[(&str, &str)] = &[
    ("csv", "text/csv"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("json", "application/json"),
];

#[derive(Debug, Clone)]
pub struct SkillsClient {
    api: ApiClient,
}

impl SkillsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All of the volunteer's skills, verified or pending.
    pub async fn mine(&self) -> Result<Vec<VolunteerSkill>, ApiError> {
        self.api.get_list("/api/volunteer-skills/").await
    }

    /// The volunteer's skill set in the shape the eligibility check takes.
    pub async fn skill_set(&self) -> Result<Vec<Skill>, ApiError> {
        Ok(self.mine().await?.iter().map(Skill::from).collect())
    }

    pub async fn verified(&self) -> Result<Vec<VolunteerSkill>, ApiError> {
        self.api.get_list("/api/volunteer-skills/verified/").await
    }

    pub async fn suggestions(&self) -> Result<Vec<SkillSuggestion>, ApiError> {
        self.api.get_list("/api/volunteer-skills/suggestions/").await
    }

    pub async fn bulk_import(&self, file: &Path) -> Result<BulkImportResult, ApiError> {
        let form = file_form(file, BULK_IMPORT_TYPES).await?;
        let result: BulkImportResult = self
            .api
            .upload("/api/volunteer-skills/bulk_import/", form)
            .await?;
        tracing::info!(
            "bulk import of {}: {} imported, {} failed",
            file.display(),
            result.imported_count,
            result.failed_count
        );
        Ok(result)
    }
}

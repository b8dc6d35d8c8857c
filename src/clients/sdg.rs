use std::path::Path;

use crate::error::ApiError;
use crate::http::{file_form, ApiClient};
use crate::models::SdgImportResult;

const SDG_IMPORT_TYPES: &[(&str, &str)] = &[("xml", "application/xml")];

#[derive(Debug, Clone)]
pub struct SdgClient {
    api: ApiClient,
}

impl SdgClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn import(&self, file: &Path) -> Result<SdgImportResult, ApiError> {
        let form = file_form(file, SDG_IMPORT_TYPES).await?;
        self.api.upload("/api/missions/import-sdgs/", form).await
    }
}

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::CurrentUser;

#[derive(Debug, Clone)]
pub struct AccountsClient {
    api: ApiClient,
}

impl AccountsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn me(&self) -> Result<CurrentUser, ApiError> {
        self.api.get("/api/accounts/me/").await
    }
}

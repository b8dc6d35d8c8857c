pub mod accounts;
pub mod applicants;
pub mod missions;
pub mod sdg;
pub mod skills;

pub use accounts::AccountsClient;
pub use applicants::ApplicantsClient;
pub use missions::{MissionList, MissionsClient};
pub use sdg::SdgClient;
pub use skills::SkillsClient;

use crate::http::ApiClient;

/// One client per backend resource, all sharing the same session.
#[derive(Debug, Clone)]
pub struct Clients {
    pub accounts: AccountsClient,
    pub applicants: ApplicantsClient,
    pub missions: MissionsClient,
    pub sdg: SdgClient,
    pub skills: SkillsClient,
}

impl Clients {
    pub fn new(api: ApiClient) -> Self {
        Self {
            accounts: AccountsClient::new(api.clone()),
            applicants: ApplicantsClient::new(api.clone()),
            missions: MissionsClient::new(api.clone()),
            sdg: SdgClient::new(api.clone()),
            skills: SkillsClient::new(api),
        }
    }
}

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::eligibility::Skill;
use crate::error::ApiError;

pub type MissionId = u64;
pub type ApplicantId = u64;

/// A volunteering opportunity. Unknown backend fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub required_hours: Option<f64>,
    #[serde(default)]
    pub required_skills: Vec<Skill>,
    #[serde(default)]
    pub sdgs: Vec<u8>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// The only statuses an organization may set on an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusDecision {
    Accepted,
    Rejected,
}

impl From<StatusDecision> for ApplicationStatus {
    fn from(decision: StatusDecision) -> Self {
        match decision {
            StatusDecision::Accepted => Self::Accepted,
            StatusDecision::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub id: u64,
    pub mission_id: MissionId,
    pub mission_title: String,
    pub status: ApplicationStatus,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub applied_at: DateTime<Utc>,
}

/// Reply to a successful apply. `participation` is `None` when the backend
/// stored the application but sent a record this client cannot read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub message: String,
    #[serde(default)]
    pub participation: Option<Participation>,
}

impl ApplyResponse {
    /// Read a 2xx apply body. Never fails: the application already exists
    /// server-side, so a malformed record only loses detail.
    pub fn from_success_body(endpoint: &str, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Application submitted")
            .to_string();

        let participation = body.get("participation").and_then(|raw| {
            serde_json::from_value::<Participation>(raw.clone())
                .map_err(|err| {
                    tracing::warn!("{endpoint}: unreadable participation record: {err}");
                })
                .ok()
        });

        Self {
            message,
            participation,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementsSummary {
    pub meets_proficiency: bool,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    pub meets_skills: bool,
    #[serde(default)]
    pub volunteer_proficiency: Option<String>,
    #[serde(default)]
    pub required_proficiency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementsCheck {
    pub requirements_summary: RequirementsSummary,
    #[serde(default)]
    pub already_applied: bool,
    #[serde(default)]
    pub application_status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub user_id: u64,
    pub user_name: String,
    pub user_email: String,
    #[serde(default)]
    pub application_message: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub user_avatar: Option<String>,
}

/// Parse an RFC 3339 timestamp, or a zone-less one taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp {raw:?}")))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: StatusDecision,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerSkill {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(alias = "skill_name")]
    pub name: String,
    #[serde(default, alias = "is_verified")]
    pub verified: bool,
    #[serde(default)]
    pub proficiency: Option<String>,
}

impl From<&VolunteerSkill> for Skill {
    fn from(skill: &VolunteerSkill) -> Self {
        Skill::new(skill.name.clone(), skill.verified)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSuggestion {
    #[serde(alias = "skill_name")]
    pub name: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkImportResult {
    #[serde(default)]
    pub message: Option<String>,
    pub imported_count: u32,
    pub failed_count: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdgImportResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub imported_count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Volunteer,
    Organization,
    Admin,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Volunteer => "volunteer",
            Self::Organization => "organization",
            Self::Admin => "admin",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub user_type: UserType,
}

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

/// Sustainable Development Goal tag, 1 through 17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SdgGoal(u8);

impl SdgGoal {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 17;

    pub fn new(goal: u8) -> Result<Self, ApiError> {
        if (Self::MIN..=Self::MAX).contains(&goal) {
            Ok(Self(goal))
        } else {
            Err(ApiError::InvalidInput(format!(
                "SDG goal must be between {} and {}, got {goal}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl Mission {
    /// SDG tags within range; out-of-range values from the backend are dropped.
    pub fn sdg_goals(&self) -> Vec<SdgGoal> {
        self.sdgs
            .iter()
            .filter_map(|goal| SdgGoal::new(*goal).ok())
            .collect()
    }
}

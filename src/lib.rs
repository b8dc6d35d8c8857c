#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

use clap::Subcommand;
use std::path::PathBuf;

pub mod apply;
pub mod clients;
pub mod commands;
pub mod config;
pub mod decode;
pub mod eligibility;
pub mod error;
pub mod http;
pub mod models;
pub mod session;
pub mod views;

pub use apply::{ApplyButton, ApplyCommand, ApplyDispatcher, ApplyRejected, ApplyState};
pub use eligibility::{evaluate, EligibilityResult, Skill};
pub use error::ApiError;

#[derive(Subcommand, Debug, Clone)]
pub enum MissionCommands {
    /// Missions owned by your organization
    Mine,
    /// Missions you were accepted to
    Accepted,
    /// Missions you completed
    Completed,
    /// Missions you follow
    Following,
    /// Show one mission
    Show { id: u64 },
    /// Ask the backend whether you meet a mission's requirements
    Requirements { id: u64 },
    /// Compare a mission's required skills with your verified skills
    Eligibility { id: u64 },
    /// Apply to a mission if your verified skills allow it
    Apply {
        id: u64,
        /// Optional note sent with the application
        #[arg(short, long)]
        message: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ApplicantCommands {
    /// List applicants for one of your missions
    List { mission: u64 },
    /// Accept an applicant
    Accept { mission: u64, applicant: u64 },
    /// Reject an applicant
    Reject { mission: u64, applicant: u64 },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SkillCommands {
    /// All of your skills, verified or pending
    Mine,
    /// Only your verified skills
    Verified,
    /// Skills the platform suggests you add
    Suggestions,
    /// Bulk import skills from a CSV, XLSX or JSON file
    Import { file: PathBuf },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SdgCommands {
    /// Upload an SDG XML catalogue
    Import { file: PathBuf },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommands {
    /// Store the bearer token used for API calls
    SetToken { token: String },
    /// Forget the stored token
    Clear,
    /// Show whether a token is stored and who it belongs to
    Status,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
}

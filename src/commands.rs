//! CLI command handlers. Each one fetches, hands the data to a view, and
//! prints the result.

use anyhow::{bail, Context, Result};
use console::Term;
use std::future::Future;

use crate::apply::{ApplyButton, ApplyState};
use crate::clients::{Clients, MissionList};
use crate::config::Config;
use crate::eligibility::evaluate;
use crate::models::{Mission, MissionId, StatusDecision, UserType};
use crate::session::SessionStore;
use crate::views::{dashboard, eligibility, missions, skills, ViewState};
use crate::{
    ApplicantCommands, AuthCommands, ConfigCommands, MissionCommands, SdgCommands, SkillCommands,
};

pub async fn handle_dashboard(clients: &Clients) -> Result<()> {
    let user = clients
        .accounts
        .me()
        .await
        .context("failed to resolve the signed-in account")?;

    print!("{}", dashboard::render_header(&user));
    for section in dashboard::sections_for(user.user_type) {
        let title = section.to_string();
        let state = ViewState::from_result(
            while_loading(
                missions::render_missions(&title, &ViewState::Loading),
                clients.missions.list(*section),
            )
            .await,
        );
        println!("{}", missions::render_missions(&title, &state));
    }
    if user.user_type == UserType::Admin {
        print!("{}", dashboard::render_admin_actions());
    }
    Ok(())
}

pub async fn handle_mission_command(command: MissionCommands, clients: &Clients) -> Result<()> {
    match command {
        MissionCommands::Mine => print_list(clients, MissionList::Mine).await,
        MissionCommands::Accepted => print_list(clients, MissionList::Accepted).await,
        MissionCommands::Completed => print_list(clients, MissionList::Completed).await,
        MissionCommands::Following => print_list(clients, MissionList::Following).await,
        MissionCommands::Show { id } => {
            let mission = clients
                .missions
                .get(id)
                .await
                .with_context(|| format!("failed to load mission {id}"))?;
            print!("{}", missions::render_mission_card(&mission));
            Ok(())
        }
        MissionCommands::Requirements { id } => {
            let check = clients
                .missions
                .check_requirements(id)
                .await
                .with_context(|| format!("failed to check requirements for mission {id}"))?;
            print!(
                "{}",
                eligibility::render_requirements(&check.requirements_summary)
            );
            if check.already_applied {
                let status = check
                    .application_status
                    .map_or_else(|| "unknown".to_string(), |s| s.to_string());
                println!("already applied (status: {status})");
            }
            Ok(())
        }
        MissionCommands::Eligibility { id } => {
            let (mission, button) = load_apply_button(clients, id).await?;
            print!("{}", missions::render_mission_card(&mission));
            print!("{}", eligibility::render_apply_panel(&button));
            Ok(())
        }
        MissionCommands::Apply { id, message } => {
            let (_, mut button) = load_apply_button(clients, id).await?;
            let attempt = button.apply(&clients.missions, message).await.map(|_| ());
            if let Err(rejected) = attempt {
                print!("{}", eligibility::render_apply_panel(&button));
                bail!("cannot apply to mission {id}: {rejected}");
            }
            print!("{}", eligibility::render_apply_panel(&button));
            if let ApplyState::Failed { message } = button.state() {
                bail!("application to mission {id} failed: {message}");
            }
            Ok(())
        }
    }
}

async fn print_list(clients: &Clients, which: MissionList) -> Result<()> {
    let title = which.to_string();
    let state = ViewState::from_result(
        while_loading(
            missions::render_missions(&title, &ViewState::Loading),
            clients.missions.list(which),
        )
        .await,
    );
    print!("{}", missions::render_missions(&title, &state));
    Ok(())
}

/// Show `placeholder` on stderr while `fetch` is outstanding, then erase it.
/// Nothing is drawn when stderr is not a terminal.
pub async fn while_loading<T, F>(placeholder: String, fetch: F) -> T
where
    F: Future<Output = T>,
{
    let term = Term::stderr();
    let shown = term.is_term() && term.write_str(&placeholder).is_ok();
    let result = fetch.await;
    if shown {
        let _ = term.clear_last_lines(placeholder.lines().count());
    }
    result
}

/// Evaluate eligibility for a mission and seed the apply button. A failed
/// requirements check only loses the "already applied" hint.
async fn load_apply_button(clients: &Clients, id: MissionId) -> Result<(Mission, ApplyButton)> {
    let mission = clients
        .missions
        .get(id)
        .await
        .with_context(|| format!("failed to load mission {id}"))?;
    let possessed = clients
        .skills
        .skill_set()
        .await
        .context("failed to load your skills")?;

    let result = evaluate(&mission.required_skills, &possessed);
    let button = match clients.missions.check_requirements(id).await {
        Ok(check) => ApplyButton::from_requirements(id, &result, &check),
        Err(err) => {
            tracing::debug!("requirements check for mission {id} unavailable: {err}");
            ApplyButton::new(id, &result)
        }
    };
    Ok((mission, button))
}

pub async fn handle_applicant_command(command: ApplicantCommands, clients: &Clients) -> Result<()> {
    let (mission, applicant, decision) = match command {
        ApplicantCommands::List { mission } => {
            let state = ViewState::from_result(
                while_loading(
                    missions::render_applicants(mission, &ViewState::Loading),
                    clients.applicants.list(mission),
                )
                .await,
            );
            print!("{}", missions::render_applicants(mission, &state));
            return Ok(());
        }
        ApplicantCommands::Accept { mission, applicant } => {
            (mission, applicant, StatusDecision::Accepted)
        }
        ApplicantCommands::Reject { mission, applicant } => {
            (mission, applicant, StatusDecision::Rejected)
        }
    };

    clients
        .applicants
        .update_status(mission, applicant, decision)
        .await
        .with_context(|| format!("failed to update applicant {applicant}"))?;
    println!(
        "  {} Applicant {applicant} {}.",
        console::style("✓").green().bold(),
        crate::models::ApplicationStatus::from(decision)
    );
    Ok(())
}

pub async fn handle_skill_command(command: SkillCommands, clients: &Clients) -> Result<()> {
    match command {
        SkillCommands::Mine => {
            let state = ViewState::from_result(
                while_loading(
                    skills::render_skills("My skills", &ViewState::Loading),
                    clients.skills.mine(),
                )
                .await,
            );
            print!("{}", skills::render_skills("My skills", &state));
        }
        SkillCommands::Verified => {
            let state = ViewState::from_result(
                while_loading(
                    skills::render_skills("Verified skills", &ViewState::Loading),
                    clients.skills.verified(),
                )
                .await,
            );
            print!("{}", skills::render_skills("Verified skills", &state));
        }
        SkillCommands::Suggestions => {
            let state = ViewState::from_result(
                while_loading(
                    skills::render_suggestions(&ViewState::Loading),
                    clients.skills.suggestions(),
                )
                .await,
            );
            print!("{}", skills::render_suggestions(&state));
        }
        SkillCommands::Import { file } => {
            let result = clients
                .skills
                .bulk_import(&file)
                .await
                .with_context(|| format!("bulk import of {} failed", file.display()))?;
            print!("{}", skills::render_import_result(&result));
        }
    }
    Ok(())
}

pub async fn handle_sdg_command(command: SdgCommands, clients: &Clients) -> Result<()> {
    match command {
        SdgCommands::Import { file } => {
            let result = clients
                .sdg
                .import(&file)
                .await
                .with_context(|| format!("SDG import of {} failed", file.display()))?;
            println!(
                "  {} {}",
                console::style("✓").green().bold(),
                result
                    .message
                    .unwrap_or_else(|| "SDG catalogue imported.".to_string())
            );
            if let Some(count) = result.imported_count {
                println!("  {count} goal(s) imported.");
            }
        }
    }
    Ok(())
}

pub async fn handle_auth_command(
    command: AuthCommands,
    store: &SessionStore,
    clients: &Clients,
) -> Result<()> {
    match command {
        AuthCommands::SetToken { token } => {
            store.save_token(&token)?;
            println!(
                "  {} Token saved to {}",
                console::style("✓").green().bold(),
                store.path().display()
            );
        }
        AuthCommands::Clear => {
            store.clear()?;
            println!("  {} Signed out.", console::style("✓").green().bold());
        }
        AuthCommands::Status => {
            if !store.load().is_signed_in() {
                println!("Not signed in. Run `volunteer-hub auth set-token <token>`.");
                return Ok(());
            }
            match clients.accounts.me().await {
                Ok(user) => println!("Signed in as {} ({}).", user.display_name(), user.user_type),
                Err(err) if err.is_unauthorized() => {
                    println!("Stored token was rejected by the server (401).");
                }
                Err(err) => return Err(err).context("failed to resolve the signed-in account"),
            }
        }
    }
    Ok(())
}

pub fn handle_config_command(command: ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            println!("# {}", config.config_path.display());
            print!(
                "{}",
                toml::to_string_pretty(config).context("failed to render config")?
            );
        }
    }
    Ok(())
}

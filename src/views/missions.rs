use std::fmt::Write;

use super::{banner, clip, ViewState};
use crate::models::{Applicant, Mission};

pub fn render_missions(title: &str, state: &ViewState<Vec<Mission>>) -> String {
    let mut out = format!("{}\n", console::style(title).bold());

    let missions = match state {
        ViewState::Loading => {
            out.push_str("Loading missions...\n");
            return out;
        }
        ViewState::Error(message) => {
            out.push_str(&banner(message));
            return out;
        }
        ViewState::Ready(missions) => missions,
    };

    if missions.is_empty() {
        out.push_str("No missions found.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<6} {:<32} {:<20} {:<12} {:<12} {}",
        "ID", "TITLE", "LOCATION", "START", "END", "SKILLS"
    );
    let _ = writeln!(out, "{}", "-".repeat(100));

    for mission in missions {
        let skills: Vec<&str> = mission
            .required_skills
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        let _ = writeln!(
            out,
            "{:<6} {:<32} {:<20} {:<12} {:<12} {}",
            mission.id,
            clip(&mission.title, 32),
            clip(mission.location.as_deref().unwrap_or("-"), 20),
            mission.start_date.as_deref().unwrap_or("-"),
            mission.end_date.as_deref().unwrap_or("-"),
            if skills.is_empty() {
                "-".to_string()
            } else {
                skills.join(", ")
            }
        );
    }

    out
}

/// Card view of a single mission.
pub fn render_mission_card(mission: &Mission) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", console::style(&mission.title).bold(), mission.id);
    if let Some(org) = &mission.organization_name {
        let _ = writeln!(out, "organization: {org}");
    }
    if let Some(description) = &mission.description {
        let _ = writeln!(out, "{description}");
    }
    let _ = writeln!(
        out,
        "when: {} to {}",
        mission.start_date.as_deref().unwrap_or("?"),
        mission.end_date.as_deref().unwrap_or("?")
    );
    if let Some(location) = &mission.location {
        let _ = writeln!(out, "where: {location}");
    }
    if let Some(hours) = mission.required_hours {
        let _ = writeln!(out, "hours: {hours}");
    }
    let goals: Vec<String> = mission
        .sdg_goals()
        .into_iter()
        .map(|goal| format!("SDG {}", goal.number()))
        .collect();
    if !goals.is_empty() {
        let _ = writeln!(out, "goals: {}", goals.join(", "));
    }
    out
}

pub fn render_applicants(mission_id: u64, state: &ViewState<Vec<Applicant>>) -> String {
    let mut out = format!(
        "{}\n",
        console::style(format!("Applicants for mission {mission_id}")).bold()
    );

    let applicants = match state {
        ViewState::Loading => {
            out.push_str("Loading applicants...\n");
            return out;
        }
        ViewState::Error(message) => {
            out.push_str(&banner(message));
            return out;
        }
        ViewState::Ready(applicants) => applicants,
    };

    if applicants.is_empty() {
        out.push_str("No applicants yet.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<6} {:<24} {:<30} {:<10} {:<17} {}",
        "ID", "NAME", "EMAIL", "STATUS", "APPLIED", "MESSAGE"
    );
    let _ = writeln!(out, "{}", "-".repeat(110));

    for applicant in applicants {
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:<30} {:<10} {:<17} {}",
            applicant.id,
            clip(&applicant.user_name, 24),
            clip(&applicant.user_email, 30),
            applicant.status.to_string(),
            applicant.applied_at.format("%Y-%m-%d %H:%M").to_string(),
            clip(applicant.application_message.as_deref().unwrap_or(""), 40)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::Skill;
    use crate::models::ApplicationStatus;
    use chrono::{TimeZone, Utc};

    fn mission() -> Mission {
        Mission {
            id: 12,
            title: "River cleanup".into(),
            description: Some("Pick up litter".into()),
            organization_name: Some("Green Org".into()),
            start_date: Some("2026-05-01".into()),
            end_date: Some("2026-05-02".into()),
            location: Some("Riverside".into()),
            required_hours: Some(4.0),
            required_skills: vec![Skill::pending("Swimming"), Skill::pending("First Aid")],
            sdgs: vec![6, 14],
            status: None,
        }
    }

    #[test]
    fn empty_list_shows_placeholder_without_banner() {
        let text = render_missions("Accepted missions", &ViewState::Ready(vec![]));
        assert!(text.contains("No missions found."));
        assert!(!text.contains('!'));
    }

    #[test]
    fn loading_state_shows_indicator_only() {
        let text = render_missions("Accepted missions", &ViewState::Loading);
        assert!(text.contains("Accepted missions"));
        assert!(text.contains("Loading missions..."));
        assert!(!text.contains("TITLE"));
        assert!(!text.contains("No missions found."));

        let text = render_applicants(12, &ViewState::Loading);
        assert!(text.contains("Loading applicants..."));
        assert!(!text.contains("No applicants yet."));
    }

    #[test]
    fn error_state_shows_banner_only() {
        let text = render_missions(
            "Accepted missions",
            &ViewState::Error("Error 500".into()),
        );
        assert!(text.contains("Error 500"));
        assert!(!text.contains("TITLE"));
    }

    #[test]
    fn table_lists_required_skills() {
        let text = render_missions("Mine", &ViewState::Ready(vec![mission()]));
        assert!(text.contains("River cleanup"));
        assert!(text.contains("Swimming, First Aid"));
    }

    #[test]
    fn card_shows_goals() {
        let text = render_mission_card(&mission());
        assert!(text.contains("Green Org"));
        assert!(text.contains("SDG 6, SDG 14"));
    }

    #[test]
    fn applicants_table() {
        let applicant = Applicant {
            id: 4,
            user_id: 40,
            user_name: "Ada".into(),
            user_email: "ada@example.org".into(),
            application_message: Some("I can help on weekends".into()),
            applied_at: Utc.with_ymd_and_hms(2026, 4, 2, 9, 30, 0).unwrap(),
            status: ApplicationStatus::Pending,
            user_avatar: None,
        };
        let text = render_applicants(12, &ViewState::Ready(vec![applicant]));
        assert!(text.contains("ada@example.org"));
        assert!(text.contains("pending"));
        assert!(text.contains("2026-04-02 09:30"));

        let empty = render_applicants(12, &ViewState::Ready(vec![]));
        assert!(empty.contains("No applicants yet."));
    }
}

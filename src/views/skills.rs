use std::fmt::Write;

use super::{banner, clip, ViewState};
use crate::models::{BulkImportResult, SkillSuggestion, VolunteerSkill};

pub fn render_skills(title: &str, state: &ViewState<Vec<VolunteerSkill>>) -> String {
    let mut out = format!("{}\n", console::style(title).bold());

    let skills = match state {
        ViewState::Loading => {
            out.push_str("Loading skills...\n");
            return out;
        }
        ViewState::Error(message) => {
            out.push_str(&banner(message));
            return out;
        }
        ViewState::Ready(skills) => skills,
    };

    if skills.is_empty() {
        out.push_str("No skills yet.\n");
        return out;
    }

    let _ = writeln!(out, "{:<32} {:<10} {}", "SKILL", "STATUS", "PROFICIENCY");
    let _ = writeln!(out, "{}", "-".repeat(60));
    for skill in skills {
        let status = if skill.verified { "verified" } else { "pending" };
        let _ = writeln!(
            out,
            "{:<32} {:<10} {}",
            clip(&skill.name, 32),
            status,
            skill.proficiency.as_deref().unwrap_or("-")
        );
    }
    out
}

pub fn render_suggestions(state: &ViewState<Vec<SkillSuggestion>>) -> String {
    let mut out = format!("{}\n", console::style("Suggested skills").bold());

    let suggestions = match state {
        ViewState::Loading => {
            out.push_str("Loading suggestions...\n");
            return out;
        }
        ViewState::Error(message) => {
            out.push_str(&banner(message));
            return out;
        }
        ViewState::Ready(suggestions) => suggestions,
    };

    if suggestions.is_empty() {
        out.push_str("No suggestions right now.\n");
        return out;
    }

    for suggestion in suggestions {
        match &suggestion.reason {
            Some(reason) => {
                let _ = writeln!(out, "- {}: {reason}", suggestion.name);
            }
            None => {
                let _ = writeln!(out, "- {}", suggestion.name);
            }
        }
    }
    out
}

pub fn render_import_result(result: &BulkImportResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {} Imported {} skill(s), {} failed.",
        console::style("✓").green().bold(),
        result.imported_count,
        result.failed_count
    );
    for error in &result.errors {
        let _ = writeln!(out, "    - {error}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_verified_and_pending() {
        let skills = vec![
            VolunteerSkill {
                id: Some(1),
                name: "First Aid".into(),
                verified: true,
                proficiency: Some("advanced".into()),
            },
            VolunteerSkill {
                id: Some(2),
                name: "Driving".into(),
                verified: false,
                proficiency: None,
            },
        ];
        let text = render_skills("My skills", &ViewState::Ready(skills));
        assert!(text.contains("verified"));
        assert!(text.contains("pending"));
        assert!(text.contains("advanced"));
    }

    #[test]
    fn loading_states_show_indicator() {
        let text = render_skills("Verified skills", &ViewState::Loading);
        assert!(text.contains("Loading skills..."));
        assert!(!text.contains("No skills yet."));

        let text = render_suggestions(&ViewState::Loading);
        assert!(text.contains("Loading suggestions..."));
    }

    #[test]
    fn suggestions_and_import_summary() {
        let text = render_suggestions(&ViewState::Ready(vec![SkillSuggestion {
            name: "Translation".into(),
            reason: Some("popular in your area".into()),
        }]));
        assert!(text.contains("- Translation: popular in your area"));

        let text = render_import_result(&BulkImportResult {
            message: None,
            imported_count: 3,
            failed_count: 1,
            errors: vec!["row 4: unknown skill".into()],
        });
        assert!(text.contains("Imported 3 skill(s), 1 failed."));
        assert!(text.contains("row 4: unknown skill"));
    }
}

use std::fmt::Write;

use super::banner;
use crate::apply::{ApplyButton, ApplyState};
use crate::models::RequirementsSummary;

/// Eligibility panel: required skills status plus the apply control.
pub fn render_apply_panel(button: &ApplyButton) -> String {
    let mut out = String::new();

    if button.missing().is_empty() {
        let _ = writeln!(
            out,
            "{} All required skills are verified.",
            console::style("✓").green().bold()
        );
    } else {
        let _ = writeln!(
            out,
            "{} Missing verified skills:",
            console::style("✗").red().bold()
        );
        for skill in button.missing() {
            let _ = writeln!(out, "  - {}", skill.name);
        }
    }

    let control = match button.state() {
        ApplyState::Ineligible => "[ Apply ] (disabled until the skills above are verified)",
        ApplyState::EligibleUnapplied => "[ Apply ]",
        ApplyState::Applying => "[ Applying... ]",
        ApplyState::Applied => "[ Applied ]",
        ApplyState::Failed { .. } => "[ Apply ] (retry)",
    };
    let _ = writeln!(out, "{control}");

    if let Some(message) = button.error_message() {
        out.push_str(&banner(message));
    }
    if let Some(participation) = button.participation() {
        let _ = writeln!(
            out,
            "Application #{} is {} (submitted {}).",
            participation.id,
            participation.status,
            participation.applied_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

pub fn render_requirements(summary: &RequirementsSummary) -> String {
    let mut out = String::new();
    let mark = |ok: bool| {
        if ok {
            console::style("yes").green().to_string()
        } else {
            console::style("no").red().to_string()
        }
    };
    let _ = writeln!(out, "meets skills: {}", mark(summary.meets_skills));
    let _ = writeln!(out, "meets proficiency: {}", mark(summary.meets_proficiency));
    if let (Some(have), Some(need)) = (
        summary.volunteer_proficiency.as_deref(),
        summary.required_proficiency.as_deref(),
    ) {
        let _ = writeln!(out, "proficiency: {have} (required {need})");
    }
    if !summary.missing_skills.is_empty() {
        let _ = writeln!(out, "missing: {}", summary.missing_skills.join(", "));
    }
    out
}

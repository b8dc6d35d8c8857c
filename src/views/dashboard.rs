use std::fmt::Write;

use crate::clients::MissionList;
use crate::models::{CurrentUser, UserType};

/// What each role sees on its landing dashboard.
pub fn sections_for(user_type: UserType) -> &'static [MissionList] {
    match user_type {
        UserType::Volunteer => &[
            MissionList::Accepted,
            MissionList::Completed,
            MissionList::Following,
        ],
        UserType::Organization => &[MissionList::Mine],
        UserType::Admin => &[],
    }
}

pub fn render_header(user: &CurrentUser) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} dashboard for {}",
        console::style(capitalize(&user.user_type.to_string())).bold(),
        user.display_name()
    );
    let _ = writeln!(out, "{}", "=".repeat(60));
    out
}

pub fn render_admin_actions() -> String {
    "Admin actions:\n  volunteer-hub sdg import <file.xml>\n  volunteer-hub applicants list <mission>\n"
        .to_string()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

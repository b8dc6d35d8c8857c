//! Terminal rendering. Everything here is pure: data in, text out.

pub mod dashboard;
pub mod eligibility;
pub mod missions;
pub mod skills;

use crate::error::ApiError;

/// Loading/error flags for one fetched view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error(String),
}

impl<T> ViewState<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Error(err.to_string()),
        }
    }

    pub fn error_banner(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

pub(crate) fn banner(message: &str) -> String {
    format!("{} {message}\n", console::style("!").red().bold())
}

/// Clip to `width` characters, marking the cut with an ellipsis.
pub(crate) fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

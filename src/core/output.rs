//! Compact text rendering for CLI surfaces.

use crate::catalog::projects::{Project, ProjectInfo};
use colored::Colorize;

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

fn or_none(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => compact_line(v, 120),
        _ => "-".dimmed().to_string(),
    }
}

pub fn render_project_row(project: &Project) -> String {
    format!(
        "{:>4}  {}\n      description: {}\n      url: {}\n      screenshot: {}",
        project.project_id,
        project.project_name.bold(),
        or_none(project.description.as_deref()),
        or_none(project.url.as_deref()),
        or_none(project.screenshot.as_deref()),
    )
}

pub fn render_project_info(info: &ProjectInfo, skills: &str) -> String {
    let skills = if skills.is_empty() { None } else { Some(skills) };
    format!(
        "{}\n  status: {}\n  description: {}\n  url: {}\n  screenshot: {}\n  skills: {}",
        info.project_name.bold(),
        info.status_name.cyan(),
        or_none(info.description.as_deref()),
        or_none(info.url.as_deref()),
        or_none(info.screenshot.as_deref()),
        or_none(skills),
    )
}

/// `id  name` lines for a reference vocabulary.
pub fn render_vocabulary<'a>(entries: impl IntoIterator<Item = (i64, &'a str)>) -> String {
    entries
        .into_iter()
        .map(|(id, name)| format!("{:>4}  {}", id, name))
        .collect::<Vec<_>>()
        .join("\n")
}

use colored::{ColoredString, Colorize};
use oplat_cloud::InfrastructureStatus;
use std::path::Path;

pub fn colored_status(status: InfrastructureStatus) -> ColoredString {
    match status {
        InfrastructureStatus::Running => status.as_str().green(),
        InfrastructureStatus::Creating => status.as_str().yellow(),
        InfrastructureStatus::Stopped => status.as_str().red(),
        InfrastructureStatus::Unknown => status.as_str().dimmed(),
    }
}

/// Current directory relative display for `path`
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}


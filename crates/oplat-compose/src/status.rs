//! `docker compose ps` output parsing
//!
//! The table is split into rows of columns separated by runs of two or more
//! spaces; the header row is discarded. The state column is the sixth one
//! (`NAME IMAGE COMMAND SERVICE CREATED STATUS ...`), or the last column of a
//! row that has fewer.

use oplat_cloud::InfrastructureStatus;

const STATE_COLUMN: usize = 5;

/// Non-header rows of `ps` output, split into columns
pub fn parse_ps_rows(output: &str) -> Vec<Vec<String>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .map(split_columns)
        .collect()
}

fn split_columns(line: &str) -> Vec<String> {
    let mut columns = Vec::new();
    let mut current = String::new();
    let mut spaces = 0;

    for c in line.trim().chars() {
        if c == ' ' {
            spaces += 1;
            continue;
        }
        if spaces >= 2 {
            columns.push(std::mem::take(&mut current));
        } else if spaces == 1 {
            current.push(' ');
        }
        spaces = 0;
        current.push(c);
    }
    if !current.is_empty() {
        columns.push(current);
    }

    columns
}

fn state_column(row: &[String]) -> String {
    row.get(STATE_COLUMN)
        .or_else(|| row.last())
        .map(|s| s.trim().to_uppercase())
        .unwrap_or_default()
}

/// Derive the stack status from `ps` output
pub fn status_from_ps(output: &str) -> InfrastructureStatus {
    let states: Vec<String> = parse_ps_rows(output)
        .iter()
        .map(|row| state_column(row))
        .collect();

    if states.is_empty() {
        return InfrastructureStatus::Stopped;
    }

    let all = |markers: &[&str]| {
        states
            .iter()
            .all(|state| markers.iter().any(|m| state.ends_with(m)))
    };

    if all(&["(RUNNING)", "(HEALTHY)"]) {
        InfrastructureStatus::Running
    } else if all(&["(PAUSED)", "(STOPPED)"]) {
        InfrastructureStatus::Stopped
    } else if all(&["(STARTING)"]) {
        InfrastructureStatus::Creating
    } else {
        InfrastructureStatus::Unknown
    }
}

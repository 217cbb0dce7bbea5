use chrono::{DateTime, Duration, Local};

use std::io::Write;

use crate::cli::Config;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::identity::IdentityResolver;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The host wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// One metadata column. The name column always follows these and is not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Permissions,
    Links,
    Owner,
    Group,
    Size,
    Modified,
}

type Predicate = fn(&Config) -> bool;

/// Display order, paired with the switch that turns each column on.
const COLUMNS: [(Predicate, Column); 6] = [
    (|c| c.long || c.permissions, Column::Permissions),
    (|c| c.long || c.links, Column::Links),
    (|c| c.long || c.owner, Column::Owner),
    (|c| c.long || c.group, Column::Group),
    (|c| c.long || c.size, Column::Size),
    (|c| c.long || c.modified, Column::Modified),
];

impl Column {
    pub fn selected(config: &Config) -> Vec<Self> {
        COLUMNS
            .iter()
            .filter(|(enabled, _)| enabled(config))
            .map(|&(_, column)| column)
            .collect()
    }

    /// Renders this column's field for `entry`
    pub fn render(
        self,
        entry: &Entry,
        ids: &dyn IdentityResolver,
        now: DateTime<Local>,
    ) -> Result<String> {
        Ok(match self {
            Self::Permissions => entry.get_permissions(),
            Self::Links => entry.get_links(),
            Self::Owner => ids.user_name(entry.uid)?,
            Self::Group => ids.group_name(entry.gid)?,
            Self::Size => entry.get_size(),
            Self::Modified => {
                let modified = entry.get_modified_time().ok_or_else(|| Error::Timestamp {
                    name: entry.name.clone(),
                })?;
                format_time(modified, now)
            }
        })
    }
}

/// Formats a modification time like `Sep 10 14:23`, or `Sep 10  2023` once it
/// is more than a year older than `now`.
pub fn format_time(modified: DateTime<Local>, now: DateTime<Local>) -> String {
    if modified < now - Duration::days(365) {
        modified.format("%b %d  %Y").to_string()
    } else {
        modified.format("%b %d %H:%M").to_string()
    }
}

/// Builds the fields of one output line; the name is always last.
pub fn build_row(
    entry: &Entry,
    columns: &[Column],
    ids: &dyn IdentityResolver,
    now: DateTime<Local>,
) -> Result<Vec<String>> {
    let mut row = columns
        .iter()
        .map(|column| column.render(entry, ids, now))
        .collect::<Result<Vec<_>>>()?;
    row.push(entry.get_name());
    Ok(row)
}

/// Width of every column except the trailing name column. Empty for no rows.
pub fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    (0..first.len().saturating_sub(1))
        .map(|index| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|field| field.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Right-aligns each field to its column width and appends the name as is.
pub fn format_rows(rows: &[Vec<String>]) -> Vec<String> {
    let widths = column_widths(rows);
    rows.iter()
        .map(|row| {
            let Some((name, fields)) = row.split_last() else {
                return String::new();
            };
            fields
                .iter()
                .zip(&widths)
                .map(|(field, &width)| pad_str(field, width))
                .chain(std::iter::once(name.clone()))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

pub fn print_rows(writer: &mut impl Write, rows: &[Vec<String>]) -> Result<()> {
    for line in format_rows(rows) {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

fn pad_str(src: &str, width: usize) -> String {
    format!("{src:>width$}")
}

use serde::{Deserialize, Serialize};

use crate::model::artist::ArtistRecord;
use crate::model::ids::ArtistId;

/// Fixed column order of batch output.
pub const TABLE_COLUMNS: [&str; 4] = ["search_term", "artist_name", "artist_id", "followers_count"];

const ERROR_COLUMN: &str = "error";
const NULL_CELL: &str = "-";

/// One row of batch output. Exactly one is produced per input term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub search_term: String,
    pub artist_name: Option<String>,
    pub artist_id: Option<ArtistId>,
    pub followers_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultRow {
    #[must_use]
    pub fn from_record(search_term: impl Into<String>, record: &ArtistRecord) -> Self {
        Self {
            search_term: search_term.into(),
            artist_name: record.name.clone(),
            artist_id: record.identifier,
            followers_count: record.follower_count,
            error: None,
        }
    }

    /// A row with every artist field null.
    #[must_use]
    pub fn failed(search_term: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            artist_name: None,
            artist_id: None,
            followers_count: None,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.artist_id.is_some()
    }

    fn cells(&self) -> [String; 5] {
        [
            single_line(&self.search_term),
            self.artist_name
                .as_deref()
                .map_or_else(|| NULL_CELL.to_string(), single_line),
            self.artist_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| NULL_CELL.to_string()),
            self.followers_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| NULL_CELL.to_string()),
            self.error.as_deref().map(single_line).unwrap_or_default(),
        ]
    }
}

/// Control characters (newlines, tabs) become spaces so a cell stays on
/// one line.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Render rows as a plain-text table with the fixed batch columns.
///
/// The `error` column is only emitted when at least one row carries an
/// error. Null cells render as `-`; control characters in text cells
/// render as spaces.
pub fn render_table(rows: &[ResultRow]) -> String {
    let show_error = rows.iter().any(|r| r.error.is_some());
    let column_count = if show_error { 5 } else { 4 };

    let header: Vec<String> = TABLE_COLUMNS
        .iter()
        .chain(std::iter::once(&ERROR_COLUMN))
        .take(column_count)
        .map(|c| (*c).to_string())
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells().into_iter().take(column_count).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(&header));
    lines.push(format_line(&separator));
    lines.extend(body.iter().map(|cells| format_line(cells)));
    lines.join("\n")
}

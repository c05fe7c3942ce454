//! CSV loader for batch estimates.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column         | Required | Notes                                         |
//! |----------------|----------|-----------------------------------------------|
//! | `label`        | yes      | Free text shown next to the total             |
//! | `project_type` | yes      | Project type id, e.g. `business`              |
//! | `features`     | no       | `;`-separated feature ids, e.g. `auth;seo`    |
//! | `integrations` | no       | `;`-separated integration ids                 |
//! | `complexity`   | no       | Complexity tier id                            |
//! | `timeline`     | no       | Timeline tier id (legacy calculator only)     |
//! | `maintenance`  | no       | `yes`/`no`, `true`/`false`; empty means no    |
//! | `pages`        | no       | Page count (legacy calculator only)           |
//!
//! Identifiers are not checked here; the estimator rejects unknown ones.
//!
//! ### Example
//!
//! ```csv
//! label,project_type,features,integrations,complexity,maintenance
//! Acme site,business,auth,,simple,no
//! Shop relaunch,ecommerce,payment;seo,crm;email,moderate,yes
//! ```

use std::path::Path;

use quote_core::Selection;
use serde::Deserialize;

use crate::utils::{non_blank, parse_switch, split_ids};

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    project_type: Option<String>,
    features: Option<String>,
    integrations: Option<String>,
    complexity: Option<String>,
    timeline: Option<String>,
    maintenance: Option<String>,
    pages: Option<u32>,
}

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad structure, missing required column, type mismatch, etc.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based; the header is row 0.
    #[error("missing project type on row {row}")]
    MissingProjectType { row: usize },

    #[error("unrecognised maintenance value '{value}' on row {row}")]
    InvalidMaintenance { value: String, row: usize },
}

/// One labelled selection from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub label: String,
    pub selection: Selection,
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchRow, BatchLoadError> {
    let project_type = non_blank(row.project_type.as_deref())
        .ok_or(BatchLoadError::MissingProjectType { row: row_number })?;

    let maintenance = match non_blank(row.maintenance.as_deref()) {
        None => false,
        Some(value) => {
            parse_switch(&value).ok_or(BatchLoadError::InvalidMaintenance {
                value,
                row: row_number,
            })?
        }
    };

    let mut selection = Selection::new();
    selection.project_type = Some(project_type);
    selection.features = split_ids(row.features.as_deref().unwrap_or_default())
        .into_iter()
        .collect();
    selection.integrations = split_ids(row.integrations.as_deref().unwrap_or_default())
        .into_iter()
        .collect();
    selection.complexity = non_blank(row.complexity.as_deref());
    selection.timeline = non_blank(row.timeline.as_deref());
    selection.maintenance = maintenance;
    if let Some(pages) = row.pages {
        selection.pages = pages;
    }

    Ok(BatchRow {
        label: row.label,
        selection,
    })
}

/// Parses CSV text into batch rows, in file order.
pub fn load_from_str(input: &str) -> Result<Vec<BatchRow>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchRow>, BatchLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

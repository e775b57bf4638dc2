use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader as _};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::norm::fold;
use crate::snapshot;

/// Matching rows of one worksheet. The first row of the sheet is treated as
/// the header and repeated here so the caller can render a table.
#[derive(Debug, Clone, Serialize)]
pub struct SheetMatches {
    pub sheet: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Scans every sheet of the workbook for data rows with a cell containing
/// `term` (accent- and case-insensitive). Sheets without hits are omitted.
pub fn search_workbook(path: &Path, term: &str) -> anyhow::Result<Vec<SheetMatches>> {
    let needle = fold(term);
    let snap = snapshot(path)?;
    let mut workbook = open_workbook_auto(snap.path())
        .with_context(|| format!("opening workbook {}", path.display()))?;

    let sheet_names = workbook.sheet_names().to_owned();
    let mut results = Vec::new();

    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("reading sheet {name}"))?;
        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

        let header = match rows.next() {
            Some(header) => header,
            None => continue,
        };
        let hits: Vec<Vec<String>> = rows.filter(|row| row_matches(row, &needle)).collect();
        debug!(sheet = %name, hits = hits.len(), "sheet scanned");
        if !hits.is_empty() {
            results.push(SheetMatches {
                sheet: name,
                header,
                rows: hits,
            });
        }
    }

    Ok(results)
}

fn row_matches(row: &[String], needle: &str) -> bool {
    row.iter().any(|cell| fold(cell).contains(needle))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(v) => v.clone(),
        Data::Float(v) => {
            if v.fract() == 0.0 {
                format!("{}", *v as i64)
            } else {
                v.to_string()
            }
        }
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::Error(v) => format!("Error({v:?})"),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.clone(),
        Data::DurationIso(v) => v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_any_cell_ignoring_accents() {
        let r = row(&["2024-01-05", "Conciliação", "1200"]);
        assert!(row_matches(&r, &fold("conciliacao")));
        assert!(row_matches(&r, &fold("1200")));
        assert!(!row_matches(&r, &fold("pagamento")));
    }

    #[test]
    fn whole_floats_render_without_decimals() {
        assert_eq!(cell_text(&Data::Float(1200.0)), "1200");
        assert_eq!(cell_text(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}

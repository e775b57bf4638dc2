//! Diff between the remote comment thread and the desired line set.
//!
//! The output is already in application order: deletes, then edits, then
//! creates. Matching is by exact text content, never by position, so
//! reordering unchanged lines produces no operations.

use chrono::NaiveDateTime;

use crate::models::{CommentRecord, Operation};
use crate::normalize::{base_text, EDIT_MARKER, SEPARATOR, STAMP_FORMAT};

/// Computes the operations that bring `existing` into agreement with
/// `desired`.
///
/// A record whose text appears verbatim anywhere in `desired` is left alone.
/// A record with no verbatim match is paired with the first not-yet-claimed
/// desired line sharing its base text (an edit, keeping the record's id and
/// creation stamp); with no such pairing it is deleted. Desired lines left
/// unclaimed and absent from `existing` become creates, in input order.
///
/// `now` stamps the edit markers and must be the same instant the desired
/// lines were normalized with.
pub fn plan(existing: &[CommentRecord], desired: &[String], now: NaiveDateTime) -> Vec<Operation> {
    let existing_texts: Vec<&str> = existing.iter().map(|c| c.text.as_str()).collect();

    let stale: Vec<&CommentRecord> = existing
        .iter()
        .filter(|c| !desired.iter().any(|d| *d == c.text))
        .collect();
    let fresh: Vec<&str> = desired
        .iter()
        .map(String::as_str)
        .filter(|d| !existing_texts.contains(d))
        .collect();

    let mut claimed = vec![false; fresh.len()];
    let mut deletes = Vec::new();
    let mut edits = Vec::new();

    for record in stale {
        let base_old = base_text(&record.text);
        let pair = fresh
            .iter()
            .enumerate()
            .find(|(i, line)| !claimed[*i] && base_text(line) == base_old);
        match pair {
            Some((i, line)) => {
                claimed[i] = true;
                edits.push(Operation::Edit {
                    id: record.id.clone(),
                    text: edited_text(&record.text, line, now),
                });
            }
            None => deletes.push(Operation::Delete {
                id: record.id.clone(),
            }),
        }
    }

    let creates = fresh
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(line, _)| Operation::Create {
            text: (*line).to_string(),
        });

    deletes.into_iter().chain(edits).chain(creates).collect()
}

/// Final text of an edit: the original creation stamp, the new base text,
/// and a fresh edit marker. The creation timestamp never changes across
/// edits; only the marker records when the edit happened.
fn edited_text(original: &str, desired: &str, now: NaiveDateTime) -> String {
    let stamp = original
        .split_once('—')
        .map(|(head, _)| head)
        .unwrap_or(original)
        .trim();
    // The desired line carries its own stamp segment; drop it, the edit
    // keeps the original creation stamp.
    let base = base_text(desired);
    let body = base
        .split_once('—')
        .map(|(_, tail)| tail.trim())
        .unwrap_or(base);
    let edited_at = now.format(STAMP_FORMAT);
    format!("{stamp}{SEPARATOR}{body} {EDIT_MARKER} {edited_at})")
}

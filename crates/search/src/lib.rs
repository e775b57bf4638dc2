//! Keyword search over the local Word diary and Excel workbook.
//!
//! Both files live inside a cloud-synced folder and may be held open by the
//! sync client, so every search works on a temporary copy.

mod norm;
mod sheet;
mod word;

pub use norm::fold;
pub use sheet::{search_workbook, SheetMatches};
pub use word::search_document;

use anyhow::Context;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Locations of the searchable source documents.
#[derive(Clone)]
pub struct DocSources {
    pub word_path: PathBuf,
    pub sheet_path: PathBuf,
}

/// Copies the source file somewhere safe to read. The suffix is preserved
/// because the workbook reader picks its parser from the extension.
fn snapshot(path: &Path) -> anyhow::Result<NamedTempFile> {
    let ext = path.extension().and_then(OsStr::to_str).unwrap_or("tmp");
    let tmp = tempfile::Builder::new()
        .prefix("prancheta-")
        .suffix(&format!(".{ext}"))
        .tempfile()?;
    fs::copy(path, tmp.path())
        .with_context(|| format!("copying {} for reading", path.display()))?;
    Ok(tmp)
}

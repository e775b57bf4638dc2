use anyhow::{anyhow, Context};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read as _;
use std::path::Path;
use zip::ZipArchive;

use crate::norm::fold;
use crate::snapshot;

/// Returns the paragraphs of the document containing `term`, matched
/// accent- and case-insensitively.
pub fn search_document(path: &Path, term: &str) -> anyhow::Result<Vec<String>> {
    let needle = fold(term);
    let snap = snapshot(path)?;
    let paragraphs = read_paragraphs(snap.path())
        .with_context(|| format!("reading document {}", path.display()))?;
    Ok(paragraphs
        .into_iter()
        .filter(|p| fold(p).contains(&needle))
        .collect())
}

/// Pulls the paragraph texts out of the `word/document.xml` part of the
/// docx container. Runs inside a paragraph are joined with single spaces.
fn read_paragraphs(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| anyhow!("not a Word document: {e}"))?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"w:p" => {
                depth += 1;
                current.clear();
            }
            Event::End(e) if e.name().as_ref() == b"w:p" => {
                depth = depth.saturating_sub(1);
                let text = current.trim().to_string();
                if !text.is_empty() {
                    paragraphs.push(text);
                }
            }
            Event::Text(e) if depth > 0 => {
                let text = e.unescape()?;
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn fake_docx(body_xml: &str) -> NamedTempFile {
        let tmp = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut zip = ZipWriter::new(tmp.reopen().unwrap());
        zip.start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(body_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
        tmp
    }

    const DOC: &str = r#"<?xml version="1.0"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
          <w:body>
            <w:p><w:r><w:t>Reunião com o banco</w:t></w:r></w:p>
            <w:p><w:r><w:t>Comprar</w:t></w:r><w:r><w:t>leite</w:t></w:r></w:p>
            <w:p></w:p>
          </w:body>
        </w:document>"#;

    #[test]
    fn finds_paragraphs_ignoring_accents() {
        let doc = fake_docx(DOC);
        let hits = search_document(doc.path(), "reuniao").unwrap();
        assert_eq!(hits, vec!["Reunião com o banco".to_string()]);
    }

    #[test]
    fn joins_runs_within_a_paragraph() {
        let doc = fake_docx(DOC);
        let hits = search_document(doc.path(), "comprar leite").unwrap();
        assert_eq!(hits, vec!["Comprar leite".to_string()]);
    }

    #[test]
    fn no_match_is_an_empty_result() {
        let doc = fake_docx(DOC);
        assert!(search_document(doc.path(), "inexistente").unwrap().is_empty());
    }
}

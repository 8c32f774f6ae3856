//! Per-format extraction of files into uniform source documents

use std::path::Path;

use calamine::Reader;

use crate::error::{Error, Result};
use crate::types::{DocumentMetadata, FileType, SourceDocument};

/// Multi-format file extractor
///
/// One recognized extension in, zero or more [`SourceDocument`]s out. PDFs
/// produce one document per page; every other format produces exactly one
/// document for the whole file.
pub struct FileExtractor;

impl FileExtractor {
    /// Extract a file based on its extension
    pub fn extract(path: &Path) -> Result<Vec<SourceDocument>> {
        let file_type = FileType::for_path(path).ok_or_else(|| {
            Error::UnsupportedFileType(path.to_string_lossy().to_string())
        })?;

        match file_type {
            FileType::Pdf => Self::extract_pdf(path),
            FileType::Markdown => Self::extract_markdown(path),
            FileType::Xlsx => Self::extract_xlsx(path),
            FileType::Csv => Self::extract_csv(path),
            FileType::Json => Self::extract_json(path),
        }
    }

    /// Extract a PDF, one document per page
    fn extract_pdf(path: &Path) -> Result<Vec<SourceDocument>> {
        let data = std::fs::read(path)?;

        let pages = match pdf_extract::extract_text_from_mem_by_pages(&data) {
            Ok(pages) => pages,
            Err(err) => {
                tracing::warn!(
                    "pdf-extract failed for {}: {}, trying lopdf fallback",
                    path.display(),
                    err
                );
                Self::extract_pdf_pages_fallback(path, &data)?
            }
        };

        Ok(Self::pdf_pages_to_documents(path, pages))
    }

    /// Fallback per-page PDF text extraction using lopdf directly
    fn extract_pdf_pages_fallback(path: &Path, data: &[u8]) -> Result<Vec<String>> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(path.to_string_lossy(), e.to_string()))?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => pages.push(text),
                Err(err) => {
                    tracing::debug!(
                        "Could not extract text from {} page {}: {}",
                        path.display(),
                        page_number,
                        err
                    );
                    // Keep the page slot so numbering stays 1..N.
                    pages.push(String::new());
                }
            }
        }

        Ok(pages)
    }

    /// Turn extracted page texts into documents with 1-based page numbers
    fn pdf_pages_to_documents(path: &Path, pages: Vec<String>) -> Vec<SourceDocument> {
        pages
            .into_iter()
            .enumerate()
            .map(|(idx, text)| {
                let content = cleanup_pdf_text(&text);
                SourceDocument::new(
                    content,
                    DocumentMetadata::new(path, Some(idx as u32 + 1), FileType::Pdf),
                )
            })
            .collect()
    }

    /// Read Markdown verbatim as a single unpaginated document
    fn extract_markdown(path: &Path) -> Result<Vec<SourceDocument>> {
        let data = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&data).to_string();

        Ok(vec![SourceDocument::new(
            content,
            DocumentMetadata::new(path, None, FileType::Markdown),
        )])
    }

    /// Flatten an Excel workbook into one text document
    fn extract_xlsx(path: &Path) -> Result<Vec<SourceDocument>> {
        let mut workbook = calamine::open_workbook_auto(path)
            .map_err(|e| Error::file_parse(path.to_string_lossy(), e.to_string()))?;

        let mut content = String::new();

        for sheet_name in workbook.sheet_names().to_vec() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| Error::file_parse(path.to_string_lossy(), e.to_string()))?;

            content.push_str(&format!("Sheet: {}\n", sheet_name));

            for row in range.rows() {
                let row_text: Vec<String> = row.iter().map(render_cell).collect();
                if !row_text.iter().all(|s| s.is_empty()) {
                    content.push_str(&row_text.join(" | "));
                    content.push('\n');
                }
            }

            content.push('\n');
        }

        Ok(vec![SourceDocument::new(
            content,
            DocumentMetadata::new(path, Some(1), FileType::Xlsx),
        )])
    }

    /// Flatten a CSV file into one text document
    fn extract_csv(path: &Path) -> Result<Vec<SourceDocument>> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::file_parse(path.to_string_lossy(), e.to_string()))?;
        let mut content = String::new();

        let headers = reader
            .headers()
            .map_err(|e| Error::file_parse(path.to_string_lossy(), e.to_string()))?;
        content.push_str(&headers.iter().collect::<Vec<_>>().join(" | "));
        content.push('\n');

        for result in reader.records() {
            let record =
                result.map_err(|e| Error::file_parse(path.to_string_lossy(), e.to_string()))?;
            content.push_str(&record.iter().collect::<Vec<_>>().join(" | "));
            content.push('\n');
        }

        Ok(vec![SourceDocument::new(
            content,
            DocumentMetadata::new(path, Some(1), FileType::Csv),
        )])
    }

    /// Read a JSON file as literal text, without parsing its structure
    fn extract_json(path: &Path) -> Result<Vec<SourceDocument>> {
        let data = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&data).to_string();

        Ok(vec![SourceDocument::new(
            content,
            DocumentMetadata::new(path, Some(1), FileType::Json),
        )])
    }
}

/// Render one spreadsheet cell as text
fn render_cell(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.clone(),
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => b.to_string(),
        calamine::Data::DateTime(dt) => dt.to_string(),
        _ => String::new(),
    }
}

/// Clean up extracted PDF text: strip null bytes, trim lines, drop blanks
fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn pdf_pages_get_one_based_numbers_in_order() {
        let pages: Vec<String> = (0..4).map(|i| format!("page body {}", i)).collect();
        let docs = FileExtractor::pdf_pages_to_documents(Path::new("/docs/a.pdf"), pages);

        assert_eq!(docs.len(), 4);
        for (idx, doc) in docs.iter().enumerate() {
            assert_eq!(doc.metadata.page, Some(idx as u32 + 1));
            assert_eq!(doc.metadata.source, Path::new("/docs/a.pdf"));
            assert_eq!(doc.metadata.file_type, FileType::Pdf);
            assert_eq!(doc.content, format!("page body {}", idx));
        }
    }

    #[test]
    fn markdown_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.md");
        let body = "# Title\n\nSome *markdown* that stays exactly as written.\n";
        fs::write(&path, body).unwrap();

        let docs = FileExtractor::extract(&path).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, body);
        assert_eq!(docs[0].metadata.page, None);
        assert_eq!(docs[0].metadata.file_type, FileType::Markdown);
    }

    #[test]
    fn csv_rows_are_flattened_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.csv");
        fs::write(&path, "name,qty\napples,3\npears,5\nplums,7\n").unwrap();

        let docs = FileExtractor::extract(&path).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].metadata.page, Some(1));
        assert_eq!(
            docs[0].content,
            "name | qty\napples | 3\npears | 5\nplums | 7\n"
        );
    }

    #[test]
    fn json_is_loaded_as_literal_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.json");
        // Deliberately not valid JSON: content is the literal file text.
        let body = "{\"unterminated\": [1, 2,";
        fs::write(&path, body).unwrap();

        let docs = FileExtractor::extract(&path).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, body);
        assert_eq!(docs[0].metadata.page, Some(1));
    }

    #[test]
    fn unrecognized_extension_is_rejected() {
        let err = FileExtractor::extract(Path::new("/docs/slides.pptx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn cell_rendering_covers_scalar_types() {
        assert_eq!(render_cell(&calamine::Data::Empty), "");
        assert_eq!(render_cell(&calamine::Data::String("hi".to_string())), "hi");
        assert_eq!(render_cell(&calamine::Data::Float(2.5)), "2.5");
        assert_eq!(render_cell(&calamine::Data::Int(9)), "9");
        assert_eq!(render_cell(&calamine::Data::Bool(true)), "true");
    }

    #[test]
    fn pdf_cleanup_strips_nulls_and_blank_lines() {
        let raw = "  heading \0\n\n\n   body line  \n";
        assert_eq!(cleanup_pdf_text(raw), "heading\nbody line");
    }
}

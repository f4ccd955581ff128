//! Writes normalized documents to disk.
//!
//! One pretty-printed JSON document per class, named after its fully-qualified
//! key, plus the table of contents and optionally the search index.
//!
//! Extractor module names are often source paths (`geometry/shapes`), so a
//! key may contain separators. Those become subdirectories of the output
//! directory; empty, `.` and `..` segments are dropped so every document
//! stays inside it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::DocsError;
use crate::toc::table_of_contents;
use crate::walk::Normalization;

/// Default file name of the table of contents.
pub const DEFAULT_TOC_FILE: &str = "modules.json";

/// Writes class documents and indexes into one output directory.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    out_dir: PathBuf,
    toc_file: String,
    search_file: Option<String>,
}

/// What a [`SiteWriter::write`] call produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
    /// Number of class documents among them.
    pub class_documents: usize,
}

impl SiteWriter {
    /// Writer targeting `out_dir` with the default table-of-contents name.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            toc_file: DEFAULT_TOC_FILE.to_string(),
            search_file: None,
        }
    }

    /// Override the table-of-contents file name.
    pub fn toc_file(mut self, name: impl Into<String>) -> Self {
        self.toc_file = name.into();
        self
    }

    /// Also write the search index under this file name.
    pub fn search_file(mut self, name: Option<String>) -> Self {
        self.search_file = name;
        self
    }

    /// Write every document for `normalization`.
    pub fn write(&self, normalization: &Normalization) -> Result<WriteSummary, DocsError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| DocsError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut summary = WriteSummary::default();
        for (key, class) in &normalization.classes {
            let path = class_document_path(&self.out_dir, key);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| DocsError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            write_json(&path, class)?;
            summary.files.push(path);
            summary.class_documents += 1;
        }

        let toc_path = self.out_dir.join(&self.toc_file);
        write_json(&toc_path, &table_of_contents(&normalization.classes))?;
        summary.files.push(toc_path);

        if let Some(search_file) = &self.search_file {
            let search_path = self.out_dir.join(search_file);
            write_json(&search_path, &normalization.search)?;
            summary.files.push(search_path);
        }

        debug!(
            out_dir = %self.out_dir.display(),
            files = summary.files.len(),
            "Site documents written."
        );
        Ok(summary)
    }
}

/// Location of the document for class `key` under `out_dir`.
pub fn class_document_path(out_dir: &Path, key: &str) -> PathBuf {
    let mut path = out_dir.to_path_buf();
    let mut segments = key
        .split(['/', '\\'])
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!("{segment}.json"));
        }
    }
    path
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DocsError> {
    let contents = serde_json::to_string_pretty(value).map_err(|source| DocsError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, contents).map_err(|source| DocsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::input::Document;
    use crate::walk::normalize;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    #[test]
    fn test_class_document_path_nests_module_paths() {
        let out = Path::new("site");
        assert_eq!(class_document_path(out, "Shapes_Circle"), out.join("Shapes_Circle.json"));
        assert_eq!(
            class_document_path(out, "geometry/shapes_Circle"),
            out.join("geometry").join("shapes_Circle.json")
        );
        assert_eq!(
            class_document_path(out, "../../etc/x_Y"),
            out.join("etc").join("x_Y.json")
        );
        assert_eq!(
            class_document_path(out, "/abs\\dir/m_C"),
            out.join("abs").join("dir").join("m_C.json")
        );
    }

    #[test]
    fn test_slashed_module_name_is_written() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        let document = Document::from_value(json!({
            "children": [{
                "name": "\"geometry/shapes\"",
                "kindString": "Module",
                "children": [{"name": "Circle", "kindString": "Class"}],
            }],
        }))
        .unwrap();

        let summary = SiteWriter::new(&site).write(&normalize(&document)).unwrap();

        let circle = site.join("geometry").join("shapes_Circle.json");
        assert_eq!(summary.class_documents, 1);
        assert_eq!(summary.files[0], circle);
        let record: Value = serde_json::from_str(&fs::read_to_string(circle).unwrap()).unwrap();
        assert_eq!(record["name"], json!("Circle"));
        let toc: Value =
            serde_json::from_str(&fs::read_to_string(site.join("modules.json")).unwrap()).unwrap();
        assert_eq!(toc, json!({"geometry/shapes": ["Circle"]}));
    }
}

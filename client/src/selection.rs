//! File selection set with validation at the door.
//!
//! [`FileSelection`] is an owned, explicitly-scoped collection: files enter
//! only after passing the type and size checks, duplicates (by exact name)
//! are silently ignored, and insertion order is preserved because the
//! presign response is positionally aligned to it.

use std::path::Path;

use crate::config::UploadConfig;
use crate::error::{ValidationError, ValidationResult};
use crate::types::SelectedFile;

/// What happened when a file was offered to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Added {
    /// Accepted and appended to the set.
    New,
    /// A file with this name is already selected; the set is unchanged.
    Duplicate,
}

/// The set of files queued for upload.
///
/// Invariant: no two entries share a name.
#[derive(Debug, Clone)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
    config: UploadConfig,
}

impl FileSelection {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            files: Vec::new(),
            config,
        }
    }

    /// Inspect a file on disk and offer it to the selection.
    ///
    /// The declared MIME type is derived from the extension. Rejected
    /// files never enter the set.
    pub fn add_path(&mut self, path: &Path) -> ValidationResult<Added> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = std::fs::metadata(path).map_err(|source| ValidationError::Unreadable {
            name: name.clone(),
            source,
        })?;

        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        self.add(SelectedFile {
            name,
            mime_type,
            size_bytes: metadata.len(),
            path: path.to_path_buf(),
        })
    }

    /// Validate a candidate and append it if it passes.
    ///
    /// Checks run in the same order the user sees them: type first,
    /// then size, then duplicate name.
    pub fn add(&mut self, file: SelectedFile) -> ValidationResult<Added> {
        if !self.config.allowed_types.iter().any(|t| t == &file.mime_type) {
            return Err(ValidationError::NotPdf(file.name));
        }
        if file.size_bytes > self.config.max_file_size {
            return Err(ValidationError::TooLarge {
                name: file.name,
                limit_mb: self.config.max_file_size_mb(),
            });
        }
        if self.contains(&file.name) {
            return Ok(Added::Duplicate);
        }

        tracing::debug!(name = %file.name, size = file.size_bytes, "file selected");
        self.files.push(file);
        Ok(Added::New)
    }

    /// Remove a file by exact name. Returns true if something was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        before != self.files.len()
    }

    /// Empty the selection (form reset, or after a fully successful upload).
    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name)
    }

    /// Files in insertion order.
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn selection() -> FileSelection {
        FileSelection::new(UploadConfig::default())
    }

    fn pdf(name: &str, size_bytes: u64) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn test_accepts_valid_pdf() {
        let mut sel = selection();
        assert_eq!(sel.add(pdf("hw1.pdf", 2048)).unwrap(), Added::New);
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.files()[0].name, "hw1.pdf");
    }

    #[test]
    fn test_rejects_wrong_mime_type() {
        let mut sel = selection();
        let mut file = pdf("notes.txt", 100);
        file.mime_type = "text/plain".to_string();

        let err = sel.add(file).unwrap_err();
        assert!(matches!(err, ValidationError::NotPdf(ref n) if n == "notes.txt"));
        // Rejected files never enter the set.
        assert!(sel.is_empty());
    }

    #[test]
    fn test_rejects_oversize_and_names_limit() {
        let mut sel = selection();
        let err = sel.add(pdf("big.pdf", 10 * 1024 * 1024 + 1)).unwrap_err();
        assert!(err.to_string().contains("10MB"));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_accepts_file_at_exact_limit() {
        let mut sel = selection();
        assert_eq!(sel.add(pdf("edge.pdf", 10 * 1024 * 1024)).unwrap(), Added::New);
    }

    #[test]
    fn test_duplicate_name_is_idempotent() {
        let mut sel = selection();
        assert_eq!(sel.add(pdf("hw1.pdf", 100)).unwrap(), Added::New);
        assert_eq!(sel.add(pdf("hw1.pdf", 200)).unwrap(), Added::Duplicate);
        assert_eq!(sel.len(), 1);
        // The original entry wins.
        assert_eq!(sel.files()[0].size_bytes, 100);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut sel = selection();
        sel.add(pdf("a.pdf", 1)).unwrap();
        sel.add(pdf("b.pdf", 1)).unwrap();

        assert!(sel.remove("a.pdf"));
        assert!(!sel.remove("a.pdf"));
        assert_eq!(sel.len(), 1);

        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut sel = selection();
        for name in ["c.pdf", "a.pdf", "b.pdf"] {
            sel.add(pdf(name, 1)).unwrap();
        }
        let names: Vec<_> = sel.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c.pdf", "a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_add_path_reads_disk_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"%PDF-1.4 fake content").unwrap();

        let mut sel = selection();
        assert_eq!(sel.add_path(&path).unwrap(), Added::New);
        let file = &sel.files()[0];
        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.size_bytes, 21);
    }

    #[test]
    fn test_add_path_rejects_non_pdf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain text").unwrap();

        let mut sel = selection();
        assert!(matches!(
            sel.add_path(&path),
            Err(ValidationError::NotPdf(_))
        ));
    }

    #[test]
    fn test_add_path_missing_file() {
        let mut sel = selection();
        let err = sel.add_path(Path::new("/no/such/file.pdf")).unwrap_err();
        assert!(matches!(err, ValidationError::Unreadable { .. }));
    }
}

use std::fs;
use std::io;
use std::path::Path;

/// A source file read fully into memory
#[derive(Debug, Clone)]
pub struct Document {
    /// Path the document was read from (and will be written back to)
    pub path: String,
    /// Full text content as valid UTF-8
    pub text: String,
    /// BLAKE3 hash of the text (hex-encoded)
    pub checksum: String,
}

/// Error types for file operations
#[derive(Debug)]
pub enum FileError {
    NotFound(String),
    IoError(String),
    InvalidUtf8(String),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::NotFound(p) => write!(f, "File not found: {}", p),
            FileError::IoError(e) => write!(f, "I/O error: {}", e),
            FileError::InvalidUtf8(p) => write!(f, "Invalid UTF-8 in file: {}", p),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        FileError::IoError(err.to_string())
    }
}

/// Compute the hex-encoded BLAKE3 checksum of a text blob
pub fn checksum_of(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Read a source file from disk with UTF-8 validation
///
/// The whole file is loaded into memory; no size limit is enforced.
///
/// # Returns
/// * `Ok(Document)` - Document text with path and checksum
/// * `Err(FileError)` - File not found, I/O error, or invalid UTF-8
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document, FileError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(FileError::NotFound(path_ref.display().to_string()));
    }

    let bytes = fs::read(path_ref)?;

    let text = String::from_utf8(bytes)
        .map_err(|_| FileError::InvalidUtf8(path_ref.display().to_string()))?;

    let checksum = checksum_of(&text);

    Ok(Document {
        path: path_ref.display().to_string(),
        text,
        checksum,
    })
}

/// Overwrite a file on disk with new text
///
/// Destructive in-place write: no backup, no atomic rename. The handle is
/// opened for this single write and released before returning.
pub fn write_document<P: AsRef<Path>>(path: P, text: &str) -> Result<(), FileError> {
    fs::write(path.as_ref(), text.as_bytes())?;
    Ok(())
}

/// Check whether a path carries a Rust source extension
///
/// The default annotation patterns are Rust-specific, so the CLI warns
/// (but does not refuse) when the target is not a `.rs` file.
pub fn is_rust_source<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "rs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_read_document_valid_utf8() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_read_valid.rs");
        let content = "struct Foo {\n  x: i32,\n}\n";

        fs::write(&file_path, content.as_bytes()).unwrap();

        let result = read_document(&file_path);

        assert!(result.is_ok());
        let doc = result.unwrap();

        assert_eq!(doc.text, content);
        assert_eq!(doc.path, file_path.display().to_string());
        assert_eq!(doc.checksum, checksum_of(content));
        assert!(doc.checksum.chars().all(|c| c.is_ascii_hexdigit()));

        fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_read_document_invalid_utf8() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_read_invalid_utf8.rs");

        let invalid_utf8 = &[0xFF, 0xFE, 0xFD];
        fs::write(&file_path, invalid_utf8).unwrap();

        let result = read_document(&file_path);

        assert!(result.is_err());
        match result {
            Err(FileError::InvalidUtf8(p)) => {
                assert_eq!(p, file_path.display().to_string());
            }
            _ => panic!("Expected FileError::InvalidUtf8"),
        }

        fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_read_document_not_found() {
        let file_path = PathBuf::from("/nonexistent/path/that/does/not/exist.rs");

        let result = read_document(&file_path);

        assert!(result.is_err());
        match result {
            Err(FileError::NotFound(p)) => {
                assert!(p.contains("nonexistent"));
            }
            _ => panic!("Expected FileError::NotFound"),
        }
    }

    #[test]
    fn test_write_document_overwrites() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_write_overwrites.rs");

        fs::write(&file_path, "old content").unwrap();
        write_document(&file_path, "new content").unwrap();

        let on_disk = fs::read_to_string(&file_path).unwrap();
        assert_eq!(on_disk, "new content");

        fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_is_rust_source() {
        assert!(is_rust_source("model.rs"));
        assert!(is_rust_source("/path/to/lib.rs"));
        assert!(!is_rust_source("model.py"));
        assert!(!is_rust_source("README"));
        assert!(!is_rust_source(""));
    }
}

/// Why an upload filename was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    Empty,
    PathSeparator,
    Traversal,
    NullByte,
    Control,
    Hidden,
}

impl FilenameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename must not be empty",
            Self::PathSeparator => "Filename must not contain path separators",
            Self::Traversal => "Filename must not be '..'",
            Self::NullByte => "Filename must not contain null bytes",
            Self::Control => "Filename must not contain control characters",
            Self::Hidden => "Filename must not start with '.'",
        }
    }
}

/// Validate the client-supplied filename of an upload.
///
/// Only a bare filename is accepted: path components would escape the flat
/// key namespace, and control characters could end up in response headers
/// when the object is served back.
pub fn validate_upload_filename(filename: &str) -> Result<&str, FilenameError> {
    let name = filename.trim();

    if name.is_empty() {
        Err(FilenameError::Empty)
    } else if name.contains('\0') {
        Err(FilenameError::NullByte)
    } else if name.chars().any(|c| c.is_ascii_control()) {
        Err(FilenameError::Control)
    } else if name.contains('/') || name.contains('\\') {
        Err(FilenameError::PathSeparator)
    } else if name == ".." {
        Err(FilenameError::Traversal)
    } else if name.starts_with('.') {
        Err(FilenameError::Hidden)
    } else {
        Ok(name)
    }
}

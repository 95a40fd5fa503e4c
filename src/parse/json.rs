//! JSON well-formedness check on the edited file itself.

use std::path::Path;

use super::{Category, Finding};

/// Parse `content` as JSON; a syntax error (including bytes that are not
/// UTF-8) becomes a blocking finding naming the file and the line.
pub fn check_json<B: AsRef<[u8]>>(name: &str, content: B) -> Vec<Finding> {
    match serde_json::from_slice::<serde_json::Value>(content.as_ref()) {
        Ok(_) => Vec::new(),
        Err(e) => {
            let full = e.to_string();
            // serde_json appends " at line L column C" to every message.
            let msg = full
                .rsplit_once(" at line ")
                .map(|(msg, _)| msg)
                .unwrap_or(&full);
            vec![Finding::error(
                Category::Json,
                format!("{}: invalid JSON - {} at line {}", name, msg, e.line()),
            )]
        }
    }
}

/// Read and check a JSON file. Files that cannot be read at all (deleted,
/// renamed, a directory) are left alone.
pub fn check_json_file(path: &Path) -> Vec<Finding> {
    let content = match std::fs::read(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "json file unreadable, skipping");
            return Vec::new();
        }
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());
    check_json(&name, &content)
}

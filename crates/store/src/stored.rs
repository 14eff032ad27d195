use serde::Serialize;
use std::path::PathBuf;

/// A document persisted by the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub path: PathBuf,
}

/// Strip path separators and other filesystem-hostile characters from an
/// uploaded file name before it becomes part of an on-disk name.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_name("my story.txt"), "my_story.txt");
        assert_eq!(sanitize_name("plain-name_1.md"), "plain-name_1.md");
    }
}

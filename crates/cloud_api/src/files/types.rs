//! File/directory records exchanged with the storage REST API.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::format::{format_last_modified_local, format_size};

/// Display name of the synthetic entry that represents the parent directory.
pub const PARENT_ENTRY_NAME: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Type discriminator of a stored entry.
pub enum FileKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl FileKind {
    /// Returns `true` for directories.
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Bytes of one file moving between the browser and the server.
pub struct FileContent {
    /// Base name of the file.
    pub file_name: String,
    /// MIME type, when known.
    pub content_type: Option<String>,
    /// File bytes.
    pub bytes: Vec<u8>,
}

impl FileContent {
    /// Builds file content without a MIME type.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Returns `true` when the file has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One entry of a directory listing.
pub struct FileRecord {
    /// Base name of the entry.
    pub name: String,
    /// Size in bytes. Directories report whatever the server sends and never display it.
    #[serde(default)]
    pub size: u64,
    /// Last-modified time in unix milliseconds.
    #[serde(default)]
    pub last_modified: i64,
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl FileRecord {
    /// Builds the synthetic parent-directory entry shown above a non-root listing.
    pub fn parent_entry() -> Self {
        Self {
            name: PARENT_ENTRY_NAME.to_string(),
            size: 0,
            last_modified: 0,
            kind: FileKind::Directory,
        }
    }

    /// Returns `true` when this is the synthetic parent entry.
    pub fn is_parent_entry(&self) -> bool {
        self.name == PARENT_ENTRY_NAME
    }

    /// Human readable size; empty for directories.
    pub fn display_size(&self) -> String {
        if self.kind.is_directory() {
            String::new()
        } else {
            format_size(self.size)
        }
    }

    /// Local short date; empty for the parent entry.
    pub fn display_last_modified(&self) -> String {
        if self.is_parent_entry() {
            String::new()
        } else {
            format_last_modified_local(self.last_modified)
        }
    }
}

/// Sorts a listing with directories first, then by case-insensitive name.
pub fn sort_entries(entries: &mut [FileRecord]) {
    entries.sort_by(|a, b| match (a.kind.is_directory(), b.kind.is_directory()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn file(name: &str, kind: FileKind) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            size: 1_500,
            last_modified: 0,
            kind,
        }
    }

    #[test]
    fn file_record_uses_rest_field_names() {
        let record: FileRecord = serde_json::from_value(json!({
            "name": "report.pdf",
            "size": 2048,
            "lastModified": 1_700_000_000_000_i64,
            "type": "file"
        }))
        .expect("deserialize");

        assert_eq!(
            record,
            FileRecord {
                name: "report.pdf".to_string(),
                size: 2048,
                last_modified: 1_700_000_000_000,
                kind: FileKind::File,
            }
        );

        let value = serde_json::to_value(file("photos", FileKind::Directory)).expect("serialize");
        assert_eq!(value["type"], json!("directory"));
        assert_eq!(value["lastModified"], json!(0));
    }

    #[test]
    fn directories_hide_size_and_parent_hides_date() {
        assert_eq!(file("a.txt", FileKind::File).display_size(), "1.5 KB");
        assert_eq!(file("docs", FileKind::Directory).display_size(), "");
        assert_eq!(FileRecord::parent_entry().display_last_modified(), "");
        assert!(FileRecord::parent_entry().kind.is_directory());
    }

    #[test]
    fn sort_entries_puts_directories_first() {
        let mut entries = vec![
            file("zeta.txt", FileKind::File),
            file("Beta", FileKind::Directory),
            file("alpha.txt", FileKind::File),
            file("archive", FileKind::Directory),
        ];
        sort_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["archive", "Beta", "alpha.txt", "zeta.txt"]);
    }
}

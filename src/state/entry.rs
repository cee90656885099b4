//! Installed-state entries.

use serde::{Deserialize, Deserializer, Serialize};

/// Recorded kind of an installed dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstalledKind {
    Git,
    Archive,
    #[default]
    Unknown,
}

/// What was last successfully installed for one dependency.
///
/// For git the version is the resolved commit hash; for archives it is
/// the downloaded file's byte size rendered as a string, a cheap
/// content-change proxy rather than a checksum.
///
/// Loading is lenient towards historical state files: `type` may be
/// missing, `version` may be a JSON number, and a legacy `revision` field
/// stands in for a missing `version`. Saving always emits the normalized
/// `type`/`url`/`version` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledEntry {
    #[serde(rename = "type", default)]
    pub kind: InstalledKind,

    #[serde(default)]
    pub url: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub version: String,

    #[serde(default, skip_serializing)]
    revision: String,
}

impl InstalledEntry {
    /// Entry for a git dependency pinned at a commit.
    pub fn git(url: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            kind: InstalledKind::Git,
            url: url.into(),
            version: commit.into(),
            revision: String::new(),
        }
    }

    /// Entry for a downloaded archive of the given size.
    pub fn archive(url: impl Into<String>, size: u64) -> Self {
        Self {
            kind: InstalledKind::Archive,
            url: url.into(),
            version: size.to_string(),
            revision: String::new(),
        }
    }

    /// Resolve the legacy `revision` fallback into `version`.
    pub fn normalized(mut self) -> Self {
        if self.version.is_empty() && !self.revision.is_empty() {
            self.version = std::mem::take(&mut self.revision);
        } else {
            self.revision.clear();
        }
        self
    }
}

/// Accept a version recorded either as a JSON string or a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "version must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_constructor_fills_fields() {
        let entry = InstalledEntry::git("https://example.com/r.git", "abc123");
        assert_eq!(entry.kind, InstalledKind::Git);
        assert_eq!(entry.url, "https://example.com/r.git");
        assert_eq!(entry.version, "abc123");
    }

    #[test]
    fn archive_constructor_records_size_as_string() {
        let entry = InstalledEntry::archive("https://example.com/a.zip", 4096);
        assert_eq!(entry.kind, InstalledKind::Archive);
        assert_eq!(entry.version, "4096");
    }

    #[test]
    fn missing_type_defaults_to_unknown() {
        let entry: InstalledEntry =
            serde_json::from_str(r#"{"url": "u", "version": "1"}"#).unwrap();
        assert_eq!(entry.kind, InstalledKind::Unknown);
    }

    #[test]
    fn numeric_version_is_accepted() {
        let entry: InstalledEntry =
            serde_json::from_str(r#"{"type": "archive", "url": "u", "version": 1234}"#).unwrap();
        assert_eq!(entry.version, "1234");
    }

    #[test]
    fn legacy_revision_field_backfills_version() {
        let entry: InstalledEntry =
            serde_json::from_str(r#"{"type": "git", "url": "u", "revision": "3.4"}"#).unwrap();
        let entry = entry.normalized();
        assert_eq!(entry.version, "3.4");
    }

    #[test]
    fn version_wins_over_legacy_revision() {
        let entry: InstalledEntry = serde_json::from_str(
            r#"{"type": "git", "url": "u", "version": "abc", "revision": "3.4"}"#,
        )
        .unwrap();
        let entry = entry.normalized();
        assert_eq!(entry.version, "abc");
    }

    #[test]
    fn serialization_emits_normalized_shape() {
        let entry = InstalledEntry::git("u", "abc").normalized();
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["type"], "git");
        assert_eq!(json["url"], "u");
        assert_eq!(json["version"], "abc");
        assert!(json.get("revision").is_none());
    }

    #[test]
    fn unknown_kind_serializes_as_unknown() {
        let entry: InstalledEntry = serde_json::from_str(r#"{"url": "u"}"#).unwrap();
        let json = serde_json::to_value(entry.normalized()).unwrap();
        assert_eq!(json["type"], "unknown");
    }
}

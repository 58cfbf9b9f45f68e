/// Filename normalization
///
/// SharePoint and S3 disagree on casing, accents and the capture timestamp
/// that recording tools append to file names. Everything that has to match
/// assets across the two services goes through [`normalize_filename`].
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// `-20240115_093000-anything` at the end of a stem
static CAPTURE_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d{8}_\d{6}-.*$").unwrap());

static DISALLOWED_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").unwrap());

/// Normalizes a file name into a comparable key.
///
/// The extension is dropped unless `keep_extension` is set, in which case it
/// is appended verbatim (case preserved). The function is total: names that
/// normalize to nothing yield an empty string.
///
/// # Examples
/// ```
/// use missionsync_core::normalize_filename;
///
/// assert_eq!(normalize_filename("Café-Intro.mp4", false), "cafe-intro");
/// assert_eq!(normalize_filename("meeting-20240115_093000-raw.mp4", false), "meeting");
/// assert_eq!(normalize_filename("A B.MP4", true), "a_b.MP4");
/// ```
pub fn normalize_filename(name: &str, keep_extension: bool) -> String {
    let (stem, ext) = split_extension(basename(name));

    let stem = deunicode::deunicode_with_tofu(stem, "").to_lowercase();
    let stem = CAPTURE_TIMESTAMP.replace(&stem, "");
    let stem = DISALLOWED_RUN.replace_all(&stem, "_");
    let stem = stem.trim_matches('_');

    if keep_extension && !ext.is_empty() {
        format!("{}.{}", stem, ext)
    } else {
        stem.to_string()
    }
}

/// Returns the component after the last `/` or `\`
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Splits a basename into stem and extension at the last dot.
///
/// A leading dot belongs to the stem (`.keep` has no extension).
pub fn split_extension(basename: &str) -> (&str, &str) {
    match basename.rfind('.') {
        Some(idx) if idx > 0 && basename[..idx].chars().any(|c| c != '.') => {
            (&basename[..idx], &basename[idx + 1..])
        }
        _ => (basename, ""),
    }
}

/// Canonical lookup form of a file name.
///
/// An empty key is unmatchable: it never equals a transcript key or a
/// processed key during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Normalizes `name` without its extension
    pub fn from_name(name: &str) -> Self {
        Self(normalize_filename(name, false))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_matchable(&self) -> bool {
        !self.0.is_empty()
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Template value marking a key whose actual value must be non-empty.
pub const REQUIRED_MARKER: &str = "required";

/// A parsed `KEY=VALUE` entry from a `.env` file or input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub source: Option<PathBuf>,
    pub line: u32,
}

/// Parsed key/value pairs with unique, non-empty keys.
///
/// Keys keep the position of their first occurrence; a repeated key replaces
/// the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: Vec<Entry>,
    by_key: HashMap<String, usize>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, entry: Entry) {
        if let Some(existing_idx) = self.by_key.get(&entry.key).copied() {
            self.entries[existing_idx] = entry;
        } else {
            self.by_key.insert(entry.key.clone(), self.entries.len());
            self.entries.push(entry);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key
            .get(key)
            .map(|idx| self.entries[*idx].value.as_str())
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.by_key.get(key).map(|idx| &self.entries[*idx])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl<K, V> FromIterator<(K, V)> for EnvMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        let mut line_num = 0u32;
        for (key, value) in iter {
            line_num = line_num.saturating_add(1);
            map.insert(Entry {
                key: key.into(),
                value: value.into(),
                source: None,
                line: line_num,
            });
        }
        map
    }
}

/// What a template value expects from the actual file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The template value is exactly [`REQUIRED_MARKER`].
    Required,
    /// Any other template value, including an empty one. Never compared
    /// against the actual value.
    Informational,
}

impl Requirement {
    pub fn from_template_value(value: &str) -> Self {
        if value == REQUIRED_MARKER {
            Self::Required
        } else {
            Self::Informational
        }
    }
}

/// Validation policy for missing and empty keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Report missing and empty keys without failing validation.
    ///
    /// A report produced in this mode is always `valid` unless the actual
    /// file is absent, so callers must inspect `missing` and `empty`
    /// themselves.
    #[default]
    Advisory,
    /// Fail validation when any key is missing or required-but-empty.
    Strict,
}

impl CheckMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Advisory }
    }

    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// Outcome of comparing an actual env file against a template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CheckReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub missing: Vec<String>,
    pub empty: Vec<String>,
    pub extra: Vec<String>,
    pub present: Vec<String>,
    pub total: usize,
}

impl CheckReport {
    /// Report for an actual file that does not exist.
    pub fn not_found(path: &Path) -> Self {
        Self {
            valid: false,
            error: Some(format!("{} not found", path.display())),
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

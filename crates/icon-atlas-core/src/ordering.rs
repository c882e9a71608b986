//! The stable `name -> index` table consumers use to address icons by position.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::error::{AtlasError, Result};

/// Theme-agnostic base names; each name's position is its icon id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameOrdering(Vec<String>);

impl NameOrdering {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().enumerate().map(|(i, n)| (i, n.as_str()))
    }

    /// Renders `{ name=0, name=1, ... }` spread over at most `columns` lines.
    ///
    /// Each line holds `ceil(len / columns)` entries; entries are separated by
    /// `", "`, continuation lines start with a tab and the whole table is
    /// wrapped in braces on their own lines.
    pub fn format_table(&self, columns: usize) -> String {
        let total = self.0.len();
        let per_line = total.div_ceil(columns.max(1));
        let mut body = String::new();
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 && i % per_line == 0 {
                body.push_str("\n\t");
            }
            let _ = write!(body, "{name}={i}");
            if i + 1 < total {
                body.push_str(", ");
            }
        }
        format!("{{\n\t{body}\n}}")
    }
}

impl FromIterator<String> for NameOrdering {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses a table produced by [`NameOrdering::format_table`]. Every index
/// must equal the entry's position.
pub fn parse_ordering(text: &str) -> Result<NameOrdering> {
    let inner = text
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| AtlasError::MalformedOrdering("missing surrounding braces".into()))?;

    let mut names = Vec::new();
    for token in inner.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (name, index) = token
            .rsplit_once('=')
            .ok_or_else(|| AtlasError::MalformedOrdering(format!("entry '{token}' has no '='")))?;
        let index: usize = index
            .trim()
            .parse()
            .map_err(|_| AtlasError::MalformedOrdering(format!("bad index in '{token}'")))?;
        if index != names.len() {
            return Err(AtlasError::MalformedOrdering(format!(
                "entry '{token}' expected index {}",
                names.len()
            )));
        }
        names.push(name.trim().to_string());
    }
    Ok(NameOrdering(names))
}

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A glossary entry.
///
/// `related_ids` may point at ids that no longer exist; the store removes an
/// id from every list when that term is deleted.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Term {
    pub id: String,
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub related_ids: Vec<String>,
}

impl Term {
    /// New record without an id; the store assigns one on upsert.
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self { term: term.into(), definition: definition.into(), ..Self::default() }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_related<I, S>(mut self, related_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_ids = related_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Name and definition must carry non-whitespace text.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.term.trim().is_empty() {
            return Err(ServiceError::required("term"));
        }
        if self.definition.trim().is_empty() {
            return Err(ServiceError::required("definition"));
        }
        Ok(())
    }

    /// Lowercased display name; the primary ordering key everywhere.
    pub fn sort_name(&self) -> String {
        self.term.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_lists_default_when_absent() {
        let t: Term = serde_json::from_str(r#"{"id":"1","term":"DOM","definition":"tree"}"#).unwrap();
        assert!(t.sources.is_empty() && t.tags.is_empty() && t.related_ids.is_empty());
    }

    #[test]
    fn missing_definition_is_a_parse_error() {
        assert!(serde_json::from_str::<Term>(r#"{"id":"1","term":"DOM"}"#).is_err());
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert!(matches!(Term::new("  ", "x").validate(), Err(ServiceError::Validation(m)) if m == "term is required"));
        assert!(matches!(Term::new("x", "\t").validate(), Err(ServiceError::Validation(m)) if m == "definition is required"));
        assert!(Term::new("x", "y").validate().is_ok());
    }
}

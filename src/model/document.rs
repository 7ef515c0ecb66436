use crate::model::{UserId, PROFILE_COLLECTION};
use serde_json::{Map, Value};
use std::fmt;

/// Field map of a stored document.
pub type Fields = Map<String, Value>;

/// Location of a document: `collection/id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    collection: String,
    id: String,
}

impl DocumentPath {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Path of the primary profile document of `uid`.
    pub fn profile(uid: &UserId) -> Self {
        Self::new(PROFILE_COLLECTION, uid.as_str())
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: DocumentPath,
    pub fields: Fields,
}

impl Document {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Equality filter over one field of one collection.
///
/// Results are returned in document-id order. `start_after` resumes after the
/// given id, as returned in [`QueryPage::next_cursor`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldQuery {
    pub collection: String,
    pub field: String,
    pub value: Value,
    pub limit: Option<usize>,
    pub start_after: Option<String>,
}

impl FieldQuery {
    pub fn eq(
        collection: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
            value: value.into(),
            limit: None,
            start_after: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn start_after(mut self, cursor: Option<String>) -> Self {
        self.start_after = cursor;
        self
    }

    /// A document matches only if the field is present and strictly equal,
    /// type included: `"42"` never matches `42`.
    pub fn matches(&self, fields: &Fields) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPage {
    pub refs: Vec<DocumentPath>,
    /// Set when more matches remain after this page.
    pub next_cursor: Option<String>,
}

/// Document deletes committed all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    deletes: Vec<DocumentPath>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete(&mut self, path: DocumentPath) -> &mut Self {
        self.deletes.push(path);
        self
    }

    pub fn len(&self) -> usize {
        self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
    }

    pub fn paths(&self) -> &[DocumentPath] {
        &self.deletes
    }

    pub fn into_paths(self) -> Vec<DocumentPath> {
        self.deletes
    }
}

impl Extend<DocumentPath> for WriteBatch {
    fn extend<I: IntoIterator<Item = DocumentPath>>(&mut self, iter: I) {
        self.deletes.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn query_matches_exact_value_only() {
        let query = FieldQuery::eq("favorites", "userId", "u1");

        assert!(query.matches(&fields(json!({ "userId": "u1" }))));
        assert!(!query.matches(&fields(json!({ "userId": "U1" }))));
        assert!(!query.matches(&fields(json!({ "userId": 1 }))));
        assert!(!query.matches(&fields(json!({ "owner": "u1" }))));
    }

    #[test]
    fn profile_path_lives_in_users() {
        let path = DocumentPath::profile(&UserId::new("abc"));
        assert_eq!(path.to_string(), "users/abc");
    }
}

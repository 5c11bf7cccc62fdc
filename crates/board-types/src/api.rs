use serde::{Deserialize, Deserializer, Serialize};

// -- Comments --

/// Body of `POST /api/comments`.
///
/// Missing and `null` fields deserialize as empty strings so that the
/// handler, not the extractor, decides the status code. `name` and
/// `comment` are accepted for compatibility with older board clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default, alias = "name", deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, alias = "comment", deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateCommentRequest {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.author.is_empty() && !self.body.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// -- Health --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_field_names() {
        let req: CreateCommentRequest =
            serde_json::from_str(r#"{"name":"Alice","comment":"Hello"}"#).unwrap();
        assert_eq!(req.author, "Alice");
        assert_eq!(req.body, "Hello");
        assert!(req.is_complete());
    }

    #[test]
    fn missing_fields_are_empty() {
        let req: CreateCommentRequest = serde_json::from_str(r#"{"author":"Alice"}"#).unwrap();
        assert_eq!(req.body, "");
        assert!(!req.is_complete());
    }

    #[test]
    fn null_fields_are_empty() {
        let req: CreateCommentRequest =
            serde_json::from_str(r#"{"author":null,"body":"Hello"}"#).unwrap();
        assert_eq!(req.author, "");
        assert!(!req.is_complete());
    }

    #[test]
    fn whitespace_counts_as_present() {
        let req = CreateCommentRequest::new(" ", " ");
        assert!(req.is_complete());
    }
}

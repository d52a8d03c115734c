use std::fmt;

use web_sys::Element;

use crate::error::{Error, Result};

pub const POST_ID_ATTRIBUTE: &str = "post-id";

/// Identifier of a post as the page templates write it into `post-id`.
#[derive(Hash, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PostId(String);

impl PostId {
    pub fn new(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::MissingAttribute(POST_ID_ATTRIBUTE));
        }
        Ok(PostId(raw.to_owned()))
    }

    pub fn from_control(control: &Element) -> Result<Self> {
        let raw = control
            .get_attribute(POST_ID_ATTRIBUTE)
            .ok_or(Error::MissingAttribute(POST_ID_ATTRIBUTE))?;
        PostId::new(&raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the element wrapping the whole post, `post-{id}`.
    pub fn dom_id(&self) -> String {
        format!("post-{}", self.0)
    }

    pub fn api_url(&self, api_base: &str) -> String {
        format!("{}/{}", api_base.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The server's view of a post after an update. Only `text` is relied on.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_trimmed_and_required() {
        assert_eq!(PostId::new(" 42 ").unwrap().as_str(), "42");
        assert!(matches!(
            PostId::new("  "),
            Err(Error::MissingAttribute("post-id"))
        ));
    }

    #[test]
    fn derived_names() {
        let id = PostId::new("7").unwrap();
        assert_eq!(id.dom_id(), "post-7");
        assert_eq!(id.api_url("/api/posts"), "/api/posts/7");
        assert_eq!(id.api_url("/api/posts/"), "/api/posts/7");
    }

    #[test]
    fn post_ignores_extra_fields() {
        let post: Post =
            serde_json::from_str(r#"{"id": 42, "text": "bye *world*", "user_id": 3}"#).unwrap();
        assert_eq!(post.text, "bye *world*");
    }

    #[test]
    fn post_requires_text() {
        assert!(serde_json::from_str::<Post>(r#"{"id": 42}"#).is_err());
    }
}

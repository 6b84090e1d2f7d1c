use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A blog post as stored in the `posts` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn new(post: NewPost) -> Self {
        Self {
            id: ObjectId::new(),
            title: post.title,
            content: post.content,
        }
    }

    /// Overwrite only the fields present in `changes`.
    pub fn apply(&mut self, changes: &PostChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(content) = &changes.content {
            self.content = content.clone();
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PostChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post::new(NewPost {
            title: "A".to_string(),
            content: "B".to_string(),
        })
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut p = post();
        p.apply(&PostChanges {
            title: None,
            content: Some("C".to_string()),
        });
        assert_eq!(p.title, "A");
        assert_eq!(p.content, "C");
    }

    #[test]
    fn empty_changes_serialize_to_empty_document() {
        let changes = PostChanges::default();
        assert!(changes.is_empty());
        let doc = mongodb::bson::to_document(&changes).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn missing_content_defaults_to_empty() {
        let id = ObjectId::new();
        let doc = mongodb::bson::doc! { "_id": id, "title": "only title" };
        let p: Post = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(p.id, id);
        assert_eq!(p.content, "");
    }
}

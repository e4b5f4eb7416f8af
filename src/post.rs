//! Post and author records, and the partial form every request body decodes into.

use serde::{Deserialize, Serialize};

/// The person who wrote a post. Purely descriptive; nothing is unique.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    pub full_name: String,
    pub user_name: String,
    pub email: String,
}

/// A post. It carries no id: its identifier is its position in the store.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Post {
    pub title: String,
    pub body: String,
    pub author: Author,
}

/// A request body with every field optional.
///
/// A field that is missing or `null` was not submitted. Unknown fields are
/// ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<AuthorPatch>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorPatch {
    pub full_name: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
}

impl PostPatch {
    /// Decodes a request body. An empty (or all-whitespace) body is `{}`.
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// Overwrites the submitted fields of `post`, leaving the rest alone.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
        if let Some(author) = self.author {
            author.apply(&mut post.author);
        }
    }

    /// A fresh post holding only the submitted fields.
    pub fn into_post(self) -> Post {
        let mut post = Post::default();
        self.apply(&mut post);
        post
    }
}

impl AuthorPatch {
    pub fn apply(self, author: &mut Author) {
        if let Some(full_name) = self.full_name {
            author.full_name = full_name;
        }
        if let Some(user_name) = self.user_name {
            author.user_name = user_name;
        }
        if let Some(email) = self.email {
            author.email = email;
        }
    }
}

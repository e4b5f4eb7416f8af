//! The in-memory post collection.
//!
//! Posts are addressed by their zero-based position. Positions are not
//! stable: deleting a post shifts every later post down by one.

use parking_lot::Mutex;

use crate::post::{Post, PostPatch};

/// Ordered, insertion-preserving collection of posts behind one lock.
///
/// Every method takes the lock exactly once, so each call is atomic with
/// respect to every other. Share it between handlers as `Arc<PostStore>`.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: Mutex<Vec<Post>>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.posts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.lock().is_empty()
    }

    /// A snapshot of every post, in insertion order.
    pub fn list(&self) -> Vec<Post> {
        self.posts.lock().clone()
    }

    pub fn get(&self, index: usize) -> Option<Post> {
        self.posts.lock().get(index).cloned()
    }

    /// Appends `post` and returns the whole collection as it stands after
    /// the insert.
    pub fn create(&self, post: Post) -> Vec<Post> {
        let mut posts = self.posts.lock();
        posts.push(post);
        posts.clone()
    }

    /// Overwrites the post at `index`, returning the stored value.
    pub fn replace(&self, index: usize, post: Post) -> Option<Post> {
        let mut posts = self.posts.lock();
        let slot = posts.get_mut(index)?;
        *slot = post;
        Some(slot.clone())
    }

    /// Merges the submitted fields of `patch` into the post at `index`.
    pub fn update(&self, index: usize, patch: PostPatch) -> Option<Post> {
        let mut posts = self.posts.lock();
        let post = posts.get_mut(index)?;
        patch.apply(post);
        Some(post.clone())
    }

    /// Removes the post at `index`; later posts move down one position.
    pub fn delete(&self, index: usize) -> Option<Post> {
        let mut posts = self.posts.lock();
        (index < posts.len()).then(|| posts.remove(index))
    }
}

use serde::Serialize;

use crate::core::chain::{Chain, Iter};
use crate::core::errors::{Error, Result};
use crate::core::helpers::now_utc;
use crate::config::MAX_POST_LENGTH;
use crate::models::models::Post;

/// A user's posts, newest first.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct PostList {
    posts: Chain<Post>,
}

impl PostList {
    pub fn new() -> Self {
        Self { posts: Chain::new() }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn push(&mut self, content: &str) -> Result<()> {
        validate_content(content)?;
        self.posts.push_front(Post {
            content: content.to_string(),
            created_at: now_utc(),
        });
        Ok(())
    }

    /// Discards the most recent post. `false` means the list was already empty.
    pub fn pop_front(&mut self) -> bool {
        self.posts.pop_front().is_some()
    }

    pub fn latest(&self) -> Option<&Post> {
        self.posts.front()
    }

    /// Post at `index` in display order (0 is the newest).
    pub fn get(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    pub fn iter(&self) -> Iter<'_, Post> {
        self.posts.iter()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.posts.iter().map(|p| p.content.clone()).collect()
    }

    /// One page of `size` posts, `page` counted from 0. An out-of-range page
    /// is empty.
    pub fn page(&self, size: usize, page: usize) -> Vec<&Post> {
        if size == 0 {
            return Vec::new();
        }
        self.posts
            .iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect()
    }

    pub(crate) fn clear(&mut self) -> usize {
        self.posts.clear()
    }
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::InvalidContent("post is empty".to_string()));
    }
    if content.chars().count() > MAX_POST_LENGTH {
        return Err(Error::InvalidContent(format!(
            "post is longer than {} characters",
            MAX_POST_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_post_comes_first() {
        let mut posts = PostList::new();
        posts.push("hello").unwrap();
        posts.push("world").unwrap();
        assert_eq!(posts.snapshot(), vec!["world", "hello"]);
        assert_eq!(posts.latest().map(|p| p.content.as_str()), Some("world"));
    }

    #[test]
    fn pop_removes_only_the_newest() {
        let mut posts = PostList::new();
        posts.push("first").unwrap();
        posts.push("second").unwrap();
        assert!(posts.pop_front());
        assert_eq!(posts.snapshot(), vec!["first"]);
    }

    #[test]
    fn pop_on_empty_reports_nothing_removed() {
        let mut posts = PostList::new();
        assert!(!posts.pop_front());
        assert!(posts.is_empty());
    }

    #[test]
    fn rejects_empty_and_oversized_content() {
        let mut posts = PostList::new();
        assert!(matches!(posts.push("   "), Err(Error::InvalidContent(_))));
        let long = "a".repeat(MAX_POST_LENGTH + 1);
        assert!(matches!(posts.push(&long), Err(Error::InvalidContent(_))));
        assert!(posts.push(&"a".repeat(MAX_POST_LENGTH)).is_ok());
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn pages_walk_in_display_order() {
        let mut posts = PostList::new();
        for text in ["p1", "p2", "p3", "p4", "p5"] {
            posts.push(text).unwrap();
        }
        let contents = |page: Vec<&Post>| page.iter().map(|p| p.content.clone()).collect::<Vec<_>>();
        assert_eq!(contents(posts.page(2, 0)), vec!["p5", "p4"]);
        assert_eq!(contents(posts.page(2, 2)), vec!["p1"]);
        assert!(posts.page(2, 3).is_empty());
        assert!(posts.page(0, 0).is_empty());
        assert_eq!(posts.get(1).map(|p| p.content.as_str()), Some("p4"));
    }
}

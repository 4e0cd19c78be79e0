use serde::Serialize;

use crate::core::chain::{Chain, Iter};
use crate::core::errors::{Error, Result};
use crate::models::models::{FriendEntry, UserId};

/// A user's friends, sorted by username.
///
/// Entries only name another user; they never own that user's posts.
/// Resolving an entry to posts goes through the directory, see
/// [`UserDirectory::friend_posts`](crate::users::UserDirectory::friend_posts).
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct FriendIndex {
    entries: Chain<FriendEntry>,
}

impl FriendIndex {
    pub fn new() -> Self {
        Self { entries: Chain::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, friend_username: &str) -> bool {
        self.get(friend_username).is_some()
    }

    pub fn get(&self, friend_username: &str) -> Option<&FriendEntry> {
        self.entries.find(|e| e.friend_username == friend_username)
    }

    /// Sorted insertion of an already resolved friend. Returns the position
    /// the entry landed at.
    pub fn insert(&mut self, friend_username: &str, user_id: UserId) -> Result<usize> {
        if self.contains(friend_username) {
            return Err(Error::AlreadyFriend(friend_username.to_string()));
        }
        let entry = FriendEntry {
            friend_username: friend_username.to_string(),
            user_id,
        };
        Ok(self
            .entries
            .insert_sorted_by(entry, |a, b| a.friend_username.cmp(&b.friend_username)))
    }

    /// Drops the entry for `friend_username`. The friend's posts are untouched.
    pub fn remove(&mut self, friend_username: &str) -> bool {
        self.entries
            .remove_first(|e| e.friend_username == friend_username)
            .is_some()
    }

    pub fn iter(&self) -> Iter<'_, FriendEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.friend_username.clone())
            .collect()
    }

    pub(crate) fn clear(&mut self) -> usize {
        self.entries.clear()
    }
}

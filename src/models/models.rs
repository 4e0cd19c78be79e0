use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::friends::FriendIndex;
use crate::posts::PostList;

/// Stable key of a user record. Friend entries hold one of these instead of
/// a pointer into another user's posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Read-only alias to another user's posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendEntry {
    pub friend_username: String,
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub posts: PostList,
    pub friends: FriendIndex,
}

impl User {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            id: UserId::new(),
            username: username.to_string(),
            password: password.to_string(),
            posts: PostList::new(),
            friends: FriendIndex::new(),
        }
    }
}

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::chain::{Chain, Iter};
use crate::core::errors::{Error, Result};
use crate::models::models::{User, UserId};
use crate::posts::PostList;

/// How loudly friend operations announce their outcome.
///
/// Interactive calls use `Verbose`; the bootstrap loader uses `Silent` so
/// unresolved names in the source do not flood the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Verbose,
    Silent,
}

/// What a teardown released.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeardownReport {
    pub users: usize,
    pub posts: usize,
    pub friend_entries: usize,
}

/// Every user record, sorted ascending by username (byte-wise).
///
/// The directory is the only owner of users. Usernames are not forced unique
/// here; a duplicate lands after the existing record, so lookups keep
/// resolving to the earliest one.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: Chain<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self { users: Chain::new() }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn insert(&mut self, username: &str, password: &str) -> UserId {
        let user = User::new(username, password);
        let id = user.id;
        let position = self
            .users
            .insert_sorted_by(user, |a, b| a.username.as_bytes().cmp(b.username.as_bytes()));
        debug!(%username, %id, position, "user inserted");
        id
    }

    /// First user named `username`, in sort order.
    pub fn find(&self, username: &str) -> Option<UserId> {
        self.find_user(username).map(|u| u.id)
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.find(|u| u.username == username)
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.find(|u| u.id == id)
    }

    pub fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.find_mut(|u| u.id == id)
    }

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.get(id).ok_or_else(|| Error::UserNotFound(id.to_string()))
    }

    pub fn user_mut(&mut self, id: UserId) -> Result<&mut User> {
        self.get_mut(id).ok_or_else(|| Error::UserNotFound(id.to_string()))
    }

    pub fn iter(&self) -> Iter<'_, User> {
        self.users.iter()
    }

    pub fn usernames(&self) -> Vec<String> {
        self.users.iter().map(|u| u.username.clone()).collect()
    }

    /// Resolves `friend_name` against the directory and links it into
    /// `owner`'s friend index. `report` only changes how the outcome is logged.
    pub fn add_friend(&mut self, owner: UserId, friend_name: &str, report: Report) -> Result<()> {
        let result = self.link_friend(owner, friend_name);
        match (&result, report) {
            (Ok(()), Report::Verbose) => info!(%owner, friend = friend_name, "friend added"),
            (Err(e), Report::Verbose) => warn!(%owner, friend = friend_name, error = %e, "friend not added"),
            (Ok(()), Report::Silent) => debug!(%owner, friend = friend_name, "friend added"),
            (Err(e), Report::Silent) => debug!(%owner, friend = friend_name, error = %e, "friend skipped"),
        }
        result
    }

    fn link_friend(&mut self, owner: UserId, friend_name: &str) -> Result<()> {
        self.user(owner)?;
        let target = self
            .find(friend_name)
            .ok_or_else(|| Error::FriendNotFound(friend_name.to_string()))?;
        self.user_mut(owner)?.friends.insert(friend_name, target)?;
        Ok(())
    }

    pub fn remove_friend(&mut self, owner: UserId, friend_name: &str) -> Result<bool> {
        let removed = self.user_mut(owner)?.friends.remove(friend_name);
        debug!(%owner, friend = friend_name, removed, "friend removal");
        Ok(removed)
    }

    /// The live post list behind `owner`'s friend entry for `friend_name`.
    pub fn friend_post_list(&self, owner: UserId, friend_name: &str) -> Result<&PostList> {
        let entry = self
            .user(owner)?
            .friends
            .get(friend_name)
            .ok_or_else(|| Error::FriendNotFound(friend_name.to_string()))?;
        Ok(&self.user(entry.user_id)?.posts)
    }

    pub fn friend_posts(&self, owner: UserId, friend_name: &str) -> Result<Vec<String>> {
        self.friend_post_list(owner, friend_name)
            .map(PostList::snapshot)
    }

    /// Releases every user together with the posts and friend entries it owns.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();
        while let Some(mut user) = self.users.pop_front() {
            report.posts += user.posts.clear();
            report.friend_entries += user.friends.clear();
            report.users += 1;
        }
        info!(
            users = report.users,
            posts = report.posts,
            friend_entries = report.friend_entries,
            "directory torn down"
        );
        report
    }
}

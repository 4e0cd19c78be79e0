//! In-memory text-based social graph.
//!
//! A [`Textbook`] owns the user directory and the single session slot. Users
//! keep their own posts (newest first) and a sorted friend list whose entries
//! read other users' posts without owning them.

pub mod auth;
pub mod config;
pub mod core;
pub mod friends;
pub mod menu;
pub mod models;
pub mod posts;
pub mod users;

use std::io::Read;
use std::path::Path;

use tracing::info;

pub use crate::auth::{Session, SessionGuard, SessionState};
pub use crate::core::db::LoadReport;
pub use crate::core::errors::{Error, Result};
pub use crate::models::models::{FriendEntry, Post, User, UserId};
pub use crate::users::{Report, TeardownReport, UserDirectory};

#[derive(Debug, Default)]
pub struct Textbook {
    directory: UserDirectory,
    session: SessionGuard,
}

impl Textbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_csv<R: Read>(source: R, rows: usize) -> anyhow::Result<(Self, LoadReport)> {
        let mut textbook = Self::new();
        let report = crate::core::db::load_users_csv(&mut textbook.directory, source, rows)?;
        Ok((textbook, report))
    }

    pub fn from_csv_path(path: &Path, rows: usize) -> anyhow::Result<(Self, LoadReport)> {
        let mut textbook = Self::new();
        let report = crate::core::db::load_users_csv_path(&mut textbook.directory, path, rows)?;
        Ok((textbook, report))
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.current()
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<UserId> {
        if self.directory.find(username).is_some() {
            return Err(Error::UsernameTaken(username.to_string()));
        }
        let id = self.directory.insert(username, password);
        info!(%username, "user registered");
        Ok(id)
    }

    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<UserId> {
        self.session.authenticate(&self.directory, username, password)
    }

    pub fn logout(&mut self) -> Option<Session> {
        self.session.logout()
    }

    pub fn change_password(&mut self, old: &str, new: &str) -> Result<()> {
        self.session.change_password(&mut self.directory, old, new)
    }

    pub fn add_post(&mut self, content: &str) -> Result<()> {
        let user = self.current_user_mut()?;
        user.posts.push(content)?;
        info!(username = %user.username, posts = user.posts.len(), "post added");
        Ok(())
    }

    /// `Ok(false)` when there was nothing to remove.
    pub fn remove_latest_post(&mut self) -> Result<bool> {
        let user = self.current_user_mut()?;
        let removed = user.posts.pop_front();
        if removed {
            info!(username = %user.username, posts = user.posts.len(), "post removed");
        }
        Ok(removed)
    }

    pub fn add_friend(&mut self, name: &str) -> Result<()> {
        let owner = self.session.current_user()?;
        self.directory.add_friend(owner, name, Report::Verbose)
    }

    pub fn remove_friend(&mut self, name: &str) -> Result<bool> {
        let owner = self.session.current_user()?;
        self.directory.remove_friend(owner, name)
    }

    pub fn list_friends(&self) -> Result<Vec<String>> {
        Ok(self.current_user()?.friends.names())
    }

    pub fn list_own_posts(&self) -> Result<Vec<String>> {
        Ok(self.current_user()?.posts.snapshot())
    }

    pub fn view_friend_posts(&self, name: &str) -> Result<Vec<String>> {
        let owner = self.session.current_user()?;
        self.directory.friend_posts(owner, name)
    }

    pub fn current_user(&self) -> Result<&User> {
        self.directory.user(self.session.current_user()?)
    }

    fn current_user_mut(&mut self) -> Result<&mut User> {
        let id = self.session.current_user()?;
        self.directory.user_mut(id)
    }

    /// Ends any session and releases every user record.
    pub fn teardown(&mut self) -> TeardownReport {
        self.session.logout();
        self.directory.teardown()
    }
}

use thiserror::Error;

/// Errors reported by store and session operations.
///
/// Every variant is recoverable; the menu layer turns them into messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("user '{0}' does not exist")]
    UserNotFound(String),

    #[error("friend '{0}' does not exist")]
    FriendNotFound(String),

    #[error("'{0}' is already a friend")]
    AlreadyFriend(String),

    #[error("invalid username or password")]
    AuthFailed,

    #[error("incorrect password")]
    WrongPassword,

    #[error("no posts to remove")]
    EmptyPostList,

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("invalid post content: {0}")]
    InvalidContent(String),

    #[error("no user is logged in")]
    NotLoggedIn,
}

pub type Result<T> = std::result::Result<T, Error>;

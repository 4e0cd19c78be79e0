use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::EMPTY_FRIEND_FIELD;
use crate::users::{Report, UserDirectory};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub users: usize,
    pub friendships: usize,
    pub skipped_friends: usize,
}

/// Seeds `directory` from a bootstrap CSV.
///
/// The first record is a header and is discarded. Each following record is
/// `username,password,friend_1,...,friend_k`; at most `rows` of them are read.
/// A friend must already be in the directory when its row is processed,
/// otherwise it is skipped without complaint.
pub fn load_users_csv<R: Read>(
    directory: &mut UserDirectory,
    source: R,
    rows: usize,
) -> anyhow::Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(source);

    let mut report = LoadReport::default();
    for (index, record) in reader.records().take(rows).enumerate() {
        let row = index + 1;
        let record = record.with_context(|| format!("failed to read bootstrap row {}", row))?;
        if record.len() < 2 {
            bail!("bootstrap row {} needs a username and a password", row);
        }
        let username = &record[0];
        if username.is_empty() {
            bail!("bootstrap row {} has an empty username", row);
        }

        // A repeated username gets its row's friends on the record just inserted.
        let owner = directory.insert(username, &record[1]);
        report.users += 1;

        for friend in record.iter().skip(2) {
            if friend.is_empty() || friend == EMPTY_FRIEND_FIELD {
                continue;
            }
            match directory.add_friend(owner, friend, Report::Silent) {
                Ok(()) => report.friendships += 1,
                Err(_) => report.skipped_friends += 1,
            }
        }
    }

    if report.users < rows {
        warn!(
            expected = rows,
            loaded = report.users,
            "bootstrap source ended before the requested row count"
        );
    }
    info!(
        users = report.users,
        friendships = report.friendships,
        skipped_friends = report.skipped_friends,
        "bootstrap loaded"
    );
    Ok(report)
}

pub fn load_users_csv_path(
    directory: &mut UserDirectory,
    path: &Path,
    rows: usize,
) -> anyhow::Result<LoadReport> {
    let file = File::open(path)
        .with_context(|| format!("failed to open bootstrap file {}", path.display()))?;
    load_users_csv(directory, file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "username,password,friends\n\
                          alice,password1, \n\
                          bob,password2,alice\n";

    #[test]
    fn loads_users_and_friend_aliases() {
        let mut dir = UserDirectory::new();
        let report = load_users_csv(&mut dir, SAMPLE.as_bytes(), 2).unwrap();
        assert_eq!(
            report,
            LoadReport {
                users: 2,
                friendships: 1,
                skipped_friends: 0
            }
        );
        assert_eq!(dir.usernames(), vec!["alice", "bob"]);

        let bob = dir.find("bob").unwrap();
        let alice = dir.find("alice").unwrap();
        let entry = dir.get(bob).unwrap().friends.get("alice").cloned().unwrap();
        assert_eq!(entry.user_id, alice);
        assert!(dir.friend_posts(bob, "alice").unwrap().is_empty());
    }

    #[test]
    fn forward_references_are_skipped() {
        let source = "h\ncarol,password3,dave,alice\ndave,password4,carol\nalice,password1\n";
        let mut dir = UserDirectory::new();
        let report = load_users_csv(&mut dir, source.as_bytes(), 3).unwrap();
        assert_eq!(report.users, 3);
        assert_eq!(report.friendships, 1);
        assert_eq!(report.skipped_friends, 2);

        let carol = dir.find("carol").unwrap();
        let dave = dir.find("dave").unwrap();
        assert!(dir.get(carol).unwrap().friends.is_empty());
        assert_eq!(dir.get(dave).unwrap().friends.names(), vec!["carol"]);
    }

    #[test]
    fn row_may_list_its_own_user() {
        let mut dir = UserDirectory::new();
        let report = load_users_csv(&mut dir, "h\nalice,password1,alice\n".as_bytes(), 1).unwrap();
        assert_eq!(report.friendships, 1);
        assert_eq!(report.skipped_friends, 0);

        let alice = dir.find("alice").unwrap();
        let entry = dir.get(alice).unwrap().friends.get("alice").cloned().unwrap();
        assert_eq!(entry.user_id, alice);
    }

    #[test]
    fn repeated_username_row_links_friends_on_new_record() {
        let source = "h\nalice,password1\nbob,password2\nbob,password3,alice\n";
        let mut dir = UserDirectory::new();
        load_users_csv(&mut dir, source.as_bytes(), 3).unwrap();
        assert_eq!(dir.usernames(), vec!["alice", "bob", "bob"]);

        let bobs: Vec<_> = dir.iter().filter(|u| u.username == "bob").collect();
        assert_eq!(bobs[0].password, "password2");
        assert!(bobs[0].friends.is_empty());
        assert_eq!(bobs[1].password, "password3");
        assert_eq!(bobs[1].friends.names(), vec!["alice"]);
    }

    #[test]
    fn reads_only_the_requested_rows() {
        let mut dir = UserDirectory::new();
        let report = load_users_csv(&mut dir, SAMPLE.as_bytes(), 1).unwrap();
        assert_eq!(report.users, 1);
        assert_eq!(dir.usernames(), vec!["alice"]);
    }

    #[test]
    fn short_source_loads_what_is_there() {
        let mut dir = UserDirectory::new();
        let report = load_users_csv(&mut dir, SAMPLE.as_bytes(), 50).unwrap();
        assert_eq!(report.users, 2);
    }

    #[test]
    fn row_without_password_is_an_error() {
        let mut dir = UserDirectory::new();
        let err = load_users_csv(&mut dir, "h,p\nlonely\n".as_bytes(), 1).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn missing_file_reports_path() {
        let mut dir = UserDirectory::new();
        let err = load_users_csv_path(&mut dir, Path::new("/nonexistent/users.csv"), 1).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/users.csv"));
    }
}

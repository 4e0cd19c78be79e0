//! Text menus driving a [`Textbook`] from any line-based input.
//!
//! The loop mirrors a terminal session: a main menu while logged out, a user
//! menu while logged in. End of input behaves like choosing "Exit".

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::info_span;

use crate::core::errors::Error;
use crate::core::helpers::{validate_password, validate_username};
use crate::posts::PostList;
use crate::Textbook;

const RULE: &str = "******************************************************************";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'a, R, W> {
    textbook: &'a mut Textbook,
    input: R,
    output: W,
    page_size: usize,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(textbook: &'a mut Textbook, input: R, output: W, page_size: usize) -> Self {
        Self {
            textbook,
            input,
            output,
            page_size: page_size.max(1),
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let flow = match self.textbook.session() {
                Some(session) => {
                    let span = info_span!("session", id = %session.id, user = %session.username);
                    let _entered = span.enter();
                    self.user_menu()?
                }
                None => self.main_menu()?,
            };
            if flow == Flow::Exit {
                writeln!(self.output, "Goodbye!")?;
                return Ok(());
            }
        }
    }

    fn main_menu(&mut self) -> anyhow::Result<Flow> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "                   Welcome to Text-Based Facebook")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "1. Register a new User.")?;
        writeln!(self.output, "2. Login with an existing user's information.")?;
        writeln!(self.output, "3. Exit")?;
        let Some(choice) = self.prompt("Enter your choice: ")? else {
            return Ok(Flow::Exit);
        };

        match choice.trim() {
            "1" => self.register(),
            "2" => self.login(),
            "3" => Ok(Flow::Exit),
            _ => {
                writeln!(self.output, "Invalid input. Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn register(&mut self) -> anyhow::Result<Flow> {
        let Some(username) = self.prompt_token("Enter a username: ")? else {
            return Ok(Flow::Exit);
        };
        if let Err(e) = validate_username(&username) {
            self.report(&e)?;
            return Ok(Flow::Continue);
        }
        let Some(password) = self.prompt_password("Enter a password (8-15 characters): ")? else {
            return Ok(Flow::Exit);
        };

        match self.textbook.register(&username, &password) {
            Ok(_) => writeln!(self.output, "**** User Added! ****")?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> anyhow::Result<Flow> {
        let Some(username) = self.prompt_token("Enter username: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(password) = self.prompt_token("Enter password: ")? else {
            return Ok(Flow::Exit);
        };

        match self.textbook.authenticate(&username, &password) {
            Ok(_) => writeln!(self.output, "Welcome {username}! You are now logged in.")?,
            Err(_) => writeln!(self.output, "Invalid username or password. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn user_menu(&mut self) -> anyhow::Result<Flow> {
        let username = self
            .textbook
            .session()
            .map(|s| s.username.clone())
            .unwrap_or_default();
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Welcome {username}:")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "1. Manage profile (change password)")?;
        writeln!(self.output, "2. Manage posts (add/remove)")?;
        writeln!(self.output, "3. Manage friends (add/remove)")?;
        writeln!(self.output, "4. Display a friend's posts")?;
        writeln!(self.output, "5. Logout")?;
        let Some(choice) = self.prompt("Enter your choice: ")? else {
            return Ok(Flow::Exit);
        };

        match choice.trim() {
            "1" => self.change_password(),
            "2" => self.manage_posts(),
            "3" => self.manage_friends(),
            "4" => self.friend_posts(),
            "5" => {
                writeln!(self.output, "Logging out...")?;
                self.textbook.logout();
                Ok(Flow::Continue)
            }
            _ => {
                writeln!(self.output, "Invalid input. Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn change_password(&mut self) -> anyhow::Result<Flow> {
        let Some(old) = self.prompt_token("Enter the old password: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(new) = self.prompt_password("Enter a new password (8-15 characters): ")? else {
            return Ok(Flow::Exit);
        };

        match self.textbook.change_password(&old, &new) {
            Ok(()) => writeln!(self.output, "**** Password Changed! ****")?,
            Err(Error::WrongPassword) => writeln!(self.output, "Incorrect password.")?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn manage_posts(&mut self) -> anyhow::Result<Flow> {
        loop {
            writeln!(
                self.output,
                "1. Add a post\n2. Remove the most recent post\n3. View my posts\n4. Return to previous menu"
            )?;
            let Some(choice) = self.prompt("Enter your input: ")? else {
                return Ok(Flow::Exit);
            };
            match choice.trim() {
                "1" => {
                    let Some(content) = self.prompt("Enter the post content: ")? else {
                        return Ok(Flow::Exit);
                    };
                    match self.textbook.add_post(content.trim()) {
                        Ok(()) => writeln!(self.output, "**** Post Added! ****")?,
                        Err(e) => self.report(&e)?,
                    }
                }
                "2" => match self.textbook.remove_latest_post() {
                    Ok(true) => writeln!(self.output, "**** Post Removed! ****")?,
                    Ok(false) => self.report(&Error::EmptyPostList)?,
                    Err(e) => self.report(&e)?,
                },
                "3" => {
                    let user = self.textbook.current_user()?;
                    if user.posts.is_empty() {
                        writeln!(self.output, "Uh oh, no posts available for {}.", user.username)?;
                    } else if page_posts(&mut self.input, &mut self.output, &user.posts, self.page_size)?
                        == Flow::Exit
                    {
                        return Ok(Flow::Exit);
                    }
                }
                "4" => return Ok(Flow::Continue),
                _ => writeln!(self.output, "Invalid input. Please try again.")?,
            }
        }
    }

    fn manage_friends(&mut self) -> anyhow::Result<Flow> {
        loop {
            writeln!(
                self.output,
                "1. Add a friend\n2. Remove a friend\n3. List my friends\n4. Return to previous menu"
            )?;
            let Some(choice) = self.prompt("Enter your input: ")? else {
                return Ok(Flow::Exit);
            };
            match choice.trim() {
                "1" => {
                    let Some(name) = self.prompt_token("Enter the friend's name: ")? else {
                        return Ok(Flow::Exit);
                    };
                    match self.textbook.add_friend(&name) {
                        Ok(()) => writeln!(self.output, "Friend '{name}' added successfully.")?,
                        Err(e) => self.report(&e)?,
                    }
                }
                "2" => {
                    let Some(name) = self.prompt_token("Enter the friend's name to remove: ")? else {
                        return Ok(Flow::Exit);
                    };
                    match self.textbook.remove_friend(&name) {
                        Ok(true) => writeln!(self.output, "**** Friend Removed! ****")?,
                        Ok(false) => self.report(&Error::FriendNotFound(name))?,
                        Err(e) => self.report(&e)?,
                    }
                }
                "3" => self.list_friends()?,
                "4" => return Ok(Flow::Continue),
                _ => writeln!(self.output, "Invalid input. Please try again.")?,
            }
        }
    }

    fn list_friends(&mut self) -> anyhow::Result<()> {
        let user = self.textbook.current_user()?;
        if user.friends.is_empty() {
            writeln!(self.output, "{} has no friends :(", user.username)?;
            return Ok(());
        }
        for (index, entry) in user.friends.iter().enumerate() {
            writeln!(self.output, "{} - {}", index + 1, entry.friend_username)?;
        }
        Ok(())
    }

    fn friend_posts(&mut self) -> anyhow::Result<Flow> {
        let Some(name) = self.prompt_token("Enter the friend's name to view their posts: ")? else {
            return Ok(Flow::Exit);
        };
        let owner = self.textbook.current_user()?.id;
        match self.textbook.directory().friend_post_list(owner, &name) {
            Ok(posts) if posts.is_empty() => {
                writeln!(self.output, "Friend '{name}' has no posts.")?;
                Ok(Flow::Continue)
            }
            Ok(posts) => page_posts(&mut self.input, &mut self.output, posts, self.page_size),
            Err(Error::FriendNotFound(_)) => {
                writeln!(self.output, "Error: Friend '{name}' not found in your friend list.")?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn report(&mut self, error: &Error) -> anyhow::Result<()> {
        writeln!(self.output, "Error: {error}")?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        prompt_line(&mut self.input, &mut self.output, text)
    }

    /// First whitespace-separated word of the reply, re-asking on blank lines.
    fn prompt_token(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            if let Some(token) = line.split_whitespace().next() {
                return Ok(Some(token.to_string()));
            }
        }
    }

    fn prompt_password(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        loop {
            let Some(password) = self.prompt_token(text)? else {
                return Ok(None);
            };
            match validate_password(&password) {
                Ok(()) => return Ok(Some(password)),
                Err(e) => self.report(&e)?,
            }
        }
    }
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> anyhow::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prints `posts` `page_size` at a time, asking before each further page.
fn page_posts<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    posts: &PostList,
    page_size: usize,
) -> anyhow::Result<Flow> {
    let mut number = 1;
    let mut page = 0;
    loop {
        for post in posts.page(page_size, page) {
            writeln!(output, "Post {number}: {}", post.content)?;
            number += 1;
        }
        if number > posts.len() {
            writeln!(output, "No more posts to display.")?;
            return Ok(Flow::Continue);
        }
        let Some(answer) = prompt_line(input, output, "Do you want to display more posts? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        if answer.trim().eq_ignore_ascii_case("n") {
            writeln!(output, "Stopped displaying posts.")?;
            return Ok(Flow::Continue);
        }
        page += 1;
    }
}

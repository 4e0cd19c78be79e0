pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 15;
pub const MAX_USERNAME_LENGTH: usize = 29;
pub const MAX_POST_LENGTH: usize = 249;

pub const DEFAULT_USERS_CSV: &str = "user_details.csv";
pub const DEFAULT_BOOTSTRAP_ROWS: usize = 50;
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Filler value a bootstrap row uses in place of a friend name.
pub const EMPTY_FRIEND_FIELD: &str = " ";

pub fn users_csv_path() -> String {
    std::env::var("TEXTBOOK_USERS_CSV")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_USERS_CSV.to_string())
}

pub fn bootstrap_rows() -> usize {
    std::env::var("TEXTBOOK_BOOTSTRAP_ROWS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_BOOTSTRAP_ROWS)
}

pub fn posts_page_size() -> usize {
    std::env::var("TEXTBOOK_PAGE_SIZE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

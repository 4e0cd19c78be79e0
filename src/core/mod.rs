pub mod chain;
pub mod db;
pub mod errors;
pub mod helpers;

//! Database module
//!
//! Handles SQLite connection, migrations, and the meal record source.

pub mod connection;
pub mod migrations;
mod source;

pub use connection::{Database, DbError, DbResult};

// Database service module
// SQLite connection and schema for the persisted key-value entries

mod connection;
mod migrations;
mod schema;

pub use connection::Database;

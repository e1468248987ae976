//! JSON document adapter.
//!
//! Stores every record in one `db.json`-style file shaped as
//! `{"projects": [...], "users": [...]}`. Each operation reads the whole
//! document, applies its change, and atomically replaces the file. Record
//! fields this crate does not model are carried through untouched.

mod store;

pub use store::{DEFAULT_FILE_NAME, DocumentError, JsonDocumentStore};

//! Resume records: persistence and the HTTP surface over the builder core.

pub mod handlers;
pub mod store;

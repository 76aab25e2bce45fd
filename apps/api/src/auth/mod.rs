//! Account lifecycle: registration, email verification, sessions and
//! password resets.

pub mod handlers;
pub mod password;
pub mod session;

//! The resume builder core: document model, step editors, wizard controller
//! and preview renderer.

pub mod document;
pub mod preview;
pub mod steps;
pub mod wizard;

//! Infrastructure layer
//!
//! Handles filesystem side effects. This module is the only place where
//! output-directory writes occur.

pub mod filesystem;

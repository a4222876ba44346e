//! Access to remote project-tracking sites.

pub mod client;
pub mod query;

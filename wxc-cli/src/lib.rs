//! Command-line administration of Webex Calling workspaces: caller-ID
//! listing and updates, and bulk workspace provisioning from CSV.

pub mod callerid;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod csv_input;
pub mod error;
pub mod logging;
pub mod prompts;
pub mod report;
pub mod resolve;

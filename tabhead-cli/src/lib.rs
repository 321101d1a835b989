//! Command-line front end for `tabhead`.
//!
//! - `headers`: inspect header rows of tabular files
//! - `serve`: serve a directory tree over HTTP

pub mod cli;
pub mod config;
pub mod logging;
pub mod server;

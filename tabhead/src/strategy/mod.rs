//! Header source strategies.
//!
//! Only the filesystem strategy exists. A source trait can be introduced once
//! a second concrete strategy (stdin, HTTP) needs one.

pub mod fs;

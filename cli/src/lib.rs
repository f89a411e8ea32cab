//! Command line front end for the posts client.

pub mod cli;
pub mod commands;
pub mod utils;

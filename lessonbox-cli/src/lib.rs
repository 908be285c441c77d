//! Command-line client for lessonbox: checks lesson solutions locally and
//! drives a running server's todo API.

pub mod api_client;
pub mod check;
pub mod config;

//! webworker - single-request HTTP/1.1 file server
//!
//! Core library: request parsing, content classification and response
//! streaming for one accepted connection at a time.

pub mod config;
pub mod http;
pub mod server;

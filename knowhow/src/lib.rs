//! knowhow's library API. The binary is a thin wrapper around
//! [`site::generate`]; the individual stages are exposed mainly for testing.
pub mod cli;
pub mod config;
pub mod error;
pub mod nav;
pub mod page;
pub mod site;
pub mod tree;
pub mod utils;

//! Job posting extraction: turns a job listing URL into a canonical [`JobRecord`]
//! by combining a language model with URL rules and HTML heuristics, then uses
//! the record to find and contact people on the hiring team.

pub mod config;
pub mod core;
pub mod extraction;
pub mod logging;
pub mod outreach;
pub mod utils;
pub mod web;

pub use config::ConfigManager;
pub use extraction::{JobParser, JobRecord};
pub use web::start_web_server;

// src/outreach/mod.rs
//! Finding people on the hiring team and drafting notes to them, driven by a parsed JobRecord.

use serde::{Deserialize, Serialize};

pub mod message_drafter;
pub mod profile_search;

pub use message_drafter::draft_messages;
pub use profile_search::ProfileSearch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub title: String,
    pub url: String,
    pub query_type: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftedMessage {
    #[serde(flatten)]
    pub profile: Profile,
    pub message: String,
}

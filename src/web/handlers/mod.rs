pub mod job_handlers;
pub mod outreach_handlers;

pub use job_handlers::*;
pub use outreach_handlers::*;

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::uninlined_format_args
)]

pub mod clock;
pub mod config;
pub mod error;
pub mod sessions;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CleanupConfig;
pub use error::{Error, Result};
pub use sessions::{
    InMemorySessionStore, SessionRecord, SessionRegistry, SessionStatus, SessionStore,
};

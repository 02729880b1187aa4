#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod session;

pub use content::{
    ContentProvider, GenerativeConfig, GenerativeContentProvider, SampleContentProvider,
};
pub use error::ContentError;
pub use session::{CountdownTimer, SessionConfig, SessionController};

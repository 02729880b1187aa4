mod controller;
mod timer;

// Public API of the session subsystem.
pub use controller::{SessionConfig, SessionController};
pub use timer::CountdownTimer;

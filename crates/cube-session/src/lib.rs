//! Async runtime around the wisdom cube controller.
//!
//! Owns the deferred completions the controller asks for, loads config and
//! catalogue, and forwards every state change to a [`Presenter`].

pub mod config;
pub mod deferred;
pub mod error;
pub mod presenter;
pub mod session;

pub use config::{CONFIG_ENV, CubeConfig};
pub use deferred::{Deferred, DeferredAction};
pub use error::{Result, SessionError};
pub use presenter::Presenter;
pub use session::{CubeSession, InputEvent, SessionCommand, SessionHandle, SessionSummary};

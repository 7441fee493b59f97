//! Request/response exchanges with a device.
//!
//! One exchange writes one frame and waits, bounded by a timeout, for one
//! reply frame. There is no retry and no resynchronisation: a failed
//! exchange is reported and the caller decides what to do next.

pub mod driver;
pub mod error;
pub mod session;

#[cfg(feature = "async")]
pub mod async_driver;

pub use driver::{execute, READ_CHUNK_SIZE};
pub use error::{CommandError, Result, SessionError};
pub use session::{Session, SessionConfig, DEFAULT_TIMEOUT};

#[cfg(feature = "async")]
pub use async_driver::execute_async;

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Build provider table → Bind listener → Serve
//!
//! Shutdown:
//!     SIGTERM/Ctrl+C → Shutdown::trigger → server drains in-flight → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;

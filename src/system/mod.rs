//! # System Interaction Layer
//!
//! The boundary between the core logic and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: runs helper executables to capture their output, and hands
//!   the process over to the resolved command (`exec` on Unix).

pub mod executor;

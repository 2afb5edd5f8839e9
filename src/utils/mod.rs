//! # Utility Modules
//!
//! Supporting utilities for buffer handling and logging.
//!
//! ## Components
//! - **Bytes**: Bounds validation, big-endian field reads, hex dumps
//! - **Logging**: Structured logging configuration (tracing)

pub mod bytes;
pub mod logging;

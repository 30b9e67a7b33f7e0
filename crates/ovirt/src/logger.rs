//! Pluggable sink for request and response messages.
//!
//! The client reports each request line, the response status and, in debug
//! mode, the full response body through a [`Logger`]. The default
//! [`TracingLogger`] forwards to `tracing`, so the application's subscriber
//! decides where the messages end up.

use std::fmt;
use std::io::Write;

/// Receiver of the client's request and status messages.
///
/// Messages arrive preformatted as [`fmt::Arguments`]; use
/// [`format_args!`] to call these directly.
pub trait Logger: Send + Sync {
    /// Verbose diagnostics: request lines and, in debug mode, response bodies.
    fn debug(&self, args: fmt::Arguments<'_>);

    /// Response status lines.
    fn status(&self, args: fmt::Arguments<'_>);
}

/// Forwards messages to `tracing` events with the `ovirt` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target: "ovirt", "{}", args);
    }

    fn status(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "ovirt", "{}", args);
    }
}

/// Writes messages as lines on standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn debug(&self, args: fmt::Arguments<'_>) {
        // Write errors are ignored.
        let _ = writeln!(std::io::stdout().lock(), "DEBUG {}", args);
    }

    fn status(&self, args: fmt::Arguments<'_>) {
        let _ = writeln!(std::io::stdout().lock(), "{}", args);
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _args: fmt::Arguments<'_>) {}

    fn status(&self, _args: fmt::Arguments<'_>) {}
}

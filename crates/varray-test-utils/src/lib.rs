//! Test fixtures and log capture for varray development.
//!
//! Provides typed array builders ([`fixtures`]) and [`capture_logs`], which
//! runs a closure under a scoped subscriber and returns everything it
//! logged, so tests can assert on warnings.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

pub use fixtures::{
    float4_vector, float8_matrix, float8_vector, float8_vector_with_nulls, int2_vector,
    int4_matrix, int4_vector, int8_vector,
};

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        let bytes = match self.0.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut guard) => guard.extend_from_slice(buf),
            Err(poisoned) => poisoned.into_inner().extend_from_slice(buf),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return its result together
/// with every event it logged at `TRACE` or above.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_warnings() {
        let (v, logs) = capture_logs(|| {
            tracing::warn!("something degenerate");
            7
        });
        assert_eq!(v, 7);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("something degenerate"));
    }

    #[test]
    fn captures_nothing_when_silent() {
        let ((), logs) = capture_logs(|| {});
        assert!(logs.is_empty());
    }
}

//! `tracing` output for the browser devtools console
//!
//! The fmt layer runs without timestamps and without ANSI colours; each
//! formatted event is forwarded to the console method matching its level.

use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wasm_bindgen::JsValue;

/// Filter used when none is stored in the browser
pub const DEFAULT_FILTER: &str = "info";

/// Buffers one formatted event and hands it to the console on drop
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    const fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        let line = JsValue::from_str(text.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// [`MakeWriter`] producing one [`ConsoleWriter`] per event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Parse filter directives, falling back to [`DEFAULT_FILTER`]
#[must_use]
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the console subscriber
///
/// `directives` is an `EnvFilter` string such as `debug` or
/// `console_client=trace`, read from local storage by the caller.
pub fn init(directives: Option<&str>) {
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(ConsoleMakeWriter);

    if tracing_subscriber::registry()
        .with(filter_from(directives))
        .with(layer)
        .try_init()
        .is_err()
    {
        web_sys::console::warn_1(&JsValue::from_str("Logger already installed"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "info")]
    #[case(Some(""), "info")]
    #[case(Some("  "), "info")]
    #[case(Some("debug"), "debug")]
    #[case(Some("console=loud"), "info")]
    fn test_filter_from(#[case] directives: Option<&str>, #[case] expected: &str) {
        assert_eq!(filter_from(directives).to_string(), expected);
    }
}

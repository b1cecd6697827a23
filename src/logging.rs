//! Browser Logging
//!
//! `tracing` subscriber that formats events with `tracing-subscriber` and
//! writes each line to the browser console at the matching severity.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter used when the configured one does not parse
pub const FALLBACK_FILTER: &str = "rewards_ui=info";

/// Install the global subscriber
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|e| {
        web_sys::console::warn_1(
            &format!("Invalid log filter {:?}: {}; using {}", config.level, e, FALLBACK_FILTER).into(),
        );
        EnvFilter::new(FALLBACK_FILTER)
    });

    // SystemTime is unavailable on wasm32-unknown-unknown, hence no timer
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .try_init();

    if let Err(e) = result {
        web_sys::console::warn_1(&format!("Logging already initialized: {}", e).into());
    }
}

/// Hands out one [`ConsoleWriter`] per event
#[derive(Clone, Copy, Debug, Default)]
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

/// Buffers one formatted event and emits it on flush or drop
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    /// Drain the buffered text, without the trailing newline
    fn take_line(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
        self.buffer.clear();
        Some(line).filter(|l| !l.is_empty())
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(line) = self.take_line() {
            let line = line.into();
            if self.level == Level::ERROR {
                web_sys::console::error_1(&line);
            } else if self.level == Level::WARN {
                web_sys::console::warn_1(&line);
            } else if self.level > Level::INFO {
                // DEBUG and TRACE compare greater (more verbose) than INFO
                web_sys::console::debug_1(&line);
            } else {
                web_sys::console::log_1(&line);
            }
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_take_line_strips_newline() {
        let mut writer = ConsoleWriter::new(Level::INFO);
        writer.write_all(b" INFO rewards_ui: loaded\n").unwrap();

        assert_eq!(writer.take_line().as_deref(), Some(" INFO rewards_ui: loaded"));
        assert_eq!(writer.take_line(), None);
    }

    #[test]
    fn test_blank_output_is_skipped() {
        let mut writer = ConsoleWriter::new(Level::WARN);
        writer.write_all(b"\n").unwrap();
        assert_eq!(writer.take_line(), None);
    }

    #[test]
    fn test_fallback_filter_parses() {
        assert!(EnvFilter::try_new(FALLBACK_FILTER).is_ok());
    }
}

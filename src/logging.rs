//! Browser Logging
//!
//! Routes `tracing` output to the browser console and keeps a bounded ring
//! of recent lines for the diagnostics panel.

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Lines kept for the diagnostics panel
const MAX_RECENT_LINES: usize = 200;

static RECENT: Mutex<VecDeque<String>> = Mutex::new(VecDeque::new());

/// Install the console subscriber (no timestamps: wasm has no system clock)
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter)
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(e) = result {
        web_sys::console::warn_1(&format!("[LOG] subscriber already installed: {}", e).into());
    }
}

/// Most recent log lines, oldest first
pub fn recent_lines() -> Vec<String> {
    match RECENT.lock() {
        Ok(lines) => lines.iter().cloned().collect(),
        Err(_) => Vec::new(),
    }
}

fn remember(line: String) {
    if let Ok(mut lines) = RECENT.lock() {
        push_bounded(&mut lines, line, MAX_RECENT_LINES);
    }
}

fn push_bounded(lines: &mut VecDeque<String>, line: String, max: usize) {
    while lines.len() >= max {
        lines.pop_front();
    }
    lines.push_back(line);
}

struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine::new(*meta.level())
    }
}

/// Buffers one formatted event, emitted on drop
struct ConsoleLine {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleLine {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf).trim_end().to_string();
        if line.is_empty() {
            return;
        }

        let js_line = line.as_str().into();
        if self.level == Level::ERROR {
            web_sys::console::error_1(&js_line);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&js_line);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&js_line);
        } else {
            web_sys::console::debug_1(&js_line);
        }
        remember(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_drops_oldest() {
        let mut lines = VecDeque::new();
        for i in 0..5 {
            push_bounded(&mut lines, format!("line {}", i), 3);
        }
        let kept: Vec<_> = lines.into_iter().collect();
        assert_eq!(kept, vec!["line 2", "line 3", "line 4"]);
    }
}

//! `tracing` output routed to the browser console

use std::io;

use tracing_subscriber::fmt;

/// Buffers one formatted event and logs it on drop
#[derive(Default)]
struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&line.into());
        }
    }
}

/// Install the console subscriber; later calls are no-ops
pub fn init() {
    let _ = fmt()
        .with_writer(ConsoleWriter::default)
        .without_time()
        .with_target(false)
        .try_init();
}

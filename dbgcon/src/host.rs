//! Host stand-ins for the UART and the tick counter.

use std::io::{self, Read as IoRead, Write as IoWrite};
use std::time::Instant;

use debug_utils::Clock;
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};

/// stdout as a debug output
pub struct StdoutSink {
    out: io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for StdoutSink {
    type Error = ErrorKind;
}

impl Write for StdoutSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.out.write(buf).map_err(|_| ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.out.flush().map_err(|_| ErrorKind::Other)
    }
}

/// stdin as a console input.
///
/// `read_ready` peeks one byte, so it blocks like a terminal read would.
/// At end of input it reports nothing available and `is_eof` turns true.
/// A read error ends input too; it is kept for the caller to pick up with
/// `take_error`, since the source is polled with the logger lock held.
pub struct StdinSource<R> {
    bytes: io::Bytes<R>,
    peeked: Option<u8>,
    eof: bool,
    last_error: Option<io::Error>,
}

impl StdinSource<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: IoRead> StdinSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            peeked: None,
            eof: false,
            last_error: None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.eof && self.peeked.is_none()
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }

    fn fill(&mut self) {
        if self.peeked.is_some() || self.eof {
            return;
        }
        match self.bytes.next() {
            Some(Ok(byte)) => self.peeked = Some(byte),
            Some(Err(e)) => {
                self.last_error = Some(e);
                self.eof = true;
            }
            None => self.eof = true,
        }
    }
}

impl<R> ErrorType for StdinSource<R> {
    type Error = ErrorKind;
}

impl<R: IoRead> ReadReady for StdinSource<R> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.fill();
        Ok(self.peeked.is_some())
    }
}

impl<R: IoRead> Read for StdinSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.fill();
        match self.peeked.take() {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Milliseconds since the tool started
pub struct HostClock {
    start: Instant,
}

impl HostClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for HostClock {
    fn millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

//! Fake collaborators for unit tests.

use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_io::{ErrorType, Read, ReadReady, Write};

use crate::debug::DebugUtils;

/// Output sink collecting everything written to it
#[derive(Default)]
pub(crate) struct TestSink {
    data: Vec<u8>,
}

impl TestSink {
    pub(crate) fn as_str(&self) -> &str {
        core::str::from_utf8(&self.data).unwrap()
    }

    pub(crate) fn lines(&self) -> Vec<&str> {
        self.as_str().lines().collect()
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }
}

impl ErrorType for TestSink {
    type Error = Infallible;
}

impl Write for TestSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Console input that hands out a fixed byte string, one byte per read
pub(crate) struct TestInput<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TestInput<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ErrorType for TestInput<'_> {
    type Error = Infallible;
}

impl Read for TestInput<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || self.pos >= self.data.len() {
            return Ok(0);
        }
        buf[0] = self.data[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

impl ReadReady for TestInput<'_> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pos < self.data.len())
    }
}

/// 1h 2m 3s 4ms after start
pub(crate) fn fixed_clock() -> u64 {
    3_723_004
}

pub(crate) fn test_debug() -> DebugUtils<TestSink, fn() -> u64> {
    DebugUtils::new(TestSink::default(), fixed_clock as fn() -> u64)
}

use super::{RingBuffer, RingError};
use std::io;

impl RingBuffer<'_> {
    /// Appends all of `bytes` or none of them.
    pub fn enqueue_slice(&mut self, bytes: &[u8]) -> Result<(), RingError> {
        if !self.is_initialized() {
            return Err(RingError::InvalidState);
        }
        if bytes.len() > self.free() {
            return Err(RingError::Full);
        }

        for &byte in bytes {
            self.push(byte);
        }
        Ok(())
    }

    /// Moves up to `out.len()` bytes out of the ring, oldest first, and
    /// returns how many were written.
    pub fn dequeue_into(&mut self, out: &mut [u8]) -> usize {
        let mut n = 0;
        for slot in out.iter_mut() {
            let Ok(byte) = self.dequeue() else {
                break;
            };
            *slot = byte;
            n += 1;
        }
        n
    }
}

/// Reject-policy writer: takes what fits and reports `WouldBlock` when full.
impl io::Write for RingBuffer<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.is_initialized() {
            return Err(RingError::InvalidState.into());
        }

        let n = buf.len().min(self.free());
        if n == 0 {
            return Err(RingError::Full.into());
        }

        self.enqueue_slice(&buf[..n])?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for RingBuffer<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.dequeue_into(buf))
    }
}

use super::ByteConsumer;

/// Splits a byte stream into newline-terminated commands.
///
/// Complete lines are handed to the callback without the terminator (a
/// trailing `\r` is stripped too). A line longer than `max_len` is dropped:
/// its bytes are refused until the next `\n` and the callback never sees it.
pub struct LineConsumer<F> {
    line: Vec<u8>,
    max_len: usize,
    overflowed: bool,
    lines_dropped: u64,
    on_line: F,
}

impl<F> LineConsumer<F>
where
    F: FnMut(&[u8]) + Send,
{
    pub fn new(max_len: usize, on_line: F) -> Self {
        Self {
            line: Vec::with_capacity(max_len),
            max_len,
            overflowed: false,
            lines_dropped: 0,
            on_line,
        }
    }

    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.line
    }

    #[inline]
    pub fn lines_dropped(&self) -> u64 {
        self.lines_dropped
    }

    fn finish_line(&mut self) {
        if self.overflowed {
            self.overflowed = false;
            self.lines_dropped += 1;
            tracing::warn!(max_len = self.max_len, "dropped overlong line");
        } else {
            let line = match self.line.last() {
                Some(b'\r') => &self.line[..self.line.len() - 1],
                _ => &self.line[..],
            };
            (self.on_line)(line);
        }
        self.line.clear();
    }
}

impl<F> ByteConsumer for LineConsumer<F>
where
    F: FnMut(&[u8]) + Send,
{
    fn consume(&mut self, byte: u8) -> bool {
        if byte == b'\n' {
            let accepted = !self.overflowed;
            self.finish_line();
            return accepted;
        }
        if self.overflowed {
            return false;
        }
        if self.line.len() == self.max_len {
            self.overflowed = true;
            return false;
        }
        self.line.push(byte);
        true
    }

    fn name(&self) -> &str {
        "line"
    }
}

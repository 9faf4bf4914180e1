use super::RingError;
use std::fmt;

/// Fixed-capacity byte ring over caller-owned storage.
///
/// The buffer never allocates. It borrows `capacity` bytes from the caller
/// for its whole lifetime and keeps an explicit `count`, so `head == tail` is
/// never used to tell "empty" from "full".
pub struct RingBuffer<'a> {
    buf: &'a mut [u8],
    capacity: usize,
    count: usize,
    head: usize,
    tail: usize,
}

impl Default for RingBuffer<'_> {
    fn default() -> Self {
        Self::uninit()
    }
}

impl<'a> RingBuffer<'a> {
    /// An unbound buffer: capacity 0, no storage. Every data operation
    /// returns [`RingError::InvalidState`] until [`init`](Self::init) is called.
    pub fn uninit() -> Self {
        Self {
            buf: Default::default(),
            capacity: 0,
            count: 0,
            head: 0,
            tail: 0,
        }
    }

    /// Binds the whole of `storage` in one step.
    pub fn new(storage: &'a mut [u8]) -> Self {
        Self {
            capacity: storage.len(),
            buf: storage,
            count: 0,
            head: 0,
            tail: 0,
        }
    }

    /// Binds the first `capacity` bytes of `storage` and clears all state.
    ///
    /// Fails without touching the buffer when `storage` is shorter than
    /// `capacity`. A capacity of zero is accepted and yields a degenerate
    /// buffer that is both full and empty and never reports initialized.
    pub fn init(&mut self, capacity: usize, storage: &'a mut [u8]) -> Result<(), RingError> {
        if storage.len() < capacity {
            return Err(RingError::InvalidArgument {
                capacity,
                storage_len: storage.len(),
            });
        }

        let (region, _) = storage.split_at_mut(capacity);
        *self = Self::new(region);
        Ok(())
    }

    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.capacity > 0 && !self.buf.is_empty()
    }

    /// Forgets every live byte. Storage contents are left as they are.
    #[inline]
    pub fn reset(&mut self) {
        self.count = 0;
        self.head = 0;
        self.tail = 0;
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn free(&self) -> usize {
        self.capacity - self.count
    }

    /// `>=` so a broken count reads as full, never as empty.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Appends `byte`, rejecting it when the buffer is full.
    #[inline]
    pub fn enqueue(&mut self, byte: u8) -> Result<(), RingError> {
        if !self.is_initialized() {
            return Err(RingError::InvalidState);
        }
        if self.is_full() {
            return Err(RingError::Full);
        }

        self.push(byte);
        Ok(())
    }

    /// Appends `byte`, discarding the oldest live byte first when full.
    ///
    /// Returns the discarded byte, so under sustained overflow the buffer
    /// always holds the latest `capacity` bytes.
    #[inline]
    pub fn enqueue_overwrite(&mut self, byte: u8) -> Result<Option<u8>, RingError> {
        if !self.is_initialized() {
            return Err(RingError::InvalidState);
        }

        let evicted = if self.is_full() {
            let old = self.buf[self.head];
            self.head = self.advance(self.head);
            self.count -= 1;
            Some(old)
        } else {
            None
        };

        self.push(byte);
        Ok(evicted)
    }

    #[inline]
    pub fn dequeue(&mut self) -> Result<u8, RingError> {
        if !self.is_initialized() {
            return Err(RingError::InvalidState);
        }
        if self.is_empty() {
            return Err(RingError::Empty);
        }

        let byte = self.buf[self.head];
        self.head = self.advance(self.head);
        self.count -= 1;
        Ok(byte)
    }

    /// Reads the live byte `offset` places after the oldest one.
    ///
    /// `offset` is bounded by the live count, not the capacity.
    #[inline]
    pub fn peek(&self, offset: usize) -> Result<u8, RingError> {
        if !self.is_initialized() {
            return Err(RingError::InvalidState);
        }
        if self.is_empty() {
            return Err(RingError::Empty);
        }
        if offset >= self.count {
            return Err(RingError::OutOfRange {
                offset,
                count: self.count,
            });
        }

        Ok(self.buf[(self.head + offset) % self.capacity])
    }

    /// The live bytes oldest-first, split where they wrap.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        if self.count == 0 {
            return (&[], &[]);
        }

        let contiguous = self.capacity - self.head;
        if self.count <= contiguous {
            (&self.buf[self.head..self.head + self.count], &[])
        } else {
            (&self.buf[self.head..self.capacity], &self.buf[..self.tail])
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        let (front, back) = self.as_slices();
        Iter {
            front: front.iter(),
            back: back.iter(),
        }
    }

    // Callers have checked that the buffer is initialized and not full.
    #[inline(always)]
    pub(super) fn push(&mut self, byte: u8) {
        self.buf[self.tail] = byte;
        self.tail = self.advance(self.tail);
        self.count += 1;
    }

    #[inline(always)]
    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity
    }
}

impl fmt::Debug for RingBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Live<'r>(Iter<'r>);

        impl fmt::Debug for Live<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.clone()).finish()
            }
        }

        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("count", &self.count)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("live", &Live(self.iter()))
            .finish()
    }
}

impl<'r> IntoIterator for &'r RingBuffer<'_> {
    type Item = u8;
    type IntoIter = Iter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Oldest-first iterator over the live bytes of a [`RingBuffer`].
#[derive(Debug, Clone)]
pub struct Iter<'r> {
    front: std::slice::Iter<'r, u8>,
    back: std::slice::Iter<'r, u8>,
}

impl Iterator for Iter<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.front.next().or_else(|| self.back.next()).copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.front.len() + self.back.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

use super::ByteConsumer;
use crate::ring::RingBuffer;

pub struct ByteDispatcher {
    consumers: Vec<Box<dyn ByteConsumer>>,
}

impl Default for ByteDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteDispatcher {
    pub fn new() -> Self {
        Self {
            consumers: Vec::new(),
        }
    }

    pub fn add_consumer<C: ByteConsumer + 'static>(&mut self, consumer: C) {
        tracing::debug!(consumer = consumer.name(), "registered byte consumer");
        self.consumers.push(Box::new(consumer));
    }

    pub fn consumer_names(&self) -> impl Iterator<Item = &str> {
        self.consumers.iter().map(|c| c.name())
    }

    /// Empties the ring into every consumer, then flushes them.
    #[inline]
    pub fn drain(&mut self, ring: &mut RingBuffer<'_>) -> DrainStats {
        let mut stats = DrainStats::default();
        while let Ok(byte) = ring.dequeue() {
            self.deliver(byte, &mut stats);
        }
        for consumer in &mut self.consumers {
            consumer.flush();
        }
        tracing::trace!(
            read = stats.bytes_read,
            delivered = stats.bytes_delivered,
            failed = stats.bytes_failed,
            "drained ring"
        );
        stats
    }

    /// Moves at most `limit` bytes. Consumers are not flushed.
    #[inline]
    pub fn drain_batch(&mut self, ring: &mut RingBuffer<'_>, limit: usize) -> DrainStats {
        let mut stats = DrainStats::default();
        for _ in 0..limit {
            let Ok(byte) = ring.dequeue() else {
                break;
            };
            self.deliver(byte, &mut stats);
        }
        stats
    }

    #[inline]
    fn deliver(&mut self, byte: u8, stats: &mut DrainStats) {
        stats.bytes_read += 1;
        for consumer in &mut self.consumers {
            if consumer.consume(byte) {
                stats.bytes_delivered += 1;
            } else {
                stats.bytes_failed += 1;
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainStats {
    pub bytes_read: u64,
    pub bytes_delivered: u64,
    pub bytes_failed: u64,
}

impl DrainStats {
    #[inline]
    pub fn success_rate(&self) -> f64 {
        let total = self.bytes_delivered + self.bytes_failed;
        if total == 0 {
            1.0
        } else {
            self.bytes_delivered as f64 / total as f64
        }
    }

    pub fn merge(&mut self, other: DrainStats) {
        self.bytes_read += other.bytes_read;
        self.bytes_delivered += other.bytes_delivered;
        self.bytes_failed += other.bytes_failed;
    }
}

use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("ring buffer is not initialized")]
    InvalidState,

    #[error("storage of {storage_len} bytes cannot back a capacity of {capacity} bytes")]
    InvalidArgument { capacity: usize, storage_len: usize },

    #[error("ring buffer is full")]
    Full,

    #[error("ring buffer is empty")]
    Empty,

    #[error("peek offset {offset} is out of range for {count} live bytes")]
    OutOfRange { offset: usize, count: usize },
}

impl From<RingError> for io::Error {
    fn from(err: RingError) -> Self {
        let kind = match err {
            RingError::Full | RingError::Empty => io::ErrorKind::WouldBlock,
            RingError::InvalidArgument { .. } | RingError::OutOfRange { .. } => {
                io::ErrorKind::InvalidInput
            }
            RingError::InvalidState => io::ErrorKind::NotConnected,
        };
        io::Error::new(kind, err)
    }
}

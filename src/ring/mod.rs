pub mod buffer;
pub mod io;
pub mod ring_error;

pub use buffer::{Iter, RingBuffer};
pub use ring_error::*;

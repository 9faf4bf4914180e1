pub mod dispatcher;
pub mod line;

pub use dispatcher::{ByteDispatcher, DrainStats};
pub use line::LineConsumer;

pub trait ByteConsumer: Send {
    fn consume(&mut self, byte: u8) -> bool;

    fn flush(&mut self) {}

    fn name(&self) -> &str;
}

//! Dialer implementations.

pub mod memory;
pub mod serial;

pub use memory::MemoryDialer;
pub use serial::SerialDialer;

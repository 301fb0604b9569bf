//! Client registry implementations
//!
//! - `inmemory`: fixed-size slot table behind one mutex

mod inmemory;

pub use inmemory::InMemoryClientRegistry;

//! TCP chat server library.
//!
//! Clients send pipe-delimited frames; every frame is reformatted and
//! broadcast to all connected clients, the sender included.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod error;

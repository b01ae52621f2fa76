//! UCI (Universal Chess Interface) Protocol
//!
//! Text front end for the engine: position setup, strength options and
//! `go`, over stdin/stdout.

pub mod protocol;

pub use protocol::UCI;

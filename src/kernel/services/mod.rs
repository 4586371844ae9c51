//! Services layer (ports + adapters).
//!
//! - `ports`: contracts/types used across the app (kernel-facing).
//! - `adapters`: network/runtime implementations (IO/async).

pub mod adapters;
pub mod ports;

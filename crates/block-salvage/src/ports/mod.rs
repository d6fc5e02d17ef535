//! # Ports Layer
//!
//! Defines the port traits for the Block Salvage subsystem.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (salvage protocol exposed to the host)
//! - `outbound.rs` - Driven ports (file I/O, verification, free space)

pub mod inbound;
pub mod outbound;

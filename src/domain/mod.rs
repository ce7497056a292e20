//! Domain Layer
//!
//! The package model and its rules, free of I/O and serialization concerns.
//! External effects (file system, manifest codec, event delivery) enter
//! through the ports.

pub mod entities;
pub mod package;
pub mod ports;
pub mod projection;
pub mod records;
pub mod value_objects;

//! # Stow Driver
//!
//! Storage driver contract for stow backends.
//!
//! A stow driver persists one value behind one key in some store. The crate
//! splits that job across three seams:
//!
//! - [`StorageEngine`]: the backend extension points (init, store, hydrate,
//!   clear, unload), operating on raw bytes.
//! - [`Serializer`]: converts between the application value and bytes, with an
//!   optional validator.
//! - [`StorageDriver`]: the front end users call. It tracks initialization,
//!   applies the serializer and optional [`StoreProcessor`], and delegates the
//!   byte-level work to the engine.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod driver;
pub mod engine;
pub mod error;
pub mod memory;
pub mod serialize;

pub use driver::StorageDriver;
pub use engine::StorageEngine;
pub use error::DriverError;
pub use memory::MemoryEngine;
pub use serialize::{JsonSerializer, Serializer, StoreProcessor};

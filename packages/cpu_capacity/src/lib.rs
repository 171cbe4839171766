#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Runtime capacity overrides for a fixed set of processors.
//!
//! Schedulers on heterogeneous systems weigh each processor by a relative capacity value, with
//! [`MAX_CAPACITY`] assigned to the fastest processors. This package lets an operator override those
//! values using a compact text format, validates the overrides and applies them to a live table of
//! per-processor values, and restores the original values when the overrides are no longer wanted.
//!
//! This is part of the [Folo project](https://github.com/folo-rs/folo) that provides mechanisms for
//! high-performance hardware-aware programming in Rust.
//!
//! # Format
//!
//! Overrides are written as a comma-separated list of `unit:capacity` or `first-last:capacity`
//! segments, for example `0-3:1024,4-7:512,8:256`. See the [`capacity_spec`] package for the full
//! syntax.
//!
//! # Quick start
//!
//! ```
//! // examples/cpu_capacity_readme.rs
//! use cpu_capacity::{Session, UnitStore};
//! use new_zealand::nz;
//!
//! let session = Session::new(UnitStore::new(nz!(8)));
//! let reader = session.reader();
//!
//! session.set("0-3:1024,4-7:512").unwrap();
//! assert_eq!(reader.get(5), Some(512));
//! assert_eq!(session.get(), "0-3:1024,4-7:512");
//!
//! // Restores every processor to the value it had before the first change.
//! session.teardown();
//! assert_eq!(reader.get(5), Some(1024));
//! ```
//!
//! # Failure behavior
//!
//! Segments are applied left to right and processing stops at the first invalid segment or unit.
//! Values written before the failure remain in effect; the returned [`ApplyError`] identifies the
//! segment that failed. Tearing down the session always reverts to the values that were in place
//! before the first change, no matter how many changes (successful or not) came after.
//!
//! # Concurrency
//!
//! A [`Session`] serializes all changes and queries through a single lock, so concurrent callers
//! never observe or produce a half-applied list. The live values themselves can be read without the
//! lock through a [`CapacityReader`], the way a scheduler would consume them.
//!
//! # Logging
//!
//! Changes are reported via the [`tracing`](https://docs.rs/tracing) crate. This package never
//! installs a subscriber; that is up to the application.

mod batch;
mod error;
mod reader;
mod session;
mod session_builder;
mod unit_store;

pub use batch::*;
pub use capacity_spec::{Capacity, UnitId};
pub use error::*;
pub use reader::*;
pub use session::*;
pub use session_builder::*;
pub use unit_store::*;

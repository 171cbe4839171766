#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Utilities for parsing and emitting capacity override lists, a compact text format for assigning
//! a relative capacity value to individual processors or to ranges of processors.
//!
//! Example capacity override list: `0-3:1024,4-7:512,8:256`
//!
//! # Format
//!
//! The value is a comma-separated list of zero or more segments, where each segment is either:
//!
//! * a single unit with a capacity (e.g. `0:512`)
//! * an inclusive range of units with a capacity (e.g. `0-3:1024`)
//!
//! Every number is an unsigned integer literal in decimal, hexadecimal (`0x` prefix) or octal
//! (leading `0`) notation. Whitespace around segments and around the whole list is ignored, as are
//! empty segments. Whitespace inside a segment is not allowed.
//!
//! Unit identifiers are of size `u32`, capacity values of size `u64`. This package only checks the
//! syntax. Whether a unit exists or a capacity is within bounds is up to whoever applies the list.
//!
//! # Example
//!
//! ```
//! use capacity_spec::CapacityToken;
//!
//! let tokens = capacity_spec::parse("0-3:1024, 4-7:0x200,8:256").unwrap();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1], CapacityToken::new(4, 7, 512).unwrap());
//!
//! assert_eq!(capacity_spec::emit(tokens), "0-3:1024,4-7:512,8:256");
//! ```
//!
//! Segments can also be processed one by one, which is what an applier does when it wants to act on
//! each segment before looking at the next one:
//!
//! ```
//! for segment in capacity_spec::segments(" 0:1 ,, 2-3:4 ") {
//!     let token = capacity_spec::parse_token(segment.text()).unwrap();
//!     println!("segment {} assigns {} to units {:?}", segment.index(), token.capacity(), token.units());
//! }
//! ```

mod emit;
mod error;
mod integer;
mod parse;
mod primitive_types;
mod token;

pub use emit::*;
pub use error::*;
pub use integer::*;
pub use parse::*;
pub use primitive_types::*;
pub use token::*;

//! # Scalar values
//!
//! [`Datum`] holds exactly one value of any supported type. It carries no type
//! binding: the same `Datum::U64(7)` may be written by a `UInt8` or a `UInt64`
//! descriptor, and each produces its own bytes.
//!
//! Descriptors that need a length or a count in their binary layout use the
//! helpers in this module, so that every such header in the engine is encoded
//! the same way.
//!
//! ```text
//! struct BodyLen {
//!     len:    u32,    // little-endian
//! }
//!
//! struct MembersCount {
//!     count:  u32,    // little-endian
//! }
//! ```

mod datum;
mod lengths;

pub use datum::*;
pub use lengths::*;

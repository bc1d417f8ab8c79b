//! Value model for the hfn function library.
//!
//! - [`Type`]: the closed type lattice
//! - [`Value`]: null / unknown / known values with attached [`Mark`]s
//! - [`Value::equals`]: tri-state equality
//! - [`convert`] and [`unify_unsafe`]: conversion and type unification
//! - [`set`]: canonical set ordering and set algebra over element slices

mod convert;
mod equality;
mod mark;
mod ty;
mod unify;
mod value;

pub use convert::{conversion_type, convert, ConversionError, ConversionErrorKind, PathStep};
pub use mark::{Mark, MarkSet};
pub use ty::Type;
pub use unify::unify_unsafe;
pub use value::{format_number, set, Content, Heap, Repr, Value};

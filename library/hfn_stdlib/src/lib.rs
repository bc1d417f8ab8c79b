//! The hfn standard function set.
//!
//! Every function here is an [`hfn_function::Function`] and obeys the call
//! contract described there. Hosts usually call through the shared
//! [`functions`] table:
//!
//! ```text
//! let out = hfn_stdlib::functions().call(&ctx, "setunion", args)?;
//! ```
//!
//! Families:
//! - [`aggregate`]: `matchkeys`, `transpose`, `sum`, `index`, `length`,
//!   `alltrue`, `anytrue`
//! - [`cidr`]: address and prefix arithmetic
//! - [`collections`]: sequence and mapping helpers
//! - [`conversion`]: `tostring` and friends
//! - [`marks`]: `sensitive`, `nonsensitive`, `issensitive`
//! - [`numeric`], [`sets`], [`strings`]
//! - [`env`]: environment lookup through the [`hfn_function::CallContext`]

pub mod aggregate;
pub mod cidr;
pub mod collections;
pub mod conversion;
pub mod env;
mod helpers;
pub mod marks;
pub mod numeric;
pub mod sets;
pub mod strings;
mod table;

use std::sync::{Once, OnceLock};

pub use table::{FunctionTable, FUNCTION_NAMES};

static TRACING_INIT: Once = Once::new();
static STANDARD: OnceLock<FunctionTable> = OnceLock::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=hfn_function=debug`
/// to see short-circuited calls, or `trace` for every call.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// The standard table, built on first use and shared afterwards.
pub fn functions() -> &'static FunctionTable {
    STANDARD.get_or_init(FunctionTable::standard)
}

//! Shared `Result` alias.
//!
//! Crates keep their own error enums (`ApiError`, `FormError`, ...) and
//! return them wrapped in a rootcause [`Report`]. Nothing here knows about
//! those enums; `?` lifts them into reports at the call site.

use rootcause::Report;

/// `Result` over a rootcause report whose context is the crate's error enum,
/// e.g. `Result<User, ApiError>`. Without a context it is a plain report.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

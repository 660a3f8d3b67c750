#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core helpers shared by the mqapi crates.
//!
//! This crate holds the pieces that do not depend on the HTTP layer:
//!
//! - **Enum descriptions** via the `Describe` trait and the `describe_enum!` macro
//!   - Human-readable descriptions per variant
//!   - Display names per variant
//! - **camelCase JSON** via the `CamelCasePipeline` and `CamelCaseDecode` traits
//!
//! # Examples
//!
//! ```rust
//! use mqapi_core::prelude::*;
//!
//! #[derive(Debug, Clone, Copy)]
//! enum Channel {
//!     Sms,
//!     Email,
//! }
//!
//! describe_enum! {
//!     Channel {
//!         Sms => { description: "Short message service" },
//!         Email,
//!     }
//! }
//!
//! assert_eq!(Channel::Sms.description(), Some("Short message service"));
//! assert_eq!(Channel::Email.description(), None);
//! ```

pub mod describe;
pub mod serde;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use mqapi_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::describe::Describe;
    pub use crate::describe_enum;
    pub use crate::serde::{CamelCaseDecode, CamelCasePipeline};
}

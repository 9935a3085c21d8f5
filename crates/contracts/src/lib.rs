//! Target-independent building blocks of the cookie consent widget.
//!
//! Everything in here is plain Rust so the consent logic can be exercised
//! with `cargo test` without a browser. The `frontend` crate plugs the web
//! collaborators (document cookie, shadow root styles, slots) into these
//! contracts.

pub mod domain;
pub mod shared;

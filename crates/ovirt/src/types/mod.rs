//! Validated value types.
//!
//! These types enforce their invariants at construction time,
//! so a [`Client`](crate::Client) never holds a malformed engine address.

mod api_url;

pub use api_url::ApiUrl;

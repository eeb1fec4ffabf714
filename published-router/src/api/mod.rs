//! API facade layer.
//!
//! Outward surface of the crate: the per-request state object
//! ([`PublishedRequest`]), the frozen resolution outcome
//! ([`RoutedRequest`]), and the orchestrating [`PublishedRouter`].

pub(crate) mod request;
pub(crate) mod router;

pub use request::{PublishedRequest, RoutedRequest};
pub use router::{PublishedRouter, RouterServices};

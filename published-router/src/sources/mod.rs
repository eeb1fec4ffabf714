//! Capability seams consumed by the router.
//!
//! Every external collaborator (domain configuration, content lookup,
//! template storage, public-access policy, caller identity, URL resolution,
//! and the pluggable content finders) is a `Send + Sync` trait object
//! injected at construction. Implementations are expected to be synchronous,
//! in-process lookups (typically in-memory caches); the router performs no
//! background work of its own.

mod access;
mod finder;
mod lookup;

pub use access::{AccessPolicy, AuthState};
pub use finder::{ContentFinder, ContentLastChanceFinder};
pub use lookup::{ContentSource, DomainSource, TemplateStore, UrlProvider};

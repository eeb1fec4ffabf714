//! Resolution policy layer.
//!
//! One stateless resolver per pipeline concern: domain matching, ordered
//! finder-chain execution, internal-redirect following, public-access
//! enforcement, template selection, and external-redirect detection. The
//! [`crate::PublishedRouter`] facade owns sequencing and loop protection;
//! the resolvers here own the per-step policy.

pub(crate) mod access;
pub(crate) mod domain_match;
pub(crate) mod external_redirect;
pub(crate) mod finder_chain;
pub(crate) mod internal_redirect;
pub(crate) mod template;

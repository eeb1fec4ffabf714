//! Routing options injected at router construction.

use serde::{Deserialize, Serialize};

/// Tunable routing behavior.
///
/// Loaded from host configuration and passed to
/// [`PublishedRouter::new`](crate::PublishedRouter::new); the router never
/// consults ambient configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingOptions {
    /// When `true`, the `altTemplate` query override is ignored entirely.
    pub disable_alternative_templates: bool,
    /// When `true`, the `altTemplate` query override also applies to content
    /// reached through an internal redirect, not only to the node the finder
    /// chain resolved.
    pub internal_redirect_preserves_template: bool,
}

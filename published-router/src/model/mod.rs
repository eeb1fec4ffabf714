//! Content model layer.
//!
//! Read-only value types shared between the router, its collaborator
//! capabilities, and their implementations: node identity, materialized
//! ancestor paths, configured domains, templates, cultures, and the
//! content-authored redirect directive values.

mod access_rule;
mod culture;
mod domain;
mod ids;
mod node;
mod node_path;
mod template;

pub use access_rule::AccessRule;
pub use culture::Culture;
pub use domain::Domain;
pub use ids::{NodeId, TemplateId};
pub use node::{PublishedNode, RedirectValue};
pub use node_path::{NodePath, NodePathParseError};
pub use template::Template;

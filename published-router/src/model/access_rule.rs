//! Public-access rule for a protected content subtree.

use crate::model::ids::NodeId;

/// Where to send callers that may not view a protected node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AccessRule {
    /// Node rendered for unauthenticated callers.
    pub login_node_id: NodeId,
    /// Node rendered for authenticated callers lacking the required role.
    pub no_access_node_id: NodeId,
}

impl AccessRule {
    pub fn new(login_node_id: NodeId, no_access_node_id: NodeId) -> Self {
        Self {
            login_node_id,
            no_access_node_id,
        }
    }
}

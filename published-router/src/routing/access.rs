//! Public-access enforcement over resolved content.

use crate::api::request::PublishedRequest;
use crate::observability::events;
use crate::sources::{AccessPolicy, AuthState, ContentSource};
use tracing::debug;

const COMPONENT: &str = "access";

pub(crate) struct AccessEnforcer;

impl AccessEnforcer {
    /// Ensures the caller may view the current content, substituting the
    /// configured login or no-access node otherwise.
    ///
    /// Substitution is skipped when the target equals the current content,
    /// so a protected login page does not reassign itself. The substituted
    /// node may itself redirect or be missing; the router's outer retry loop
    /// deals with both.
    ///
    /// # Panics
    ///
    /// Panics when called without resolved content; that is a caller bug,
    /// not a runtime condition.
    pub(crate) fn enforce(
        policy: &dyn AccessPolicy,
        content_source: &dyn ContentSource,
        auth: &dyn AuthState,
        request: &mut PublishedRequest,
    ) {
        let node = request
            .content()
            .expect("access enforcement requires resolved content")
            .clone();

        let Some(rule) = policy.is_protected(&node.path) else {
            debug!(
                event = events::ACCESS_NOT_PROTECTED,
                component = COMPONENT,
                node_id = %node.id,
                "page is not protected"
            );
            return;
        };

        if !auth.is_logged_in() {
            debug!(
                event = events::ACCESS_LOGIN_SUBSTITUTE,
                component = COMPONENT,
                node_id = %node.id,
                login_node_id = %rule.login_node_id,
                "caller is not authenticated, rendering the login page"
            );
            if rule.login_node_id != node.id {
                request.substitute_content(content_source.get_by_id(rule.login_node_id));
            }
        } else if !policy.has_access(node.id, &auth.current_roles()) {
            debug!(
                event = events::ACCESS_DENIED_SUBSTITUTE,
                component = COMPONENT,
                node_id = %node.id,
                no_access_node_id = %rule.no_access_node_id,
                "caller lacks the required role, rendering the no-access page"
            );
            if rule.no_access_node_id != node.id {
                request.substitute_content(content_source.get_by_id(rule.no_access_node_id));
            }
        } else {
            debug!(
                event = events::ACCESS_GRANTED,
                component = COMPONENT,
                node_id = %node.id,
                "caller has access"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AccessEnforcer;
    use crate::api::request::PublishedRequest;
    use crate::model::{AccessRule, Culture, NodeId, NodePath, PublishedNode};
    use crate::sources::{AccessPolicy, AuthState, ContentSource};
    use std::collections::HashMap;
    use std::sync::Arc;
    use url::Url;
    use uuid::Uuid;

    struct MapContentSource {
        nodes: HashMap<NodeId, Arc<PublishedNode>>,
    }

    impl ContentSource for MapContentSource {
        fn get_by_id(&self, id: NodeId) -> Option<Arc<PublishedNode>> {
            self.nodes.get(&id).cloned()
        }

        fn get_by_key(&self, key: Uuid) -> Option<Arc<PublishedNode>> {
            self.nodes.values().find(|node| node.key == key).cloned()
        }
    }

    struct SubtreePolicy {
        protected_root: NodeId,
        rule: AccessRule,
        granted_role: String,
    }

    impl AccessPolicy for SubtreePolicy {
        fn is_protected(&self, path: &NodePath) -> Option<AccessRule> {
            path.contains(self.protected_root).then_some(self.rule)
        }

        fn has_access(&self, _content_id: NodeId, roles: &[String]) -> bool {
            roles.iter().any(|role| role == &self.granted_role)
        }
    }

    struct Caller {
        logged_in: bool,
        roles: Vec<String>,
    }

    impl AuthState for Caller {
        fn is_logged_in(&self) -> bool {
            self.logged_in
        }

        fn current_roles(&self) -> Vec<String> {
            self.roles.clone()
        }
    }

    fn node(id: i64) -> PublishedNode {
        PublishedNode::new(NodeId(id), Uuid::new_v4(), NodePath::new(vec![NodeId(id)]))
    }

    fn fixture(protected: i64, content: PublishedNode) -> (MapContentSource, SubtreePolicy, PublishedRequest) {
        let source = MapContentSource {
            nodes: [node(5), node(6)]
                .into_iter()
                .map(|node| (node.id, Arc::new(node)))
                .collect(),
        };
        let policy = SubtreePolicy {
            protected_root: NodeId(protected),
            rule: AccessRule::new(NodeId(5), NodeId(6)),
            granted_role: "members".to_string(),
        };
        let mut request = PublishedRequest::new(
            Url::parse("https://example.com/secret").expect("valid uri"),
            Culture::new("en-US"),
        );
        request.set_content(Arc::new(content));
        (source, policy, request)
    }

    #[test]
    fn unprotected_content_is_untouched() {
        let (source, policy, mut request) = fixture(9999, node(1001));
        let caller = Caller {
            logged_in: false,
            roles: vec![],
        };

        AccessEnforcer::enforce(&policy, &source, &caller, &mut request);

        assert_eq!(request.content().expect("content").id, NodeId(1001));
    }

    #[test]
    fn anonymous_caller_gets_the_login_page() {
        let (source, policy, mut request) = fixture(1001, node(1001));
        let caller = Caller {
            logged_in: false,
            roles: vec![],
        };

        AccessEnforcer::enforce(&policy, &source, &caller, &mut request);

        assert_eq!(request.content().expect("content").id, NodeId(5));
    }

    #[test]
    fn protected_login_page_is_not_reassigned_to_itself() {
        // Content id 5 is also the configured login node.
        let (source, policy, mut request) = fixture(5, node(5));
        let caller = Caller {
            logged_in: false,
            roles: vec![],
        };

        AccessEnforcer::enforce(&policy, &source, &caller, &mut request);

        assert_eq!(request.content().expect("content").id, NodeId(5));
    }

    #[test]
    fn member_without_the_required_role_gets_the_no_access_page() {
        let (source, policy, mut request) = fixture(1001, node(1001));
        let caller = Caller {
            logged_in: true,
            roles: vec!["visitors".to_string()],
        };

        AccessEnforcer::enforce(&policy, &source, &caller, &mut request);

        assert_eq!(request.content().expect("content").id, NodeId(6));
    }

    #[test]
    fn member_with_the_required_role_keeps_the_content() {
        let (source, policy, mut request) = fixture(1001, node(1001));
        let caller = Caller {
            logged_in: true,
            roles: vec!["members".to_string()],
        };

        AccessEnforcer::enforce(&policy, &source, &caller, &mut request);

        assert_eq!(request.content().expect("content").id, NodeId(1001));
    }

    #[test]
    fn a_dangling_login_node_leaves_the_request_without_content() {
        let (mut source, policy, mut request) = fixture(1001, node(1001));
        source.nodes.remove(&NodeId(5));
        let caller = Caller {
            logged_in: false,
            roles: vec![],
        };

        AccessEnforcer::enforce(&policy, &source, &caller, &mut request);

        assert!(!request.has_content());
    }

    #[test]
    #[should_panic(expected = "access enforcement requires resolved content")]
    fn enforcing_without_content_is_a_caller_bug() {
        let (source, policy, _) = fixture(1001, node(1001));
        let caller = Caller {
            logged_in: false,
            roles: vec![],
        };
        let mut request = PublishedRequest::new(
            Url::parse("https://example.com/").expect("valid uri"),
            Culture::new("en-US"),
        );

        AccessEnforcer::enforce(&policy, &source, &caller, &mut request);
    }
}

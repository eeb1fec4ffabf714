//! Following of content-authored internal redirect directives.

use crate::api::request::PublishedRequest;
use crate::model::RedirectValue;
use crate::observability::{events, fields};
use crate::sources::ContentSource;
use tracing::debug;

const COMPONENT: &str = "internal_redirect";

pub(crate) struct InternalRedirectResolver;

impl InternalRedirectResolver {
    /// Follows the current content's internal-redirect directive, if any.
    ///
    /// Returns `true` when a redirect took place and the request now carries
    /// the target node. Broken directives (a value that is neither an id
    /// nor a key, a target that does not exist, or a redirect to self) are
    /// logged and ignored, keeping the current content.
    ///
    /// # Panics
    ///
    /// Panics when called without resolved content; that is a caller bug,
    /// not a runtime condition.
    pub(crate) fn follow(
        content_source: &dyn ContentSource,
        request: &mut PublishedRequest,
    ) -> bool {
        let node = request
            .content()
            .expect("internal redirect requires resolved content")
            .clone();

        let Some(directive) = node.internal_redirect.clone() else {
            return false;
        };

        let target = match &directive {
            RedirectValue::Id(id) => content_source.get_by_id(*id),
            RedirectValue::Key(key) => content_source.get_by_key(*key),
            RedirectValue::Malformed(_) => {
                debug!(
                    event = events::INTERNAL_REDIRECT_MALFORMED,
                    component = COMPONENT,
                    node_id = %node.id,
                    directive = %fields::format_directive(&directive),
                    "internal redirect value is neither an id nor a key, ignoring"
                );
                return false;
            }
        };

        let Some(target) = target else {
            debug!(
                event = events::INTERNAL_REDIRECT_TARGET_MISSING,
                component = COMPONENT,
                node_id = %node.id,
                directive = %fields::format_directive(&directive),
                "internal redirect target is not published, ignoring"
            );
            return false;
        };

        if target.id == node.id {
            debug!(
                event = events::INTERNAL_REDIRECT_SELF_IGNORED,
                component = COMPONENT,
                node_id = %node.id,
                "internal redirect to self, ignoring"
            );
            return false;
        }

        debug!(
            event = events::INTERNAL_REDIRECT_FOLLOWED,
            component = COMPONENT,
            node_id = %node.id,
            target_id = %target.id,
            "following internal redirect"
        );
        request.set_internal_redirect_content(target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::InternalRedirectResolver;
    use crate::api::request::PublishedRequest;
    use crate::model::{Culture, NodeId, NodePath, PublishedNode, RedirectValue};
    use crate::sources::ContentSource;
    use std::collections::HashMap;
    use std::sync::Arc;
    use url::Url;
    use uuid::Uuid;

    struct MapContentSource {
        nodes: HashMap<NodeId, Arc<PublishedNode>>,
    }

    impl MapContentSource {
        fn new(nodes: Vec<PublishedNode>) -> Self {
            Self {
                nodes: nodes
                    .into_iter()
                    .map(|node| (node.id, Arc::new(node)))
                    .collect(),
            }
        }
    }

    impl ContentSource for MapContentSource {
        fn get_by_id(&self, id: NodeId) -> Option<Arc<PublishedNode>> {
            self.nodes.get(&id).cloned()
        }

        fn get_by_key(&self, key: Uuid) -> Option<Arc<PublishedNode>> {
            self.nodes.values().find(|node| node.key == key).cloned()
        }
    }

    fn node(id: i64) -> PublishedNode {
        PublishedNode::new(NodeId(id), Uuid::new_v4(), NodePath::new(vec![NodeId(id)]))
    }

    fn request_with(content: PublishedNode) -> PublishedRequest {
        let mut request = PublishedRequest::new(
            Url::parse("https://example.com/products").expect("valid uri"),
            Culture::new("en-US"),
        );
        request.set_content(Arc::new(content));
        request.mark_initial_content();
        request
    }

    #[test]
    fn absent_directive_is_a_noop() {
        let source = MapContentSource::new(vec![node(1001)]);
        let mut request = request_with(node(1001));

        assert!(!InternalRedirectResolver::follow(&source, &mut request));
        assert!(request.is_initial_content());
    }

    #[test]
    fn follows_a_numeric_directive_and_clears_the_initial_flag() {
        let source = MapContentSource::new(vec![node(1001), node(1002)]);
        let mut redirecting = node(1001);
        redirecting.internal_redirect = Some(RedirectValue::Id(NodeId(1002)));
        let mut request = request_with(redirecting);

        assert!(InternalRedirectResolver::follow(&source, &mut request));

        assert_eq!(request.content().expect("content").id, NodeId(1002));
        assert!(!request.is_initial_content());
        assert!(request.is_internal_redirect());
    }

    #[test]
    fn follows_a_key_directive() {
        let target = node(1002);
        let target_key = target.key;
        let source = MapContentSource::new(vec![node(1001), target]);
        let mut redirecting = node(1001);
        redirecting.internal_redirect = Some(RedirectValue::Key(target_key));
        let mut request = request_with(redirecting);

        assert!(InternalRedirectResolver::follow(&source, &mut request));
        assert_eq!(request.content().expect("content").id, NodeId(1002));
    }

    #[test]
    fn self_redirect_is_always_a_noop() {
        let source = MapContentSource::new(vec![node(1001)]);
        let mut redirecting = node(1001);
        redirecting.internal_redirect = Some(RedirectValue::Id(NodeId(1001)));
        let mut request = request_with(redirecting);

        assert!(!InternalRedirectResolver::follow(&source, &mut request));

        assert_eq!(request.content().expect("content").id, NodeId(1001));
        assert!(request.is_initial_content());
    }

    #[test]
    fn missing_target_is_ignored() {
        let source = MapContentSource::new(vec![node(1001)]);
        let mut redirecting = node(1001);
        redirecting.internal_redirect = Some(RedirectValue::Id(NodeId(9999)));
        let mut request = request_with(redirecting);

        assert!(!InternalRedirectResolver::follow(&source, &mut request));
        assert_eq!(request.content().expect("content").id, NodeId(1001));
    }

    #[test]
    fn malformed_directive_is_ignored() {
        let source = MapContentSource::new(vec![node(1001)]);
        let mut redirecting = node(1001);
        redirecting.internal_redirect = Some(RedirectValue::Malformed("not-a-node".to_string()));
        let mut request = request_with(redirecting);

        assert!(!InternalRedirectResolver::follow(&source, &mut request));
        assert_eq!(request.content().expect("content").id, NodeId(1001));
    }

    #[test]
    #[should_panic(expected = "internal redirect requires resolved content")]
    fn following_without_content_is_a_caller_bug() {
        let source = MapContentSource::new(vec![]);
        let mut request = PublishedRequest::new(
            Url::parse("https://example.com/").expect("valid uri"),
            Culture::new("en-US"),
        );

        InternalRedirectResolver::follow(&source, &mut request);
    }
}

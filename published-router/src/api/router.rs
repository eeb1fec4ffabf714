/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! The request router: sequences domain matching, content finding, redirect
//! following, access enforcement, and template selection into one pipeline.

use crate::api::request::{PublishedRequest, RoutedRequest};
use crate::config::RoutingOptions;
use crate::model::Culture;
use crate::observability::{events, fields};
use crate::routing::access::AccessEnforcer;
use crate::routing::domain_match::DomainMatcher;
use crate::routing::external_redirect::ExternalRedirectResolver;
use crate::routing::finder_chain::FinderChain;
use crate::routing::internal_redirect::InternalRedirectResolver;
use crate::routing::template::{MissingTemplateError, TemplateResolver};
use crate::sources::{
    AccessPolicy, AuthState, ContentFinder, ContentLastChanceFinder, ContentSource, DomainSource,
    TemplateStore, UrlProvider,
};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const COMPONENT: &str = "router";

/// Ceiling for both the internal-redirect chase and the not-found/access
/// retry loop. Reaching either ceiling is treated as an infinite-loop
/// condition and forces the request to resolve without content.
const MAX_RESOLUTION_LOOPS: usize = 8;

/// The lookup capabilities the router resolves against.
#[derive(Clone)]
pub struct RouterServices {
    pub domains: Arc<dyn DomainSource>,
    pub content: Arc<dyn ContentSource>,
    pub templates: Arc<dyn TemplateStore>,
    pub access: Arc<dyn AccessPolicy>,
    pub urls: Arc<dyn UrlProvider>,
}

/// Resolves an inbound URI to a published node, a culture, and a template,
/// enforcing public access and following redirect directives on the way.
///
/// One router instance serves the whole process; per-request state lives in
/// the [`PublishedRequest`] it hands out. The finder chain is held behind an
/// atomic swap so it can be reconfigured while requests are in flight, never
/// edited in place.
pub struct PublishedRouter {
    services: RouterServices,
    finders: ArcSwap<Vec<Arc<dyn ContentFinder>>>,
    last_chance: Arc<dyn ContentLastChanceFinder>,
    options: RoutingOptions,
    fallback_culture: Culture,
}

impl PublishedRouter {
    pub fn new(
        services: RouterServices,
        finders: Vec<Arc<dyn ContentFinder>>,
        last_chance: Arc<dyn ContentLastChanceFinder>,
        options: RoutingOptions,
        fallback_culture: Culture,
    ) -> Self {
        Self {
            services,
            finders: ArcSwap::from_pointee(finders),
            last_chance,
            options,
            fallback_culture,
        }
    }

    /// Creates the mutable request state for `uri`.
    ///
    /// The host may pre-assign content (or flag a redirect) on the returned
    /// request before handing it to [`prepare_request`]; the finder chain is
    /// then skipped.
    ///
    /// [`prepare_request`]: Self::prepare_request
    pub fn create_request(&self, uri: Url) -> PublishedRequest {
        PublishedRequest::new(uri, self.fallback_culture.clone())
    }

    /// Replaces the whole finder chain atomically.
    ///
    /// Requests already in flight keep the chain they loaded; new requests
    /// see the new one.
    pub fn swap_finders(&self, finders: Vec<Arc<dyn ContentFinder>>) {
        self.finders.store(Arc::new(finders));
    }

    /// Runs the full resolution pipeline and freezes the outcome.
    ///
    /// A frozen result with a set redirect URL means the caller must
    /// redirect instead of rendering; a result without content means the
    /// request stayed unresolved. The only error is a content node whose
    /// configured template cannot be found.
    pub fn prepare_request(
        &self,
        request: PublishedRequest,
        auth: &dyn AuthState,
    ) -> Result<RoutedRequest, MissingTemplateError> {
        let mut request = request;
        debug!(
            event = events::REQUEST_PREPARE_START,
            component = COMPONENT,
            uri = %request.uri(),
            "preparing published-content request"
        );

        self.find_domain(&mut request);

        if request.is_redirect() {
            return Ok(self.freeze_redirect(request));
        }

        // Content may have been assigned by a custom host handler already;
        // the finders only run when it was not.
        if !request.has_content() {
            self.find_content_and_template(&mut request, auth)?;
        }

        // The culture may still change when a wildcard domain sits in the
        // resolved node's ancestry.
        self.handle_wildcard_domains(&mut request);

        debug!(
            event = events::REQUEST_PREPARE_DONE,
            component = COMPONENT,
            node_id = %fields::format_node_id(request.content().map(|node| node.as_ref())),
            culture = %request.culture(),
            is_404 = request.is_404(),
            redirect = request.is_redirect(),
            "request prepared"
        );
        Ok(request.freeze())
    }

    /// Probes whether the URI routes to published content at all: domain
    /// matching plus the finder chain, without any not-found, access,
    /// template, or redirect-following work.
    ///
    /// Returns `false` when the request got flagged for redirection instead
    /// of resolving to content.
    pub fn try_route_request(&self, request: &mut PublishedRequest) -> bool {
        self.find_domain(request);
        if request.is_redirect() {
            return false;
        }
        if request.has_content() {
            return true;
        }
        self.find_content(request);
        if request.is_redirect() {
            return false;
        }
        request.has_content()
    }

    /// Re-enters the pipeline when a prepared request carries content but no
    /// template: drops the content, runs not-found handling and template
    /// selection again, and freezes the new outcome.
    ///
    /// When the retry finds nothing better, the originally resolved content
    /// is restored so the caller still knows the document exists.
    pub fn update_on_missing_template(
        &self,
        routed: &RoutedRequest,
        auth: &dyn AuthState,
    ) -> Result<RoutedRequest, MissingTemplateError> {
        let mut request = PublishedRequest::new(routed.uri().clone(), routed.culture().clone());
        if let Some(domain) = routed.domain() {
            request.set_domain(domain.clone());
        }

        self.handle_published_content(&mut request, auth);
        self.find_template(&mut request)?;

        if !request.is_redirect() && !request.has_content() {
            if let Some(content) = routed.content() {
                request.set_content(content.clone());
            }
        }
        Ok(request.freeze())
    }

    fn freeze_redirect(&self, request: PublishedRequest) -> RoutedRequest {
        debug!(
            event = events::REQUEST_PREPARE_REDIRECT,
            component = COMPONENT,
            redirect_url = request.redirect_url().unwrap_or(fields::NONE),
            "request flagged for redirect, resolution stops"
        );
        request.freeze()
    }

    /// Matches a configured domain and assigns domain and culture; without a
    /// match the fallback culture applies.
    fn find_domain(&self, request: &mut PublishedRequest) -> bool {
        let domains = self.services.domains.get_all(false);
        match DomainMatcher::domain_for_uri(&domains, request.uri()) {
            Some(domain) => {
                debug!(
                    event = events::DOMAIN_MATCH_OK,
                    component = COMPONENT,
                    domain = %domain.name,
                    root_id = %domain.root_id,
                    culture = %domain.culture,
                    "matched configured domain"
                );
                let domain = domain.clone();
                request.set_culture(domain.culture.clone());
                request.set_domain(domain);
                true
            }
            None => {
                debug!(
                    event = events::DOMAIN_MATCH_NONE,
                    component = COMPONENT,
                    culture = %self.fallback_culture,
                    "no domain matched, using the fallback culture"
                );
                request.set_culture(self.fallback_culture.clone());
                false
            }
        }
    }

    /// Overrides the culture when a wildcard domain sits in the resolved
    /// node's ancestry, below the matched domain's root.
    fn handle_wildcard_domains(&self, request: &mut PublishedRequest) {
        let Some(node) = request.content().cloned() else {
            return;
        };
        let root_id = request.domain().map(|domain| domain.root_id);
        let domains = self.services.domains.get_all(true);
        match DomainMatcher::wildcard_domain_in_path(&domains, &node.path, root_id) {
            Some(domain) => {
                debug!(
                    event = events::WILDCARD_DOMAIN_MATCH_OK,
                    component = COMPONENT,
                    root_id = %domain.root_id,
                    culture = %domain.culture,
                    node_path = %node.path,
                    "wildcard domain sets the culture"
                );
                request.set_culture(domain.culture.clone());
            }
            None => {
                debug!(
                    event = events::WILDCARD_DOMAIN_MATCH_NONE,
                    component = COMPONENT,
                    node_path = %node.path,
                    "no wildcard domain in path"
                );
            }
        }
    }

    fn find_content_and_template(
        &self,
        request: &mut PublishedRequest,
        auth: &dyn AuthState,
    ) -> Result<(), MissingTemplateError> {
        self.find_content(request);

        // A redirect flagged by a finder propagates as-is; nothing further
        // may run, so not-found and internal-redirect handling keep
        // precedence over everything that follows.
        if request.is_redirect() {
            return Ok(());
        }

        self.handle_published_content(request, auth);
        self.find_template(request)?;
        ExternalRedirectResolver::detect(self.services.urls.as_ref(), request);
        Ok(())
    }

    /// Runs the finder chain and flags the result as the initial content.
    fn find_content(&self, request: &mut PublishedRequest) {
        let finders = self.finders.load();
        FinderChain::resolve(&finders, request);
        if request.has_content() && !request.is_redirect() {
            request.mark_initial_content();
        }
    }

    /// Not-found fallback, internal-redirect chase, and access enforcement.
    ///
    /// These three interleave because each can invalidate the others'
    /// outcome: the not-found node can redirect, a redirect target can be
    /// protected, and the login page can itself be missing. The loop runs
    /// until a stable, accessible, non-redirecting node is reached, bounded
    /// by [`MAX_RESOLUTION_LOOPS`] on both levels; hitting either ceiling
    /// abandons the content entirely.
    fn handle_published_content(&self, request: &mut PublishedRequest, auth: &dyn AuthState) {
        let mut outer = 0;
        let mut inner_aborted = false;
        loop {
            if !request.has_content() {
                request.set_is_404(true);
                debug!(
                    event = events::LAST_CHANCE_START,
                    component = COMPONENT,
                    "no document, trying the last-chance finder"
                );
                if !self.last_chance.try_find(request) {
                    debug!(
                        event = events::LAST_CHANCE_FAILED,
                        component = COMPONENT,
                        "last-chance finder found nothing, giving up"
                    );
                    break;
                }
                debug!(
                    event = events::LAST_CHANCE_OK,
                    component = COMPONENT,
                    node_id = %fields::format_node_id(request.content().map(|node| node.as_ref())),
                    "last-chance finder assigned content"
                );
            }

            let mut inner = 0;
            while InternalRedirectResolver::follow(self.services.content.as_ref(), request)
                && inner < MAX_RESOLUTION_LOOPS
            {
                inner += 1;
            }
            if inner == MAX_RESOLUTION_LOOPS {
                inner_aborted = true;
                break;
            }

            if request.has_content() {
                AccessEnforcer::enforce(
                    self.services.access.as_ref(),
                    self.services.content.as_ref(),
                    auth,
                    request,
                );
            }

            outer += 1;
            if request.has_content() || outer == MAX_RESOLUTION_LOOPS {
                break;
            }
        }

        if inner_aborted || outer == MAX_RESOLUTION_LOOPS {
            debug!(
                event = events::RESOLUTION_LOOP_ABORT,
                component = COMPONENT,
                reason = if inner_aborted {
                    fields::REASON_LOOP_DETECTED
                } else {
                    fields::REASON_RETRIES_EXHAUSTED
                },
                "resolution is looping, dropping the content"
            );
            request.clear_content();
        }
    }

    fn find_template(&self, request: &mut PublishedRequest) -> Result<(), MissingTemplateError> {
        let alt_template = TemplateResolver::alt_template_in_query(request.uri());
        TemplateResolver::select(
            self.services.templates.as_ref(),
            &self.options,
            alt_template.as_deref(),
            request,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{PublishedRouter, RouterServices};
    use crate::api::request::PublishedRequest;
    use crate::config::RoutingOptions;
    use crate::model::{
        AccessRule, Culture, Domain, NodeId, NodePath, PublishedNode, Template, TemplateId,
    };
    use crate::sources::{
        AccessPolicy, AuthState, ContentFinder, ContentLastChanceFinder, ContentSource,
        DomainSource, TemplateStore, UrlProvider,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use url::Url;
    use uuid::Uuid;

    struct FixedDomains(Vec<Domain>);

    impl DomainSource for FixedDomains {
        fn get_all(&self, include_wildcards: bool) -> Vec<Domain> {
            self.0
                .iter()
                .filter(|domain| include_wildcards || !domain.is_wildcard)
                .cloned()
                .collect()
        }
    }

    struct MapContent(HashMap<NodeId, Arc<PublishedNode>>);

    impl ContentSource for MapContent {
        fn get_by_id(&self, id: NodeId) -> Option<Arc<PublishedNode>> {
            self.0.get(&id).cloned()
        }

        fn get_by_key(&self, key: Uuid) -> Option<Arc<PublishedNode>> {
            self.0.values().find(|node| node.key == key).cloned()
        }
    }

    struct MapTemplates(Vec<Template>);

    impl TemplateStore for MapTemplates {
        fn get_by_id(&self, id: TemplateId) -> Option<Template> {
            self.0.iter().find(|template| template.id == id).cloned()
        }

        fn get_by_alias(&self, alias: &str) -> Option<Template> {
            self.0
                .iter()
                .find(|template| template.alias == alias)
                .cloned()
        }
    }

    struct OpenAccess;

    impl AccessPolicy for OpenAccess {
        fn is_protected(&self, _path: &NodePath) -> Option<AccessRule> {
            None
        }

        fn has_access(&self, _content_id: NodeId, _roles: &[String]) -> bool {
            true
        }
    }

    struct NoUrls;

    impl UrlProvider for NoUrls {
        fn url_for_id(&self, _id: NodeId) -> Option<String> {
            None
        }

        fn url_for_key(&self, _key: Uuid) -> Option<String> {
            None
        }
    }

    struct Anonymous;

    impl AuthState for Anonymous {
        fn is_logged_in(&self) -> bool {
            false
        }

        fn current_roles(&self) -> Vec<String> {
            Vec::new()
        }
    }

    struct AssigningFinder {
        node: Arc<PublishedNode>,
        invocations: Arc<AtomicUsize>,
    }

    impl ContentFinder for AssigningFinder {
        fn try_find(&self, request: &mut PublishedRequest) -> bool {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            request.set_content(self.node.clone());
            true
        }
    }

    struct FailingLastChance;

    impl ContentFinder for FailingLastChance {
        fn try_find(&self, _request: &mut PublishedRequest) -> bool {
            false
        }
    }

    impl ContentLastChanceFinder for FailingLastChance {}

    fn node(id: i64, template_id: Option<i32>) -> Arc<PublishedNode> {
        let mut node =
            PublishedNode::new(NodeId(id), Uuid::new_v4(), NodePath::new(vec![NodeId(id)]));
        node.template_id = template_id.map(TemplateId);
        Arc::new(node)
    }

    fn router(
        domains: Vec<Domain>,
        nodes: Vec<Arc<PublishedNode>>,
        finders: Vec<Arc<dyn ContentFinder>>,
    ) -> PublishedRouter {
        let services = RouterServices {
            domains: Arc::new(FixedDomains(domains)),
            content: Arc::new(MapContent(
                nodes.into_iter().map(|node| (node.id, node)).collect(),
            )),
            templates: Arc::new(MapTemplates(vec![Template::new(TemplateId(10), "standard")])),
            access: Arc::new(OpenAccess),
            urls: Arc::new(NoUrls),
        };
        PublishedRouter::new(
            services,
            finders,
            Arc::new(FailingLastChance),
            RoutingOptions::default(),
            Culture::new("en-US"),
        )
    }

    fn uri(raw: &str) -> Url {
        Url::parse(raw).expect("valid test uri")
    }

    #[test]
    fn unresolvable_request_freezes_with_fallback_culture_and_not_found() {
        let router = router(vec![], vec![], vec![]);
        let request = router.create_request(uri("https://example.com/nowhere"));

        let routed = router
            .prepare_request(request, &Anonymous)
            .expect("prepare should succeed");

        assert!(!routed.has_content());
        assert!(!routed.has_template());
        assert!(routed.is_404());
        assert_eq!(routed.culture().as_str(), "en-US");
    }

    #[test]
    fn matched_domain_assigns_its_culture() {
        let home = node(1001, Some(10));
        let finder = Arc::new(AssigningFinder {
            node: home.clone(),
            invocations: Arc::new(AtomicUsize::new(0)),
        });
        let router = router(
            vec![Domain::new(
                "example.com",
                NodeId(1000),
                Culture::new("da-DK"),
            )],
            vec![home],
            vec![finder],
        );
        let request = router.create_request(uri("https://example.com/"));

        let routed = router
            .prepare_request(request, &Anonymous)
            .expect("prepare should succeed");

        assert_eq!(routed.culture().as_str(), "da-DK");
        assert_eq!(routed.domain().expect("domain").root_id, NodeId(1000));
    }

    #[test]
    fn pre_assigned_content_skips_the_finder_chain() {
        let invocations = Arc::new(AtomicUsize::new(0));
        let found = node(1001, Some(10));
        let finder = Arc::new(AssigningFinder {
            node: found,
            invocations: invocations.clone(),
        });
        let router = router(vec![], vec![], vec![finder]);

        let mut request = router.create_request(uri("https://example.com/custom"));
        request.set_content(node(2001, None));

        let routed = router
            .prepare_request(request, &Anonymous)
            .expect("prepare should succeed");

        assert_eq!(routed.content().expect("content").id, NodeId(2001));
        assert_eq!(invocations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn swapping_the_finder_chain_changes_resolution() {
        let router = router(vec![], vec![], vec![]);
        let mut request = router.create_request(uri("https://example.com/page"));
        assert!(!router.try_route_request(&mut request));

        router.swap_finders(vec![Arc::new(AssigningFinder {
            node: node(1001, None),
            invocations: Arc::new(AtomicUsize::new(0)),
        })]);

        let mut request = router.create_request(uri("https://example.com/page"));
        assert!(router.try_route_request(&mut request));
        assert_eq!(request.content().expect("content").id, NodeId(1001));
    }

    #[test]
    fn try_route_request_leaves_not_found_and_template_work_alone() {
        let router = router(vec![], vec![], vec![]);
        let mut request = router.create_request(uri("https://example.com/page"));

        assert!(!router.try_route_request(&mut request));

        assert!(!request.is_404());
        assert!(!request.has_template());
    }
}

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

//! Per-request resolution state: mutable while the pipeline runs, frozen into
//! an immutable outcome when it completes.

use crate::model::{Culture, Domain, PublishedNode, Template};
use std::sync::Arc;
use url::Url;

/// Mutable state of one published-content request while it is being resolved.
///
/// A `PublishedRequest` is created once per inbound request, passed through
/// the pipeline exactly once, then consumed by
/// [`freeze`](PublishedRequest::freeze). Finders mutate it through the public
/// setters; the flag bookkeeping (initial content, internal-redirect origin)
/// is owned by the setters so no caller can get it out of sync.
#[derive(Clone, Debug)]
pub struct PublishedRequest {
    uri: Url,
    culture: Culture,
    domain: Option<Domain>,
    content: Option<Arc<PublishedNode>>,
    is_initial_content: bool,
    is_internal_redirect: bool,
    is_404: bool,
    template: Option<Template>,
    redirect_url: Option<String>,
}

impl PublishedRequest {
    /// Creates request state for `uri`, with `culture` as the value that
    /// stands until domain matching assigns one.
    pub fn new(uri: Url, culture: Culture) -> Self {
        Self {
            uri,
            culture,
            domain: None,
            content: None,
            is_initial_content: false,
            is_internal_redirect: false,
            is_404: false,
            template: None,
            redirect_url: None,
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
    }

    pub fn content(&self) -> Option<&Arc<PublishedNode>> {
        self.content.as_ref()
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn has_domain(&self) -> bool {
        self.domain.is_some()
    }

    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect_url.is_some()
    }

    /// Whether the current content is the one the finder chain assigned,
    /// before any internal redirect or access substitution.
    pub fn is_initial_content(&self) -> bool {
        self.is_initial_content
    }

    /// Whether the current content was reached through an internal redirect.
    pub fn is_internal_redirect(&self) -> bool {
        self.is_internal_redirect
    }

    pub fn is_404(&self) -> bool {
        self.is_404
    }

    pub fn set_culture(&mut self, culture: Culture) {
        self.culture = culture;
    }

    pub(crate) fn set_domain(&mut self, domain: Domain) {
        self.domain = Some(domain);
    }

    /// Assigns content. Replacing content this way marks it as neither the
    /// initial finder-chain result nor an internal-redirect target.
    pub fn set_content(&mut self, content: Arc<PublishedNode>) {
        self.content = Some(content);
        self.is_initial_content = false;
        self.is_internal_redirect = false;
    }

    /// Substitutes content with a lookup result that may be absent (e.g. a
    /// configured login node that no longer exists). An absent result leaves
    /// the request without content, re-entering not-found handling.
    pub(crate) fn substitute_content(&mut self, content: Option<Arc<PublishedNode>>) {
        self.content = content;
        self.is_initial_content = false;
        self.is_internal_redirect = false;
        if self.content.is_none() {
            self.template = None;
        }
    }

    /// Assigns content reached through an internal redirect directive.
    pub(crate) fn set_internal_redirect_content(&mut self, content: Arc<PublishedNode>) {
        self.content = Some(content);
        self.is_initial_content = false;
        self.is_internal_redirect = true;
    }

    /// Flags the current content as the finder chain's own result. Called by
    /// the router exactly once, after the chain has run.
    pub(crate) fn mark_initial_content(&mut self) {
        self.is_initial_content = true;
    }

    /// Drops the resolved content (and with it any template, since a request
    /// without content never carries one).
    pub(crate) fn clear_content(&mut self) {
        self.content = None;
        self.is_initial_content = false;
        self.is_internal_redirect = false;
        self.template = None;
    }

    pub fn set_is_404(&mut self, is_404: bool) {
        self.is_404 = is_404;
    }

    pub fn set_template(&mut self, template: Template) {
        self.template = Some(template);
    }

    pub(crate) fn clear_template(&mut self) {
        self.template = None;
    }

    /// Flags the request for redirection. Resolution stops once this is set;
    /// the caller performs the actual redirect.
    pub fn set_redirect(&mut self, url: impl Into<String>) {
        self.redirect_url = Some(url.into());
    }

    /// Consumes the mutable state into the immutable resolution outcome.
    pub fn freeze(self) -> RoutedRequest {
        RoutedRequest {
            uri: self.uri,
            culture: self.culture,
            domain: self.domain,
            content: self.content,
            is_initial_content: self.is_initial_content,
            is_404: self.is_404,
            template: self.template,
            redirect_url: self.redirect_url,
        }
    }
}

/// The frozen outcome of resolving one request.
///
/// Produced by [`PublishedRequest::freeze`]; immutable by construction, so
/// nothing downstream can mutate the resolution after the fact. A set
/// [`redirect_url`](RoutedRequest::redirect_url) means the caller must
/// redirect instead of rendering.
#[derive(Clone, Debug)]
pub struct RoutedRequest {
    uri: Url,
    culture: Culture,
    domain: Option<Domain>,
    content: Option<Arc<PublishedNode>>,
    is_initial_content: bool,
    is_404: bool,
    template: Option<Template>,
    redirect_url: Option<String>,
}

impl RoutedRequest {
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
    }

    pub fn content(&self) -> Option<&Arc<PublishedNode>> {
        self.content.as_ref()
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect_url.is_some()
    }

    pub fn is_initial_content(&self) -> bool {
        self.is_initial_content
    }

    pub fn is_404(&self) -> bool {
        self.is_404
    }
}

#[cfg(test)]
mod tests {
    use super::PublishedRequest;
    use crate::model::{Culture, NodeId, NodePath, PublishedNode, Template, TemplateId};
    use std::sync::Arc;
    use url::Url;
    use uuid::Uuid;

    fn request() -> PublishedRequest {
        PublishedRequest::new(
            Url::parse("https://example.com/products").expect("valid uri"),
            Culture::new("en-US"),
        )
    }

    fn node(id: i64) -> Arc<PublishedNode> {
        Arc::new(PublishedNode::new(
            NodeId(id),
            Uuid::new_v4(),
            NodePath::new(vec![NodeId(id)]),
        ))
    }

    #[test]
    fn marking_initial_content_survives_until_content_is_replaced() {
        let mut request = request();
        request.set_content(node(1001));
        request.mark_initial_content();
        assert!(request.is_initial_content());

        request.set_content(node(1002));

        assert!(!request.is_initial_content());
        assert!(!request.is_internal_redirect());
    }

    #[test]
    fn internal_redirect_content_flags_its_origin() {
        let mut request = request();
        request.set_content(node(1001));
        request.mark_initial_content();

        request.set_internal_redirect_content(node(1002));

        assert!(!request.is_initial_content());
        assert!(request.is_internal_redirect());
    }

    #[test]
    fn clearing_content_also_clears_the_template() {
        let mut request = request();
        request.set_content(node(1001));
        request.set_template(Template::new(TemplateId(10), "home"));

        request.clear_content();

        assert!(!request.has_content());
        assert!(!request.has_template());
    }

    #[test]
    fn absent_substitution_leaves_the_request_without_content() {
        let mut request = request();
        request.set_content(node(1001));

        request.substitute_content(None);

        assert!(!request.has_content());
        assert!(!request.has_template());
    }

    #[test]
    fn freeze_carries_the_final_mutable_state() {
        let mut request = request();
        request.set_content(node(1001));
        request.mark_initial_content();
        request.set_template(Template::new(TemplateId(10), "home"));
        request.set_is_404(true);

        let routed = request.freeze();

        assert_eq!(routed.content().expect("content").id, NodeId(1001));
        assert_eq!(routed.template().expect("template").id, TemplateId(10));
        assert!(routed.is_initial_content());
        assert!(routed.is_404());
        assert!(!routed.is_redirect());
        assert_eq!(routed.culture().as_str(), "en-US");
    }
}

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

//! In-memory fixture implementations of the router's lookup capabilities.

use published_router::{
    AccessPolicy, AccessRule, AuthState, ContentSource, Domain, DomainSource, NodeId, NodePath,
    PublishedNode, Template, TemplateId, TemplateStore, UrlProvider,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Content tree held in memory, looked up by id or key.
pub struct InMemoryContentSource {
    nodes: HashMap<NodeId, Arc<PublishedNode>>,
}

impl InMemoryContentSource {
    pub fn new(nodes: Vec<PublishedNode>) -> Self {
        Self {
            nodes: nodes
                .into_iter()
                .map(|node| (node.id, Arc::new(node)))
                .collect(),
        }
    }
}

impl ContentSource for InMemoryContentSource {
    fn get_by_id(&self, id: NodeId) -> Option<Arc<PublishedNode>> {
        self.nodes.get(&id).cloned()
    }

    fn get_by_key(&self, key: Uuid) -> Option<Arc<PublishedNode>> {
        self.nodes.values().find(|node| node.key == key).cloned()
    }
}

/// Template store held in memory.
pub struct InMemoryTemplateStore {
    templates: Vec<Template>,
}

impl InMemoryTemplateStore {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn get_by_id(&self, id: TemplateId) -> Option<Template> {
        self.templates
            .iter()
            .find(|template| template.id == id)
            .cloned()
    }

    fn get_by_alias(&self, alias: &str) -> Option<Template> {
        self.templates
            .iter()
            .find(|template| template.alias == alias)
            .cloned()
    }
}

/// Domain list held in memory, in configuration order.
pub struct FixedDomainSource {
    domains: Vec<Domain>,
}

impl FixedDomainSource {
    pub fn new(domains: Vec<Domain>) -> Self {
        Self { domains }
    }
}

impl DomainSource for FixedDomainSource {
    fn get_all(&self, include_wildcards: bool) -> Vec<Domain> {
        self.domains
            .iter()
            .filter(|domain| include_wildcards || !domain.is_wildcard)
            .cloned()
            .collect()
    }
}

/// Access policy that protects nothing.
pub struct OpenAccessPolicy;

impl AccessPolicy for OpenAccessPolicy {
    fn is_protected(&self, _path: &NodePath) -> Option<AccessRule> {
        None
    }

    fn has_access(&self, _content_id: NodeId, _roles: &[String]) -> bool {
        true
    }
}

/// Access policy protecting the subtree under one root node.
pub struct SubtreeAccessPolicy {
    protected_root: NodeId,
    rule: AccessRule,
    allowed_roles: Vec<String>,
}

impl SubtreeAccessPolicy {
    pub fn new(protected_root: NodeId, rule: AccessRule, allowed_roles: &[&str]) -> Self {
        Self {
            protected_root,
            rule,
            allowed_roles: allowed_roles.iter().map(|role| role.to_string()).collect(),
        }
    }
}

impl AccessPolicy for SubtreeAccessPolicy {
    fn is_protected(&self, path: &NodePath) -> Option<AccessRule> {
        path.contains(self.protected_root).then_some(self.rule)
    }

    fn has_access(&self, _content_id: NodeId, roles: &[String]) -> bool {
        roles.iter().any(|role| self.allowed_roles.contains(role))
    }
}

/// An unauthenticated caller.
pub struct AnonymousCaller;

impl AuthState for AnonymousCaller {
    fn is_logged_in(&self) -> bool {
        false
    }

    fn current_roles(&self) -> Vec<String> {
        Vec::new()
    }
}

/// An authenticated caller with a fixed set of roles.
pub struct MemberCaller {
    roles: Vec<String>,
}

impl MemberCaller {
    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            roles: roles.iter().map(|role| role.to_string()).collect(),
        }
    }
}

impl AuthState for MemberCaller {
    fn is_logged_in(&self) -> bool {
        true
    }

    fn current_roles(&self) -> Vec<String> {
        self.roles.clone()
    }
}

/// URL provider that resolves nothing.
pub struct NoUrlProvider;

impl UrlProvider for NoUrlProvider {
    fn url_for_id(&self, _id: NodeId) -> Option<String> {
        None
    }

    fn url_for_key(&self, _key: Uuid) -> Option<String> {
        None
    }
}

/// URL provider backed by a fixed id-to-URL map.
pub struct FixedUrlProvider {
    urls: HashMap<NodeId, String>,
}

impl FixedUrlProvider {
    pub fn new(urls: &[(i64, &str)]) -> Self {
        Self {
            urls: urls
                .iter()
                .map(|(id, url)| (NodeId(*id), url.to_string()))
                .collect(),
        }
    }
}

impl UrlProvider for FixedUrlProvider {
    fn url_for_id(&self, id: NodeId) -> Option<String> {
        self.urls.get(&id).cloned()
    }

    fn url_for_key(&self, _key: Uuid) -> Option<String> {
        None
    }
}

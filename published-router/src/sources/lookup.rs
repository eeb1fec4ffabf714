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

//! Read-side lookup capabilities: domains, content, templates, URLs.

use crate::model::{Domain, NodeId, PublishedNode, Template, TemplateId};
use std::sync::Arc;
use uuid::Uuid;

/// Source of the configured domain list.
///
/// The list is read-mostly, process-wide configuration; implementations
/// refresh it outside the router.
pub trait DomainSource: Send + Sync {
    /// All configured domains; wildcard-flagged entries are included only
    /// when `include_wildcards` is set.
    fn get_all(&self, include_wildcards: bool) -> Vec<Domain>;
}

/// Lookup into the published content tree.
pub trait ContentSource: Send + Sync {
    fn get_by_id(&self, id: NodeId) -> Option<Arc<PublishedNode>>;
    fn get_by_key(&self, key: Uuid) -> Option<Arc<PublishedNode>>;
}

/// Lookup into the template store.
pub trait TemplateStore: Send + Sync {
    fn get_by_id(&self, id: TemplateId) -> Option<Template>;
    fn get_by_alias(&self, alias: &str) -> Option<Template>;
}

/// Resolves a node reference to an absolute URL.
///
/// Returns `None` when no URL can be produced for the node; the router then
/// ignores the external-redirect directive that asked for it.
pub trait UrlProvider: Send + Sync {
    fn url_for_id(&self, id: NodeId) -> Option<String>;
    fn url_for_key(&self, key: Uuid) -> Option<String>;
}

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

//! Fixture content finders.

use published_router::{
    ContentFinder, ContentLastChanceFinder, ContentSource, NodeId, PublishedRequest,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Finder resolving exact URI paths to node ids through a content source.
pub struct PathMapFinder {
    routes: HashMap<String, NodeId>,
    source: Arc<dyn ContentSource>,
}

impl PathMapFinder {
    pub fn new(routes: &[(&str, i64)], source: Arc<dyn ContentSource>) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|(path, id)| (path.to_string(), NodeId(*id)))
                .collect(),
            source,
        }
    }
}

impl ContentFinder for PathMapFinder {
    fn try_find(&self, request: &mut PublishedRequest) -> bool {
        let Some(id) = self.routes.get(request.uri().path()) else {
            return false;
        };
        match self.source.get_by_id(*id) {
            Some(node) => {
                request.set_content(node);
                true
            }
            None => false,
        }
    }
}

/// Last-chance finder rendering one configured node, keeping the router's
/// not-found flag as it is (the node stands in for a 404 page).
pub struct FixedLastChanceFinder {
    node_id: NodeId,
    source: Arc<dyn ContentSource>,
}

impl FixedLastChanceFinder {
    pub fn new(node_id: NodeId, source: Arc<dyn ContentSource>) -> Self {
        Self { node_id, source }
    }
}

impl ContentFinder for FixedLastChanceFinder {
    fn try_find(&self, request: &mut PublishedRequest) -> bool {
        match self.source.get_by_id(self.node_id) {
            Some(node) => {
                request.set_content(node);
                true
            }
            None => false,
        }
    }
}

impl ContentLastChanceFinder for FixedLastChanceFinder {}

/// Last-chance finder serving one configured node as ordinary default
/// content: it clears the not-found flag the router set before invoking it.
pub struct DefaultContentLastChanceFinder {
    node_id: NodeId,
    source: Arc<dyn ContentSource>,
}

impl DefaultContentLastChanceFinder {
    pub fn new(node_id: NodeId, source: Arc<dyn ContentSource>) -> Self {
        Self { node_id, source }
    }
}

impl ContentFinder for DefaultContentLastChanceFinder {
    fn try_find(&self, request: &mut PublishedRequest) -> bool {
        match self.source.get_by_id(self.node_id) {
            Some(node) => {
                request.set_content(node);
                request.set_is_404(false);
                true
            }
            None => false,
        }
    }
}

impl ContentLastChanceFinder for DefaultContentLastChanceFinder {}

/// Last-chance finder that never finds anything.
pub struct FailingLastChanceFinder;

impl ContentFinder for FailingLastChanceFinder {
    fn try_find(&self, _request: &mut PublishedRequest) -> bool {
        false
    }
}

impl ContentLastChanceFinder for FailingLastChanceFinder {}

/// Finder that flags the request for redirection instead of assigning
/// content.
pub struct RedirectFlagFinder {
    url: String,
}

impl RedirectFlagFinder {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ContentFinder for RedirectFlagFinder {
    fn try_find(&self, request: &mut PublishedRequest) -> bool {
        request.set_redirect(self.url.clone());
        false
    }
}

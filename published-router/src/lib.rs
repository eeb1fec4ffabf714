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

//! # published-router
//!
//! `published-router` resolves an inbound web request (a URI plus caller
//! identity) to a single published content node, a culture, and a rendering
//! template, enforcing public access and following content-authored
//! redirects on the way.
//!
//! Typical usage is API-first and remains centered on [`PublishedRouter`]
//! and the mutable-then-frozen request pair [`PublishedRequest`] /
//! [`RoutedRequest`]. Internal modules are organized by domain layer to keep
//! behavior ownership explicit.
//!
//! Every lookup the router performs (domains, content, templates, access
//! rules, URLs) goes through a capability trait injected at construction,
//! so a host wires its own caches and a test wires fixtures; the router
//! itself is synchronous and holds no per-request state of its own.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use content_static_file::ContentStaticFile;
//! use integration_test_utils::{AnonymousCaller, FixedLastChanceFinder, NoUrlProvider, OpenAccessPolicy};
//! use published_router::{Culture, NodeId, PublishedRouter, RouterServices, RoutingOptions};
//! use url::Url;
//!
//! let content = Arc::new(ContentStaticFile::new(
//!     "../utils/content-static-file/static-configs/testdata.json".to_string(),
//! ).unwrap());
//!
//! let services = RouterServices {
//!     domains: content.clone(),
//!     content: content.clone(),
//!     templates: content.clone(),
//!     access: Arc::new(OpenAccessPolicy),
//!     urls: Arc::new(NoUrlProvider),
//! };
//!
//! let router = PublishedRouter::new(
//!     services,
//!     Vec::new(),
//!     Arc::new(FixedLastChanceFinder::new(NodeId(1001), content.clone())),
//!     RoutingOptions::default(),
//!     Culture::new("en-US"),
//! );
//!
//! let request = router.create_request(Url::parse("https://example.com/").unwrap());
//! let routed = router.prepare_request(request, &AnonymousCaller).unwrap();
//!
//! assert_eq!(routed.content().unwrap().id, NodeId(1001));
//! assert_eq!(routed.culture().as_str(), "en-US");
//! assert!(routed.has_template());
//! ```
//!
//! ## Finder contract
//!
//! Content lookup strategies are pluggable: the router runs an ordered chain
//! of [`ContentFinder`]s and accepts the first that assigns content. A
//! finder mutates the request on success and leaves it untouched on failure.
//!
//! ```
//! use std::sync::Arc;
//! use integration_test_utils::{AnonymousCaller, FailingLastChanceFinder, InMemoryContentSource,
//!     InMemoryTemplateStore, FixedDomainSource, NoUrlProvider, OpenAccessPolicy, published_node};
//! use published_router::{ContentFinder, Culture, NodeId, PublishedRequest, PublishedRouter,
//!     RouterServices, RoutingOptions};
//! use url::Url;
//!
//! struct RootFinder {
//!     home: Arc<published_router::PublishedNode>,
//! }
//!
//! impl ContentFinder for RootFinder {
//!     fn try_find(&self, request: &mut PublishedRequest) -> bool {
//!         if request.uri().path() != "/" {
//!             return false;
//!         }
//!         request.set_content(self.home.clone());
//!         true
//!     }
//! }
//!
//! let home = Arc::new(published_node(1000, &[1000]));
//! let services = RouterServices {
//!     domains: Arc::new(FixedDomainSource::new(Vec::new())),
//!     content: Arc::new(InMemoryContentSource::new(vec![home.as_ref().clone()])),
//!     templates: Arc::new(InMemoryTemplateStore::new(Vec::new())),
//!     access: Arc::new(OpenAccessPolicy),
//!     urls: Arc::new(NoUrlProvider),
//! };
//! let router = PublishedRouter::new(
//!     services,
//!     vec![Arc::new(RootFinder { home })],
//!     Arc::new(FailingLastChanceFinder),
//!     RoutingOptions::default(),
//!     Culture::new("en-US"),
//! );
//!
//! let request = router.create_request(Url::parse("https://example.com/").unwrap());
//! let routed = router.prepare_request(request, &AnonymousCaller).unwrap();
//! assert_eq!(routed.content().unwrap().id, NodeId(1000));
//! assert!(routed.is_initial_content());
//!
//! let request = router.create_request(Url::parse("https://example.com/missing").unwrap());
//! let routed = router.prepare_request(request, &AnonymousCaller).unwrap();
//! assert!(!routed.has_content());
//! assert!(routed.is_404());
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: outward `PublishedRouter` surface and the
//!   mutable-then-frozen request state
//! - Routing: domain matching, finder-chain execution, redirect following,
//!   access enforcement, and template selection policy
//! - Model: node, path, domain, template, culture, and access value types
//! - Sources: capability traits for every injected collaborator
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events/spans and does not unconditionally initialize a
//! global subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

mod api;
pub use api::{PublishedRequest, PublishedRouter, RoutedRequest, RouterServices};

mod config;
pub use config::RoutingOptions;

mod model;
pub use model::{
    AccessRule, Culture, Domain, NodeId, NodePath, NodePathParseError, PublishedNode,
    RedirectValue, Template, TemplateId,
};

#[doc(hidden)]
pub mod observability;
mod routing;
pub use routing::template::{MissingTemplateError, ALT_TEMPLATE_PARAM};

mod sources;
pub use sources::{
    AccessPolicy, AuthState, ContentFinder, ContentLastChanceFinder, ContentSource, DomainSource,
    TemplateStore, UrlProvider,
};

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

//! Shared test support for the `published-router` workspace: logging
//! initialization plus in-memory fixture implementations of every capability
//! trait the router consumes.

mod fixture_finders;
mod fixture_nodes;
mod fixture_sources;

pub use fixture_finders::{
    DefaultContentLastChanceFinder, FailingLastChanceFinder, FixedLastChanceFinder, PathMapFinder,
    RedirectFlagFinder,
};
pub use fixture_nodes::{published_node, published_node_with_template};
pub use fixture_sources::{
    AnonymousCaller, FixedDomainSource, FixedUrlProvider, InMemoryContentSource,
    InMemoryTemplateStore, MemberCaller, NoUrlProvider, OpenAccessPolicy, SubtreeAccessPolicy,
};

/// One-time `tracing` subscriber initialization for tests and binaries.
///
/// Safe to call repeatedly; only the first call installs the subscriber.
/// The filter comes from `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

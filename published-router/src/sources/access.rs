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

//! Public-access policy and caller identity.

use crate::model::{AccessRule, NodeId, NodePath};

/// Public-access protection rules keyed by content ancestry.
pub trait AccessPolicy: Send + Sync {
    /// The rule protecting `path`, or `None` when the node is public.
    fn is_protected(&self, path: &NodePath) -> Option<AccessRule>;

    /// Whether any of `roles` grants access to the protected node.
    fn has_access(&self, content_id: NodeId, roles: &[String]) -> bool;
}

/// Identity of the caller issuing the current request.
///
/// Supplied per request by the host; the router never caches it.
pub trait AuthState {
    fn is_logged_in(&self) -> bool;
    fn current_roles(&self) -> Vec<String>;
}

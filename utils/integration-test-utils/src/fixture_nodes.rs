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

//! Builders for fixture content nodes.

use published_router::{NodeId, NodePath, PublishedNode, TemplateId};
use uuid::Uuid;

/// A published node with the given id and ancestor path (ids root-first,
/// the node's own id last). Redirect directives and templates are left
/// unset; set the public fields for anything more specific.
pub fn published_node(id: i64, path: &[i64]) -> PublishedNode {
    PublishedNode::new(
        NodeId(id),
        Uuid::new_v4(),
        NodePath::new(path.iter().copied().map(NodeId).collect()),
    )
}

/// Same as [`published_node`], with a configured template id.
pub fn published_node_with_template(id: i64, path: &[i64], template_id: i32) -> PublishedNode {
    let mut node = published_node(id, path);
    node.template_id = Some(TemplateId(template_id));
    node
}

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

//! Published content node and its content-authored redirect directives.

use crate::model::ids::{NodeId, TemplateId};
use crate::model::node_path::NodePath;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Value of a content-authored redirect directive.
///
/// Editors reference the target either by numeric node id or by the node's
/// globally-unique key. Anything else is kept verbatim as [`Malformed`] so
/// the router can log and ignore it instead of failing the request.
///
/// [`Malformed`]: RedirectValue::Malformed
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RedirectValue {
    Id(NodeId),
    Key(Uuid),
    Malformed(String),
}

impl RedirectValue {
    /// Interprets a raw directive string: integer id first, then key.
    pub fn parse_str(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return Self::Id(NodeId(id));
        }
        if let Ok(key) = Uuid::parse_str(trimmed) {
            return Self::Key(key);
        }
        Self::Malformed(raw.to_string())
    }
}

impl Display for RedirectValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RedirectValue::Id(id) => write!(f, "{id}"),
            RedirectValue::Key(key) => write!(f, "{key}"),
            RedirectValue::Malformed(raw) => write!(f, "{raw}"),
        }
    }
}

impl From<NodeId> for RedirectValue {
    fn from(id: NodeId) -> Self {
        Self::Id(id)
    }
}

impl From<Uuid> for RedirectValue {
    fn from(key: Uuid) -> Self {
        Self::Key(key)
    }
}

/// A node of the published content tree, as served by a content source.
///
/// Nodes are immutable snapshots; sources hand them out as
/// `Arc<PublishedNode>` and the router never mutates them.
#[derive(Clone, Debug)]
pub struct PublishedNode {
    pub id: NodeId,
    pub key: Uuid,
    pub path: NodePath,
    /// Template configured on the node; `None` when the node renders without
    /// a template (route hijacking downstream).
    pub template_id: Option<TemplateId>,
    /// Directive to render another node in place of this one.
    pub internal_redirect: Option<RedirectValue>,
    /// Directive to redirect the caller to an arbitrary URL.
    pub external_redirect: Option<RedirectValue>,
}

impl PublishedNode {
    pub fn new(id: NodeId, key: Uuid, path: NodePath) -> Self {
        Self {
            id,
            key,
            path,
            template_id: None,
            internal_redirect: None,
            external_redirect: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeId, RedirectValue};
    use uuid::Uuid;

    #[test]
    fn parse_str_reads_numeric_ids() {
        assert_eq!(
            RedirectValue::parse_str(" 1042 "),
            RedirectValue::Id(NodeId(1042))
        );
    }

    #[test]
    fn parse_str_reads_node_keys() {
        let key = Uuid::new_v4();

        assert_eq!(
            RedirectValue::parse_str(&key.to_string()),
            RedirectValue::Key(key)
        );
    }

    #[test]
    fn parse_str_keeps_anything_else_verbatim() {
        assert_eq!(
            RedirectValue::parse_str("not-a-reference"),
            RedirectValue::Malformed("not-a-reference".to_string())
        );
    }
}

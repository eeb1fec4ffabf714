/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
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

//! Canonical structured field keys and value-format helpers.

use crate::model::{NodeId, PublishedNode, RedirectValue};

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";

pub const URI: &str = "uri";
pub const DOMAIN: &str = "domain";
pub const ROOT_ID: &str = "root_id";
pub const CULTURE: &str = "culture";
pub const NODE_ID: &str = "node_id";
pub const NODE_PATH: &str = "node_path";
pub const TEMPLATE_ID: &str = "template_id";
pub const TEMPLATE_ALIAS: &str = "template_alias";
pub const DIRECTIVE: &str = "directive";
pub const REDIRECT_URL: &str = "redirect_url";
pub const REASON: &str = "reason";

pub const NONE: &str = "none";
pub const REASON_SELF_REDIRECT: &str = "self_redirect";
pub const REASON_TARGET_MISSING: &str = "target_missing";
pub const REASON_MALFORMED_DIRECTIVE: &str = "malformed_directive";
pub const REASON_LOOP_DETECTED: &str = "loop_detected";
pub const REASON_RETRIES_EXHAUSTED: &str = "retries_exhausted";

pub fn format_node_id(node: Option<&PublishedNode>) -> String {
    node.map(|node| node.id.to_string())
        .unwrap_or_else(|| NONE.to_string())
}

pub fn format_optional_id(id: Option<NodeId>) -> String {
    id.map(|id| id.to_string())
        .unwrap_or_else(|| NONE.to_string())
}

pub fn format_directive(directive: &RedirectValue) -> String {
    match directive {
        RedirectValue::Id(id) => format!("id={id}"),
        RedirectValue::Key(key) => format!("key={key}"),
        RedirectValue::Malformed(raw) => format!("raw={raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_directive, format_node_id, format_optional_id, NONE};
    use crate::model::{NodeId, NodePath, PublishedNode, RedirectValue};
    use uuid::Uuid;

    #[test]
    fn format_node_id_returns_id_when_present() {
        let node = PublishedNode::new(
            NodeId(1042),
            Uuid::new_v4(),
            NodePath::new(vec![NodeId(1042)]),
        );

        assert_eq!(format_node_id(Some(&node)), "1042");
    }

    #[test]
    fn format_node_id_returns_none_when_absent() {
        assert_eq!(format_node_id(None), NONE);
    }

    #[test]
    fn format_optional_id_is_stable() {
        assert_eq!(format_optional_id(Some(NodeId(7))), "7");
        assert_eq!(format_optional_id(None), NONE);
    }

    #[test]
    fn format_directive_distinguishes_reference_forms() {
        assert_eq!(format_directive(&RedirectValue::Id(NodeId(5))), "id=5");
        assert_eq!(
            format_directive(&RedirectValue::Malformed("x".to_string())),
            "raw=x"
        );
    }
}

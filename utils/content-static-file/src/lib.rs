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

//! Static-file backed content tree for `published-router`.
//!
//! Loads one JSON document describing nodes, templates, and domains, and
//! serves it through the router's [`ContentSource`], [`TemplateStore`], and
//! [`DomainSource`] capabilities. Intended for doctests, integration tests,
//! and demos; rows that cannot be interpreted are logged and skipped rather
//! than failing the whole load.

use published_router::{
    ContentSource, Culture, Domain, DomainSource, NodeId, NodePath, PublishedNode, RedirectValue,
    Template, TemplateId, TemplateStore,
};
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Failure to load the static content file.
#[derive(Debug)]
pub enum StaticFileError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for StaticFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StaticFileError::Io(err) => write!(f, "unable to read static content file: {err}"),
            StaticFileError::Parse(err) => {
                write!(f, "unable to parse static content file: {err}")
            }
        }
    }
}

impl Error for StaticFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StaticFileError::Io(err) => Some(err),
            StaticFileError::Parse(err) => Some(err),
        }
    }
}

/// Content tree, template store, and domain list loaded from one JSON file.
pub struct ContentStaticFile {
    nodes: HashMap<NodeId, Arc<PublishedNode>>,
    keys: HashMap<Uuid, NodeId>,
    templates: Vec<Template>,
    domains: Vec<Domain>,
}

impl ContentStaticFile {
    pub fn new(static_file: String) -> Result<Self, StaticFileError> {
        debug!("loading static content file: {static_file}");

        let data = fs::read_to_string(&static_file).map_err(StaticFileError::Io)?;
        let document: Value = serde_json::from_str(&data).map_err(StaticFileError::Parse)?;

        let mut loaded = Self {
            nodes: HashMap::new(),
            keys: HashMap::new(),
            templates: Vec::new(),
            domains: Vec::new(),
        };

        if let Some(rows) = document.get("nodes").and_then(Value::as_array) {
            for row in rows {
                loaded.read_node(row);
            }
        }
        if let Some(rows) = document.get("templates").and_then(Value::as_array) {
            for row in rows {
                loaded.read_template(row);
            }
        }
        if let Some(rows) = document.get("domains").and_then(Value::as_array) {
            for row in rows {
                loaded.read_domain(row);
            }
        }

        debug!(
            "loaded {} nodes, {} templates, {} domains",
            loaded.nodes.len(),
            loaded.templates.len(),
            loaded.domains.len()
        );
        Ok(loaded)
    }

    fn read_node(&mut self, row: &Value) {
        let Some(id) = row.get("id").and_then(Value::as_i64) else {
            error!("node row without a numeric id, skipping: {row}");
            return;
        };
        let id = NodeId(id);

        let path = match row.get("path").and_then(Value::as_str) {
            Some(raw) => match NodePath::from_str(raw) {
                Ok(path) => path,
                Err(err) => {
                    error!("node {id} has an unreadable path '{raw}': {err}, skipping");
                    return;
                }
            },
            None => NodePath::new(vec![id]),
        };

        let key = match row.get("key").and_then(Value::as_str) {
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(key) => key,
                Err(err) => {
                    error!("node {id} has an unreadable key '{raw}': {err}, skipping");
                    return;
                }
            },
            None => {
                warn!("node {id} has no key, generating one");
                Uuid::new_v4()
            }
        };

        let mut node = PublishedNode::new(id, key, path);
        node.template_id = row
            .get("template_id")
            .and_then(Value::as_i64)
            .filter(|template_id| *template_id > 0)
            .map(|template_id| TemplateId(template_id as i32));
        node.internal_redirect = row.get("internal_redirect").map(Self::read_directive);
        node.external_redirect = row.get("external_redirect").map(Self::read_directive);

        self.keys.insert(node.key, node.id);
        self.nodes.insert(node.id, Arc::new(node));
    }

    fn read_directive(value: &Value) -> RedirectValue {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(id) => RedirectValue::Id(NodeId(id)),
                None => RedirectValue::Malformed(number.to_string()),
            },
            Value::String(raw) => RedirectValue::parse_str(raw),
            other => {
                warn!("redirect directive is neither a number nor a string: {other}");
                RedirectValue::Malformed(other.to_string())
            }
        }
    }

    fn read_template(&mut self, row: &Value) {
        let id = row.get("id").and_then(Value::as_i64);
        let alias = row.get("alias").and_then(Value::as_str);
        match (id, alias) {
            (Some(id), Some(alias)) => {
                self.templates.push(Template::new(TemplateId(id as i32), alias));
            }
            _ => error!("template row needs an id and an alias, skipping: {row}"),
        }
    }

    fn read_domain(&mut self, row: &Value) {
        let root_id = row.get("root_id").and_then(Value::as_i64);
        let culture = row.get("culture").and_then(Value::as_str);
        let (Some(root_id), Some(culture)) = (root_id, culture) else {
            error!("domain row needs a root_id and a culture, skipping: {row}");
            return;
        };

        let wildcard = row
            .get("wildcard")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if wildcard {
            self.domains
                .push(Domain::wildcard(NodeId(root_id), Culture::new(culture)));
            return;
        }

        match row.get("name").and_then(Value::as_str) {
            Some(name) => {
                self.domains
                    .push(Domain::new(name, NodeId(root_id), Culture::new(culture)));
            }
            None => error!("domain row needs a name, skipping: {row}"),
        }
    }
}

impl ContentSource for ContentStaticFile {
    fn get_by_id(&self, id: NodeId) -> Option<Arc<PublishedNode>> {
        self.nodes.get(&id).cloned()
    }

    fn get_by_key(&self, key: Uuid) -> Option<Arc<PublishedNode>> {
        self.keys.get(&key).and_then(|id| self.nodes.get(id)).cloned()
    }
}

impl TemplateStore for ContentStaticFile {
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

impl DomainSource for ContentStaticFile {
    fn get_all(&self, include_wildcards: bool) -> Vec<Domain> {
        self.domains
            .iter()
            .filter(|domain| include_wildcards || !domain.is_wildcard)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentStaticFile, StaticFileError};
    use published_router::{ContentSource, DomainSource, NodeId, TemplateId, TemplateStore};

    const TESTDATA: &str = "static-configs/testdata.json";

    #[test]
    fn loads_nodes_templates_and_domains() {
        let content =
            ContentStaticFile::new(TESTDATA.to_string()).expect("test data should load");

        let home = ContentSource::get_by_id(&content, NodeId(1001)).expect("node 1001");
        assert_eq!(home.template_id, Some(TemplateId(10)));

        let by_key = content.get_by_key(home.key).expect("lookup by key");
        assert_eq!(by_key.id, home.id);

        assert!(TemplateStore::get_by_id(&content, TemplateId(10)).is_some());
        assert!(content.get_by_alias("standard").is_some());

        let without_wildcards = content.get_all(false);
        let with_wildcards = content.get_all(true);
        assert!(without_wildcards.iter().all(|domain| !domain.is_wildcard));
        assert!(with_wildcards.len() > without_wildcards.len());
    }

    #[test]
    fn missing_file_reports_an_io_error() {
        let error = ContentStaticFile::new("static-configs/no-such-file.json".to_string())
            .expect_err("load should fail");

        assert!(matches!(error, StaticFileError::Io(_)));
        assert!(error.to_string().contains("unable to read"));
    }
}

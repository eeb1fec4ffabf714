//! Domain matching: exact host/path rules and wildcard ancestry rules.

use crate::model::{Domain, NodeId, NodePath};
use url::Url;

pub(crate) struct DomainMatcher;

impl DomainMatcher {
    /// Splits a configured `host` or `host/path-prefix` pattern. Hosts are
    /// compared case-insensitively, path prefixes case-sensitively.
    fn split_pattern(name: &str) -> (String, &str) {
        match name.split_once('/') {
            Some((host, path)) => (host.to_ascii_lowercase(), path.trim_matches('/')),
            None => (name.to_ascii_lowercase(), ""),
        }
    }

    /// Whether `request_path` falls under `prefix` on a segment boundary.
    fn path_prefix_matches(prefix: &str, request_path: &str) -> bool {
        if prefix.is_empty() {
            return true;
        }
        match request_path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Finds the configured domain best matching the request URI.
    ///
    /// The most specific pattern (longest path prefix) wins; ties are broken
    /// by configuration order. Wildcard-flagged domains never match here.
    pub(crate) fn domain_for_uri<'a>(domains: &'a [Domain], uri: &Url) -> Option<&'a Domain> {
        let host = uri.host_str()?.to_ascii_lowercase();
        let request_path = uri.path().trim_matches('/');

        let mut best: Option<(&Domain, usize)> = None;
        for domain in domains.iter().filter(|domain| !domain.is_wildcard) {
            let (domain_host, domain_path) = Self::split_pattern(&domain.name);
            if domain_host != host || !Self::path_prefix_matches(domain_path, request_path) {
                continue;
            }
            let specificity = domain_path.len();
            if best.map_or(true, |(_, current)| specificity > current) {
                best = Some((domain, specificity));
            }
        }
        best.map(|(domain, _)| domain)
    }

    /// Finds the wildcard domain bound to the closest ancestor of `path`.
    ///
    /// Walks from the node itself up towards the root, stopping (exclusive)
    /// at `root_id` when one is given, so only ancestors below the matched
    /// domain's root are considered.
    pub(crate) fn wildcard_domain_in_path<'a>(
        domains: &'a [Domain],
        path: &NodePath,
        root_id: Option<NodeId>,
    ) -> Option<&'a Domain> {
        for ancestor in path.iter_leaf_to_root() {
            if root_id == Some(ancestor) {
                return None;
            }
            if let Some(domain) = domains
                .iter()
                .find(|domain| domain.is_wildcard && domain.root_id == ancestor)
            {
                return Some(domain);
            }
        }
        None
    }
}

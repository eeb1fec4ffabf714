//! Detection of content-authored redirect-to-URL directives.

use crate::api::request::PublishedRequest;
use crate::model::RedirectValue;
use crate::observability::{events, fields};
use crate::sources::UrlProvider;
use tracing::debug;

const COMPONENT: &str = "external_redirect";

/// Sentinel some URL providers return instead of failing outright.
const PLACEHOLDER_URL: &str = "#";

pub(crate) struct ExternalRedirectResolver;

impl ExternalRedirectResolver {
    /// Flags the request for redirection when the resolved content carries a
    /// redirect-to-URL directive that resolves to a usable URL.
    ///
    /// Runs once, at the very end of the pipeline. Directives that are
    /// malformed or do not resolve are logged and ignored; the template and
    /// content already on the request stay untouched either way.
    pub(crate) fn detect(urls: &dyn UrlProvider, request: &mut PublishedRequest) {
        let Some(node) = request.content().cloned() else {
            return;
        };
        let Some(directive) = node.external_redirect.clone() else {
            return;
        };

        let resolved = match &directive {
            RedirectValue::Id(id) => urls.url_for_id(*id),
            RedirectValue::Key(key) => urls.url_for_key(*key),
            RedirectValue::Malformed(_) => None,
        };

        match resolved.filter(|url| url != PLACEHOLDER_URL) {
            Some(url) => {
                debug!(
                    event = events::EXTERNAL_REDIRECT_SET,
                    component = COMPONENT,
                    node_id = %node.id,
                    redirect_url = %url,
                    "content redirects the caller to a url"
                );
                request.set_redirect(url);
            }
            None => {
                debug!(
                    event = events::EXTERNAL_REDIRECT_IGNORED,
                    component = COMPONENT,
                    node_id = %node.id,
                    directive = %fields::format_directive(&directive),
                    "redirect directive did not resolve to a url, ignoring"
                );
            }
        }
    }
}

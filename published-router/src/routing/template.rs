//! Template selection, alternate-template overrides included.

use crate::api::request::PublishedRequest;
use crate::config::RoutingOptions;
use crate::model::{NodeId, TemplateId};
use crate::observability::events;
use crate::sources::TemplateStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tracing::{debug, error};
use url::Url;

/// Query-string parameter carrying the alternate-template alias.
pub const ALT_TEMPLATE_PARAM: &str = "altTemplate";

const COMPONENT: &str = "template";

/// The one non-recoverable routing failure: a node references a template id
/// that the template store does not know. Rendering without the configured
/// template would hide a data-integrity problem, so this propagates as a
/// hard error instead of degrading.
#[derive(Debug, Eq, PartialEq)]
pub struct MissingTemplateError {
    pub template_id: TemplateId,
    pub node_id: NodeId,
}

impl Display for MissingTemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "template {} referenced by node {} does not exist, the document cannot render",
            self.template_id, self.node_id
        )
    }
}

impl Error for MissingTemplateError {}

pub(crate) struct TemplateResolver;

impl TemplateResolver {
    /// Reads the alternate-template alias from the request URI query string.
    pub(crate) fn alt_template_in_query(uri: &Url) -> Option<String> {
        uri.query_pairs()
            .find(|(key, _)| key == ALT_TEMPLATE_PARAM)
            .map(|(_, value)| value.into_owned())
    }

    /// Resolves the template to render the current content with.
    ///
    /// Precedence: a usable alternate-template override wins outright; then
    /// a template already pre-assigned by a finder is kept; then the node's
    /// own template id is looked up. The override is usable only when
    /// overrides are enabled, non-blank, resolvable by alias, and the
    /// content is the initial finder result (or arrived via internal
    /// redirect with preservation configured); otherwise it is ignored and
    /// selection falls through to the next rule.
    pub(crate) fn select(
        store: &dyn TemplateStore,
        options: &RoutingOptions,
        alt_template: Option<&str>,
        request: &mut PublishedRequest,
    ) -> Result<(), MissingTemplateError> {
        let Some(node) = request.content().cloned() else {
            request.clear_template();
            return Ok(());
        };

        let use_alt = !options.disable_alternative_templates
            && (request.is_initial_content()
                || (options.internal_redirect_preserves_template
                    && request.is_internal_redirect()));
        let alt_alias = alt_template
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .filter(|_| use_alt);

        if let Some(alias) = alt_alias {
            match store.get_by_alias(alias) {
                Some(template) => {
                    debug!(
                        event = events::TEMPLATE_ALT_APPLIED,
                        component = COMPONENT,
                        node_id = %node.id,
                        template_id = %template.id,
                        template_alias = %template.alias,
                        "alternate template overrides the selection"
                    );
                    request.set_template(template);
                    return Ok(());
                }
                None => {
                    debug!(
                        event = events::TEMPLATE_ALT_IGNORED,
                        component = COMPONENT,
                        node_id = %node.id,
                        template_alias = alias,
                        "alternate template alias does not exist, ignoring"
                    );
                }
            }
        }

        if request.has_template() {
            debug!(
                event = events::TEMPLATE_KEPT,
                component = COMPONENT,
                node_id = %node.id,
                "keeping the template a finder assigned"
            );
            return Ok(());
        }

        match node.template_id {
            Some(template_id) => {
                let Some(template) = store.get_by_id(template_id) else {
                    error!(
                        event = events::TEMPLATE_MISSING_FATAL,
                        component = COMPONENT,
                        node_id = %node.id,
                        template_id = %template_id,
                        "configured template does not exist, the document cannot render"
                    );
                    return Err(MissingTemplateError {
                        template_id,
                        node_id: node.id,
                    });
                };
                debug!(
                    event = events::TEMPLATE_RESOLVED,
                    component = COMPONENT,
                    node_id = %node.id,
                    template_id = %template.id,
                    template_alias = %template.alias,
                    "resolved the node's configured template"
                );
                request.set_template(template);
            }
            None => {
                debug!(
                    event = events::TEMPLATE_NONE,
                    component = COMPONENT,
                    node_id = %node.id,
                    "no template configured, deferring to downstream handling"
                );
            }
        }
        Ok(())
    }
}

//! Ordered execution of the pluggable content-finder chain.

use crate::api::request::PublishedRequest;
use crate::observability::events;
use crate::sources::ContentFinder;
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "finder_chain";

pub(crate) struct FinderChain;

impl FinderChain {
    /// Runs the finders in configured order.
    ///
    /// Stops at the first finder that reports success, or as soon as a
    /// finder flags a redirect on the request. Returns `true` when a finder
    /// reported success; exhausting the chain without success is not an
    /// error, it leaves the request without content for the caller's
    /// fallback handling.
    pub(crate) fn resolve(
        finders: &[Arc<dyn ContentFinder>],
        request: &mut PublishedRequest,
    ) -> bool {
        for (index, finder) in finders.iter().enumerate() {
            debug!(
                event = events::FINDER_ATTEMPT,
                component = COMPONENT,
                finder_index = index,
                "running content finder"
            );
            if finder.try_find(request) {
                debug!(
                    event = events::FINDER_CHAIN_HIT,
                    component = COMPONENT,
                    finder_index = index,
                    "finder assigned content"
                );
                return true;
            }
            if request.is_redirect() {
                debug!(
                    event = events::FINDER_CHAIN_REDIRECT,
                    component = COMPONENT,
                    finder_index = index,
                    "finder flagged a redirect, stopping the chain"
                );
                return false;
            }
        }
        debug!(
            event = events::FINDER_CHAIN_MISS,
            component = COMPONENT,
            "no finder assigned content"
        );
        false
    }
}

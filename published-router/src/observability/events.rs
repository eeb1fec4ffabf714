//! Canonical structured event names used across `published-router`.

// Request lifecycle events.
pub const REQUEST_PREPARE_START: &str = "request_prepare_start";
pub const REQUEST_PREPARE_DONE: &str = "request_prepare_done";
pub const REQUEST_PREPARE_REDIRECT: &str = "request_prepare_redirect";

// Domain matching events.
pub const DOMAIN_MATCH_OK: &str = "domain_match_ok";
pub const DOMAIN_MATCH_NONE: &str = "domain_match_none";
pub const WILDCARD_DOMAIN_MATCH_OK: &str = "wildcard_domain_match_ok";
pub const WILDCARD_DOMAIN_MATCH_NONE: &str = "wildcard_domain_match_none";

// Finder chain and last-chance events.
pub const FINDER_ATTEMPT: &str = "finder_attempt";
pub const FINDER_CHAIN_HIT: &str = "finder_chain_hit";
pub const FINDER_CHAIN_MISS: &str = "finder_chain_miss";
pub const FINDER_CHAIN_REDIRECT: &str = "finder_chain_redirect";
pub const LAST_CHANCE_START: &str = "last_chance_start";
pub const LAST_CHANCE_OK: &str = "last_chance_ok";
pub const LAST_CHANCE_FAILED: &str = "last_chance_failed";

// Internal redirect events.
pub const INTERNAL_REDIRECT_FOLLOWED: &str = "internal_redirect_followed";
pub const INTERNAL_REDIRECT_SELF_IGNORED: &str = "internal_redirect_self_ignored";
pub const INTERNAL_REDIRECT_TARGET_MISSING: &str = "internal_redirect_target_missing";
pub const INTERNAL_REDIRECT_MALFORMED: &str = "internal_redirect_malformed";

// Not-found / access retry loop events.
pub const RESOLUTION_LOOP_ABORT: &str = "resolution_loop_abort";

// Access enforcement events.
pub const ACCESS_NOT_PROTECTED: &str = "access_not_protected";
pub const ACCESS_GRANTED: &str = "access_granted";
pub const ACCESS_LOGIN_SUBSTITUTE: &str = "access_login_substitute";
pub const ACCESS_DENIED_SUBSTITUTE: &str = "access_denied_substitute";

// Template selection events.
pub const TEMPLATE_ALT_APPLIED: &str = "template_alt_applied";
pub const TEMPLATE_ALT_IGNORED: &str = "template_alt_ignored";
pub const TEMPLATE_KEPT: &str = "template_kept";
pub const TEMPLATE_RESOLVED: &str = "template_resolved";
pub const TEMPLATE_NONE: &str = "template_none";
pub const TEMPLATE_MISSING_FATAL: &str = "template_missing_fatal";

// External redirect events.
pub const EXTERNAL_REDIRECT_SET: &str = "external_redirect_set";
pub const EXTERNAL_REDIRECT_IGNORED: &str = "external_redirect_ignored";

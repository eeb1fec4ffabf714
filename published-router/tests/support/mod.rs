use integration_test_utils::{
    FixedDomainSource, InMemoryContentSource, InMemoryTemplateStore, NoUrlProvider,
    OpenAccessPolicy,
};
use published_router::{Domain, PublishedNode, RouterServices, Template, TemplateId};
use std::sync::Arc;
use url::Url;

pub(crate) fn standard_templates() -> Vec<Template> {
    vec![
        Template::new(TemplateId(10), "standard"),
        Template::new(TemplateId(11), "landing"),
    ]
}

pub(crate) fn services(
    nodes: Vec<PublishedNode>,
    templates: Vec<Template>,
    domains: Vec<Domain>,
) -> (RouterServices, Arc<InMemoryContentSource>) {
    let content = Arc::new(InMemoryContentSource::new(nodes));
    let services = RouterServices {
        domains: Arc::new(FixedDomainSource::new(domains)),
        content: content.clone(),
        templates: Arc::new(InMemoryTemplateStore::new(templates)),
        access: Arc::new(OpenAccessPolicy),
        urls: Arc::new(NoUrlProvider),
    };
    (services, content)
}

pub(crate) fn uri(raw: &str) -> Url {
    Url::parse(raw).expect("valid test uri")
}

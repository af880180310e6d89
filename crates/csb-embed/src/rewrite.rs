//! Sandbox URL construction and link replacement.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::EmbedOptions;
use crate::consts::{HTML_NODE_TYPE, SANDBOX_DEFINE_URL};
use crate::link::LinkQuery;
use crate::node::Node;

/// Unreserved characters: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// URI component characters: unreserved plus ! * ' ( )
const COMPONENT_ENCODE_SET: &AsciiSet = &QUERY_ENCODE_SET
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Fields removed from a link when it is replaced.
const LINK_FIELDS: [&str; 2] = ["position", "title"];

/// Renders the final sandbox URL into markup.
///
/// Implement this trait to customize the embedded widget.
pub trait IframeRenderer: Send + Sync {
    /// Produce the markup embedding `url`.
    fn render(&self, url: &str) -> String;
}

/// Sandboxed `<iframe>` with the `embedded-codesandbox` class.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIframe;

impl IframeRenderer for DefaultIframe {
    fn render(&self, url: &str) -> String {
        format!(
            r#"<iframe src="{url}" class="embedded-codesandbox" sandbox="allow-modals allow-forms allow-popups allow-scripts allow-same-origin"></iframe>"#
        )
    }
}

/// Markup template where every `{url}` is replaced by the sandbox URL.
#[derive(Debug, Clone)]
pub struct TemplateIframe {
    template: String,
}

impl TemplateIframe {
    /// Placeholder replaced by the sandbox URL.
    pub const PLACEHOLDER: &'static str = "{url}";

    /// Create a renderer from a template such as `<iframe src="{url}"></iframe>`.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl IframeRenderer for TemplateIframe {
    fn render(&self, url: &str) -> String {
        self.template.replace(Self::PLACEHOLDER, url)
    }
}

/// Merge per-link options over the defaults.
///
/// A key given on the link replaces every default value for that key.
#[must_use]
pub fn merge_options(defaults: &EmbedOptions, overrides: &LinkQuery) -> LinkQuery {
    let mut merged: LinkQuery = defaults
        .iter()
        .map(|(k, v)| (k.clone(), vec![Some(v.clone())]))
        .collect();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Encode options for the `query` parameter.
///
/// Pairs are written as `key=value` in key order and joined with `&`. A
/// repeated key is written once per value, a bare flag as just `key`. The
/// whole string is then encoded once more as a URI component.
#[must_use]
pub fn encode_query(options: &LinkQuery) -> String {
    let query = options
        .iter()
        .flat_map(|(key, values)| {
            let key = utf8_percent_encode(key, QUERY_ENCODE_SET).to_string();
            values.iter().map(move |value| match value {
                Some(value) => format!("{key}={}", utf8_percent_encode(value, QUERY_ENCODE_SET)),
                None => key.clone(),
            })
        })
        .collect::<Vec<_>>()
        .join("&");
    utf8_percent_encode(&query, COMPONENT_ENCODE_SET).to_string()
}

/// Build the CodeSandbox define URL.
#[must_use]
pub fn sandbox_url(parameters: &str, options: &LinkQuery) -> String {
    format!(
        "{SANDBOX_DEFINE_URL}?embed=1&parameters={parameters}&query={}",
        encode_query(options)
    )
}

/// Build the `html` node that replaces a sentinel link.
///
/// The link's `url`, `children`, `position` and `title` are dropped. Other
/// fields such as `data` are carried over.
#[must_use]
pub fn embed_node(link: &Node, markup: String) -> Node {
    let mut extra = link.extra.clone();
    for field in LINK_FIELDS {
        extra.remove(field);
    }
    Node {
        kind: HTML_NODE_TYPE.to_owned(),
        url: None,
        value: Some(markup),
        children: None,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_embed_options;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn options(pairs: &[(&str, &str)]) -> LinkQuery {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), vec![Some((*v).to_owned())]))
            .collect()
    }

    fn defaults(pairs: &[(&str, &str)]) -> EmbedOptions {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_merge_options_override_wins() {
        let merged = merge_options(&default_embed_options(), &options(&[("view", "split")]));
        assert_eq!(merged, options(&[("hidenavigation", "1"), ("view", "split")]));
    }

    #[test]
    fn test_merge_options_adds_new_keys() {
        let merged = merge_options(&defaults(&[("view", "preview")]), &options(&[("theme", "light")]));
        assert_eq!(merged, options(&[("theme", "light"), ("view", "preview")]));
    }

    #[test]
    fn test_merge_options_flag_replaces_default() {
        let overrides = LinkQuery::from([("view".to_owned(), vec![None])]);

        let merged = merge_options(&default_embed_options(), &overrides);

        assert_eq!(merged["view"], vec![None]);
        assert_eq!(merged["hidenavigation"], vec![Some("1".to_owned())]);
    }

    #[test]
    fn test_encode_query_defaults() {
        let merged = merge_options(&default_embed_options(), &LinkQuery::new());
        assert_eq!(encode_query(&merged), "hidenavigation%3D1%26view%3Dpreview");
    }

    #[test]
    fn test_encode_query_flags_and_repeated_keys() {
        let query = LinkQuery::from([
            ("autoresize".to_owned(), vec![None]),
            (
                "module".to_owned(),
                vec![Some("b".to_owned()), Some("a".to_owned())],
            ),
            ("title".to_owned(), vec![Some(String::new())]),
        ]);

        assert_eq!(
            encode_query(&query),
            "autoresize%26module%3Db%26module%3Da%26title%3D"
        );
    }

    #[test]
    fn test_encode_query_escapes_values_twice() {
        let encoded = encode_query(&options(&[("module", "/src/App.js"), ("title", "a b")]));
        assert_eq!(encoded, "module%3D%252Fsrc%252FApp.js%26title%3Da%2520b");
    }

    #[test]
    fn test_encode_query_empty() {
        assert_eq!(encode_query(&LinkQuery::new()), "");
    }

    #[test]
    fn test_sandbox_url_shape() {
        let url = sandbox_url("N4Ig", &options(&[("view", "split")]));
        assert_eq!(
            url,
            "https://codesandbox.io/api/v1/sandboxes/define?embed=1&parameters=N4Ig&query=view%3Dsplit"
        );
    }

    #[test]
    fn test_default_iframe() {
        assert_eq!(
            DefaultIframe.render("https://x"),
            r#"<iframe src="https://x" class="embedded-codesandbox" sandbox="allow-modals allow-forms allow-popups allow-scripts allow-same-origin"></iframe>"#
        );
    }

    #[test]
    fn test_template_iframe() {
        let renderer = TemplateIframe::new(r#"<div data-src="{url}"><iframe src="{url}"></iframe></div>"#);
        assert_eq!(
            renderer.render("u"),
            r#"<div data-src="u"><iframe src="u"></iframe></div>"#
        );
    }

    #[test]
    fn test_embed_node_strips_link_fields() {
        let link: Node = serde_json::from_value(json!({
            "type": "link",
            "url": "embedded-codesandbox://x",
            "title": "Example",
            "children": [{"type": "text", "value": "x"}],
            "position": {"start": {"line": 1, "column": 1}},
            "data": {"hProperties": {"id": "demo"}}
        }))
        .unwrap();

        let node = embed_node(&link, "<iframe></iframe>".to_owned());

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "html",
                "value": "<iframe></iframe>",
                "data": {"hProperties": {"id": "demo"}}
            })
        );
    }
}

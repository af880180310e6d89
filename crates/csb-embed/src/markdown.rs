//! Sandbox embedding for pulldown-cmark event streams.
//!
//! Hosts that render markdown with pulldown-cmark have no mdast tree. For
//! them the whole span of a sentinel link (`Start(Link)` through
//! `End(Link)`) is replaced with one inline HTML event.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

use crate::error::EmbedError;
use crate::transform::SandboxEmbedder;

impl SandboxEmbedder {
    /// Replace sentinel links in an event stream with embed markup.
    ///
    /// # Errors
    ///
    /// Returns the first error met while embedding a link.
    pub fn embed_events<'a, I>(&self, events: I) -> Result<Vec<Event<'a>>, EmbedError>
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut output = Vec::new();
        // Nesting depth inside a replaced link; its events are dropped.
        let mut skip_depth = 0usize;

        for event in events {
            if skip_depth > 0 {
                match event {
                    Event::Start(Tag::Link { .. }) => skip_depth += 1,
                    Event::End(TagEnd::Link) => skip_depth -= 1,
                    _ => {}
                }
                continue;
            }

            if let Event::Start(Tag::Link { ref dest_url, .. }) = event
                && self.is_sandbox_url(dest_url)
            {
                let markup = self.render_link(dest_url)?;
                output.push(Event::InlineHtml(markup.into()));
                skip_depth = 1;
                continue;
            }

            output.push(event);
        }

        Ok(output)
    }

    /// Render markdown to HTML with sentinel links embedded.
    ///
    /// # Errors
    ///
    /// See [`embed_events`](Self::embed_events).
    pub fn render_html(&self, markdown: &str) -> Result<String, EmbedError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES;
        let events = self.embed_events(Parser::new_ext(markdown, options))?;

        let mut output = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut output, events.into_iter());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbedConfig;
    use crate::rewrite::TemplateIframe;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    fn embedder(root: &Path) -> SandboxEmbedder {
        fs::create_dir_all(root.join("demo")).unwrap();
        fs::write(root.join("demo/index.js"), "x").unwrap();
        SandboxEmbedder::new(
            EmbedConfig::new(root)
                .unwrap()
                .iframe(TemplateIframe::new("<sandbox>")),
        )
    }

    #[test]
    fn test_render_html_replaces_link() {
        let temp = tempfile::tempdir().unwrap();

        let html = embedder(temp.path())
            .render_html("Try it: [the **demo**](embedded-codesandbox://demo)\n")
            .unwrap();

        assert_eq!(html, "<p>Try it: <sandbox></p>\n");
    }

    #[test]
    fn test_render_html_keeps_other_links() {
        let temp = tempfile::tempdir().unwrap();

        let html = embedder(temp.path())
            .render_html("[docs](https://example.com) and [demo](embedded-codesandbox://demo)\n")
            .unwrap();

        assert_eq!(
            html,
            "<p><a href=\"https://example.com\">docs</a> and <sandbox></p>\n"
        );
    }

    #[test]
    fn test_render_html_autolink() {
        let temp = tempfile::tempdir().unwrap();

        let html = embedder(temp.path())
            .render_html("<embedded-codesandbox://demo>\n")
            .unwrap();

        assert_eq!(html, "<p><sandbox></p>\n");
    }

    #[test]
    fn test_embed_events_passthrough() {
        let temp = tempfile::tempdir().unwrap();
        let markdown = "# Title\n\nText with [a link](https://example.com).\n";

        let events = embedder(temp.path())
            .embed_events(Parser::new(markdown))
            .unwrap();

        assert_eq!(events, Parser::new(markdown).collect::<Vec<_>>());
    }

    #[test]
    fn test_embed_events_error_aborts() {
        let temp = tempfile::tempdir().unwrap();

        let err = embedder(temp.path())
            .render_html("[x](embedded-codesandbox://missing)")
            .unwrap_err();

        assert!(matches!(err, EmbedError::Io { .. }));
    }
}

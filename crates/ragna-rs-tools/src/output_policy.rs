//! Lookup output rendering and truncation policy.

use crate::LookupHit;
use ragna_rs_config::{LookupConfig, LookupSource};

/// Policy that bounds how much lookup text reaches the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutputPolicy {
    /// Maximum number of hits rendered per lookup.
    pub top_k_results: usize,
    /// Maximum number of characters in the rendered text.
    pub doc_content_chars_max: usize,
}

impl Default for LookupOutputPolicy {
    fn default() -> Self {
        Self::from(&LookupConfig::default())
    }
}

impl From<&LookupConfig> for LookupOutputPolicy {
    fn from(config: &LookupConfig) -> Self {
        Self {
            top_k_results: config.top_k_results,
            doc_content_chars_max: config.doc_content_chars_max,
        }
    }
}

impl LookupOutputPolicy {
    /// Render hits for a source as free text, or the no-result notice.
    pub fn render(&self, source: LookupSource, hits: &[LookupHit]) -> String {
        let blocks = hits
            .iter()
            .filter(|hit| !hit.summary.trim().is_empty() || !hit.title.trim().is_empty())
            .take(self.top_k_results)
            .map(|hit| render_hit(source, hit))
            .collect::<Vec<_>>();
        if blocks.is_empty() {
            return no_result_notice(source);
        }
        self.truncate_chars(blocks.join("\n\n"))
    }

    /// Truncate text to the character limit on a char boundary.
    fn truncate_chars(&self, value: String) -> String {
        match value.char_indices().nth(self.doc_content_chars_max) {
            Some((end, _)) => value[..end].to_string(),
            None => value,
        }
    }
}

/// Text returned when a lookup has no usable hits.
pub fn no_result_notice(source: LookupSource) -> String {
    format!("No good {} result was found", source_label(source))
}

fn source_label(source: LookupSource) -> &'static str {
    match source {
        LookupSource::Arxiv => "Arxiv",
        LookupSource::Wikipedia => "Wikipedia",
        LookupSource::Web => "Web Search",
    }
}

fn render_hit(source: LookupSource, hit: &LookupHit) -> String {
    let mut lines = Vec::new();
    if let Some(published) = &hit.published {
        lines.push(format!("Published: {published}"));
    }
    if !hit.title.is_empty() {
        let label = match source {
            LookupSource::Wikipedia => "Page",
            _ => "Title",
        };
        lines.push(format!("{label}: {}", hit.title));
    }
    if !hit.authors.is_empty() {
        lines.push(format!("Authors: {}", hit.authors.join(", ")));
    }
    if source == LookupSource::Web && hit.title.is_empty() {
        lines.push(hit.summary.clone());
    } else {
        lines.push(format!("Summary: {}", hit.summary));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{LookupOutputPolicy, no_result_notice};
    use crate::LookupHit;
    use pretty_assertions::assert_eq;
    use ragna_rs_config::LookupSource;

    #[test]
    fn render_limits_hits_and_characters() {
        let policy = LookupOutputPolicy {
            top_k_results: 1,
            doc_content_chars_max: 24,
        };
        let hits = vec![
            LookupHit::new("Rust", "A systems programming language."),
            LookupHit::new("Ferris", "The unofficial mascot."),
        ];
        let output = policy.render(LookupSource::Wikipedia, &hits);
        assert_eq!(output, "Page: Rust\nSummary: A sy");
    }

    #[test]
    fn render_includes_paper_metadata() {
        let policy = LookupOutputPolicy {
            top_k_results: 2,
            doc_content_chars_max: 500,
        };
        let hit = LookupHit {
            title: "Attention Is All You Need".to_string(),
            summary: "Transformers.".to_string(),
            published: Some("2017-06-12".to_string()),
            authors: vec!["Vaswani".to_string(), "Shazeer".to_string()],
        };
        let output = policy.render(LookupSource::Arxiv, &[hit]);
        assert_eq!(
            output,
            "Published: 2017-06-12\nTitle: Attention Is All You Need\nAuthors: Vaswani, Shazeer\nSummary: Transformers."
        );
    }

    #[test]
    fn render_reports_missing_results() {
        let policy = LookupOutputPolicy::default();
        let blank = LookupHit::new(" ", "");
        assert_eq!(
            policy.render(LookupSource::Arxiv, &[blank]),
            "No good Arxiv result was found"
        );
        assert_eq!(
            no_result_notice(LookupSource::Web),
            "No good Web Search result was found"
        );
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let policy = LookupOutputPolicy {
            top_k_results: 1,
            doc_content_chars_max: 3,
        };
        let output = policy.render(LookupSource::Web, &[LookupHit::new("", "héllo")]);
        assert_eq!(output, "hél");
    }
}

//! reqwest-backed lookup provider for DuckDuckGo, Wikipedia and arXiv.

use crate::{LookupHit, LookupProvider};
use async_trait::async_trait;
use log::debug;
use ragna_rs_config::LookupSource;
use ragna_rs_protocol::ToolError;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;

const DUCKDUCKGO_URL: &str = "https://api.duckduckgo.com/";
const WIKIPEDIA_URL: &str = "https://en.wikipedia.org/w/api.php";
const ARXIV_URL: &str = "https://export.arxiv.org/api/query";
const USER_AGENT: &str = concat!("ragna/", env!("CARGO_PKG_VERSION"));

/// Lookup provider that queries the public HTTP APIs directly.
#[derive(Debug, Clone)]
pub struct HttpLookupProvider {
    client: Client,
}

impl HttpLookupProvider {
    /// Build a provider with its own HTTP client.
    pub fn new() -> Result<Self, ToolError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        Ok(Self { client })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ToolError> {
        self.client
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)
    }

    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, ToolError> {
        self.client
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(request_failed)?
            .text()
            .await
            .map_err(request_failed)
    }
}

#[async_trait]
impl LookupProvider for HttpLookupProvider {
    async fn search(
        &self,
        source: LookupSource,
        query: &str,
        limit: usize,
    ) -> Result<Vec<LookupHit>, ToolError> {
        debug!(
            "lookup request (source={:?}, query_len={}, limit={})",
            source,
            query.len(),
            limit
        );
        match source {
            LookupSource::Web => {
                let body = self
                    .get_json(
                        DUCKDUCKGO_URL,
                        &[
                            ("q", query.to_string()),
                            ("format", "json".to_string()),
                            ("no_html", "1".to_string()),
                            ("skip_disambig", "1".to_string()),
                        ],
                    )
                    .await?;
                Ok(parse_duckduckgo(&body, limit))
            }
            LookupSource::Wikipedia => {
                let body = self
                    .get_json(
                        WIKIPEDIA_URL,
                        &[
                            ("action", "query".to_string()),
                            ("format", "json".to_string()),
                            ("generator", "search".to_string()),
                            ("gsrsearch", query.to_string()),
                            ("gsrlimit", limit.to_string()),
                            ("prop", "extracts".to_string()),
                            ("exintro", "1".to_string()),
                            ("explaintext", "1".to_string()),
                            ("exlimit", "max".to_string()),
                        ],
                    )
                    .await?;
                Ok(parse_wikipedia(&body, limit))
            }
            LookupSource::Arxiv => {
                let feed = self
                    .get_text(
                        ARXIV_URL,
                        &[
                            ("search_query", format!("all:{query}")),
                            ("start", "0".to_string()),
                            ("max_results", limit.to_string()),
                        ],
                    )
                    .await?;
                parse_arxiv_feed(&feed, limit)
            }
        }
    }
}

fn request_failed(err: reqwest::Error) -> ToolError {
    ToolError::ExecutionFailed(format!("lookup request failed: {err}"))
}

/// Extract hits from a DuckDuckGo instant-answer body.
pub(crate) fn parse_duckduckgo(body: &Value, limit: usize) -> Vec<LookupHit> {
    let mut hits = Vec::new();
    if let Some(text) = body["AbstractText"].as_str().filter(|text| !text.is_empty()) {
        let heading = body["Heading"].as_str().unwrap_or_default();
        hits.push(LookupHit::new(heading, text));
    }
    let related = body["RelatedTopics"].as_array().into_iter().flatten();
    // Grouped topics nest their entries one level down.
    let flattened = related.flat_map(|item| match item["Topics"].as_array() {
        Some(topics) => topics.iter().collect::<Vec<_>>(),
        None => vec![item],
    });
    for item in flattened {
        if let Some(text) = item["Text"].as_str() {
            hits.push(LookupHit::new("", text));
        }
    }
    hits.truncate(limit);
    hits
}

/// Extract hits from a MediaWiki `generator=search` + `prop=extracts` body.
pub(crate) fn parse_wikipedia(body: &Value, limit: usize) -> Vec<LookupHit> {
    let Some(pages) = body["query"]["pages"].as_object() else {
        return Vec::new();
    };
    let mut ranked = pages
        .values()
        .map(|page| {
            let index = page["index"].as_u64().unwrap_or(u64::MAX);
            let hit = LookupHit::new(
                page["title"].as_str().unwrap_or_default(),
                page["extract"].as_str().unwrap_or_default().trim(),
            );
            (index, hit)
        })
        .collect::<Vec<_>>();
    ranked.sort_by_key(|(index, _)| *index);
    ranked
        .into_iter()
        .map(|(_, hit)| hit)
        .take(limit)
        .collect()
}

/// Extract hits from an arXiv Atom feed.
pub(crate) fn parse_arxiv_feed(feed: &str, limit: usize) -> Result<Vec<LookupHit>, ToolError> {
    let entry_re = compile(r"(?s)<entry>(.*?)</entry>")?;
    let title_re = compile(r"(?s)<title[^>]*>(.*?)</title>")?;
    let summary_re = compile(r"(?s)<summary[^>]*>(.*?)</summary>")?;
    let published_re = compile(r"(?s)<published>(.*?)</published>")?;
    let name_re = compile(r"(?s)<name>(.*?)</name>")?;
    let entity_re = compile(ENTITY_PATTERN)?;

    let capture = |re: &Regex, text: &str| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| clean_text(m.as_str(), &entity_re))
            .unwrap_or_default()
    };

    let hits = entry_re
        .captures_iter(feed)
        .filter_map(|caps| caps.get(1))
        .take(limit)
        .map(|entry| {
            let entry = entry.as_str();
            let published = capture(&published_re, entry);
            LookupHit {
                title: capture(&title_re, entry),
                summary: capture(&summary_re, entry),
                // Atom timestamps carry a time part; keep the date.
                published: (!published.is_empty())
                    .then(|| published.split('T').next().unwrap_or_default().to_string()),
                authors: name_re
                    .captures_iter(entry)
                    .filter_map(|caps| caps.get(1))
                    .map(|m| clean_text(m.as_str(), &entity_re))
                    .collect(),
            }
        })
        .collect();
    Ok(hits)
}

fn compile(pattern: &str) -> Result<Regex, ToolError> {
    Regex::new(pattern).map_err(|err| ToolError::ExecutionFailed(err.to_string()))
}

const ENTITY_PATTERN: &str = r"&(#[xX][0-9a-fA-F]+|#[0-9]+|lt|gt|quot|apos|amp);";

/// Collapse whitespace and decode XML entities, named and numeric, in one pass.
///
/// Numeric references that do not name a valid code point are kept verbatim.
fn clean_text(raw: &str, entities: &Regex) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    entities
        .replace_all(&collapsed, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            let decoded = match name {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                _ => numeric_entity(name),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::{ENTITY_PATTERN, clean_text, parse_arxiv_feed, parse_duckduckgo, parse_wikipedia};
    use crate::LookupHit;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn duckduckgo_prefers_abstract_then_related_topics() {
        let body = json!({
            "Heading": "Rust",
            "AbstractText": "Rust is a language.",
            "RelatedTopics": [
                { "Text": "Cargo - package manager" },
                { "Name": "See also", "Topics": [ { "Text": "Ferris - mascot" } ] },
                { "FirstURL": "https://example.com" }
            ]
        });
        let hits = parse_duckduckgo(&body, 5);
        assert_eq!(
            hits,
            vec![
                LookupHit::new("Rust", "Rust is a language."),
                LookupHit::new("", "Cargo - package manager"),
                LookupHit::new("", "Ferris - mascot"),
            ]
        );
        assert_eq!(parse_duckduckgo(&body, 1).len(), 1);
    }

    #[test]
    fn wikipedia_orders_pages_by_search_index() {
        let body = json!({
            "query": { "pages": {
                "200": { "index": 2, "title": "Second", "extract": "two" },
                "100": { "index": 1, "title": "First", "extract": " one\n" }
            } }
        });
        let hits = parse_wikipedia(&body, 5);
        assert_eq!(
            hits,
            vec![LookupHit::new("First", "one"), LookupHit::new("Second", "two")]
        );
        assert!(parse_wikipedia(&json!({ "batchcomplete": "" }), 5).is_empty());
    }

    #[test]
    fn arxiv_feed_extracts_entries() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query</title>
  <entry>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All
      You Need</title>
    <summary>  The dominant sequence transduction models &amp; more.
    </summary>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name></author>
  </entry>
  <entry>
    <title>Another</title>
    <summary>Second.</summary>
  </entry>
</feed>"#;
        let hits = parse_arxiv_feed(feed, 1).expect("parse");
        assert_eq!(
            hits,
            vec![LookupHit {
                title: "Attention Is All You Need".to_string(),
                summary: "The dominant sequence transduction models & more.".to_string(),
                published: Some("2017-06-12".to_string()),
                authors: vec!["Ashish Vaswani".to_string(), "Noam Shazeer".to_string()],
            }]
        );
    }

    #[test]
    fn clean_text_decodes_numeric_entities_once() {
        let entities = regex::Regex::new(ENTITY_PATTERN).expect("pattern");
        assert_eq!(
            clean_text("Ng&#39;s  &#x27;deep&#X27; &#8212; nets", &entities),
            "Ng's 'deep' \u{2014} nets"
        );
        assert_eq!(clean_text("a &amp;lt; b", &entities), "a &lt; b");
        assert_eq!(clean_text("bad &#1114112; ref", &entities), "bad &#1114112; ref");
    }
}

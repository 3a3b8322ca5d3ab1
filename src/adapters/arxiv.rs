//! arXiv API client
//!
//! Topic search against the arXiv query API and parsing of the Atom feed it
//! returns. See: https://info.arxiv.org/help/api/

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::PaperSource;
use crate::error::{FeedError, SearchError};
use crate::models::{PaperRecord, PublishedDate};
use crate::utils::http::{build_client, RateLimiter};

/// Namespace of every element the parser reads
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Rate limiter key for the query endpoint
const ENDPOINT: &str = "arxiv";

/// Client for the arXiv query API
pub struct ArxivClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    limiter: RateLimiter,
}

impl ArxivClient {
    /// Create a new arXiv client
    ///
    /// # Arguments
    /// * `base_url` - Query endpoint, normally `http://export.arxiv.org/api/query`
    /// * `timeout` - Bound on the whole request
    /// * `min_interval` - Minimum spacing between requests (arXiv asks for 3 seconds)
    pub fn new(base_url: &str, timeout: Duration, min_interval: Duration) -> Result<Self, String> {
        let client = build_client(timeout)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            timeout,
            limiter: RateLimiter::new(min_interval, 1),
        })
    }

    /// Build the full query URL for a topic search
    ///
    /// Free-text search across all fields, first page, relevance order.
    pub fn build_query_url(base_url: &str, topic: &str, limit: u32) -> String {
        format!(
            "{}?search_query=all:{}&start=0&max_results={}&sortBy=relevance&sortOrder=descending",
            base_url,
            urlencoding::encode(topic),
            limit
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout {
                after: self.timeout,
            }
        } else {
            SearchError::Transport(err.without_url().to_string())
        }
    }

    /// One rate-limited query, without the overall deadline
    async fn fetch(&self, topic: &str, limit: u32) -> Result<Vec<PaperRecord>, SearchError> {
        self.limiter.wait_for_slot(ENDPOINT).await;

        let url = Self::build_query_url(&self.base_url, topic, limit);
        debug!("arXiv search: {}", url);

        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/atom+xml, application/xml;q=0.9, text/xml;q=0.8")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("arXiv search for '{}' failed with status {}", topic, status);
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        let papers = parse_feed(&body)?;

        info!("arXiv returned {} paper(s) for '{}'", papers.len(), topic);
        Ok(papers)
    }
}

#[async_trait]
impl PaperSource for ArxivClient {
    /// The rate-limit wait counts against the same bound as the request.
    async fn search(&self, topic: &str, limit: u32) -> Result<Vec<PaperRecord>, SearchError> {
        tokio::time::timeout(self.timeout, self.fetch(topic, limit))
            .await
            .map_err(|_| {
                warn!("arXiv search for '{}' timed out after {:?}", topic, self.timeout);
                SearchError::Timeout {
                    after: self.timeout,
                }
            })?
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
}

#[derive(Default)]
struct EntryBuilder {
    id: Option<String>,
    title: String,
    summary: String,
    published: Option<String>,
    authors: Vec<String>,
}

impl EntryBuilder {
    fn commit(&mut self, field: Field, text: String) {
        match field {
            Field::Id => self.id = Some(text),
            Field::Title => self.title = text,
            Field::Summary => self.summary = text,
            Field::Published => self.published = Some(text),
            Field::AuthorName => self.authors.push(text),
        }
    }

    /// Entries without an identifier or a title cannot be shown and are dropped.
    fn finish(self) -> Option<PaperRecord> {
        let id = self.id.as_deref().map(str::trim).unwrap_or("");
        if id.is_empty() {
            warn!("Skipping feed entry without <id>");
            return None;
        }

        let record = PaperRecord::new(
            &self.title,
            self.authors,
            &self.summary,
            id,
            PublishedDate::from_timestamp(self.published.as_deref()),
        );
        if record.title().is_empty() {
            warn!("Skipping feed entry {} without a title", id);
            return None;
        }
        if record.abstract_text().is_empty() {
            debug!("Feed entry {} has no abstract", id);
        }
        Some(record)
    }
}

/// Which prefix binds the Atom namespace in the document being parsed.
enum AtomPrefix {
    Default,
    Named(Vec<u8>),
}

impl AtomPrefix {
    fn matches(&self, name: QName<'_>) -> bool {
        match (self, name.prefix()) {
            (AtomPrefix::Default, None) => true,
            (AtomPrefix::Named(p), Some(prefix)) => prefix.as_ref() == p.as_slice(),
            _ => false,
        }
    }

    /// Check the root element and learn how it binds the Atom namespace.
    fn from_root(root: &BytesStart<'_>) -> Result<Self, FeedError> {
        let root_name = String::from_utf8_lossy(root.name().as_ref()).to_string();
        if root.local_name().as_ref() != b"feed" {
            return Err(FeedError::NotAFeed(root_name));
        }

        let mut found = None;
        for attr in root.attributes().flatten() {
            if attr.value.as_ref() != ATOM_NS.as_bytes() {
                continue;
            }
            let key = attr.key.as_ref();
            if key == b"xmlns" {
                found = Some(AtomPrefix::Default);
            } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
                found = Some(AtomPrefix::Named(prefix.to_vec()));
            }
        }

        match found {
            Some(prefix) if prefix.matches(root.name()) => Ok(prefix),
            _ => Err(FeedError::NotAFeed(root_name)),
        }
    }
}

/// Append a text node, keeping it apart from text split off by inline markup
fn push_chunk(text: &mut String, chunk: &str) {
    if !text.is_empty() && !chunk.is_empty() {
        text.push(' ');
    }
    text.push_str(chunk);
}

/// Parse an arXiv Atom feed into records, in document order
pub fn parse_feed(xml: &str) -> Result<Vec<PaperRecord>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut papers = Vec::new();
    let mut atom: Option<AtomPrefix> = None;
    let mut depth: usize = 0;
    let mut entry: Option<(EntryBuilder, usize)> = None;
    let mut author_depth: Option<usize> = None;
    let mut field: Option<(Field, usize)> = None;
    let mut text = String::new();

    loop {
        buf.clear();
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                return Err(FeedError::Xml {
                    position: reader.buffer_position(),
                    message: e.to_string(),
                })
            }
        };

        match event {
            Event::Start(e) => {
                depth += 1;
                let Some(ns) = atom.as_ref() else {
                    atom = Some(AtomPrefix::from_root(&e)?);
                    continue;
                };
                if !ns.matches(e.name()) {
                    continue;
                }

                let local = e.local_name();
                match entry.as_ref().map(|(_, d)| *d) {
                    None => {
                        if local.as_ref() == b"entry" {
                            entry = Some((EntryBuilder::default(), depth));
                        }
                    }
                    Some(entry_depth) if depth == entry_depth + 1 => {
                        let target = match local.as_ref() {
                            b"id" => Some(Field::Id),
                            b"title" => Some(Field::Title),
                            b"summary" => Some(Field::Summary),
                            b"published" => Some(Field::Published),
                            b"author" => {
                                author_depth = Some(depth);
                                None
                            }
                            _ => None,
                        };
                        if let Some(target) = target {
                            field = Some((target, depth));
                            text.clear();
                        }
                    }
                    Some(_) => {
                        if author_depth.is_some_and(|d| depth == d + 1) && local.as_ref() == b"name"
                        {
                            field = Some((Field::AuthorName, depth));
                            text.clear();
                        }
                    }
                }
            }
            Event::Empty(e) => {
                // <feed/> with no entries at all
                if atom.is_none() {
                    atom = Some(AtomPrefix::from_root(&e)?);
                }
            }
            Event::Text(t) => {
                if field.is_some() {
                    let unescaped = t.unescape().map_err(|e| FeedError::Xml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    })?;
                    push_chunk(&mut text, &unescaped);
                }
            }
            Event::CData(c) => {
                if field.is_some() {
                    push_chunk(&mut text, &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some((target, field_depth)) = field {
                    if field_depth == depth {
                        if let Some((builder, _)) = entry.as_mut() {
                            builder.commit(target, std::mem::take(&mut text));
                        }
                        field = None;
                    }
                }
                if author_depth == Some(depth) {
                    author_depth = None;
                }
                if entry.as_ref().is_some_and(|(_, d)| *d == depth) {
                    if let Some((builder, _)) = entry.take() {
                        papers.extend(builder.finish());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if atom.is_none() {
        return Err(FeedError::Empty);
    }
    if entry.is_some() {
        return Err(FeedError::Truncated);
    }

    Ok(papers)
}

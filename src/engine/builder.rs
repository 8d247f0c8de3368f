//! Index builders: the consumer side of the pipeline.
//!
//! The driver only knows the [`IndexBuilder`] trait. [`ArticleIndexBuilder`] is the default
//! implementation used by the CLI: it reads optional TOML front matter from each article and
//! serializes one record per file.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::FileEntry;
use crate::engine::hashing::content_hash;

/// Builds an index from a stream of [`FileEntry`] values delivered in arbitrary order.
///
/// `receive_input` is called once per file; `finish` is called once after the last file and returns the serialized index.
/// An error from either is terminal: no further input is delivered.
pub trait IndexBuilder: Send {
    fn receive_input(&mut self, entry: FileEntry) -> Result<()>;
    fn finish(self: Box<Self>) -> Result<String>;
}

/// Delimiter line opening and closing TOML front matter.
const FRONT_MATTER_DELIM: &str = "+++";

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    date: Option<toml::Value>,
    #[serde(default)]
    tags: Vec<String>,
    description: Option<String>,
}

/// One article in the index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub relative_path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub word_count: usize,
    /// Blake3 hex of the full file content.
    pub hash: String,
}

/// Serialized shape of the article index.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleIndex {
    pub articles: Vec<ArticleRecord>,
}

/// Default builder: one [`ArticleRecord`] per file, sorted by path.
#[derive(Debug, Default)]
pub struct ArticleIndexBuilder {
    records: BTreeMap<String, ArticleRecord>,
    pretty: bool,
}

impl ArticleIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-print the JSON produced by `finish`.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl IndexBuilder for ArticleIndexBuilder {
    fn receive_input(&mut self, entry: FileEntry) -> Result<()> {
        let record = parse_article(&entry)?;
        if self.records.contains_key(&record.relative_path) {
            bail!("duplicate article path: {}", record.relative_path);
        }
        self.records.insert(record.relative_path.clone(), record);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<String> {
        let ArticleIndexBuilder { records, pretty } = *self;
        let index = ArticleIndex {
            articles: records.into_values().collect(),
        };
        let json = if pretty {
            serde_json::to_string_pretty(&index)
        } else {
            serde_json::to_string(&index)
        };
        json.context("serialize article index")
    }
}

/// Split `+++`-delimited front matter from the body. Returns None when the file has no (closed) front matter.
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix(FRONT_MATTER_DELIM)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FRONT_MATTER_DELIM {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Title from the first `# ` heading in the body.
fn heading_title(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find_map(|l| l.strip_prefix("# "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn date_string(value: toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        other => Err(anyhow!(
            "`date` must be a string or TOML date, got {}",
            other.type_str()
        )),
    }
}

/// Turn one file into its index record.
pub fn parse_article(entry: &FileEntry) -> Result<ArticleRecord> {
    let (front, body) = match split_front_matter(&entry.content) {
        Some((raw, body)) => {
            let fm: FrontMatter = toml::from_str(raw)
                .with_context(|| format!("invalid front matter in {}", entry.relative_path))?;
            (fm, body)
        }
        None => (FrontMatter::default(), entry.content.as_str()),
    };
    let date = front
        .date
        .map(date_string)
        .transpose()
        .with_context(|| format!("invalid front matter in {}", entry.relative_path))?;
    let title = front
        .title
        .or_else(|| heading_title(body))
        .unwrap_or_else(|| {
            Path::new(&entry.relative_path)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    Ok(ArticleRecord {
        relative_path: entry.relative_path.clone(),
        title,
        date,
        tags: front.tags,
        description: front.description,
        word_count: body.split_whitespace().count(),
        hash: content_hash(&entry.content),
    })
}

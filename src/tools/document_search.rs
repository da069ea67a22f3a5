//! Built-in `document_search` tool.
//!
//! Keyword search over an in-memory corpus followed by a rerank cut. The
//! corpus is a list of `{id, content}` entries loaded from JSON or YAML.

use super::ToolCapability;
use crate::catalog::FileFormat;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::path::Path;

pub const TOOL_NAME: &str = "document_search";

const DESCRIPTION: &str = "Search for relevant documents and rerank them. \
Use this tool when you need to find documents related to a user's query. \
Returns the most relevant documents with their relevance scores.";

/// One searchable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    top_k: Option<usize>,
    #[serde(default)]
    top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ScoredDocument<'a> {
    id: &'a str,
    content: &'a str,
    score: f64,
}

/// Keyword search over a fixed corpus.
#[derive(Debug, Clone)]
pub struct DocumentSearchTool {
    documents: Vec<Document>,
    top_k: usize,
    top_n: usize,
}

impl DocumentSearchTool {
    /// `top_k` and `top_n` are the defaults used when a call omits them.
    pub fn new(documents: Vec<Document>, top_k: usize, top_n: usize) -> Self {
        Self {
            documents,
            top_k,
            top_n,
        }
    }

    /// Number of documents in the corpus.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Score each document by the fraction of query terms it contains.
    fn search(&self, query: &str, top_k: usize) -> Vec<(&Document, f64)> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(&Document, f64)> = self
            .documents
            .iter()
            .filter_map(|doc| {
                let content = doc.content.to_lowercase();
                let matched = terms
                    .iter()
                    .filter(|t| content.contains(t.as_str()))
                    .count();
                let score = matched as f64 / terms.len() as f64;
                (matched > 0).then_some((doc, score))
            })
            .collect();

        // Stable sort keeps corpus order among equal scores
        hits.sort_by(|a, b| b.1.total_cmp(&a.1));
        hits.truncate(top_k);
        hits
    }
}

impl ToolCapability for DocumentSearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "The search query text"},
                "top_k": {"type": "integer", "description": "Number of results from the first-stage search"},
                "top_n": {"type": "integer", "description": "Number of final results after reranking"}
            },
            "required": ["query"]
        })
    }

    fn invoke(&self, args: Value) -> Result<Value> {
        let args: SearchArgs = serde_json::from_value(args).map_err(|e| {
            EngineError::Validation(format!("invalid {} arguments: {}", TOOL_NAME, e))
        })?;

        let query = args.query.trim();
        if query.is_empty() {
            return Err(EngineError::Validation(format!(
                "{} query cannot be empty",
                TOOL_NAME
            )));
        }

        let top_k = args.top_k.unwrap_or(self.top_k);
        let top_n = args.top_n.unwrap_or(self.top_n).min(top_k);

        let documents: Vec<ScoredDocument<'_>> = self
            .search(query, top_k)
            .into_iter()
            .take(top_n)
            .map(|(doc, score)| ScoredDocument {
                id: &doc.id,
                content: &doc.content,
                score,
            })
            .collect();

        Ok(json!({
            "total": documents.len(),
            "documents": documents,
            "query": query,
        }))
    }
}

/// Distinct lowercased alphanumeric terms of `text`.
fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Load a corpus file (`[{id, content}]`).
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        EngineError::Validation(format!(
            "failed to read documents file '{}': {}",
            path.display(),
            e
        ))
    })?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let documents: Vec<Document> = match FileFormat::from_path(path) {
        FileFormat::Json => serde_json::from_str(&content).map_err(|e| {
            EngineError::Validation(format!("failed to parse documents JSON: {}", e))
        })?,
        FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| {
            EngineError::Validation(format!("failed to parse documents YAML: {}", e))
        })?,
    };
    Ok(documents)
}

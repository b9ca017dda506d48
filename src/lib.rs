#![forbid(unsafe_code)]
//! # Chat Statistics
//!
//! Analytics over a group-chat JSON export (one `messages` array, one author
//! per message, optional reply links). Two artifacts come out of a run:
//!
//! - a ranking of the participants who most often reply to other people's
//!   questions, and
//! - a word-cloud image of the chat's textual content after normalization and
//!   stopword removal, shaped for right-to-left scripts.
//!
//! The entry point is [`ChatStatistics`]: construct it from the export path
//! plus an [`AnalysisConfig`], then call [`ChatStatistics::top_repliers`]
//! and/or [`ChatStatistics::generate_word_cloud`].

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod text;
pub mod wordcloud;

pub use config::AnalysisConfig;
pub use error::{ChatStatsError, Result};
pub use export::{ExportFormat, save_ranking};
pub use model::{ChatExport, Message, MessageText};
pub use text::{
    ARABIC_QUESTION_MARK, Normalizer, contains_question, prepare_for_display, tokenize_words,
};
pub use wordcloud::{CLOUD_FILENAME, WordCloud};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

/// One row of the reply ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedAuthor {
    pub author: String,
    pub count: u32,
}

/// Statistics engine over one loaded chat export.
///
/// Owns the dataset for the duration of a run. Stages may rewrite a message's
/// text field to its flattened form; that mutation is idempotent, so stages can
/// be re-entered in any order.
#[derive(Debug)]
pub struct ChatStatistics {
    chat: ChatExport,
    config: AnalysisConfig,
}

impl ChatStatistics {
    /// Loads the chat export from `chat_json`.
    pub fn from_file(chat_json: &Path, config: AnalysisConfig) -> Result<Self> {
        info!("loading chat export from {}", chat_json.display());
        let raw = fs::read_to_string(chat_json).map_err(|_| ChatStatsError::FileNotFound {
            path: chat_json.to_path_buf(),
        })?;
        let chat: ChatExport = serde_json::from_str(&raw)?;
        Ok(ChatStatistics { chat, config })
    }

    /// Wraps an already-deserialized export.
    pub fn new(chat: ChatExport, config: AnalysisConfig) -> Self {
        ChatStatistics { chat, config }
    }

    pub fn messages(&self) -> &[Message] {
        &self.chat.messages
    }

    /// Ranks authors by how many of their messages reply to someone else's
    /// question, best first, at most `top_n` rows.
    ///
    /// Two passes: the first flattens and classifies every message, keying the
    /// result by message id; the second attributes each reply whose target was
    /// classified as a question to the replier. Replies without a target and
    /// replies to unknown or unflagged targets are skipped (the lookup
    /// defaults to false). Ties keep first-reply order.
    pub fn top_repliers(&mut self, top_n: usize) -> Result<Vec<RankedAuthor>> {
        info!("scanning {} messages for questions", self.chat.messages.len());
        let mark = self.config.question_mark;
        let mut is_question: HashMap<i64, bool> = HashMap::new();
        for (index, msg) in self.chat.messages.iter_mut().enumerate() {
            let flagged = contains_question(msg.flatten_text(), mark);
            if flagged {
                // ids are only demanded for messages that actually get marked
                let id = msg
                    .id
                    .ok_or(ChatStatsError::MissingField { field: "id", index })?;
                is_question.insert(id, true);
            }
        }

        info!("collecting replies to questions");
        let mut repliers: Vec<&str> = Vec::new();
        for (index, msg) in self.chat.messages.iter().enumerate() {
            let Some(target) = msg.reply_to_message_id else {
                continue;
            };
            if !is_question.get(&target).copied().unwrap_or(false) {
                continue;
            }
            let author = msg.from.as_deref().ok_or(ChatStatsError::MissingField {
                field: "from",
                index,
            })?;
            repliers.push(author);
        }

        let mut tally: Vec<RankedAuthor> = Vec::new();
        for author in repliers {
            match tally.iter_mut().find(|entry| entry.author == author) {
                Some(entry) => entry.count += 1,
                None => tally.push(RankedAuthor {
                    author: author.to_string(),
                    count: 1,
                }),
            }
        }
        // stable sort: equal counts stay in first-reply order
        tally.sort_by(|a, b| b.count.cmp(&a.count));
        tally.truncate(top_n);
        Ok(tally)
    }

    /// Accumulated corpus of all flat-string messages after tokenization and
    /// stopword removal, space-joined in message order.
    ///
    /// Messages whose text is still segmented are skipped here; only the
    /// ranking pass flattens in place. A token is dropped when its normalized
    /// form is in the stopword set; surviving tokens keep their surface form
    /// and relative order.
    pub fn filtered_corpus(&self) -> String {
        let mut corpus = String::from(" ");
        for msg in &self.chat.messages {
            let Some(text) = msg.plain_text() else {
                continue;
            };
            let kept: Vec<&str> = tokenize_words(text)
                .into_iter()
                .filter(|token| {
                    !self
                        .config
                        .stopwords
                        .contains(self.config.normalizer.normalize(token).as_str())
                })
                .collect();
            corpus.push(' ');
            corpus.push_str(&kept.join(" "));
        }
        corpus
    }

    /// Renders the word cloud into `output_dir` and returns the image path.
    ///
    /// Pipeline: filter → normalize → reshape → bidi-reorder → rasterize.
    /// Fails with `EmptyCorpus` before any resource is touched when filtering
    /// leaves nothing, and with `ResourceNotFound` when the font or the output
    /// directory is inaccessible.
    pub fn generate_word_cloud(&self, output_dir: &Path) -> Result<PathBuf> {
        info!(
            "collecting text content from {} messages",
            self.chat.messages.len()
        );
        let corpus = self.config.normalizer.normalize(&self.filtered_corpus());
        if corpus.is_empty() {
            return Err(ChatStatsError::EmptyCorpus);
        }
        let visual = prepare_for_display(&corpus);

        info!("rendering word cloud");
        let path = WordCloud::new(&self.config.font_path).to_file(&visual, output_dir)?;
        info!("word cloud saved to {}", path.display());
        Ok(path)
    }
}

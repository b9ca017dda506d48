use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{ChatStatsError, Result};
use crate::text::{ARABIC_QUESTION_MARK, Normalizer};

/// Shared run configuration, built once at startup and passed by reference into
/// every pipeline stage.
///
/// Holds the single normalizer instance, the normalized stopword set, the
/// locale question glyph, and the font used by the word-cloud renderer. Nothing
/// here changes for the duration of a run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub normalizer: Normalizer,
    pub stopwords: HashSet<String>,
    pub question_mark: char,
    pub font_path: PathBuf,
}

impl AnalysisConfig {
    /// Configuration with an empty stopword set and the Arabic-script question
    /// glyph. `font_path` is only touched when a word cloud is rendered.
    pub fn new<P: Into<PathBuf>>(font_path: P) -> Self {
        AnalysisConfig {
            normalizer: Normalizer::new(),
            stopwords: HashSet::new(),
            question_mark: ARABIC_QUESTION_MARK,
            font_path: font_path.into(),
        }
    }

    /// Loads a newline-delimited stopword file, trimming and normalizing each
    /// entry with the shared normalizer so comparisons against chat tokens are
    /// consistent.
    pub fn with_stopword_file(mut self, path: &Path) -> Result<Self> {
        info!("loading stop words from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|_| ChatStatsError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        self.stopwords = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|word| self.normalizer.normalize(word))
            .collect();
        Ok(self)
    }
}

//! Shared collaborators handed to signal factories

use crate::classify::{LanguageClassifier, WhatlangClassifier};
use crate::error::Result;
use crate::language::{LanguageConfigSource, LanguageConfigs};
use crate::tokenize::{tokenizer_by_name, SubwordTokenizer};
use crate::wordlist::{WordListSource, WordLists};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Everything a signal may need besides its own options.
///
/// Cloning is cheap; all collaborators are reference counted.
#[derive(Clone)]
pub struct TaggerContext {
    languages: Arc<dyn LanguageConfigSource>,
    word_lists: Arc<dyn WordListSource>,
    classifier: Arc<dyn LanguageClassifier>,
    tokenizers: HashMap<String, Arc<dyn SubwordTokenizer>>,
    worker_id: usize,
}

impl Default for TaggerContext {
    fn default() -> Self {
        Self {
            languages: Arc::new(LanguageConfigs::embedded().clone()),
            word_lists: Arc::new(WordLists::embedded()),
            classifier: Arc::new(WhatlangClassifier),
            tokenizers: HashMap::new(),
            worker_id: 0,
        }
    }
}

impl fmt::Debug for TaggerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokenizers: Vec<_> = self.tokenizers.keys().collect();
        tokenizers.sort();
        f.debug_struct("TaggerContext")
            .field("languages", &self.languages.languages())
            .field("tokenizers", &tokenizers)
            .field("worker_id", &self.worker_id)
            .finish()
    }
}

impl TaggerContext {
    /// Context with the embedded tables and built-in adapters
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the language configuration source
    pub fn with_languages(mut self, languages: Arc<dyn LanguageConfigSource>) -> Self {
        self.languages = languages;
        self
    }

    /// Replace the banned word list source
    pub fn with_word_lists(mut self, word_lists: Arc<dyn WordListSource>) -> Self {
        self.word_lists = word_lists;
        self
    }

    /// Replace the language classifier
    pub fn with_classifier(mut self, classifier: Arc<dyn LanguageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Register a tokenizer under its own name, shadowing any built-in one
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn SubwordTokenizer>) -> Self {
        self.tokenizers
            .insert(tokenizer.name().to_string(), tokenizer);
        self
    }

    /// Set the index of the worker this context belongs to
    pub fn with_worker_id(mut self, worker_id: usize) -> Self {
        self.worker_id = worker_id;
        self
    }

    /// Language configuration source
    pub fn languages(&self) -> &dyn LanguageConfigSource {
        self.languages.as_ref()
    }

    /// Banned word list source
    pub fn word_lists(&self) -> &dyn WordListSource {
        self.word_lists.as_ref()
    }

    /// Language classifier
    pub fn classifier(&self) -> Arc<dyn LanguageClassifier> {
        Arc::clone(&self.classifier)
    }

    /// Tokenizer registered under `name`, or the built-in one
    pub fn tokenizer(&self, name: &str) -> Result<Arc<dyn SubwordTokenizer>> {
        match self.tokenizers.get(name) {
            Some(tokenizer) => Ok(Arc::clone(tokenizer)),
            None => tokenizer_by_name(name),
        }
    }

    /// Index of the worker this context belongs to
    pub fn worker_id(&self) -> usize {
        self.worker_id
    }
}

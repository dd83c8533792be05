//! Scope: content-aware preview rendering
//!
//! Classifies preview text (grep hits, URLs, files, directories), renders it
//! and memoizes the result in a bounded LRU cache keyed by the raw text.
//!
//! The cache has a single writer. Background preview renders call the pure
//! [`Scope::render`] and hand their result back to the owner, which inserts it.

mod cache;
mod parse;
pub mod render;

pub use cache::{PreviewCache, DEFAULT_CACHE_CAPACITY};
pub use parse::{extract_first_url, parse, ParsedContent};

#[derive(Debug, Default)]
pub struct Scope {
    cache: PreviewCache,
}

impl Scope {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: PreviewCache::new(cache_capacity),
        }
    }

    /// Classify `text` without rendering it
    pub fn parse(text: &str) -> ParsedContent {
        parse::parse(text)
    }

    /// Classify and render `input`, bypassing the cache
    pub fn render(input: &str) -> String {
        render::render(&parse::parse(input))
    }

    /// Cached render of `input`
    pub fn process(&mut self, input: &str) -> String {
        if let Some(hit) = self.cached(input) {
            return hit;
        }

        let rendered = Self::render(input);
        self.cache.insert(input, rendered.clone());
        rendered
    }

    /// Cache hit for `input`, promoted to most recently used
    pub fn cached(&mut self, input: &str) -> Option<String> {
        let hit = self.cache.get(input).cloned();
        tracing::trace!(hit = hit.is_some(), "Preview cache lookup");
        hit
    }

    /// Store a render produced elsewhere
    pub fn store(&mut self, input: impl Into<String>, rendered: impl Into<String>) {
        self.cache.insert(input, rendered);
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &PreviewCache {
        &self.cache
    }
}

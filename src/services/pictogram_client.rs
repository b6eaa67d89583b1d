//! Pictogram lookup client
//!
//! Wraps the remote pictogram catalogue (ARASAAC) with a per-language query
//! cache, a best-search mode that degrades to plain search, and local keyword
//! autocompletion. Nothing here returns an error to the caller: every remote
//! failure is logged and turned into an empty result, `None`, or the
//! fallback search.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::search_cache::{normalize_query, SearchCache};
use crate::config::defaults::DEFAULT_IMAGE_SIZE;
use crate::config::{ApiConfig, Config, SearchConfig};
use crate::errors::AppResult;
use crate::models::{ImageOptions, KeywordList, PictogramId, PictogramRecord, RawPictogram};
use crate::utils::{HttpClient, StandardHttpClient, UrlUtils};

#[derive(Debug, Default)]
struct KeywordState {
    /// `None` until the list for the current language has been fetched
    words: Option<Vec<String>>,
}

pub struct PictogramClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    image_base_url: String,
    min_query_length: usize,
    max_results: usize,
    max_suggestions: usize,
    language: RwLock<String>,
    cache: SearchCache,
    keywords: RwLock<KeywordState>,
}

impl PictogramClient {
    pub fn new(http: Arc<dyn HttpClient>, api: &ApiConfig, search: &SearchConfig) -> Self {
        Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            image_base_url: UrlUtils::strip_api_version(&api.base_url),
            min_query_length: search.min_query_length,
            max_results: search.max_results,
            max_suggestions: search.max_suggestions,
            language: RwLock::new(api.language.clone()),
            cache: SearchCache::new(),
            keywords: RwLock::new(KeywordState::default()),
        }
    }

    /// Build a client that talks to the configured API over reqwest
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http = StandardHttpClient::new(config.api.connect_timeout)?;
        Ok(Self::new(Arc::new(http), &config.api, &config.search))
    }

    pub async fn language(&self) -> String {
        self.language.read().await.clone()
    }

    /// Number of distinct queries currently cached
    pub async fn cached_queries(&self) -> usize {
        self.cache.len().await
    }

    fn is_searchable(&self, text: &str) -> bool {
        text.trim().chars().count() >= self.min_query_length
    }

    /// Exact search, cached by normalized query
    pub async fn search(&self, text: &str) -> Vec<PictogramRecord> {
        if !self.is_searchable(text) {
            return Vec::new();
        }

        let key = normalize_query(text);
        if let Some(hit) = self.cache.get(&key).await {
            debug!("Search cache hit for '{}' ({} records)", key, hit.len());
            return hit;
        }

        // Read the epoch before the language so a concurrent language switch
        // always invalidates this write.
        let epoch = self.cache.epoch().await;
        let language = self.language().await;
        let url = UrlUtils::endpoint(
            &self.base_url,
            &["pictograms", &language, "search", &UrlUtils::encode_segment(&key)],
        );

        match self.http.get_json(&url).await {
            Ok(body) => {
                let records = self.process_pictograms(body);
                debug!("Search for '{}' returned {} records", key, records.len());
                self.cache.insert(epoch, key, records.clone()).await;
                records
            }
            Err(e) => {
                warn!("Pictogram search for '{}' failed: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Ranked search; falls back to [`PictogramClient::search`] on any failure.
    /// Results of the ranked endpoint are not cached.
    pub async fn best_search(&self, text: &str) -> Vec<PictogramRecord> {
        if !self.is_searchable(text) {
            return Vec::new();
        }

        let key = normalize_query(text);
        let language = self.language().await;
        let url = UrlUtils::endpoint(
            &self.base_url,
            &["pictograms", &language, "bestsearch", &UrlUtils::encode_segment(&key)],
        );

        match self.http.get_json(&url).await {
            Ok(body) => self.process_pictograms(body),
            Err(e) => {
                warn!(
                    "Best search for '{}' failed ({}), falling back to plain search",
                    key, e
                );
                self.search(&key).await
            }
        }
    }

    pub async fn lookup_by_id(&self, id: PictogramId) -> Option<PictogramRecord> {
        let language = self.language().await;
        let url = UrlUtils::endpoint(
            &self.base_url,
            &["pictograms", &language, &id.to_string()],
        );

        let body = match self.http.get_json(&url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to fetch pictogram {}: {}", id, e);
                return None;
            }
        };

        match serde_json::from_value::<RawPictogram>(body) {
            Ok(raw) => Some(self.to_record(raw)),
            Err(e) => {
                warn!("Pictogram {} has an unexpected shape: {}", id, e);
                None
            }
        }
    }

    /// Image URL for a pictogram; parameters equal to their defaults are omitted
    pub fn image_url(&self, id: PictogramId, options: &ImageOptions) -> String {
        let mut url = format!("{}/pictograms/{}", self.image_base_url, id);

        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(background) = non_empty(&options.background_color) {
            if background != "none" {
                query.append_pair("backgroundColor", background);
            }
        }
        if !options.color {
            query.append_pair("color", "false");
        }
        if let Some(skin) = non_empty(&options.skin) {
            query.append_pair("skin", skin);
        }
        if let Some(hair) = non_empty(&options.hair) {
            query.append_pair("hair", hair);
        }
        if options.size != DEFAULT_IMAGE_SIZE {
            query.append_pair("size", &options.size.to_string());
        }

        let params = query.finish();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params);
        }
        url
    }

    /// Autocompletion from the preloaded keyword list
    pub async fn suggestions(&self, partial: &str) -> Vec<String> {
        if partial.chars().count() < self.min_query_length {
            return Vec::new();
        }

        let state = self.keywords.read().await;
        match &state.words {
            Some(words) => filter_suggestions(words, partial, self.max_suggestions),
            None => Vec::new(),
        }
    }

    /// Fetch the keyword list for the current language.
    ///
    /// Returns whether a list was stored. A list that arrives after the
    /// language changed again is discarded.
    pub async fn load_keywords(&self) -> bool {
        let language = self.language().await;
        let url = UrlUtils::endpoint(&self.base_url, &["keywords", &language]);

        let list = match self.http.get_json(&url).await {
            Ok(body) => match serde_json::from_value::<KeywordList>(body) {
                Ok(list) => list,
                Err(e) => {
                    warn!("Keyword list for '{}' is malformed: {}", language, e);
                    return false;
                }
            },
            Err(e) => {
                warn!("Could not load keywords for '{}': {}", language, e);
                return false;
            }
        };

        // Hold the language lock so a concurrent switch can't interleave.
        let current = self.language.read().await;
        if *current != language {
            debug!(
                "Discarding keywords for '{}', language is now '{}'",
                language, *current
            );
            return false;
        }

        info!("Loaded {} keywords for '{}'", list.words.len(), language);
        self.keywords.write().await.words = Some(list.words);
        true
    }

    /// Switch language: clears the query cache and reloads the keyword list
    pub async fn set_language(&self, language: &str) {
        let language = language.trim().to_lowercase();
        {
            let mut current = self.language.write().await;
            *current = language.clone();
            self.keywords.write().await.words = None;
        }
        self.cache.clear().await;
        info!("Pictogram language set to '{}'", language);

        self.load_keywords().await;
    }

    fn to_record(&self, raw: RawPictogram) -> PictogramRecord {
        let image_url = self.image_url(raw.id, &ImageOptions::default());
        PictogramRecord::from_raw(raw, image_url)
    }

    /// Map a search response body to at most `max_results` records
    fn process_pictograms(&self, body: Value) -> Vec<PictogramRecord> {
        let Value::Array(items) = body else {
            debug!("Search response is not an array, treating as no results");
            return Vec::new();
        };

        items
            .into_iter()
            .take(self.max_results)
            .filter_map(|item| match serde_json::from_value::<RawPictogram>(item) {
                Ok(raw) => Some(self.to_record(raw)),
                Err(e) => {
                    debug!("Skipping undecodable pictogram: {}", e);
                    None
                }
            })
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Case-insensitive substring match over `words`, first `limit` hits in list order
pub fn filter_suggestions(words: &[String], partial: &str, limit: usize) -> Vec<String> {
    let needle = partial.to_lowercase();
    words
        .iter()
        .filter(|word| word.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

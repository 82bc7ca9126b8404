use crate::core::{Catalog, PantryError};
use crate::ui::create_spinner;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            CatalogSource::Url(location.to_string())
        } else {
            CatalogSource::File(PathBuf::from(location))
        }
    }

    pub async fn fetch(&self) -> Result<Catalog, PantryError> {
        let content = match self {
            CatalogSource::File(path) => {
                debug!(path = %path.display(), "reading catalog file");
                tokio::fs::read_to_string(path).await.map_err(|e| {
                    PantryError::CatalogLoad(format!("{}: {}", path.display(), e))
                })?
            }
            CatalogSource::Url(url) => {
                debug!(%url, "downloading catalog");
                let response = reqwest::get(url).await?;
                if !response.status().is_success() {
                    return Err(PantryError::CatalogLoad(format!(
                        "{} returned HTTP {}",
                        url,
                        response.status()
                    )));
                }
                response.text().await?
            }
        };

        Catalog::from_json(&content)
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CacheState {
    Uninitialized,
    Loading,
    Loaded(Arc<Catalog>),
    Failed(String),
}

/// Load-once, read-many holder for the catalog. Owned by whoever drives the
/// searches; the ranker only ever sees the borrowed recipe slice.
pub struct CatalogCache {
    source: CatalogSource,
    state: CacheState,
}

impl CatalogCache {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            state: CacheState::Uninitialized,
        }
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    pub async fn get_or_load(&mut self) -> Result<Arc<Catalog>, PantryError> {
        match &self.state {
            CacheState::Loaded(catalog) => return Ok(catalog.clone()),
            CacheState::Failed(reason) => {
                info!(%reason, "retrying catalog load after previous failure");
            }
            // Only reachable when a previous get_or_load future was dropped mid-fetch.
            CacheState::Loading => {
                warn!(source = %self.source, "previous catalog load was abandoned, starting over");
            }
            CacheState::Uninitialized => {}
        }

        self.state = CacheState::Loading;
        let spinner = create_spinner(&format!("Loading recipes from {}...", self.source));
        let result = self.source.fetch().await;
        spinner.finish_and_clear();

        match result {
            Ok(catalog) => {
                if catalog.is_empty() {
                    warn!(source = %self.source, "catalog contains no recipes");
                }
                info!(recipes = catalog.len(), source = %self.source, "catalog loaded");
                let catalog = Arc::new(catalog);
                self.state = CacheState::Loaded(catalog.clone());
                Ok(catalog)
            }
            Err(e) => {
                warn!(source = %self.source, error = %e, "catalog load failed");
                self.state = CacheState::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use url::Url;

use crate::config::ProviderConfig;
use crate::ports::catalog::{Candidate, CatalogClient, SearchFilter};
use crate::ytmusic_rs::{self, InnerTubeContext};

/// Catalog client backed by the YouTube Music web API.
pub struct YtMusicHttpAdapter {
    client: Client,
    base_url: Url,
    context: InnerTubeContext,
}

impl YtMusicHttpAdapter {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .wrap_err_with(|| format!("Invalid YouTube Music base URL: {}", config.base_url))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .wrap_err("Failed to build YouTube Music HTTP client")?;

        Ok(Self {
            client,
            base_url,
            context: InnerTubeContext {
                client_version: config.client_version.clone(),
                language: config.language.clone(),
                region: config.region.clone(),
            },
        })
    }
}

#[async_trait::async_trait]
impl CatalogClient for YtMusicHttpAdapter {
    async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
        limit: usize,
    ) -> Result<Vec<Candidate>> {
        let response =
            ytmusic_rs::search(&self.client, &self.base_url, &self.context, query, filter).await?;

        let mut candidates = ytmusic_rs::parse_search_response(&response, filter);
        candidates.truncate(limit);
        log::debug!(
            "YouTube Music returned {} candidates for '{}' ({})",
            candidates.len(),
            query,
            filter
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_from_default_config() {
        let adapter = YtMusicHttpAdapter::new(&ProviderConfig::default()).unwrap();
        assert_eq!(adapter.base_url.as_str(), "https://music.youtube.com/");
        assert_eq!(adapter.context.language, "en");
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ProviderConfig {
            base_url: "http://localhost:9000/proxy".to_string(),
            ..ProviderConfig::default()
        };
        let adapter = YtMusicHttpAdapter::new(&config).unwrap();
        assert_eq!(
            adapter.base_url.join("youtubei/v1/search").unwrap().as_str(),
            "http://localhost:9000/proxy/youtubei/v1/search"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ProviderConfig {
            base_url: "not a url".to_string(),
            ..ProviderConfig::default()
        };
        assert!(YtMusicHttpAdapter::new(&config).is_err());
    }
}

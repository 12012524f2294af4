//! Backlog source backed by the tracker's JSON endpoints.
//!
//! Both endpoints answer with a JSON array of `{id, name}` objects. The
//! sub-backlog endpoint takes the parent as a `backlogId` form field.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sprintboard_config::ServerConfig;
use sprintboard_protocol::{BacklogId, BacklogSummary};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::source::BacklogSource;

/// An HTTP client for the tracker's backlog endpoints.
#[derive(Debug, Clone)]
pub struct HttpBacklogSource {
    client: reqwest::Client,
    products_url: String,
    sub_backlogs_url: String,
}

impl HttpBacklogSource {
    /// Creates a source from server settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] when no base URL is set, or an HTTP
    /// error if the client cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_client::HttpBacklogSource;
    /// use sprintboard_config::ServerConfig;
    ///
    /// let config = ServerConfig::with_base_url("http://localhost:8080");
    /// let source = HttpBacklogSource::from_config(&config);
    /// assert!(source.is_ok());
    ///
    /// assert!(HttpBacklogSource::from_config(&ServerConfig::default()).is_err());
    /// ```
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let (Some(products_url), Some(sub_backlogs_url)) =
            (config.products_url(), config.sub_backlogs_url())
        else {
            return Err(Error::NotConfigured);
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            products_url,
            sub_backlogs_url,
        })
    }

    /// Returns the product list URL.
    #[must_use]
    pub fn products_url(&self) -> &str {
        &self.products_url
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        form: &[(&str, String)],
    ) -> Result<T> {
        let response = self.client.post(url).form(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url, "backlog request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl BacklogSource for HttpBacklogSource {
    #[instrument(skip(self), fields(url = %self.products_url))]
    async fn products(&self) -> Result<Vec<BacklogSummary>> {
        let products: Vec<BacklogSummary> = self.post_json(&self.products_url, &[]).await?;
        debug!(count = products.len(), "fetched products");
        Ok(products)
    }

    #[instrument(skip(self), fields(url = %self.sub_backlogs_url))]
    async fn sub_backlogs(&self, parent: BacklogId) -> Result<Vec<BacklogSummary>> {
        let form = [("backlogId", parent.to_string())];
        let children: Vec<BacklogSummary> = self.post_json(&self.sub_backlogs_url, &form).await?;
        debug!(count = children.len(), "fetched sub-backlogs");
        Ok(children)
    }
}

//! REST implementation of [`FilterBackend`].

use reqwest::{Response, StatusCode, Url};

use facet_engine::FilterBackend;
use facet_model::{
    Facet, FacetOption, FilterError, QueryDescriptor, Result, Selections, ValidationOutcome,
};

use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::wire;

/// Talks to the `/filters/*` endpoints below a configured base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Builds a backend from configuration.
    pub fn new(config: &ClientConfig) -> crate::error::Result<Self> {
        let base_url = config.parsed_base_url()?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/filters/{segment}`, tolerating a trailing slash on the base.
    fn endpoint(&self, segment: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FilterError::Transport(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(["filters", segment]);
        Ok(url)
    }

    /// URL for one facet listing. Unconstrained facets are omitted.
    pub fn listing_url(&self, facet: Facet, descriptor: &QueryDescriptor) -> Result<Url> {
        let mut url = self.endpoint(facet.path_segment())?;
        let pairs = descriptor.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in &pairs {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

fn transport(err: &reqwest::Error) -> FilterError {
    if err.is_timeout() {
        FilterError::Transport("request timed out".to_string())
    } else {
        FilterError::Transport(err.to_string())
    }
}

async fn read_body(response: Response) -> Result<String> {
    response.text().await.map_err(|e| transport(&e))
}

fn status_error(status: StatusCode, body: &str) -> FilterError {
    let message = match body.trim() {
        "" => status.canonical_reason().unwrap_or("unknown status").to_string(),
        text => text.to_string(),
    };
    FilterError::Status {
        status: status.as_u16(),
        message,
    }
}

impl FilterBackend for HttpBackend {
    async fn list_options(
        &self,
        facet: Facet,
        descriptor: &QueryDescriptor,
    ) -> Result<Vec<FacetOption>> {
        let url = self.listing_url(facet, descriptor)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| transport(&e))?;
        let status = response.status();
        let body = read_body(response).await?;

        if !status.is_success() {
            tracing::warn!(%facet, %status, "facet listing failed");
            return Err(status_error(status, &body));
        }
        wire::decode_options(facet, &body)
    }

    async fn validate(&self, selections: &Selections) -> Result<ValidationOutcome> {
        let url = self.endpoint("validate")?;
        tracing::debug!("POST {} {}", url, selections);

        let response = self
            .client
            .post(url)
            .json(selections)
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let status = response.status();

        // Any success body is ignored.
        if status.is_success() {
            return Ok(ValidationOutcome::Valid);
        }

        let body = read_body(response).await?;
        match wire::decode_rejection(&body) {
            Some(errors) => Ok(ValidationOutcome::Invalid { errors }),
            None => Err(status_error(status, &body)),
        }
    }
}

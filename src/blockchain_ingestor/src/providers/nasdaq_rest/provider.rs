use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::config::IngestorConfig;
use crate::models::series::Series;
use crate::providers::nasdaq_rest::{params::DatatableParams, response::DatatableResponse};
use crate::providers::{
    ApiSnafu, ClientBuildSnafu, DecodeSnafu, JsonSnafu, MissingEnvVarSnafu, ProviderError,
    ProviderInitError, ReqwestSnafu, SeriesProvider,
};

/// Upper bound on datatable pages followed within one fetch.
pub const MAX_PAGES: usize = 1_000;

pub struct NasdaqProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl NasdaqProvider {
    /// Creates a new Nasdaq Data Link provider.
    ///
    /// Reads the API key from the environment variable named by
    /// `config.api_key_env` (`QUANDL_API_KEY` by default).
    pub fn new(config: &IngestorConfig) -> Result<Self, ProviderInitError> {
        let api_key = get_env_var(&config.api_key_env).context(MissingEnvVarSnafu)?;
        let api_key = SecretString::new(api_key.into());
        Self::with_api_key(&config.base_url, api_key, config.request_timeout())
    }

    pub fn with_api_key(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderInitError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl SeriesProvider for NasdaqProvider {
    async fn fetch_series(&self, code: &str) -> Result<Series, ProviderError> {
        let mut series = Series::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors: HashSet<String> = HashSet::new();

        loop {
            let params = DatatableParams::new(code, self.api_key.expose_secret())
                .with_cursor(cursor.as_deref());

            // The request URL carries the api key, so it is stripped from transport errors.
            let response = self
                .client
                .get(&self.base_url)
                .query(&params)
                .send()
                .await
                .map_err(reqwest::Error::without_url)
                .context(ReqwestSnafu)?;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    status: status.as_u16(),
                    message,
                }
                .fail();
            }

            let body = response
                .text()
                .await
                .map_err(reqwest::Error::without_url)
                .context(ReqwestSnafu)?;
            let page: DatatableResponse = serde_json::from_str(&body).context(JsonSnafu)?;

            page.datatable.extend_series(&mut series)?;

            // Follow the cursor until the datatable reports no further page.
            // A cursor seen before would page forever; fail the attempt instead.
            match page.next_cursor() {
                Some(next) if seen_cursors.contains(next) => {
                    return DecodeSnafu {
                        message: format!("repeated cursor {next:?} for {code}"),
                    }
                    .fail();
                }
                Some(_) if seen_cursors.len() >= MAX_PAGES => {
                    return DecodeSnafu {
                        message: format!("more than {MAX_PAGES} pages for {code}"),
                    }
                    .fail();
                }
                Some(next) => {
                    debug!(
                        code,
                        cursor = next,
                        rows = series.len(),
                        "Fetching next datatable page"
                    );
                    seen_cursors.insert(next.to_string());
                    cursor = Some(next.to_string());
                }
                None => break,
            }
        }

        Ok(series)
    }
}

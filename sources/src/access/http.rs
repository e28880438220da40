//! `Fetcher` implementation on top of `reqwest`.
//!
//! ArcGIS endpoints come from the `arcgis` site in `sources.hcl`:
//!
//! - `base_url` is the hosted services URL, `{server}` being replaced by the server number,
//! - route `items` is the item metadata endpoint,
//! - route `datasets` is the open data CSV export endpoint.
//!

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::access::arcgis::{ItemInfo, LayerInfo};
use crate::{http_get, http_post_form};
use crate::{parse_csv, CsvRow, FeatureSet, Fetcher, Page, SourceError, Sources, StatsQuery};

/// Name of the site holding ArcGIS endpoints
const ARCGIS: &str = "arcgis";

#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
    /// Hosted services, with `{server}` inside
    services: String,
    /// Item metadata
    items: String,
    /// CSV exports
    datasets: String,
}

impl HttpFetcher {
    /// Build the HTTP client with the configured timeout.
    ///
    #[tracing::instrument(skip(sources))]
    pub fn new(sources: &Sources) -> Result<Self, SourceError> {
        let site = sources.site(ARCGIS)?;

        let client = Client::builder()
            .timeout(sources.timeout())
            .user_agent(crate::version())
            .build()
            .map_err(|e| SourceError::BadParam(e.to_string()))?;

        Ok(HttpFetcher {
            client,
            services: site.base_url.clone(),
            items: site.url("items")?,
            datasets: site.url("datasets")?,
        })
    }

    /// Services URL for `server`
    ///
    fn services(&self, server: u8) -> String {
        self.services.replace("{server}", &server.to_string())
    }

    /// URL of the feature layer itself
    ///
    fn layer_url(&self, server: u8, org_id: &str, layer: &str) -> String {
        format!(
            "{}/{org_id}/arcgis/rest/services/{layer}/FeatureServer/0",
            self.services(server)
        )
    }

    /// GET `url` and return the body, non-2xx statuses are errors.
    ///
    async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        trace!("GET {url}");
        let resp = http_get!(self, url)
            .await
            .map_err(|e| SourceError::Unavailable(url.to_string(), e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text()
            .await
            .map_err(|e| SourceError::Malformed(url.to_string(), e.to_string()))
    }

    /// GET `url` and decode the JSON body.
    ///
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let body = self.get_text(url).await?;
        debug!("body={body}");
        serde_json::from_str(&body).map_err(|e| SourceError::Malformed(url.to_string(), e.to_string()))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[tracing::instrument(skip(self))]
    async fn page(&self, url: &str) -> Result<Page, SourceError> {
        let body = self.get_text(url).await?;
        Page::parse(&body)
    }

    #[tracing::instrument(skip(self))]
    async fn csv(&self, url: &str) -> Result<Vec<CsvRow>, SourceError> {
        let body = self.get_text(url).await?;
        parse_csv(url, &body)
    }

    #[tracing::instrument(skip(self))]
    async fn arcgis_csv_url(
        &self,
        server: u8,
        dashboard_id: &str,
        layer: &str,
    ) -> Result<String, SourceError> {
        let url = format!("{}/{dashboard_id}?f=json", self.items);
        let item: ItemInfo = self.get_json(&url).await?;
        trace!("orgId={}", item.org_id);

        let url = format!("{}?f=json", self.layer_url(server, &item.org_id, layer));
        let info: LayerInfo = self.get_json(&url).await?;
        trace!("serviceItemId={}", info.service_item_id);

        Ok(format!("{}/{}_0.csv", self.datasets, info.service_item_id))
    }

    #[tracing::instrument(skip(self, query))]
    async fn query_statistics(
        &self,
        server: u8,
        org_id: &str,
        layer: &str,
        query: &StatsQuery,
    ) -> Result<FeatureSet, SourceError> {
        let url = format!("{}/query", self.layer_url(server, org_id, layer));
        let form = query
            .to_form()
            .map_err(|e| SourceError::BadParam(e.to_string()))?;
        debug!("POST {url} form={form:?}");

        let resp = http_post_form!(self, &url, &form)
            .await
            .map_err(|e| SourceError::Unavailable(url.clone(), e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Malformed(url.clone(), e.to_string()))?;
        let fs: FeatureSet =
            serde_json::from_str(&body).map_err(|e| SourceError::Malformed(url.clone(), e.to_string()))?;

        match fs.error {
            Some(err) => Err(SourceError::Api(url, format!("{} {}", err.code, err.message))),
            None => {
                trace!("{} features", fs.features.len());
                Ok(fs)
            }
        }
    }
}

//! Live adapter for the `Catalog` port using the CKAN action API.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PortError;
use crate::ports::{Catalog, Dataset, PortFuture, ResourceInfo, SearchEntry};

/// Live catalog client that calls `{site}/api/action/<action>`.
pub struct LiveCatalog {
    client: Client,
    site_url: String,
    api_key: String,
}

impl LiveCatalog {
    /// Creates a client for the given CKAN site and API key.
    pub fn new(site_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let site_url: String = site_url.into();
        Self {
            client: Client::new(),
            site_url: site_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn action_url(&self, action: &str) -> String {
        format!("{}/api/action/{action}", self.site_url)
    }

    /// Send an action request and unwrap the CKAN response envelope.
    async fn call<T: DeserializeOwned + Send>(
        &self,
        action: &str,
        request: RequestBuilder,
    ) -> Result<T, PortError> {
        tracing::debug!(action, site = %self.site_url, "calling CKAN action");
        let response = request
            .header("Authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| -> PortError { format!("CKAN {action} request failed: {e}").into() })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| -> PortError {
            format!("Failed to read CKAN {action} response: {e}").into()
        })?;

        if !status.is_success() {
            let msg = serde_json::from_str::<Envelope<serde_json::Value>>(&response_text)
                .ok()
                .and_then(|env| env.error)
                .map_or(response_text, |err| err.describe());
            return Err(format!("CKAN {action} error ({}): {msg}", status.as_u16()).into());
        }

        let envelope: Envelope<T> = serde_json::from_str(&response_text).map_err(
            |e| -> PortError { format!("Failed to parse CKAN {action} response: {e}").into() },
        )?;

        match (envelope.success, envelope.result, envelope.error) {
            (true, Some(result), _) => Ok(result),
            (_, _, Some(err)) => Err(format!("CKAN {action} failed: {}", err.describe()).into()),
            _ => Err(format!("CKAN {action} returned no result").into()),
        }
    }
}

/// Response envelope wrapped around every action result.
#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    result: Option<T>,
    error: Option<ActionError>,
}

/// Error object of a failed action.
#[derive(Deserialize)]
struct ActionError {
    #[serde(rename = "__type")]
    kind: Option<String>,
    message: Option<String>,
}

impl ActionError {
    fn describe(&self) -> String {
        match (&self.kind, &self.message) {
            (Some(kind), Some(message)) => format!("{kind}: {message}"),
            (None, Some(message)) => message.clone(),
            (Some(kind), None) => kind.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

/// `resource_search` result page.
#[derive(Deserialize)]
struct SearchPage {
    results: Vec<SearchEntry>,
}

/// Body of a `resource_patch` call.
#[derive(Serialize)]
struct UrlPatch<'a> {
    id: &'a str,
    url: &'a str,
}

impl Catalog for LiveCatalog {
    fn get_dataset<'a>(&'a self, dataset_id: &'a str) -> PortFuture<'a, Dataset> {
        Box::pin(async move {
            let request =
                self.client.get(self.action_url("package_show")).query(&[("id", dataset_id)]);
            self.call("package_show", request).await
        })
    }

    fn search_resources_by_name<'a>(&'a self, name: &'a str) -> PortFuture<'a, Vec<SearchEntry>> {
        Box::pin(async move {
            let query = format!("name:{name}");
            let request = self
                .client
                .get(self.action_url("resource_search"))
                .query(&[("query", query.as_str())]);
            let page: SearchPage = self.call("resource_search", request).await?;
            Ok(page.results)
        })
    }

    fn get_resource<'a>(&'a self, resource_id: &'a str) -> PortFuture<'a, ResourceInfo> {
        Box::pin(async move {
            let request =
                self.client.get(self.action_url("resource_show")).query(&[("id", resource_id)]);
            self.call("resource_show", request).await
        })
    }

    fn patch_resource_url<'a>(&'a self, resource_id: &'a str, url: &'a str) -> PortFuture<'a, ()> {
        Box::pin(async move {
            let request = self
                .client
                .post(self.action_url("resource_patch"))
                .json(&UrlPatch { id: resource_id, url });
            let _: serde_json::Value = self.call("resource_patch", request).await?;
            Ok(())
        })
    }

    fn create_organization<'a>(
        &'a self,
        organization: &'a serde_json::Value,
    ) -> PortFuture<'a, serde_json::Value> {
        Box::pin(async move {
            let request = self.client.post(self.action_url("organization_create")).json(organization);
            self.call("organization_create", request).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_url_strips_trailing_slash() {
        let catalog = LiveCatalog::new("https://data.example.org/", "key");
        assert_eq!(
            catalog.action_url("package_show"),
            "https://data.example.org/api/action/package_show"
        );
    }

    #[test]
    fn envelope_with_error_describes_type_and_message() {
        let body = r#"{"success": false, "error": {"__type": "Not Found Error", "message": "Not found"}}"#;
        let env: Envelope<Dataset> = serde_json::from_str(body).unwrap();
        assert!(!env.success);
        assert_eq!(env.error.unwrap().describe(), "Not Found Error: Not found");
    }

    #[test]
    fn search_page_parses_results() {
        let body = r#"{"success": true, "result": {"count": 1, "results": [
            {"id": "a1", "name": "x.csv", "url": "https://h/resource/a1/download/x.csv",
             "package_id": "p1", "format": "CSV"}]}}"#;
        let env: Envelope<SearchPage> = serde_json::from_str(body).unwrap();
        let page = env.result.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].package_id, "p1");
    }

    #[test]
    fn dataset_defaults_missing_fields() {
        let body = r#"{"success": true, "result": {"name": "temps", "resources": [{"id": "r1"}]}}"#;
        let env: Envelope<Dataset> = serde_json::from_str(body).unwrap();
        let dataset = env.result.unwrap();
        assert!(!dataset.private);
        assert_eq!(dataset.resources[0].url, "");
    }

    #[tokio::test]
    async fn unreachable_site_is_an_error() {
        let catalog = LiveCatalog::new("http://127.0.0.1:9", "key");
        let result = catalog.get_dataset("anything").await;
        assert!(result.is_err());
    }
}

//! One-shot fetch of the remote doctor directory.

use doclist_types::{decode_directory, DoctorRecord};
use url::Url;

use crate::{CoreConfig, DirectoryError, DirectoryResult};

/// HTTP client for the configured directory endpoint.
#[derive(Clone, Debug)]
pub struct DirectoryFetcher {
    client: reqwest::Client,
    source_url: Url,
}

impl DirectoryFetcher {
    /// Build a fetcher for `cfg.source_url()` with the configured request timeout.
    pub fn new(cfg: &CoreConfig) -> DirectoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.fetch_timeout())
            .build()
            .map_err(DirectoryError::ClientBuild)?;

        Ok(Self {
            client,
            source_url: cfg.source_url().clone(),
        })
    }

    pub fn source_url(&self) -> &Url {
        &self.source_url
    }

    /// Issue a single GET and decode the response body.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if:
    /// - the request cannot be sent or times out,
    /// - the response status is not 2xx,
    /// - the body is not a directory payload.
    pub async fn fetch(&self) -> DirectoryResult<Vec<DoctorRecord>> {
        let response = self
            .client
            .get(self.source_url.clone())
            .send()
            .await
            .map_err(DirectoryError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status));
        }

        let body = response.bytes().await.map_err(DirectoryError::Body)?;
        Ok(decode_directory(&body)?)
    }

    /// Fetch the directory, degrading to an empty collection on failure.
    ///
    /// Failures are logged and never retried.
    pub async fn load(&self) -> Vec<DoctorRecord> {
        match self.fetch().await {
            Ok(records) => {
                tracing::info!(
                    "++ Loaded {} doctors from {}",
                    records.len(),
                    self.source_url
                );
                records
            }
            Err(e) => {
                tracing::error!("Error fetching doctors from {}: {}", self.source_url, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAYLOAD: &str = r#"[
        { "id": "1", "name": "Dr. Priya Shah", "fees": "₹500", "video_consult": true },
        { "id": "2", "name": "Dr. Arjun Mehta", "fees": "₹400", "in_clinic": true }
    ]"#;

    async fn fetcher_for(server: &MockServer) -> DirectoryFetcher {
        let cfg = CoreConfig::from_env_values(Some(format!("{}/doctors.json", server.uri())), None)
            .unwrap();
        DirectoryFetcher::new(&cfg).unwrap()
    }

    #[tokio::test]
    async fn fetch_decodes_directory() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctors.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PAYLOAD, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let records = fetcher_for(&server).await.fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Dr. Priya Shah");
        assert!(records[1].in_clinic);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).await.fetch().await.expect_err("503");
        assert!(matches!(err, DirectoryError::Status(s) if s.as_u16() == 503));
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).await.fetch().await.expect_err("html body");
        assert!(matches!(err, DirectoryError::Payload(_)));
    }

    #[tokio::test]
    async fn load_keeps_valid_records_around_a_bad_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    { "id": "1", "name": "Dr. Priya Shah" },
                    { "id": "2", "name": "Dr. Arjun Mehta" },
                    { "id": "3", "name": null }
                ]"#,
            ))
            .mount(&server)
            .await;

        let records = fetcher_for(&server).await.load().await;
        let names: Vec<&str> = records.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. Priya Shah", "Dr. Arjun Mehta"]);
    }

    #[tokio::test]
    async fn load_degrades_to_empty_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        assert!(fetcher_for(&server).await.load().await.is_empty());
    }
}

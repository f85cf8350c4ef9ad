use super::{archive, errors::DeployError, Deployment, SiteDeployer};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Default base URL of the Netlify REST API.
pub const DEFAULT_DEPLOY_API_URL: &str = "https://api.netlify.com/api/v1";

#[derive(Deserialize, Debug)]
struct Site {
    id: String,
    name: String,
    url: Option<String>,
    ssl_url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct DeployStatus {
    id: String,
    state: String,
    ssl_url: Option<String>,
    error_message: Option<String>,
}

/// Deploys HTML documents to Netlify: create a site, upload a ZIP deploy,
/// then poll until the deploy is ready.
pub struct NetlifyDeployer {
    client: Client,
    access_token: Option<String>,
    base_url: String,
    poll_interval: Duration,
    poll_attempts: u32,
}

impl NetlifyDeployer {
    pub fn new(
        access_token: Option<String>,
        base_url: &str,
        poll_interval: Duration,
        poll_attempts: u32,
    ) -> Self {
        Self {
            client: Client::new(),
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_interval,
            poll_attempts,
        }
    }

    async fn check(response: Response) -> Result<Response, DeployError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log::warn!("Netlify API error: {} {}", status, body);
        Err(DeployError::ApiError {
            status: status.as_u16(),
            body,
        })
    }

    async fn create_site(&self, token: &str, site_name: &str) -> Result<Site, DeployError> {
        let response = self
            .client
            .post(format!("{}/sites", self.base_url))
            .bearer_auth(token)
            .json(&json!({ "name": site_name }))
            .send()
            .await?;
        let raw = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn upload_archive(
        &self,
        token: &str,
        site_id: &str,
        archive: Vec<u8>,
    ) -> Result<DeployStatus, DeployError> {
        let response = self
            .client
            .post(format!("{}/sites/{}/deploys", self.base_url, site_id))
            .bearer_auth(token)
            .header("Content-Type", "application/zip")
            .body(archive)
            .send()
            .await?;
        let raw = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn deploy_status(&self, token: &str, deploy_id: &str) -> Result<DeployStatus, DeployError> {
        let response = self
            .client
            .get(format!("{}/deploys/{}", self.base_url, deploy_id))
            .bearer_auth(token)
            .send()
            .await?;
        let raw = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Polls the deploy until it is ready, fails, or the attempts run out.
    async fn wait_until_ready(
        &self,
        token: &str,
        deploy_id: &str,
    ) -> Result<DeployStatus, DeployError> {
        for attempt in 1..=self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let status = self.deploy_status(token, deploy_id).await?;
            log::debug!(
                "Deploy {} state '{}' (check {}/{})",
                status.id,
                status.state,
                attempt,
                self.poll_attempts
            );

            match status.state.as_str() {
                "ready" => return Ok(status),
                "error" => {
                    return Err(DeployError::Failed(
                        status
                            .error_message
                            .unwrap_or_else(|| "deploy entered error state".to_string()),
                    ))
                }
                _ => {}
            }
        }

        Err(DeployError::Timeout {
            attempts: self.poll_attempts,
        })
    }
}

#[async_trait]
impl SiteDeployer for NetlifyDeployer {
    async fn deploy(&self, html: &str, site_name: &str) -> Result<Deployment, DeployError> {
        if html.trim().is_empty() {
            return Err(DeployError::EmptyHtml);
        }
        let token = self
            .access_token
            .as_deref()
            .ok_or(DeployError::MissingToken)?;

        let archive = archive::build_site_archive(html)?;
        log::info!(
            "Deploying '{}' ({} byte archive)",
            site_name,
            archive.len()
        );

        let site = self.create_site(token, site_name).await?;
        let deploy = self.upload_archive(token, &site.id, archive).await?;
        let ready = if deploy.state == "ready" {
            deploy
        } else {
            self.wait_until_ready(token, &deploy.id).await?
        };

        let url = site
            .ssl_url
            .or(ready.ssl_url)
            .or(site.url)
            .ok_or_else(|| DeployError::Failed("Netlify did not report a site URL".to_string()))?;

        log::info!("Deployment successful: {}", url);
        Ok(Deployment {
            url,
            site_id: site.id,
            site_name: site.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_mock;
    use axum::{
        body::Bytes,
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Mock hosting API whose deploy becomes ready after `ready_after` checks.
    fn hosting_api(ready_after: usize, calls: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/sites",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "id": "site-1",
                        "name": body["name"],
                        "url": "http://demo.netlify.app",
                        "ssl_url": "https://demo.netlify.app",
                    }))
                }),
            )
            .route(
                "/sites/:id/deploys",
                post(|Path(id): Path<String>, headers: HeaderMap, body: Bytes| async move {
                    assert_eq!(id, "site-1");
                    assert_eq!(headers["content-type"], "application/zip");
                    assert_eq!(&body[..4], b"PK\x03\x04");
                    Json(json!({ "id": "deploy-1", "state": "uploading" }))
                }),
            )
            .route(
                "/deploys/:id",
                get(move |Path(id): Path<String>| {
                    let calls = calls.clone();
                    async move {
                        let seen = calls.fetch_add(1, Ordering::SeqCst) + 1;
                        let state = if seen >= ready_after { "ready" } else { "processing" };
                        Json(json!({ "id": id, "state": state }))
                    }
                }),
            )
    }

    fn deployer(base_url: &str, attempts: u32) -> NetlifyDeployer {
        NetlifyDeployer::new(
            Some("token".to_string()),
            base_url,
            Duration::from_millis(5),
            attempts,
        )
    }

    #[tokio::test]
    async fn empty_html_is_rejected_before_any_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let app = Router::new().fallback(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                StatusCode::OK
            }
        });
        let base_url = spawn_mock(app).await;

        let result = deployer(&base_url, 3).deploy("  \n", "site").await;

        assert!(matches!(result, Err(DeployError::EmptyHtml)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let deployer = NetlifyDeployer::new(None, "http://127.0.0.1:9", Duration::ZERO, 1);
        let result = deployer.deploy("<p>x</p>", "site").await;
        assert!(matches!(result, Err(DeployError::MissingToken)));
    }

    #[tokio::test]
    async fn polls_until_ready() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_mock(hosting_api(3, calls.clone())).await;

        let deployment = deployer(&base_url, 10)
            .deploy("<p>hello</p>", "astra-app-1")
            .await
            .unwrap();

        assert_eq!(
            deployment,
            Deployment {
                url: "https://demo.netlify.app".to_string(),
                site_id: "site-1".to_string(),
                site_name: "astra-app-1".to_string(),
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn ready_upload_skips_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let app = Router::new()
            .route(
                "/sites",
                post(|| async {
                    Json(json!({ "id": "site-2", "name": "instant", "url": "http://instant.netlify.app", "ssl_url": null }))
                }),
            )
            .route(
                "/sites/:id/deploys",
                post(|| async {
                    Json(json!({ "id": "deploy-2", "state": "ready", "ssl_url": "https://instant.netlify.app" }))
                }),
            )
            .route(
                "/deploys/:id",
                get(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Json(json!({ "id": "deploy-2", "state": "ready" }))
                    }
                }),
            );
        let base_url = spawn_mock(app).await;

        let deployment = deployer(&base_url, 3)
            .deploy("<p>fast</p>", "instant")
            .await
            .unwrap();

        assert_eq!(deployment.url, "https://instant.netlify.app");
        assert_eq!(deployment.site_id, "site-2");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn gives_up_after_bounded_attempts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_mock(hosting_api(usize::MAX, calls.clone())).await;

        let result = deployer(&base_url, 4).deploy("<p>x</p>", "slow").await;

        assert!(matches!(result, Err(DeployError::Timeout { attempts: 4 })));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn error_state_and_api_failures_surface() {
        let failing = Router::new()
            .route(
                "/sites",
                post(|| async { Json(json!({ "id": "s", "name": "n", "url": null, "ssl_url": null })) }),
            )
            .route(
                "/sites/:id/deploys",
                post(|| async { Json(json!({ "id": "d", "state": "uploaded" })) }),
            )
            .route(
                "/deploys/:id",
                get(|| async {
                    Json(json!({ "id": "d", "state": "error", "error_message": "build exploded" }))
                }),
            );
        let base_url = spawn_mock(failing).await;
        match deployer(&base_url, 3).deploy("<p>x</p>", "n").await {
            Err(DeployError::Failed(message)) => assert_eq!(message, "build exploded"),
            other => panic!("unexpected result: {:?}", other),
        }

        let unauthorized = Router::new().route(
            "/sites",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad token") }),
        );
        let base_url = spawn_mock(unauthorized).await;
        match deployer(&base_url, 3).deploy("<p>x</p>", "n").await {
            Err(DeployError::ApiError { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad token");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

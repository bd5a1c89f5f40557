use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::models::{Application, CrashReportDetail, ErrorGroup};
use crate::error::{Error, Result};

/// Raygun API Client
///
/// Read-only access to the Raygun v3 REST API, authenticated with a
/// personal access token sent as a bearer token.
#[derive(Clone)]
pub struct RaygunClient {
    client: Client,
    base_url: String,
    token: String,
}

impl RaygunClient {
    /// Create a new Raygun API client
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL for the Raygun API
    /// * `token` - Personal access token
    pub fn new(base_url: String, token: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ai-review-pr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| Error::Request {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        crate::utils::debug::log(&format!("Requesting: {} {}", method, url));

        self.client
            .request(method, &url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// Perform a GET request and decode the JSON body
    ///
    /// Anything but `200 OK` is an error carrying the status and body.
    async fn get<T: DeserializeOwned>(&self, path: &str, what: &'static str) -> Result<T> {
        let response = self
            .build_request(Method::GET, path)
            .send()
            .await
            .map_err(|source| Error::Request {
                url: self.url(path),
                source,
            })?;

        let status = response.status();
        crate::utils::debug::log(&format!("Response status: {}", status));

        let body = response.text().await.map_err(|source| Error::Request {
            url: self.url(path),
            source,
        })?;

        if status != StatusCode::OK {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode { what, source })
    }

    /// List applications visible to the token
    ///
    /// # Arguments
    ///
    /// * `count` - Maximum number of applications to return
    pub async fn list_applications(&self, count: u32) -> Result<Vec<Application>> {
        self.get(&format!("/applications?count={}", count), "applications")
            .await
    }

    /// List error groups for an application
    ///
    /// # Arguments
    ///
    /// * `application_id` - The application identifier
    pub async fn list_error_groups(&self, application_id: &str) -> Result<Vec<ErrorGroup>> {
        self.get(
            &format!("/applications/{}/error-groups", application_id),
            "error groups",
        )
        .await
    }

    /// Fetch the most recent occurrence of an error group
    ///
    /// # Arguments
    ///
    /// * `application_id` - The application identifier
    /// * `group_id` - The error group identifier
    pub async fn get_error_detail(
        &self,
        application_id: &str,
        group_id: &str,
    ) -> Result<CrashReportDetail> {
        let details: Vec<CrashReportDetail> = self
            .get(
                &format!(
                    "/applications/{}/error-groups/{}/errors?count=1",
                    application_id, group_id
                ),
                "error detail",
            )
            .await?;

        details
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyResult("no error details found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RaygunClient {
        RaygunClient::new(server.uri(), "secret-token".to_string()).unwrap()
    }

    #[test]
    fn test_bearer_auth_header() {
        let client =
            RaygunClient::new("https://api.raygun.com/v3".to_string(), "abc".to_string()).unwrap();

        let request = client
            .build_request(Method::GET, "/applications")
            .build()
            .unwrap();

        let auth_header = request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .expect("Authorization header should be present");
        assert_eq!(auth_header.to_str().unwrap(), "Bearer abc");
        assert_eq!(
            request.url().as_str(),
            "https://api.raygun.com/v3/applications"
        );
    }

    #[tokio::test]
    async fn test_list_applications() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications"))
            .and(query_param("count", "20"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{"identifier":"app1","name":"Shop-prod"},{"identifier":"app2","name":"Shop-dev"}]"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let apps = client_for(&server).list_applications(20).await.unwrap();

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[1].name, "Shop-dev");
    }

    #[tokio::test]
    async fn test_unauthorized_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications/app1/error-groups"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_error_groups("app1")
            .await
            .unwrap_err();

        match &err {
            Error::HttpStatus { status, body } => {
                assert_eq!(*status, 401);
                assert_eq!(body, "invalid token");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "raygun API returned status 401: invalid token"
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications/app1/error-groups"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_error_groups("app1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode { what: "error groups", .. }));
    }

    #[tokio::test]
    async fn test_error_detail_takes_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications/app1/error-groups/g1/errors"))
            .and(query_param("count", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{"error":{"message":"boom","className":"Error","stackTrace":[]},"request":{"url":"/","httpMethod":"GET"}}]"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let detail = client_for(&server)
            .get_error_detail("app1", "g1")
            .await
            .unwrap();

        assert_eq!(detail.error.message, "boom");
    }

    #[tokio::test]
    async fn test_error_detail_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications/app1/error-groups/g1/errors"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_error_detail("app1", "g1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmptyResult(_)));
    }
}

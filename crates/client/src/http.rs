use reqwest::{Client, Response, StatusCode, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{ClientError, ResultClient};

pub(crate) const PRODUCTION_BASE_URL: &str = "https://api.starlingbank.com/api/v2";
pub(crate) const SANDBOX_BASE_URL: &str = "https://api-sandbox.starlingbank.com/api/v2";

/// Wrapper over the HTTP capability: absolute URLs from the configured base,
/// bearer credential on every request, response bodies parsed into typed
/// payloads. Every call is a fresh round-trip; nothing is cached or retried.
///
/// Cloning is cheap (the inner client is reference-counted), and every space
/// holds a clone so it can refresh itself.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    client: Client,
    base_url: String,
}

/// Error body shapes the API uses. Older endpoints return a single `error`
/// string, newer ones a list of `errors` with messages.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl ErrorBody {
    fn message(self) -> String {
        if let Some(description) = self.error_description {
            return description;
        }
        if let Some(error) = self.error {
            return error;
        }
        let joined = self
            .errors
            .into_iter()
            .map(|detail| detail.message)
            .collect::<Vec<_>>()
            .join("; ");
        if joined.is_empty() {
            "server error".to_string()
        } else {
            joined
        }
    }
}

impl ApiClient {
    pub(crate) fn new(token: &str, base_url: String) -> ResultClient<Self> {
        let mut auth = header::HeaderValue::try_from(format!("Bearer {token}"))
            .map_err(|err| ClientError::Auth(format!("unusable token: {err}")))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| ClientError::RemoteService(format!("failed to build http client: {err}")))?;

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ResultClient<T> {
        let url = self.url(path);
        tracing::debug!("GET {url}");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let message = read_error_message(resp).await;
        Err(categorize(status, path, message))
    }

    /// PUT for the money-movement endpoints. Client errors other than
    /// auth/not-found mean the server declined the transfer itself.
    pub(crate) async fn put_transfer<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ResultClient<()> {
        let url = self.url(path);
        tracing::debug!("PUT {url}");

        let resp = self.client.put(&url).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = read_error_message(resp).await;
        if status.is_client_error()
            && !matches!(
                status,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
            )
        {
            return Err(ClientError::TransferRejected(message));
        }
        Err(categorize(status, path, message))
    }
}

fn categorize(status: StatusCode, path: &str, message: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ClientError::Auth(format!("{status}: {message}"))
        }
        StatusCode::NOT_FOUND => ClientError::NotFound(path.to_string()),
        _ => ClientError::RemoteService(format!("{status}: {message}")),
    }
}

async fn read_error_message(resp: Response) -> String {
    match resp.json::<ErrorBody>().await {
        Ok(body) => body.message(),
        Err(_) => "server error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("token", "https://example.invalid/api/v2".to_string()).unwrap()
    }

    #[test]
    fn url_join_handles_slashes() {
        let api = client();
        assert_eq!(
            api.url("/accounts"),
            "https://example.invalid/api/v2/accounts"
        );
        assert_eq!(
            api.url("accounts"),
            "https://example.invalid/api/v2/accounts"
        );
    }

    #[test]
    fn categorize_maps_statuses() {
        assert!(matches!(
            categorize(StatusCode::UNAUTHORIZED, "/x", "m".into()),
            ClientError::Auth(_)
        ));
        assert!(matches!(
            categorize(StatusCode::FORBIDDEN, "/x", "m".into()),
            ClientError::Auth(_)
        ));
        assert!(matches!(
            categorize(StatusCode::NOT_FOUND, "/x", "m".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            categorize(StatusCode::INTERNAL_SERVER_ERROR, "/x", "m".into()),
            ClientError::RemoteService(_)
        ));
    }

    #[test]
    fn error_body_prefers_description_then_error_then_messages() {
        let body = ErrorBody {
            error: Some("code".into()),
            error_description: Some("description".into()),
            errors: vec![],
        };
        assert_eq!(body.message(), "description");

        let body = ErrorBody {
            error: Some("invalid_token".into()),
            error_description: None,
            errors: vec![],
        };
        assert_eq!(body.message(), "invalid_token");

        let body = ErrorBody {
            error: None,
            error_description: None,
            errors: vec![
                ErrorDetail {
                    message: "first".into(),
                },
                ErrorDetail {
                    message: "second".into(),
                },
            ],
        };
        assert_eq!(body.message(), "first; second");

        let body = ErrorBody {
            error: None,
            error_description: None,
            errors: vec![],
        };
        assert_eq!(body.message(), "server error");
    }
}

//! HTTP client for the booking/recommendation backend.

use async_trait::async_trait;
use url::Url;

use crate::{
    error::{Error, Result},
    api::types::{BookingForm, BookingResponse, ChatRequest, ChatResponse},
};

/// Transport seam between the widget controller and the backend.
///
/// The controller only ever issues these two calls; injecting the trait lets
/// tests substitute a scripted implementation for the real HTTP client.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Send one chat turn to `POST /api/chat`.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Submit a booking to `POST /api/book`.
    async fn book(&self, form: &BookingForm) -> Result<BookingResponse>;
}

/// HTTP client for the backend API.
///
/// # Example
///
/// ```rust,no_run
/// use salon_chat_widget::api::HttpApiClient;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpApiClient::new("http://localhost:5000")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the server (e.g., "http://localhost:5000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let response = self
            .http
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn book(&self, form: &BookingForm) -> Result<BookingResponse> {
        let response = self
            .http
            .post(self.url("/api/book"))
            .json(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}

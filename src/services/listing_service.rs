use log::debug;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;

/// HTTP client for the `/listings` resource.
///
/// Listing bodies are opaque to this client: whatever the server returns is
/// handed back as JSON, and transport or status errors come back as the
/// underlying `reqwest::Error`.
#[derive(Debug, Clone)]
pub struct ListingClient {
    client: Client,
    base_url: String,
}

impl ListingClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        ListingClient {
            client,
            base_url: config.base_url.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/listings", self.base_url)
    }

    // The id is pushed as a single, percent-encoded path segment.
    fn item_url(&self, id: &str) -> String {
        let collection = self.collection_url();
        match Url::parse(&collection) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.push(id);
                }
                url.into()
            }
            // Left for reqwest to reject with its own builder error.
            Err(_) => format!("{}/{}", collection, id),
        }
    }

    pub async fn create_listing<T: Serialize + ?Sized>(
        &self,
        data: &T,
    ) -> Result<Value, reqwest::Error> {
        let url = self.collection_url();
        debug!("POST {}", url);
        let response = self.client.post(url).json(data).send().await?;
        read_payload(response).await
    }

    /// Query filters such as `city=Boston` are sent in the given order and
    /// may repeat a key.
    pub async fn get_listings(&self, params: &[(String, String)]) -> Result<Value, reqwest::Error> {
        let url = self.collection_url();
        debug!("GET {} {:?}", url, params);
        let mut request = self.client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        read_payload(request.send().await?).await
    }

    pub async fn get_listing(&self, id: &str) -> Result<Value, reqwest::Error> {
        let url = self.item_url(id);
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_payload(response).await
    }

    pub async fn update_listing<T: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &T,
    ) -> Result<Value, reqwest::Error> {
        let url = self.item_url(id);
        debug!("PUT {}", url);
        let response = self.client.put(url).json(data).send().await?;
        read_payload(response).await
    }

    pub async fn delete_listing(&self, id: &str) -> Result<Value, reqwest::Error> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        read_payload(response).await
    }
}

/// Unwraps a successful response body: empty is `Null`, JSON is parsed, and
/// anything else comes back as a string.
async fn read_payload(response: Response) -> Result<Value, reqwest::Error> {
    let bytes = response.error_for_status()?.bytes().await?;
    Ok(payload_from_bytes(&bytes))
}

fn payload_from_bytes(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

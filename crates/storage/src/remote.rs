//! Remote key-value storage.
//!
//! Talks to the hosted profile service: `GET {base}/api/data?username=<owner>`
//! returns the stored document (or `null`), `POST` to the same URL replaces it.

use std::time::Duration;
use async_trait::async_trait;
use journey_core::{CurriculumProfile, OwnerId};
use reqwest::{Client, ClientBuilder, Response, Url};
use tracing::{debug, warn};
use super::{Result, Storage, StorageError};

/// HTTP client for the remote profile store.
#[derive(Clone)]
pub struct RemoteStorage {
    /// HTTP client
    client: Client,

    /// Service base URL
    base: Url,
}

impl RemoteStorage {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| StorageError::Other(format!("Invalid remote URL {}: {}", base_url, e)))?;
        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// URL of an owner's document.
    pub fn data_url(&self, owner: &OwnerId) -> Result<Url> {
        let mut url = self
            .base
            .join("api/data")
            .map_err(|e| StorageError::Other(format!("Invalid remote URL: {}", e)))?;
        url.query_pairs_mut().append_pair("username", owner.as_str());
        Ok(url)
    }
}

#[async_trait]
impl Storage for RemoteStorage {
    async fn load(&self, owner: &OwnerId) -> Result<Option<CurriculumProfile>> {
        let url = self.data_url(owner)?;
        debug!("Fetching profile from {}", url);
        let response = check(self.client.get(url).send().await?).await?;
        let profile: Option<CurriculumProfile> = response.json().await?;
        if let Some(profile) = &profile {
            profile.validate()?;
        }
        Ok(profile)
    }

    async fn save(&mut self, owner: &OwnerId, profile: &CurriculumProfile) -> Result<()> {
        profile.validate()?;
        let url = self.data_url(owner)?;
        debug!("Saving profile to {}", url);
        check(self.client.post(url).json(profile).send().await?).await?;
        Ok(())
    }

    async fn list_owners(&self) -> Result<Vec<OwnerId>> {
        Err(StorageError::Other("The remote store cannot list owners".to_string()))
    }
}

async fn check(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    warn!("Remote store returned {}: {}", status, message);
    Err(StorageError::Remote { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_core::{Date, EntryRoute};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn create_test_profile() -> CurriculumProfile {
        CurriculumProfile::new(
            "Rohan",
            "Punjab",
            EntryRoute::DirectEntry,
            Date::from_ymd_opt(2023, 3, 9).unwrap(),
        )
    }

    /// Answer one request with `status` and `body`; yields the raw request.
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&request) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{}", addr), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..split]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= split + 4 + length
    }

    #[test]
    fn test_data_url() {
        let storage = RemoteStorage::new("https://journey.example.com/", Duration::from_secs(5)).unwrap();
        let url = storage.data_url(&OwnerId::new("a b&c")).unwrap();
        assert_eq!(url.as_str(), "https://journey.example.com/api/data?username=a+b%26c");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = RemoteStorage::new("not a url", Duration::from_secs(5)).err().unwrap();
        assert!(matches!(err, StorageError::Other(_)));
    }

    #[tokio::test]
    async fn test_load_null_is_none() {
        let (base, server) = serve_once("200 OK", "null".to_string()).await;
        let storage = RemoteStorage::new(&base, Duration::from_secs(5)).unwrap();

        assert!(storage.load(&OwnerId::new("rohan")).await.unwrap().is_none());
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/data?username=rohan "));
    }

    #[tokio::test]
    async fn test_load_profile() {
        let profile = create_test_profile();
        let (base, server) = serve_once("200 OK", serde_json::to_string(&profile).unwrap()).await;
        let storage = RemoteStorage::new(&base, Duration::from_secs(5)).unwrap();

        let loaded = storage.load(&OwnerId::new("rohan")).await.unwrap();
        assert_eq!(loaded, Some(profile));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_save_posts_document() {
        let (base, server) = serve_once("200 OK", r#"{"success":true}"#.to_string()).await;
        let mut storage = RemoteStorage::new(&base, Duration::from_secs(5)).unwrap();

        storage.save(&OwnerId::new("rohan"), &create_test_profile()).await.unwrap();
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/data?username=rohan "));
        assert!(request.contains("\"entryRoute\":\"Direct Entry Route\""));
    }

    #[tokio::test]
    async fn test_failed_save_is_an_error() {
        let (base, server) = serve_once("500 Internal Server Error", "\"boom\"".to_string()).await;
        let mut storage = RemoteStorage::new(&base, Duration::from_secs(5)).unwrap();

        let err = storage.save(&OwnerId::new("rohan"), &create_test_profile()).await.unwrap_err();
        match err {
            StorageError::Remote { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "\"boom\"");
            }
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }
}

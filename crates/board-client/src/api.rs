use board_types::api::CreateCommentRequest;
use board_types::models::{Comment, User};
use reqwest::Response;
use tracing::debug;

use crate::error::ClientError;

/// Thin wrapper over the board's JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://localhost:3003`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn list_comments(&self) -> Result<Vec<Comment>, ClientError> {
        let url = self.url("/comments");
        debug!("Fetching comments from {}", url);
        let resp = check(self.http.get(url).send().await?)?;
        Ok(resp.json().await?)
    }

    pub async fn create_comment(&self, req: &CreateCommentRequest) -> Result<Comment, ClientError> {
        let resp = check(self.http.post(self.url("/comments")).json(req).send().await?)?;
        Ok(resp.json().await?)
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("/comments/{}", id));
        check(self.http.delete(url).send().await?)?;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let resp = check(self.http.get(self.url("/users")).send().await?)?;
        Ok(resp.json().await?)
    }
}

fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status(status.as_u16()));
    }
    Ok(resp)
}

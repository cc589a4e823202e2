//! Contents API: reading and writing objects stored under keys

use reqwest::Method;
use serde_json::Value;

use super::{ApiError, NessieClient};
use crate::nessie::models::{Contents, ContentsKey};

impl NessieClient {
    /// Fetches the contents stored under a key
    ///
    /// `ref_name` selects the reference to read from; when None the server
    /// reads from its default branch.
    pub async fn get_contents(
        &self,
        key: &ContentsKey,
        ref_name: Option<&str>,
    ) -> Result<Contents, ApiError> {
        let mut url = self.api_url(&format!("contents/{}", key.to_path_string()));
        if let Some(ref_name) = ref_name {
            url.push_str(&format!("?ref={}", urlencoding::encode(ref_name)));
        }

        let json: Value = self.send_json(self.request(Method::GET, url)).await?;
        Ok(Contents::from_json(json)?)
    }

    /// Stores contents under a key, committing to a branch
    ///
    /// `expected_hash` is the branch hash the caller based the change on;
    /// the server rejects the commit if the branch moved in the meantime.
    pub async fn set_contents(
        &self,
        key: &ContentsKey,
        branch_name: &str,
        expected_hash: &str,
        message: &str,
        contents: &Contents,
    ) -> Result<(), ApiError> {
        let url = self.contents_mutation_url(key, branch_name, expected_hash, message);
        tracing::debug!("Setting contents under key {}", key.to_path_string());
        self.send_empty(self.request(Method::POST, url).json(contents))
            .await
    }

    /// Deletes the contents stored under a key, committing to a branch
    pub async fn delete_contents(
        &self,
        key: &ContentsKey,
        branch_name: &str,
        expected_hash: &str,
        message: &str,
    ) -> Result<(), ApiError> {
        let url = self.contents_mutation_url(key, branch_name, expected_hash, message);
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    /// Builds the URL shared by the contents mutation endpoints
    fn contents_mutation_url(
        &self,
        key: &ContentsKey,
        branch_name: &str,
        expected_hash: &str,
        message: &str,
    ) -> String {
        format!(
            "{}?branch={}&expectedHash={}&message={}",
            self.api_url(&format!("contents/{}", key.to_path_string())),
            urlencoding::encode(branch_name),
            urlencoding::encode(expected_hash),
            urlencoding::encode(message)
        )
    }
}

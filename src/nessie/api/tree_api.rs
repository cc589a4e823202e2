//! Tree API: references, commit log, entries, merge and transplant
//!
//! These endpoints operate on the reference tree of a Nessie server. All
//! reference names and hashes supplied by callers are percent-encoded
//! before being placed in request paths.

use reqwest::Method;
use serde_json::Value;

use super::{ApiError, NessieClient};
use crate::nessie::models::{
    Branch, EntriesResponse, LogResponse, MergeRequest, NessieConfiguration, Reference, Tag,
    Transplant,
};

impl NessieClient {
    /// Fetches the server configuration
    ///
    /// The configuration names the default branch new clients should work
    /// against.
    pub async fn get_config(&self) -> Result<NessieConfiguration, ApiError> {
        let url = self.api_url("config");
        self.send_json(self.request(Method::GET, url)).await
    }

    /// Lists all named references known to the server
    pub async fn get_all_references(&self) -> Result<Vec<Reference>, ApiError> {
        let url = self.api_url("trees");
        let references: Vec<Value> = self.send_json(self.request(Method::GET, url)).await?;

        references
            .into_iter()
            .map(|json| Reference::from_json(json).map_err(ApiError::from))
            .collect()
    }

    /// Fetches the server's default branch
    ///
    /// Servers answer this endpoint with their default branch reference.
    pub async fn get_default_branch(&self) -> Result<Reference, ApiError> {
        let url = self.api_url("trees/tree");
        let json: Value = self.send_json(self.request(Method::GET, url)).await?;
        Ok(Reference::from_json(json)?)
    }

    /// Fetches a single reference by name
    pub async fn get_reference_by_name(&self, ref_name: &str) -> Result<Reference, ApiError> {
        let url = self.api_url(&format!("trees/tree/{}", urlencoding::encode(ref_name)));
        let json: Value = self.send_json(self.request(Method::GET, url)).await?;
        Ok(Reference::from_json(json)?)
    }

    /// Creates a new reference
    ///
    /// The reference's hash, when present, selects the commit the new
    /// reference points at; otherwise the server uses the current default
    /// branch head.
    pub async fn create_reference(&self, reference: &Reference) -> Result<(), ApiError> {
        let url = self.api_url("trees/tree");
        tracing::debug!(
            "Creating {} reference {:?}",
            reference.reference_type(),
            reference.name()
        );
        self.send_empty(self.request(Method::POST, url).json(reference))
            .await
    }

    /// Points a branch at a different commit
    ///
    /// `expected_hash` is the hash the caller believes the branch is at;
    /// the server rejects the assignment if the branch moved in the
    /// meantime.
    pub async fn assign_branch(
        &self,
        branch_name: &str,
        expected_hash: &str,
        assign_to: &Branch,
    ) -> Result<(), ApiError> {
        let url = self.ref_mutation_url("branch", branch_name, expected_hash);
        self.send_empty(self.request(Method::PUT, url).json(assign_to))
            .await
    }

    /// Points a tag at a different commit
    pub async fn assign_tag(
        &self,
        tag_name: &str,
        expected_hash: &str,
        assign_to: &Tag,
    ) -> Result<(), ApiError> {
        let url = self.ref_mutation_url("tag", tag_name, expected_hash);
        self.send_empty(self.request(Method::PUT, url).json(assign_to))
            .await
    }

    /// Deletes a branch
    pub async fn delete_branch(
        &self,
        branch_name: &str,
        expected_hash: &str,
    ) -> Result<(), ApiError> {
        let url = self.ref_mutation_url("branch", branch_name, expected_hash);
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    /// Deletes a tag
    pub async fn delete_tag(&self, tag_name: &str, expected_hash: &str) -> Result<(), ApiError> {
        let url = self.ref_mutation_url("tag", tag_name, expected_hash);
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    /// Fetches a page of the commit log of a reference
    ///
    /// # Parameter Handling
    ///
    /// - `max`: server default page size when None
    /// - `page_token`: continuation token from a previous page's
    ///   [`LogResponse::token`]
    pub async fn get_commit_log(
        &self,
        ref_name: &str,
        max: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<LogResponse, ApiError> {
        let mut url = self.api_url(&format!(
            "trees/tree/{}/log",
            urlencoding::encode(ref_name)
        ));
        Self::append_paging(&mut url, max, page_token);

        self.send_json(self.request(Method::GET, url)).await
    }

    /// Fetches a page of the live entries reachable from a reference
    pub async fn get_entries(
        &self,
        ref_name: &str,
        max: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<EntriesResponse, ApiError> {
        let mut url = self.api_url(&format!(
            "trees/tree/{}/entries",
            urlencoding::encode(ref_name)
        ));
        Self::append_paging(&mut url, max, page_token);

        self.send_json(self.request(Method::GET, url)).await
    }

    /// Merges commits from another reference onto a branch
    pub async fn merge(
        &self,
        branch_name: &str,
        expected_hash: &str,
        merge: &MergeRequest,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/merge?expectedHash={}",
            self.api_url(&format!("trees/branch/{}", urlencoding::encode(branch_name))),
            urlencoding::encode(expected_hash)
        );
        tracing::debug!("Merging {} into branch {}", merge.from_hash, branch_name);
        self.send_empty(self.request(Method::POST, url).json(merge))
            .await
    }

    /// Transplants individual commits onto a branch
    pub async fn transplant(
        &self,
        branch_name: &str,
        expected_hash: &str,
        message: Option<&str>,
        transplant: &Transplant,
    ) -> Result<(), ApiError> {
        let mut url = format!(
            "{}/transplant?expectedHash={}",
            self.api_url(&format!("trees/branch/{}", urlencoding::encode(branch_name))),
            urlencoding::encode(expected_hash)
        );
        if let Some(message) = message {
            url.push_str(&format!("&message={}", urlencoding::encode(message)));
        }

        self.send_empty(self.request(Method::POST, url).json(transplant))
            .await
    }

    /// Builds the URL shared by the assign/delete reference endpoints
    fn ref_mutation_url(&self, ref_kind: &str, ref_name: &str, expected_hash: &str) -> String {
        format!(
            "{}?expectedHash={}",
            self.api_url(&format!(
                "trees/{}/{}",
                ref_kind,
                urlencoding::encode(ref_name)
            )),
            urlencoding::encode(expected_hash)
        )
    }

    /// Appends page-size and continuation-token query parameters
    fn append_paging(url: &mut String, max: Option<u32>, page_token: Option<&str>) {
        let mut params = Vec::new();
        if let Some(max) = max {
            params.push(format!("max={}", max));
        }
        if let Some(token) = page_token {
            params.push(format!("pageToken={}", urlencoding::encode(token)));
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
    }
}

//! HTTP binding of the store protocol
//!
//! Talks to a site's endpoint with a blocking client and basic auth:
//!
//! - `POST {url}/folders {"path"}` ensures a folder chain and echoes its path
//! - `GET  {url}/lists?url={path}` reports list metadata
//! - `PUT  {url}/files{path}?overwrite=` uploads raw content
//! - `POST {url}/files{path}/checkout|checkin|publish` drive versioning
//!
//! The client keeps reqwest's default request timeout so a dead remote fails
//! the calling run instead of hanging.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use crate::credentials::Credentials;
use crate::paths::join_remote;
use crate::store::{CheckinKind, FolderHandle, Store, StoreConnection, StoreError};

/// Store implementation over the HTTP deployment API.
pub struct HttpStore {
    client: Client,
}

impl HttpStore {
    pub fn new() -> Result<Self, StoreError> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Store for HttpStore {
    fn connect(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<Box<dyn StoreConnection>, StoreError> {
        reqwest::Url::parse(url).map_err(|e| StoreError::Connection(format!("{url}: {e}")))?;
        Ok(Box::new(HttpConnection {
            client: self.client.clone(),
            base: url.trim_end_matches('/').to_string(),
            credentials: credentials.clone(),
        }))
    }
}

struct HttpConnection {
    client: Client,
    base: String,
    credentials: Credentials,
}

#[derive(Deserialize)]
struct FolderBody {
    path: String,
}

#[derive(Deserialize)]
struct ListBody {
    enable_minor_versions: bool,
}

impl HttpConnection {
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    fn send(
        &self,
        op: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response, StoreError> {
        let response = self
            .authed(request)
            .send()
            .map_err(|e| operation_error(op, path, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(operation_error(op, path, format!("HTTP {status}")));
        }
        Ok(response)
    }

    fn file_url(&self, file: &str) -> String {
        format!("{}/files{}", self.base, file)
    }
}

impl StoreConnection for HttpConnection {
    fn ensure_folder(&self, path: &str) -> Result<FolderHandle, StoreError> {
        let request = self
            .client
            .post(format!("{}/folders", self.base))
            .json(&json!({ "path": path }));
        let body: FolderBody = self
            .send("ensure folder", path, request)?
            .json()
            .map_err(|e| operation_error("ensure folder", path, e.to_string()))?;
        Ok(FolderHandle { path: body.path })
    }

    fn minor_versioning_enabled(&self, path: &str) -> Result<bool, StoreError> {
        let request = self
            .client
            .get(format!("{}/lists", self.base))
            .query(&[("url", path)]);
        let body: ListBody = self
            .send("list metadata", path, request)?
            .json()
            .map_err(|e| operation_error("list metadata", path, e.to_string()))?;
        Ok(body.enable_minor_versions)
    }

    fn upload_file(
        &self,
        folder: &FolderHandle,
        name: &str,
        content: &[u8],
        overwrite: bool,
    ) -> Result<(), StoreError> {
        let file = join_remote(&folder.path, name);
        let request = self
            .client
            .put(self.file_url(&file))
            .query(&[("overwrite", if overwrite { "true" } else { "false" })])
            .body(content.to_vec());
        self.send("upload", &file, request)?;
        Ok(())
    }

    fn checkout_file(&self, file: &str) -> Result<(), StoreError> {
        let request = self.client.post(format!("{}/checkout", self.file_url(file)));
        self.send("checkout", file, request)?;
        Ok(())
    }

    fn checkin_file(&self, file: &str, kind: CheckinKind, comment: &str) -> Result<(), StoreError> {
        let request = self
            .client
            .post(format!("{}/checkin", self.file_url(file)))
            .json(&json!({ "kind": kind.as_str(), "comment": comment }));
        self.send("checkin", file, request)?;
        Ok(())
    }

    fn publish_file(&self, file: &str, comment: &str) -> Result<(), StoreError> {
        let request = self
            .client
            .post(format!("{}/publish", self.file_url(file)))
            .json(&json!({ "comment": comment }));
        self.send("publish", file, request)?;
        Ok(())
    }
}

fn operation_error(op: &'static str, path: &str, message: String) -> StoreError {
    StoreError::Operation {
        op,
        path: path.to_string(),
        message,
    }
}

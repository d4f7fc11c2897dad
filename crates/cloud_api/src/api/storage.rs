//! File storage endpoints.

use serde::Serialize;

use crate::{
    files::{
        path::{file_name, join_path, normalize_path},
        types::{FileContent, FileRecord},
    },
    http::transport::{HttpRequest, MultipartForm},
    ApiClient, ApiError,
};

const FILES_PATH: &str = "/api/files";
const DIRECTORY_PATH: &str = "/api/files/directory";
const MOVE_PATH: &str = "/api/files/move";
const RENAME_PATH: &str = "/api/files/rename";
const UPLOAD_PATH: &str = "/api/files/upload";
const DOWNLOAD_PATH: &str = "/api/files/download";

/// Wire value for "the parent of the entry's directory".
pub const PARENT_MOVE_TARGET: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Destination of a move, relative to the directory holding the moved entry.
pub enum MoveTarget {
    /// One level up.
    Parent,
    /// A sibling directory by name.
    Directory(String),
}

impl MoveTarget {
    /// Resolves a drop-target tile name into a move target.
    pub fn from_tile_name(name: &str) -> Self {
        if name == crate::PARENT_ENTRY_NAME {
            Self::Parent
        } else {
            Self::Directory(name.to_string())
        }
    }

    /// Value sent to the server.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Parent => PARENT_MOVE_TARGET,
            Self::Directory(name) => name,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateDirectoryBody<'a> {
    path: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct MoveBody<'a> {
    path: &'a str,
    target: &'a str,
}

#[derive(Debug, Serialize)]
struct RenameBody<'a> {
    path: &'a str,
    name: &'a str,
}

/// Checks a user-supplied file or directory name before it is sent.
///
/// Names are trimmed. Empty names, names containing a path separator, and names ending in a dot
/// (which includes `.` and `..`) are rejected, matching what the storage server refuses.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] describing the rejected name.
pub fn validate_entry_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidRequest("name cannot be empty".to_string()));
    }
    if trimmed.contains(['/', '\\']) {
        return Err(ApiError::InvalidRequest(format!(
            "name `{trimmed}` cannot contain a path separator"
        )));
    }
    if trimmed.ends_with('.') {
        return Err(ApiError::InvalidRequest(format!(
            "name `{trimmed}` cannot end with a dot"
        )));
    }
    Ok(trimmed.to_string())
}

#[derive(Clone)]
/// Listing and mutation calls against the storage backend.
pub struct StorageApi {
    client: ApiClient,
}

impl StorageApi {
    /// Wraps an authorized client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Lists the entries of a directory.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] from the request or a [`ApiError::Decode`] for a bad listing.
    pub async fn list(&self, dir: &str) -> Result<Vec<FileRecord>, ApiError> {
        let request = HttpRequest::get(FILES_PATH).with_query("path", normalize_path(dir));
        self.client.send_json(request).await
    }

    /// Creates `name` inside `dir` and returns the new directory path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a rejected name, or the request error.
    pub async fn create_directory(&self, dir: &str, name: &str) -> Result<String, ApiError> {
        let name = validate_entry_name(name)?;
        let dir = normalize_path(dir);
        let request = HttpRequest::post(DIRECTORY_PATH).with_json(&CreateDirectoryBody {
            path: &dir,
            name: &name,
        })?;
        self.client.send(request).await?;
        Ok(join_path(&dir, &name))
    }

    /// Moves one entry relative to its own directory.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn move_entry(&self, path: &str, target: &MoveTarget) -> Result<(), ApiError> {
        let path = normalize_path(path);
        let request = HttpRequest::put(MOVE_PATH).with_json(&MoveBody {
            path: &path,
            target: target.as_wire(),
        })?;
        self.client.send(request).await.map(|_| ())
    }

    /// Moves every named entry of `dir` to `target`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first request error.
    pub async fn move_entries(
        &self,
        dir: &str,
        names: &[String],
        target: &MoveTarget,
    ) -> Result<(), ApiError> {
        for name in names {
            self.move_entry(&join_path(dir, name), target).await?;
        }
        Ok(())
    }

    /// Renames an entry in place and returns its new path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a rejected name, or the request error.
    pub async fn rename(&self, path: &str, new_name: &str) -> Result<String, ApiError> {
        let name = validate_entry_name(new_name)?;
        let path = normalize_path(path);
        let request = HttpRequest::put(RENAME_PATH).with_json(&RenameBody {
            path: &path,
            name: &name,
        })?;
        self.client.send(request).await?;
        Ok(join_path(&crate::parent_path(&path), &name))
    }

    /// Uploads `file` into `dir`, replacing a file of the same name, and returns its path.
    ///
    /// The form carries a `path` field with the target directory and a `file` part.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for an empty file or a rejected file name, or the
    /// request error.
    pub async fn upload(&self, dir: &str, file: FileContent) -> Result<String, ApiError> {
        if file.is_empty() {
            return Err(ApiError::InvalidRequest(format!(
                "cannot upload empty file `{}`",
                file.file_name
            )));
        }
        let name = validate_entry_name(&file.file_name)?;
        let dir = normalize_path(dir);
        let destination = join_path(&dir, &name);
        let form = MultipartForm {
            fields: vec![("path".to_string(), dir)],
            files: vec![(
                "file".to_string(),
                FileContent {
                    file_name: name,
                    ..file
                },
            )],
        };
        self.client
            .send(HttpRequest::post(UPLOAD_PATH).with_multipart(form))
            .await?;
        Ok(destination)
    }

    /// Downloads a file's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for the root, or the request error (the server
    /// refuses directories).
    pub async fn download(&self, path: &str) -> Result<FileContent, ApiError> {
        let path = normalize_path(path);
        if path == "/" {
            return Err(ApiError::InvalidRequest(
                "cannot download the storage root".to_string(),
            ));
        }
        let request = HttpRequest::get(DOWNLOAD_PATH)
            .with_query("path", path.clone())
            .expect_binary();
        let response = self.client.send(request).await?;
        Ok(FileContent {
            file_name: file_name(&path),
            content_type: response.content_type,
            bytes: response.bytes,
        })
    }

    /// Deletes a file, or a directory with everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for the root, or the request error.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let path = normalize_path(path);
        if path == "/" {
            return Err(ApiError::InvalidRequest(
                "cannot delete the storage root".to_string(),
            ));
        }
        let request = HttpRequest::delete(FILES_PATH).with_query("path", path);
        self.client.send(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        http::transport::{
            HttpMethod, HttpResponse, HttpTransport, RequestBody, ResponseKind, TransportFuture,
            CONTENT_TYPE_HEADER,
        },
        ClientConfig, FileKind, MemoryTokenStore,
    };

    #[derive(Default)]
    struct RecordingTransport {
        body: String,
        bytes: Vec<u8>,
        sent: RefCell<Vec<(String, HttpRequest)>>,
    }

    impl HttpTransport for RecordingTransport {
        fn send<'a>(
            &'a self,
            url: String,
            request: HttpRequest,
        ) -> TransportFuture<'a, Result<HttpResponse, ApiError>> {
            let response = match request.response_kind {
                ResponseKind::Text => HttpResponse::new(200, self.body.clone()),
                ResponseKind::Binary => HttpResponse::binary(200, self.bytes.clone())
                    .with_content_type("application/pdf"),
            };
            self.sent.borrow_mut().push((url, request));
            Box::pin(async move { Ok(response) })
        }
    }

    fn storage(body: &str) -> (StorageApi, Rc<RecordingTransport>) {
        let transport = Rc::new(RecordingTransport {
            body: body.to_string(),
            ..RecordingTransport::default()
        });
        let client = ApiClient::new(
            ClientConfig::default(),
            transport.clone(),
            Rc::new(MemoryTokenStore::default()),
        );
        (StorageApi::new(client), transport)
    }

    fn json_body(request: &HttpRequest) -> Value {
        serde_json::from_str(request.json_body().expect("body")).expect("json")
    }

    #[test]
    fn list_decodes_records_and_normalizes_path() {
        let (api, transport) = storage(
            &json!([{ "name": "a.txt", "size": 5, "lastModified": 1, "type": "file" }]).to_string(),
        );
        let entries = block_on(api.list("docs/")).expect("list");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, FileKind::File);

        let sent = transport.sent.borrow();
        assert_eq!(sent[0].1.method, HttpMethod::Get);
        assert_eq!(
            sent[0].0,
            "http://localhost:8080/api/files?path=%2Fdocs"
        );
    }

    #[test]
    fn move_entries_sends_one_request_per_name() {
        let (api, transport) = storage("");
        let names = vec!["a.txt".to_string(), "b".to_string()];
        block_on(api.move_entries("/docs", &names, &MoveTarget::from_tile_name("...")))
            .expect("move");

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(json_body(&sent[0].1), json!({ "path": "/docs/a.txt", "target": "." }));
        assert_eq!(json_body(&sent[1].1), json!({ "path": "/docs/b", "target": "." }));
    }

    #[test]
    fn create_and_rename_validate_names_before_sending() {
        let (api, transport) = storage("");
        let err = block_on(api.create_directory("/", "backup..")).expect_err("trailing dot");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        let err = block_on(api.rename("/a.txt", "x/y")).expect_err("separator");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        assert!(transport.sent.borrow().is_empty());

        let created = block_on(api.create_directory("/docs", " reports ")).expect("create");
        assert_eq!(created, "/docs/reports");
        let renamed = block_on(api.rename("/docs/a.txt", "b.txt")).expect("rename");
        assert_eq!(renamed, "/docs/b.txt");
        let sent = transport.sent.borrow();
        assert_eq!(json_body(&sent[0].1), json!({ "path": "/docs", "name": "reports" }));
        assert_eq!(json_body(&sent[1].1), json!({ "path": "/docs/a.txt", "name": "b.txt" }));
    }

    #[test]
    fn delete_refuses_root() {
        let (api, transport) = storage("");
        assert!(block_on(api.delete("/")).is_err());
        block_on(api.delete("/docs/old")).expect("delete");
        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.method, HttpMethod::Delete);
    }

    #[test]
    fn upload_sends_directory_field_and_file_part() {
        let (api, transport) = storage("");
        let file = FileContent {
            file_name: "report.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: vec![1, 2, 3],
        };
        let path = block_on(api.upload("docs/", file.clone())).expect("upload");
        assert_eq!(path, "/docs/report.pdf");

        let sent = transport.sent.borrow();
        let (url, request) = &sent[0];
        assert_eq!(url, "http://localhost:8080/api/files/upload");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.header(CONTENT_TYPE_HEADER), None);
        assert_eq!(
            request.body,
            Some(RequestBody::Multipart(MultipartForm {
                fields: vec![("path".to_string(), "/docs".to_string())],
                files: vec![("file".to_string(), file)],
            }))
        );
    }

    #[test]
    fn upload_rejects_empty_files_before_sending() {
        let (api, transport) = storage("");
        let err = block_on(api.upload("/", FileContent::new("empty.txt", Vec::new())))
            .expect_err("empty");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        let err = block_on(api.upload("/", FileContent::new("..", vec![1]))).expect_err("dots");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        assert!(transport.sent.borrow().is_empty());
    }

    #[test]
    fn download_requests_bytes_and_names_the_file() {
        let transport = Rc::new(RecordingTransport {
            bytes: b"%PDF".to_vec(),
            ..RecordingTransport::default()
        });
        let api = StorageApi::new(ApiClient::new(
            ClientConfig::default(),
            transport.clone(),
            Rc::new(MemoryTokenStore::default()),
        ));

        let content = block_on(api.download("/docs/report.pdf")).expect("download");
        assert_eq!(
            content,
            FileContent {
                file_name: "report.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                bytes: b"%PDF".to_vec(),
            }
        );
        assert!(block_on(api.download("/")).is_err());

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].0,
            "http://localhost:8080/api/files/download?path=%2Fdocs%2Freport.pdf"
        );
        assert_eq!(sent[0].1.response_kind, ResponseKind::Binary);
    }

    #[test]
    fn move_target_from_tile_name() {
        assert_eq!(MoveTarget::from_tile_name("..."), MoveTarget::Parent);
        assert_eq!(
            MoveTarget::from_tile_name("photos").as_wire(),
            "photos"
        );
    }
}

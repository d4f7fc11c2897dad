//! Authorized API client with transparent access-token refresh.
//!
//! Every request passes through a request interceptor that attaches `Content-Type` and the
//! stored `Authorization` header. Responses whose status is listed in
//! [`ClientConfig::refresh_status_codes`] run the refresh flow once:
//!
//! 1. `POST refresh_path` with `{"token": <refresh token>}`.
//! 2. On success the stored access token is swapped in place.
//! 3. The original request is replayed once with freshly attached headers.
//!
//! A `403` from the refresh endpoint is returned to the caller as
//! [`ApiError::RefreshRejected`] and the original request is not replayed. Other refresh failures
//! are logged and the replay still happens with whatever credentials are stored. The replay, the
//! refresh request itself and requests marked with [`HttpRequest::skip_auth_refresh`] never
//! trigger a refresh.

use std::{cell::RefCell, rc::Rc};

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use leptos::logging;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::transport::{
    url_with_query, HttpRequest, HttpResponse, HttpTransport, AUTHORIZATION_HEADER,
    CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE,
};
use crate::{auth::tokens::TokenStore, ApiError, ClientConfig};

const REFRESH_FORBIDDEN_STATUS: u16 = 403;

type SharedRefresh = Shared<LocalBoxFuture<'static, Result<(), ApiError>>>;

#[derive(Debug, Serialize)]
struct RefreshTokenRequest {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenResponse {
    #[serde(rename = "type", default)]
    token_type: String,
    access_token: String,
}

struct ClientInner {
    config: ClientConfig,
    transport: Rc<dyn HttpTransport>,
    tokens: Rc<dyn TokenStore>,
    refresh_in_flight: RefCell<Option<SharedRefresh>>,
}

#[derive(Clone)]
/// Shared API client used by every call site in the application.
///
/// Cloning is cheap; clones share the transport, the token store and any in-flight refresh.
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl ApiClient {
    /// Builds a client over a transport and token store.
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn HttpTransport>,
        tokens: Rc<dyn TokenStore>,
    ) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                config,
                transport,
                tokens,
                refresh_in_flight: RefCell::new(None),
            }),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Token store backing the `Authorization` header.
    pub fn tokens(&self) -> &dyn TokenStore {
        self.inner.tokens.as_ref()
    }

    /// Sends a request and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response was received,
    /// [`ApiError::RefreshRejected`] when the refresh endpoint answers `403`, and
    /// [`ApiError::Status`] for any other non-success final response.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.dispatch(request.clone()).await?;
        if request.skip_auth_refresh || !self.inner.config.is_refresh_status(response.status) {
            return response.error_for_status();
        }

        logging::log!(
            "{} {} answered {}; refreshing access token",
            request.method.as_str(),
            request.path,
            response.status
        );
        match self.refresh_access_token().await {
            Ok(()) => {}
            Err(err @ ApiError::RefreshRejected { .. }) => return Err(err),
            Err(err) => logging::warn!("access token refresh failed: {err}"),
        }

        self.dispatch(request).await?.error_for_status()
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ApiClient::send`], or [`ApiError::Decode`] for a malformed body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        self.send(request).await?.json()
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// Concurrent callers share a single refresh request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RefreshRejected`] for a `403` from the refresh endpoint, and the
    /// transport/status/decode/storage error of the refresh call otherwise.
    pub async fn refresh_access_token(&self) -> Result<(), ApiError> {
        let refresh = {
            let mut slot = self.inner.refresh_in_flight.borrow_mut();
            match slot.as_ref() {
                Some(in_flight) => in_flight.clone(),
                None => {
                    let client = self.clone();
                    let refresh = async move {
                        let result = client.request_new_access_token().await;
                        client.inner.refresh_in_flight.borrow_mut().take();
                        result
                    }
                    .boxed_local()
                    .shared();
                    *slot = Some(refresh.clone());
                    refresh
                }
            }
        };
        refresh.await
    }

    async fn request_new_access_token(&self) -> Result<(), ApiError> {
        let body = RefreshTokenRequest {
            token: self.inner.tokens.refresh_token(),
        };
        let request = HttpRequest::post(self.inner.config.refresh_path.clone())
            .skip_auth_refresh()
            .with_json(&body)?;
        let response = self.dispatch(request).await?;
        if response.status == REFRESH_FORBIDDEN_STATUS {
            return Err(ApiError::RefreshRejected {
                status: response.status,
            });
        }

        let refreshed: RefreshTokenResponse = response.error_for_status()?.json()?;
        self.inner
            .tokens
            .update_access_token(&refreshed.token_type, &refreshed.access_token)
            .map_err(ApiError::Storage)
    }

    fn prepare(&self, mut request: HttpRequest) -> (String, HttpRequest) {
        if !request.is_multipart() {
            request.set_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE);
        }
        if let Some(authorization) = self.inner.tokens.authorization_header() {
            request.set_header(AUTHORIZATION_HEADER, authorization);
        }
        let url = url_with_query(&self.inner.config.url_for(&request.path), &request.query);
        (url, request)
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let (url, request) = self.prepare(request);
        self.inner.transport.send(url, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use futures::{channel::oneshot, executor::block_on, join};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        auth::tokens::{MemoryTokenStore, TokenPair},
        http::transport::TransportFuture,
    };

    enum Scripted {
        Ready(Result<HttpResponse, ApiError>),
        Gated(oneshot::Receiver<Result<HttpResponse, ApiError>>),
    }

    #[derive(Default)]
    struct ScriptedTransport {
        script: RefCell<VecDeque<Scripted>>,
        sent: RefCell<Vec<(String, HttpRequest)>>,
    }

    impl ScriptedTransport {
        fn with(script: Vec<Scripted>) -> Rc<Self> {
            Rc::new(Self {
                script: RefCell::new(script.into()),
                sent: RefCell::default(),
            })
        }

        fn sent(&self) -> Vec<(String, HttpRequest)> {
            self.sent.borrow().clone()
        }

        fn sent_paths(&self) -> Vec<String> {
            self.sent
                .borrow()
                .iter()
                .map(|(_, request)| request.path.clone())
                .collect()
        }

        fn authorization_headers(&self) -> Vec<Option<String>> {
            self.sent
                .borrow()
                .iter()
                .map(|(_, request)| request.header(AUTHORIZATION_HEADER).map(str::to_string))
                .collect()
        }
    }

    impl HttpTransport for ScriptedTransport {
        fn send<'a>(
            &'a self,
            url: String,
            request: HttpRequest,
        ) -> TransportFuture<'a, Result<HttpResponse, ApiError>> {
            self.sent.borrow_mut().push((url, request));
            let next = self.script.borrow_mut().pop_front();
            Box::pin(async move {
                match next {
                    Some(Scripted::Ready(result)) => result,
                    Some(Scripted::Gated(rx)) => rx
                        .await
                        .unwrap_or_else(|_| Err(ApiError::Transport("gate dropped".into()))),
                    None => Err(ApiError::Transport("script exhausted".into())),
                }
            })
        }
    }

    fn ok(status: u16, body: &str) -> Scripted {
        Scripted::Ready(Ok(HttpResponse::new(status, body)))
    }

    fn refreshed(token: &str) -> Scripted {
        ok(
            200,
            &json!({ "type": "Bearer", "accessToken": token }).to_string(),
        )
    }

    fn tokens() -> Rc<MemoryTokenStore> {
        Rc::new(MemoryTokenStore::with_pair(TokenPair {
            access_token: "stale".to_string(),
            refresh_token: "refresh-1".to_string(),
            token_type: "Bearer".to_string(),
        }))
    }

    fn client(transport: Rc<ScriptedTransport>, tokens: Rc<MemoryTokenStore>) -> ApiClient {
        ApiClient::new(ClientConfig::default(), transport, tokens)
    }

    #[test]
    fn request_interceptor_attaches_headers_and_base_url() {
        let transport = ScriptedTransport::with(vec![ok(200, "[]")]);
        let api = client(transport.clone(), tokens());

        let request = HttpRequest::get("/api/files").with_query("path", "/docs");
        let response = block_on(api.send(request)).expect("send");
        assert_eq!(response.body, "[]");

        let sent = transport.sent();
        assert_eq!(sent[0].0, "http://localhost:8080/api/files?path=%2Fdocs");
        assert_eq!(sent[0].1.header(AUTHORIZATION_HEADER), Some("Bearer stale"));
        assert_eq!(sent[0].1.header(CONTENT_TYPE_HEADER), Some(JSON_CONTENT_TYPE));
    }

    #[test]
    fn missing_tokens_send_no_authorization_header() {
        let transport = ScriptedTransport::with(vec![ok(200, "")]);
        let api = ApiClient::new(
            ClientConfig::default(),
            transport.clone(),
            Rc::new(MemoryTokenStore::default()),
        );

        block_on(api.send(HttpRequest::get("/api/files"))).expect("send");
        assert_eq!(transport.authorization_headers(), vec![None]);
    }

    #[test]
    fn unauthorized_response_refreshes_and_retries_once() {
        let transport =
            ScriptedTransport::with(vec![ok(401, ""), refreshed("fresh"), ok(200, "done")]);
        let store = tokens();
        let api = client(transport.clone(), store.clone());

        let response = block_on(api.send(HttpRequest::get("/api/files"))).expect("retried");
        assert_eq!(response.body, "done");
        assert_eq!(
            transport.sent_paths(),
            vec!["/api/files", "/api/auth/refresh", "/api/files"]
        );
        assert_eq!(
            transport.authorization_headers(),
            vec![
                Some("Bearer stale".to_string()),
                Some("Bearer stale".to_string()),
                Some("Bearer fresh".to_string()),
            ]
        );

        let refresh_body: Value =
            serde_json::from_str(transport.sent()[1].1.json_body().expect("body"))
                .expect("json body");
        assert_eq!(refresh_body, json!({ "token": "refresh-1" }));

        let pair = store.load().expect("pair");
        assert_eq!(pair.access_token, "fresh");
        assert_eq!(pair.refresh_token, "refresh-1");
    }

    #[test]
    fn forbidden_response_also_triggers_refresh() {
        let transport =
            ScriptedTransport::with(vec![ok(403, ""), refreshed("fresh"), ok(200, "ok")]);
        let api = client(transport.clone(), tokens());

        block_on(api.send(HttpRequest::get("/api/files"))).expect("retried");
        assert_eq!(transport.sent().len(), 3);
    }

    #[test]
    fn failure_after_retry_propagates_without_looping() {
        let transport =
            ScriptedTransport::with(vec![ok(401, ""), refreshed("fresh"), ok(401, "still")]);
        let api = client(transport.clone(), tokens());

        let err = block_on(api.send(HttpRequest::get("/api/files"))).expect_err("second 401");
        assert_eq!(
            err,
            ApiError::Status {
                status: 401,
                body: "still".to_string()
            }
        );
        assert_eq!(transport.sent().len(), 3);
    }

    #[test]
    fn forbidden_refresh_is_rethrown_without_retry() {
        let transport = ScriptedTransport::with(vec![ok(401, ""), ok(403, "expired")]);
        let store = tokens();
        let api = client(transport.clone(), store.clone());

        let err = block_on(api.send(HttpRequest::get("/api/files"))).expect_err("rejected");
        assert_eq!(err, ApiError::RefreshRejected { status: 403 });
        assert_eq!(transport.sent().len(), 2);
        assert_eq!(store.load().expect("pair").access_token, "stale");
    }

    #[test]
    fn other_refresh_failures_still_replay_original_request() {
        let transport =
            ScriptedTransport::with(vec![ok(401, ""), ok(500, "boom"), ok(200, "lucky")]);
        let api = client(transport.clone(), tokens());

        let response = block_on(api.send(HttpRequest::get("/api/files"))).expect("replayed");
        assert_eq!(response.body, "lucky");
        assert_eq!(
            transport.authorization_headers()[2],
            Some("Bearer stale".to_string())
        );
    }

    #[test]
    fn non_auth_errors_skip_refresh() {
        let transport = ScriptedTransport::with(vec![ok(404, "nope")]);
        let api = client(transport.clone(), tokens());

        let err = block_on(api.send(HttpRequest::get("/api/files"))).expect_err("404");
        assert_eq!(err.status(), Some(404));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn exempt_requests_skip_refresh() {
        let transport = ScriptedTransport::with(vec![ok(401, "denied")]);
        let api = client(transport.clone(), tokens());

        let request = HttpRequest::post("/api/auth/signin").skip_auth_refresh();
        let err = block_on(api.send(request)).expect_err("401");
        assert_eq!(err.status(), Some(401));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn transport_errors_propagate_without_refresh() {
        let transport = ScriptedTransport::with(vec![Scripted::Ready(Err(ApiError::Transport(
            "offline".to_string(),
        )))]);
        let api = client(transport.clone(), tokens());

        let err = block_on(api.send(HttpRequest::get("/api/files"))).expect_err("offline");
        assert_eq!(err, ApiError::Transport("offline".to_string()));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn concurrent_failures_share_one_refresh() {
        let (gate_tx, gate_rx) = oneshot::channel();
        let transport = ScriptedTransport::with(vec![
            ok(401, ""),
            Scripted::Gated(gate_rx),
            ok(401, ""),
            ok(200, "a"),
            ok(200, "b"),
        ]);
        let api = client(transport.clone(), tokens());

        let (first, second, _) = block_on(async {
            join!(
                api.send(HttpRequest::get("/api/files")),
                api.send(HttpRequest::get("/api/files")),
                async {
                    let refreshed = HttpResponse::new(
                        200,
                        json!({ "type": "Bearer", "accessToken": "fresh" }).to_string(),
                    );
                    let _ = gate_tx.send(Ok(refreshed));
                }
            )
        });

        assert_eq!(first.expect("first").body, "a");
        assert_eq!(second.expect("second").body, "b");
        let refresh_calls = transport
            .sent_paths()
            .into_iter()
            .filter(|path| path == "/api/auth/refresh")
            .count();
        assert_eq!(refresh_calls, 1);
        assert_eq!(
            transport.authorization_headers()[3..].to_vec(),
            vec![
                Some("Bearer fresh".to_string()),
                Some("Bearer fresh".to_string())
            ]
        );
    }
}

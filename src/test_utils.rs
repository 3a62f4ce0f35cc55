use http::{Method, Request, Response};
use kube::{client::Body, Client};
use serde_json::{json, Value};

pub type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;

/// Returns a client whose requests are answered through the returned handle.
pub fn mock_client() -> (Client, ApiServerHandle) {
    let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();

    (Client::new(mock_service, "default"), handle)
}

/// A `Status` response as returned by the API server for missing objects.
pub fn not_found(resource: &str) -> (u16, Value) {
    (
        404,
        json!({
            "kind": "Status",
            "apiVersion": "v1",
            "metadata": {},
            "status": "Failure",
            "message": format!("{} not found", resource),
            "reason": "NotFound",
            "code": 404
        }),
    )
}

/// Plays the API server side of a scripted exchange, checking that requests
/// arrive in the expected order.
pub struct ApiServerVerifier(ApiServerHandle);

impl ApiServerVerifier {
    pub fn new(handle: ApiServerHandle) -> Self {
        Self(handle)
    }

    pub async fn expect(&mut self, method: Method, path: &str, response: (u16, Value)) {
        let (request, send) = self.0.next_request().await.expect("service not called");

        assert_eq!(request.method(), &method);
        assert_eq!(request.uri().path(), path);

        let (status, body) = response;
        send.send_response(
            Response::builder()
                .status(status)
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        );
    }

    /// Answers the next request with its own body and returns that body.
    pub async fn expect_echo(&mut self, method: Method, path: &str) -> Value {
        let (request, send) = self.0.next_request().await.expect("service not called");

        assert_eq!(request.method(), &method);
        assert_eq!(request.uri().path(), path);

        let bytes = request.into_body().collect_bytes().await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        send.send_response(
            Response::builder()
                .status(200)
                .body(Body::from(bytes.to_vec()))
                .unwrap(),
        );

        body
    }
}

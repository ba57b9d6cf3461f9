//! Integration tests for the Tradepost API client.
//!
//! A wiremock server stands in for the backend, mounted under `/api` like the
//! real deployment.

use std::sync::Arc;

use serde_json::json;
use tradepost_api_client::models::{ImageUpload, LoginInput, LoginRequest, NewItem, ProfileUpdate};
use tradepost_api_client::{
    ApiError, ClientConfig, MarketClient, MemoryTokenStore, StaticToken, TokenStore,
};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

async fn setup(token: Option<&str>) -> (MockServer, MarketClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::development().with_base_url(format!("{}/api", server.uri()));
    let credentials = match token {
        Some(token) => StaticToken::new(token),
        None => StaticToken::none(),
    };
    let client = MarketClient::with_config(config, Arc::new(credentials)).unwrap();
    (server, client)
}

async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "exactly one request should be sent");
    requests.remove(0)
}

// =============================================================================
// Success path
// =============================================================================

mod success {
    use super::*;

    #[tokio::test]
    async fn test_body_is_returned_verbatim() {
        let (server, client) = setup(Some("tok")).await;
        let body = json!([{"item_id": 1, "title": "Boots", "extra": {"nested": [1, 2]}}]);
        Mock::given(method("GET"))
            .and(path("/api/items/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let items = client.items().list_all().await.unwrap();
        assert_eq!(items, body);
    }

    #[tokio::test]
    async fn test_created_status_counts_as_success() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("POST"))
            .and(path("/api/transactions/"))
            .and(query_param("token", "tok"))
            .and(body_json(json!({"item_id": 4})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"transaction_id": 9})))
            .expect(1)
            .mount(&server)
            .await;

        let created = client.transactions().create(4).await.unwrap();
        assert_eq!(created, json!({"transaction_id": 9}));
    }

    #[tokio::test]
    async fn test_no_content_resolves_to_null() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("DELETE"))
            .and(path("/api/wishlist/3"))
            .and(query_param("token", "tok"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let removed = client.wishlist().remove(3).await.unwrap();
        assert!(removed.is_null());
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_a_decode_error() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let err = client.users().me().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    }
}

// =============================================================================
// Failure normalization
// =============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_string_detail_becomes_message() {
        let (server, client) = setup(None).await;
        Mock::given(method("POST"))
            .and(path("/api/users/"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "Username already taken"})),
            )
            .mount(&server)
            .await;

        let err = client
            .auth()
            .register(&json!({"username": "alice"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Username already taken");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    }

    #[tokio::test]
    async fn test_validation_detail_is_joined() {
        let (server, client) = setup(None).await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "detail": [{"loc": ["body", "username"], "msg": "required"}]
            })))
            .mount(&server)
            .await;

        let err = client
            .auth()
            .login(LoginRequest::new("", "x"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "username: required");
    }

    #[tokio::test]
    async fn test_unparseable_error_body_uses_operation_fallback() {
        let (server, client) = setup(None).await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let err = client
            .auth()
            .login(LoginRequest::new("a", "b"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Incorrect username or password");
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_fallback_differs_per_operation() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let item = client.items().get(1).await.unwrap_err();
        let convos = client.messages().conversations().await.unwrap_err();
        assert_eq!(item.to_string(), "Could not fetch item details");
        assert_eq!(convos.to_string(), "Could not fetch conversations");
        assert!(item.is_server_error());
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        let config = ClientConfig::development().with_base_url("http://127.0.0.1:1/api");
        let client = MarketClient::with_config(config, Arc::new(StaticToken::none())).unwrap();

        let err = client.items().list_all().await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)), "got {err:?}");
    }
}

// =============================================================================
// Request construction
// =============================================================================

mod requests {
    use super::*;

    #[tokio::test]
    async fn test_form_login_sends_exact_json_pair() {
        let (server, client) = setup(None).await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "new", "token_type": "bearer"})),
            )
            .mount(&server)
            .await;

        let form = LoginInput::FormEncoded("username=a&password=b&remember=1".to_string());
        let token = client.auth().login(form).await.unwrap();
        assert_eq!(token["access_token"], "new");

        let request = single_request(&server).await;
        let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(sent, json!({"username": "a", "password": "b"}));
        assert!(request.url.query().is_none());
        assert!(request.headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_item_list_query_and_header_auth() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("GET"))
            .and(path("/api/items/"))
            .and(header("authorization", "Bearer tok"))
            .and(query_param_is_missing("token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        client.items().list("shoe", "price").await.unwrap();

        let request = single_request(&server).await;
        assert_eq!(request.url.query(), Some("search=shoe&sort=price"));
    }

    #[tokio::test]
    async fn test_item_list_without_filters_has_no_query() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("GET"))
            .and(path("/api/items/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        client.items().list("", "").await.unwrap();

        let request = single_request(&server).await;
        assert_eq!(request.url.query(), None);
    }

    #[tokio::test]
    async fn test_history_keys_on_user_and_item() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("GET"))
            .and(path("/api/messages/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        client.messages().history(7, 42).await.unwrap();

        let request = single_request(&server).await;
        assert_eq!(request.url.query(), Some("token=tok&item_id=42"));
    }

    #[tokio::test]
    async fn test_missing_credential_is_sent_as_null() {
        let (server, client) = setup(None).await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
            .mount(&server)
            .await;

        let err = client.users().get(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid token");
        client.items().get(3).await.unwrap_err();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("token=null"));
        assert_eq!(
            requests[1].headers.get("authorization").unwrap().to_str().unwrap(),
            "Bearer null"
        );
    }

    #[tokio::test]
    async fn test_status_update_body() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("PUT"))
            .and(path("/api/transactions/5"))
            .and(query_param("token", "tok"))
            .and(body_json(json!({"status": "completed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "completed"})))
            .expect(1)
            .mount(&server)
            .await;

        client
            .transactions()
            .update_status(5, "completed")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_message_body() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("POST"))
            .and(path("/api/messages/"))
            .and(query_param("token", "tok"))
            .and(body_json(json!({"receiver_id": 2, "content": "still available?", "item_id": 8})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message_id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        client
            .messages()
            .send(2, "still available?", 8)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_profile_update_uses_query_token() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("PUT"))
            .and(path("/api/users/me"))
            .and(query_param("token", "tok"))
            .and(body_json(json!({"address": "Taipei"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let update = ProfileUpdate {
            address: Some("Taipei".to_string()),
            ..ProfileUpdate::default()
        };
        client.users().update_me(&update).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_item_is_multipart_with_query_token() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("POST"))
            .and(path("/api/items/"))
            .and(query_param("token", "tok"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"item_id": 11})))
            .expect(1)
            .mount(&server)
            .await;

        let item = NewItem::new("Boots", "used", 2)
            .for_sale(300)
            .with_image(ImageUpload::from_file_name("boots.jpg", vec![0xff, 0xd8, 0xff]));
        let created = client.items().create(item).await.unwrap();
        assert_eq!(created["item_id"], 11);

        let request = single_request(&server).await;
        let content_type = request
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains("name=\"title\""));
        assert!(body.contains("filename=\"boots.jpg\""));
    }

    #[tokio::test]
    async fn test_stored_token_is_read_on_every_call() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryTokenStore::new());
        let config = ClientConfig::development().with_base_url(format!("{}/api", server.uri()));
        let client = MarketClient::with_config(config, store.clone()).unwrap();
        Mock::given(method("GET"))
            .and(path("/api/wishlist/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        client.wishlist().list().await.unwrap();
        store.store("fresh").unwrap();
        client.wishlist().list().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("token=null"));
        assert_eq!(requests[1].url.query(), Some("token=fresh"));
    }

    #[tokio::test]
    async fn test_form_login_omits_missing_field() {
        let (server, client) = setup(None).await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(json!({"username": "a"})))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "detail": [{"loc": ["body", "password"], "msg": "Field required"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let form = LoginInput::FormEncoded("username=a".to_string());
        let err = client.auth().login(form).await.unwrap_err();
        assert_eq!(err.to_string(), "password: Field required");
    }

    #[tokio::test]
    async fn test_form_login_repeated_field_keeps_last_value() {
        let (server, client) = setup(None).await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(json!({"username": "c", "password": "b"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})))
            .expect(1)
            .mount(&server)
            .await;

        let form = LoginInput::FormEncoded("username=a&username=c&password=b".to_string());
        client.auth().login(form).await.unwrap();
    }
}

// =============================================================================
// Query-token routes
// =============================================================================

mod query_token {
    use super::*;

    async fn mount_query_route(server: &MockServer, verb: &str, route: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .and(query_param("token", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn assert_no_auth_header(server: &MockServer) {
        let request = single_request(server).await;
        assert!(request.headers.get("authorization").is_none());
        assert_eq!(request.url.query(), Some("token=tok"));
    }

    #[tokio::test]
    async fn test_update_item_sends_query_token() {
        let (server, client) = setup(Some("tok")).await;
        mount_query_route(&server, "PUT", "/api/items/6").await;

        let update = json!({"title": "Winter boots"});
        client.items().update(6, &update).await.unwrap();
        assert_no_auth_header(&server).await;
    }

    #[tokio::test]
    async fn test_delete_item_sends_query_token() {
        let (server, client) = setup(Some("tok")).await;
        mount_query_route(&server, "DELETE", "/api/items/6").await;

        client.items().delete(6).await.unwrap();
        assert_no_auth_header(&server).await;
    }

    #[tokio::test]
    async fn test_add_to_wishlist_sends_query_token() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("POST"))
            .and(path("/api/wishlist/"))
            .and(query_param("token", "tok"))
            .and(body_json(json!({"item_id": 6})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item_id": 6})))
            .expect(1)
            .mount(&server)
            .await;

        client.wishlist().add(6).await.unwrap();
        assert_no_auth_header(&server).await;
    }

    #[tokio::test]
    async fn test_delete_transaction_sends_query_token() {
        let (server, client) = setup(Some("tok")).await;
        mount_query_route(&server, "DELETE", "/api/transactions/8").await;

        client.transactions().delete(8).await.unwrap();
        assert_no_auth_header(&server).await;
    }

    #[tokio::test]
    async fn test_item_detail_uses_header_not_query() {
        let (server, client) = setup(Some("tok")).await;
        Mock::given(method("GET"))
            .and(path("/api/items/6"))
            .and(header("authorization", "Bearer tok"))
            .and(query_param_is_missing("token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item_id": 6})))
            .expect(1)
            .mount(&server)
            .await;

        client.items().get(6).await.unwrap();
    }
}

//! Wire-level checks of the reqwest transport and both API clients against a
//! mock HTTP server.

use ironsim::types::NodeSpec;
use ironsim::{
    BaremetalClient, ChassisArgs, Config, CredentialArgs, Error, Harness, HttpTransport, ResourceKind,
    ServiceConfig, StaticAuth,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(url: &str, catalog_type: &str) -> ServiceConfig {
    ServiceConfig {
        url: url.to_string(),
        catalog_type: catalog_type.to_string(),
        endpoint_type: "publicURL".to_string(),
        api_version: "1".to_string(),
    }
}

fn harness(server: &MockServer) -> Harness {
    Harness::from_config(Config {
        baremetal: service(&server.uri(), "baremetal"),
        identity: Some(service(&format!("{}/v2.0", server.uri()), "identity")),
        auth_token: Some("token".to_string()),
    })
    .unwrap()
}

#[tokio::test]
async fn list_chassis_sends_token_and_decodes_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/chassis"))
        .and(header("X-Auth-Token", "token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chassis": [
                {"uuid": "c1", "description": "d1", "links": []},
                {"uuid": "c2", "description": "d2", "links": []}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = harness(&server).context();
    let response = ctx.client().list_chassis().await.unwrap();

    assert_eq!(response.status, 200);
    let uuids: Vec<_> = response.body.iter().filter_map(|c| c.uuid.as_deref()).collect();
    assert_eq!(uuids, vec!["c1", "c2"]);
}

#[tokio::test]
async fn create_node_posts_defaults_and_registers_uuid() {
    let server = MockServer::start().await;
    let node = json!({
        "properties": {"cpu_arch": "x86_64", "cpu_num": 8, "storage": 1024, "memory": 4096}
    });
    let mut created = node.clone();
    created["uuid"] = json!("n1");

    Mock::given(method("POST"))
        .and(path("/v1/nodes"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&node))
        .respond_with(ResponseTemplate::new(200).set_body_json(&created))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/nodes/n1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = harness(&server).context();
    let response = ctx.create_node(NodeSpec::default()).await.unwrap();

    assert_eq!(response.body.uuid.as_deref(), Some("n1"));
    assert!(ctx.created().contains(ResourceKind::Node, "n1"));

    ctx.teardown().await.unwrap();
}

#[tokio::test]
async fn update_port_sends_replace_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/ports/p1"))
        .and(body_json(json!([
            {"path": "/address", "value": "fa:16:3e:00:00:01", "op": "replace"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "p1",
            "address": "fa:16:3e:00:00:01"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = harness(&server).context();
    let changes = json!({"address": "fa:16:3e:00:00:01", "extra": {"foo": "bar"}});
    let port = ctx
        .client()
        .update_port("p1", changes.as_object().unwrap())
        .await
        .unwrap()
        .body;

    assert_eq!(port.address.as_deref(), Some("fa:16:3e:00:00:01"));
}

#[tokio::test]
async fn unexpected_creation_status_is_an_error_unless_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chassis"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error_message": "{\"faultstring\": \"Not Found\"}"
        })))
        .mount(&server)
        .await;

    let mut ctx = harness(&server).context();
    let err = ctx.create_chassis(ChassisArgs::default()).await.unwrap_err();
    match err {
        Error::UnexpectedResponseCode { expected, received } => {
            assert_eq!(expected, "200");
            assert_eq!(received, "404");
        }
        other => panic!("unexpected error {other:?}"),
    }

    let tolerated = ctx
        .create_chassis(ChassisArgs {
            description: Some("d1".to_string()),
            expect_errors: true,
        })
        .await
        .unwrap();
    assert_eq!(tolerated.status, 404);
    assert!(tolerated.body.uuid.is_none());
    assert!(ctx.created().is_empty());
}

#[tokio::test]
async fn credentials_use_v3_root_and_decode_blob() {
    let server = MockServer::start().await;
    let stored = json!({
        "credential": {
            "id": "cred1",
            "blob": "{\"access\": \"AK\", \"secret\": \"SK\"}",
            "project_id": "p1",
            "type": "ec2",
            "user_id": "u1"
        }
    });

    Mock::given(method("POST"))
        .and(path("/v3/credentials"))
        .and(body_json(json!({
            "credential": {
                "blob": "{\"access\":\"AK\",\"secret\":\"SK\"}",
                "project_id": "p1",
                "type": "ec2",
                "user_id": "u1"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&stored))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/credentials/cred1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/credentials/cred1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = harness(&server).context();
    let created = ctx
        .create_credential(CredentialArgs {
            access_key: "AK".to_string(),
            secret_key: "SK".to_string(),
            user_id: "u1".to_string(),
            project_id: "p1".to_string(),
            expect_errors: false,
        })
        .await
        .unwrap();
    assert_eq!(created.status, 201);

    let fetched = ctx
        .credentials_client()
        .unwrap()
        .show_credential("cred1")
        .await
        .unwrap()
        .body;
    assert_eq!(
        serde_json::to_value(&fetched.blob).unwrap(),
        json!({"access": "AK", "secret": "SK"})
    );

    ctx.teardown().await.unwrap();
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let ctx = harness(&server).context();
    assert!(matches!(ctx.client().list_nodes().await, Err(Error::Decode(_))));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let transport = HttpTransport::new(
        service("http://127.0.0.1:1", "baremetal"),
        Arc::new(StaticAuth::default()),
    );
    let client = BaremetalClient::new(Arc::new(transport), "1");

    assert!(matches!(client.list_ports().await, Err(Error::Transport(_))));
}

#[tokio::test]
async fn teardown_reports_every_failed_delete() {
    let server = MockServer::start().await;
    for (uuid, description) in [("c1", "d1"), ("c2", "d2")] {
        Mock::given(method("POST"))
            .and(path("/v1/chassis"))
            .and(body_json(json!({"description": description})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uuid": uuid,
                "description": description
            })))
            .mount(&server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/v1/chassis/c1"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/chassis/c2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = harness(&server).context();
    for description in ["d1", "d2"] {
        ctx.create_chassis(ChassisArgs {
            description: Some(description.to_string()),
            expect_errors: false,
        })
        .await
        .unwrap();
    }

    match ctx.teardown().await {
        Err(Error::Cleanup(failures)) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].id, "c1");
            assert_eq!(failures[0].reason, "unexpected status 409");
        }
        other => panic!("expected cleanup failure, got {other:?}"),
    }
    assert!(ctx.created().is_empty());
    ctx.teardown().await.unwrap();
}

#[tokio::test]
async fn credential_faults_reach_the_response_code_check() {
    let server = MockServer::start().await;
    let fault = json!({
        "error": {"code": 400, "message": "Invalid input for field 'blob'.", "title": "Bad Request"}
    });
    Mock::given(method("POST"))
        .and(path("/v3/credentials"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&fault))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/credentials/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "Could not find credential: missing.", "title": "Not Found"}
        })))
        .mount(&server)
        .await;

    let mut ctx = harness(&server).context();
    let args = CredentialArgs {
        access_key: "AK".to_string(),
        secret_key: "SK".to_string(),
        user_id: "u1".to_string(),
        project_id: "p1".to_string(),
        expect_errors: true,
    };

    let tolerated = ctx.create_credential(args.clone()).await.unwrap();
    assert_eq!(tolerated.status, 400);
    assert!(tolerated.body.id.is_none());
    assert_eq!(tolerated.body.extra["error"]["title"], "Bad Request");

    let err = ctx
        .create_credential(CredentialArgs {
            expect_errors: false,
            ..args
        })
        .await
        .unwrap_err();
    match err {
        Error::UnexpectedResponseCode { expected, received } => {
            assert_eq!(expected, "201");
            assert_eq!(received, "400");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(ctx.created().is_empty());

    let missing = ctx
        .credentials_client()
        .unwrap()
        .show_credential("missing")
        .await
        .unwrap();
    assert_eq!(missing.status, 404);
    assert!(missing.body.id.is_none());
}

//! Application operation tests.
//!
//! Uses wiremock to mock the Cloud Controller and test single-object
//! fetches, nested hydration, follow-up fetches via the attached client,
//! and the one-shot sub-resource endpoints.

use cfapi::{
    get_app_env, get_app_instances, get_app_stats, kill_app_instance, App, CfClient, CfError, Get,
};
use chrono::{TimeZone, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_with_space() -> serde_json::Value {
    serde_json::json!({
        "metadata": {
            "guid": "app-guid-1",
            "url": "/v2/apps/app-guid-1",
            "created_at": "2016-06-08T16:41:45Z",
            "updated_at": "2017-01-01 12:00:00 +0000"
        },
        "entity": {
            "name": "dora",
            "memory": 1024,
            "instances": 2,
            "state": "STARTED",
            "space_guid": "space-guid-1",
            "space_url": "/v2/spaces/space-guid-1",
            "space": {
                "metadata": {"guid": "space-guid-1"},
                "entity": {
                    "name": "dev",
                    "organization_guid": "org-guid-1",
                    "organization_url": "/v2/organizations/org-guid-1",
                    "organization": {
                        "metadata": {"guid": "org-guid-1"},
                        "entity": {"name": "acme"}
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn test_get_app_promotes_nested_guids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-guid-1"))
        .and(query_param("inline-relations-depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(app_with_space()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let app = App::get(&client, "app-guid-1".to_string()).await.unwrap();

    assert_eq!(app.guid, "app-guid-1");
    assert_eq!(
        app.created_at,
        Some(Utc.with_ymd_and_hms(2016, 6, 8, 16, 41, 45).unwrap())
    );
    // The metadata section used a legacy date format for updated_at.
    assert_eq!(
        app.updated_at,
        Some(Utc.with_ymd_and_hms(2017, 1, 1, 12, 0, 0).unwrap())
    );

    let space = app.embedded_space().unwrap();
    assert_eq!(space.guid, "space-guid-1");
    assert_eq!(space.embedded_organization().unwrap().guid, "org-guid-1");
}

#[tokio::test]
async fn test_app_space_follow_up_uses_space_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-guid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(app_with_space()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/spaces/space-guid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": {"guid": "space-guid-1"},
            "entity": {"name": "dev", "organization_guid": "org-guid-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let app = App::get(&client, "app-guid-1".to_string()).await.unwrap();

    let space = app.space().await.unwrap();
    assert_eq!(space.guid, "space-guid-1");
    assert_eq!(space.name, "dev");
}

#[tokio::test]
async fn test_space_organization_follow_up() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-guid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(app_with_space()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/spaces/space-guid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": {"guid": "space-guid-1"},
            "entity": {
                "name": "dev",
                "organization_guid": "org-guid-1",
                "organization_url": "/v2/organizations/org-guid-1"
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations/org-guid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": {"guid": "org-guid-1"},
            "entity": {"name": "acme"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let app = App::get(&client, "app-guid-1".to_string()).await.unwrap();
    let space = app.space().await.unwrap();
    let org = space.organization().await.unwrap();

    assert_eq!(org.guid, "org-guid-1");
    assert_eq!(org.name, "acme");
}

#[tokio::test]
async fn test_by_name_returns_first_match() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "total_results": 1,
        "total_pages": 1,
        "next_url": "",
        "resources": [{
            "metadata": {"guid": "app-guid-1"},
            "entity": {"name": "dora", "space_guid": "space-guid-1"}
        }]
    });

    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .and(query_param("q", "name:dora"))
        .and(query_param("q", "space_guid:space-guid-1"))
        .and(query_param("q", "organization_guid:org-guid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let app = App::by_name(&client, "dora", "space-guid-1", "org-guid-1")
        .await
        .unwrap();

    assert_eq!(app.guid, "app-guid-1");
}

#[tokio::test]
async fn test_by_name_not_found() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "total_results": 0,
        "total_pages": 0,
        "next_url": "",
        "resources": []
    });

    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let err = App::by_name(&client, "ghost", "space-guid-1", "org-guid-1")
        .await
        .unwrap_err();

    assert!(matches!(err, CfError::NotFound { entity_type: "app", .. }));
    assert!(err.to_string().contains("ghost"));
}

#[tokio::test]
async fn test_get_app_instances_decodes_epoch_since() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-guid-1/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "0": {"state": "RUNNING", "since": 1600000000},
            "1": {"state": "CRASHED", "since": 1600000100.5}
        })))
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let instances = get_app_instances(&client, "app-guid-1").await.unwrap();

    assert_eq!(instances.len(), 2);
    assert_eq!(instances["0"].state, "RUNNING");
    assert_eq!(
        instances["0"].since.0,
        Utc.with_ymd_and_hms(2020, 9, 13, 12, 26, 40).unwrap()
    );
    // Sub-second precision is not preserved by the wire format.
    assert_eq!(
        instances["1"].since.0,
        Utc.with_ymd_and_hms(2020, 9, 13, 12, 28, 20).unwrap()
    );
}

#[tokio::test]
async fn test_get_app_stats_decodes_usage_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-guid-1/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "0": {
                "state": "RUNNING",
                "stats": {
                    "name": "dora",
                    "uris": ["dora.example.com"],
                    "usage": {
                        "time": "2015-07-01 10:00:00 -0700",
                        "cpu": 0.1,
                        "mem": 65536,
                        "disk": 131072
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let stats = get_app_stats(&client, "app-guid-1").await.unwrap();

    let usage = &stats["0"].stats.usage;
    assert_eq!(
        usage.time.map(Into::into),
        Some(Utc.with_ymd_and_hms(2015, 7, 1, 17, 0, 0).unwrap())
    );
    assert_eq!(usage.mem, 65536);
}

#[tokio::test]
async fn test_get_app_env() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-guid-1/env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "environment_json": {"RAILS_ENV": "production"},
            "system_env_json": {"VCAP_SERVICES": {}}
        })))
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let env = get_app_env(&client, "app-guid-1").await.unwrap();

    assert_eq!(env.environment["RAILS_ENV"], "production");
    assert!(env.system_env.contains_key("VCAP_SERVICES"));
    assert!(env.staging_env.is_empty());
}

#[tokio::test]
async fn test_kill_app_instance() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/apps/app-guid-1/instances/0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    kill_app_instance(&client, "app-guid-1", 0).await.unwrap();
}

#[tokio::test]
async fn test_kill_app_instance_failure() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/apps/app-guid-1/instances/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "description": "Instance not found",
            "error_code": "CF-InstanceNotFound"
        })))
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let err = kill_app_instance(&client, "app-guid-1", 7).await.unwrap_err();

    match err {
        CfError::ApiError {
            message,
            status_code,
        } => {
            assert_eq!(status_code, Some(404));
            assert_eq!(message, "Instance not found");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_app_routes_follow_up() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-guid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(app_with_space()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-guid-1/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_results": 1,
            "total_pages": 1,
            "next_url": "",
            "resources": [{
                "metadata": {"guid": "route-guid-1"},
                "entity": {"host": "dora", "domain_guid": "domain-guid-1"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let app = App::get(&client, "app-guid-1".to_string()).await.unwrap();
    let routes = app.routes().await.unwrap();

    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].guid, "route-guid-1");
    assert_eq!(routes[0].host, "dora");
}

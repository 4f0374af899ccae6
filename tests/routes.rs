//! Route operation tests.
//!
//! Uses wiremock to mock the Cloud Controller and test route listing,
//! creation, and mapping.

use cfapi::{
    list_apps_for_route, map_route, CfClient, Create, List, Route, RouteListQuery,
    RouteMappingRequest, RouteRequest,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn route_resource(guid: &str, host: &str) -> serde_json::Value {
    serde_json::json!({
        "metadata": {
            "guid": guid,
            "url": format!("/v2/routes/{guid}"),
            "created_at": "2016-06-08T16:41:45Z"
        },
        "entity": {
            "host": host,
            "path": "",
            "domain_guid": "domain-guid-1",
            "space_guid": "space-guid-1"
        }
    })
}

#[tokio::test]
async fn test_list_routes_promotes_guid() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "total_results": 2,
        "total_pages": 1,
        "next_url": "",
        "resources": [
            route_resource("route-guid-1", "dora"),
            route_resource("route-guid-2", "sinatra")
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let routes = Route::list_all(&client, &RouteListQuery::default())
        .await
        .unwrap();

    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].guid, "route-guid-1");
    assert_eq!(routes[1].host, "sinatra");
}

#[tokio::test]
async fn test_list_routes_with_filter() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "total_results": 1,
        "total_pages": 1,
        "next_url": "",
        "resources": [route_resource("route-guid-1", "dora")]
    });

    Mock::given(method("GET"))
        .and(path("/v2/routes"))
        .and(query_param("q", "host:dora"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let query = RouteListQuery::default().filter("host:dora");
    let routes = Route::list_all(&client, &query).await.unwrap();

    assert_eq!(routes.len(), 1);
}

#[tokio::test]
async fn test_create_http_route() {
    let server = MockServer::start().await;

    let request = RouteRequest {
        domain_guid: "domain-guid-1".to_string(),
        space_guid: "space-guid-1".to_string(),
        host: Some("dora".to_string()),
    };

    Mock::given(method("POST"))
        .and(path("/v2/routes"))
        .and(body_json(serde_json::json!({
            "domain_guid": "domain-guid-1",
            "space_guid": "space-guid-1",
            "host": "dora"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(route_resource("route-guid-1", "dora")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let route = Route::create(&client, request).await.unwrap();

    // The response envelope's guid is promoted onto the created route.
    assert_eq!(route.guid, "route-guid-1");
    assert_eq!(route.host, "dora");
}

#[tokio::test]
async fn test_create_tcp_route_requests_generated_port() {
    let server = MockServer::start().await;

    let mut resource = route_resource("route-guid-9", "");
    resource["entity"]["port"] = serde_json::json!(61001);

    Mock::given(method("POST"))
        .and(path("/v2/routes"))
        .and(query_param("generate_port", "true"))
        .respond_with(ResponseTemplate::new(201).set_body_json(resource))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let request = RouteRequest {
        domain_guid: "tcp-domain-guid".to_string(),
        space_guid: "space-guid-1".to_string(),
        host: None,
    };
    let route = Route::create_tcp(&client, request).await.unwrap();

    assert_eq!(route.guid, "route-guid-9");
    assert_eq!(route.port, Some(61001));
}

#[tokio::test]
async fn test_map_route() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/route_mappings"))
        .and(body_json(serde_json::json!({
            "app_guid": "app-guid-1",
            "route_guid": "route-guid-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "metadata": {
                "guid": "mapping-guid-1",
                "url": "/v2/route_mappings/mapping-guid-1",
                "created_at": "2016-06-08T16:41:45Z"
            },
            "entity": {"app_port": 8080}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let mapping = RouteMappingRequest {
        app_guid: "app-guid-1".to_string(),
        route_guid: "route-guid-1".to_string(),
    };
    let mapped = map_route(&client, &mapping).await.unwrap();

    assert_eq!(mapped.metadata.guid, "mapping-guid-1");
    assert_eq!(mapped.entity.app_port, Some(8080));
}

#[tokio::test]
async fn test_route_apps_follow_up() {
    let server = MockServer::start().await;

    let routes_body = serde_json::json!({
        "total_results": 1,
        "total_pages": 1,
        "next_url": "",
        "resources": [route_resource("route-guid-1", "dora")]
    });

    Mock::given(method("GET"))
        .and(path("/v2/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(routes_body))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/routes/route-guid-1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_results": 1,
            "total_pages": 1,
            "next_url": "",
            "resources": [{
                "metadata": {"guid": "app-guid-1"},
                "entity": {"name": "dora", "state": "STARTED"}
            }]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = CfClient::new("test-token", &server.uri()).unwrap();
    let routes = Route::list_all(&client, &RouteListQuery::default())
        .await
        .unwrap();
    let apps = routes[0].apps().await.unwrap();

    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].guid, "app-guid-1");

    // The free function takes the same path.
    let apps = list_apps_for_route(&client, "route-guid-1").await.unwrap();
    assert_eq!(apps.len(), 1);
}

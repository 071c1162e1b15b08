//! End-to-end tests of the client against a wiremock control plane

mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rustack::{Arguments, DnsRecord, Error};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A task that reports `running` once, after which its job record is gone.
async fn mount_finished_job(server: &MockServer, task_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/job/{}", task_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "name": "provision"
        })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/job/{}", task_id)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .with_priority(2)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_sends_auth_and_language_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account/me"))
        .and(header("Authorization", format!("Bearer {}", common::TEST_TOKEN).as_str()))
        .and(header("Accept-Language", "ru-ru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "acc-1",
            "email": "ops@example.com",
            "username": "ops"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = common::client_for(&server).accounts().me().await.unwrap();

    assert_eq!(account.id, "acc-1");
    assert_eq!(account.email, "ops@example.com");
    server.verify().await;
}

#[tokio::test]
async fn test_list_walks_pages_and_keeps_filters() {
    let server = MockServer::start().await;

    let bodies = [
        json!([{"id": "vm-1", "name": "a"}, {"id": "vm-2", "name": "b"}]),
        json!([{"id": "vm-3", "name": "c"}]),
        json!([]),
    ];
    for (idx, items) in bodies.into_iter().enumerate() {
        Mock::given(method("GET"))
            .and(path("/v1/vm"))
            .and(query_param("page", (idx + 1).to_string().as_str()))
            .and(query_param("vdc", "vdc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(common::page(items)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let vms = common::client_for(&server)
        .vms()
        .list_for_vdc("vdc-1", Arguments::defaults())
        .await
        .unwrap();

    let ids: Vec<_> = vms.iter().map(|vm| vm.id.as_str()).collect();
    assert_eq!(ids, vec!["vm-1", "vm-2", "vm-3"]);
    server.verify().await;
}

#[tokio::test]
async fn test_create_waits_for_every_returned_task() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/dns"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "example.com.", "project": "prj-1"})))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Esu-Tasks", "task-a, task-b")
                .set_body_json(json!({"id": "dns-1", "name": "example.com."})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_finished_job(&server, "task-a").await;
    mount_finished_job(&server, "task-b").await;

    let dns = common::client_for(&server)
        .dns()
        .create("prj-1", "example.com.")
        .await
        .unwrap();

    assert_eq!(dns.id, "dns-1");
    let requests = server.received_requests().await.unwrap();
    let polled: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path().starts_with("/v1/job/"))
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        polled,
        vec!["/v1/job/task-a", "/v1/job/task-a", "/v1/job/task-b", "/v1/job/task-b"]
    );
}

#[tokio::test]
async fn test_failed_task_surfaces_its_step() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/vm/vm-1"))
        .respond_with(ResponseTemplate::new(204).insert_header("X-Esu-Tasks", "task-x"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/job/task-x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "name": "detach_disks"
        })))
        .mount(&server)
        .await;

    let err = common::client_for(&server).vms().delete("vm-1").await.unwrap_err();

    assert_matches!(err, Error::TaskFailed { task_id, step } => {
        assert_eq!(task_id, "task-x");
        assert_eq!(step, "detach_disks");
    });
}

#[tokio::test]
async fn test_mx_record_payload_carries_priority_only() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/dns/dns-1/record"))
        .and(body_json(json!({
            "data": "mail.example.com.",
            "flag": 0,
            "host": "@",
            "port": null,
            "priority": 10,
            "tag": null,
            "ttl": 3600,
            "type": "MX",
            "weight": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "rec-1",
            "type": "MX",
            "host": "@",
            "data": "mail.example.com.",
            "priority": 10,
            "ttl": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut record = DnsRecord::new("MX", "@", "mail.example.com.", 3600);
    record.priority = 10;
    record.weight = 5;

    let created = common::client_for(&server)
        .dns_records("dns-1")
        .create(&record)
        .await
        .unwrap();

    assert_eq!(created.id, "rec-1");
    assert_eq!(created.dns_id, "dns-1");
    server.verify().await;
}

#[tokio::test]
async fn test_locked_resource_is_retried_until_it_clears() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/vm/vm-1/state"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error_alias": ["locked"],
            "non_field_errors": ["Object is locked"]
        })))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/vm/vm-1/state"))
        .and(body_json(json!({"state": "power_on"})))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(2)
        .mount(&server)
        .await;

    common::client_for(&server).vms().power_on("vm-1").await.unwrap();

    let attempts = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/v1/vm/vm-1/state")
        .count();
    assert_eq!(attempts, 3);
}

#[tokio::test]
async fn test_protected_object_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/project/prj-1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error_alias": "object_protected",
            "non_field_errors": ["Project is protected"],
            "details": {"reason": "billing"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = common::client_for(&server)
        .projects()
        .delete("prj-1")
        .await
        .unwrap_err();

    assert_matches!(err, Error::PermanentLock { aliases, .. } => {
        assert_eq!(aliases, vec!["object_protected".to_string()]);
    });
    server.verify().await;
}

#[tokio::test]
async fn test_not_found_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kubernetes/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = common::client_for(&server)
        .kubernetes()
        .get("missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_find_floating_by_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/port"))
        .and(query_param("page", "1"))
        .and(query_param("filter_type", "external"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(json!([
            {"id": "fip-1", "ip_address": "198.51.100.7"},
            {"id": "fip-2", "ip_address": "198.51.100.8"}
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/port"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(json!([]))))
        .mount(&server)
        .await;

    let floatings = common::client_for(&server).floatings();

    let found = floatings.find_by_address("vdc-1", "198.51.100.8").await.unwrap();
    assert_eq!(found.id, "fip-2");

    let err = floatings
        .find_by_address("vdc-1", "203.0.113.1")
        .await
        .unwrap_err();
    assert_matches!(err, Error::NotFound(_));
}

#[tokio::test]
async fn test_delete_pools_removes_each_pool() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/lbaas/lb-1/pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "pool-1", "port": 80},
            {"id": "pool-2", "port": 443}
        ])))
        .mount(&server)
        .await;
    for pool in ["pool-1", "pool-2"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/v1/lbaas/lb-1/pool/{}", pool)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    common::client_for(&server)
        .load_balancers()
        .delete_pools("lb-1")
        .await
        .unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_s3_update_waits_until_unlocked() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/s3_storage/s3-1"))
        .and(body_json(json!({"name": "renamed", "tags": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "s3-1",
            "name": "renamed",
            "locked": true
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/s3_storage/s3-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"locked": true})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/s3_storage/s3-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"locked": false})))
        .with_priority(2)
        .mount(&server)
        .await;

    let storage = rustack::S3Storage {
        id: "s3-1".into(),
        name: "renamed".into(),
        ..Default::default()
    };
    let updated = common::client_for(&server)
        .s3_storages()
        .update(&storage)
        .await
        .unwrap();

    assert_eq!(updated.name, "renamed");
    let checks = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(checks, 2);
}

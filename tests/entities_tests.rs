use chrono::{Duration, TimeZone, Utc};
use worklink::slack::entities::{
    DOCUMENT_PRODUCT_NAME, PREVIEW_IMAGE_URL, TASK_PRODUCT_NAME, document_detail_payload,
    document_unfurl_entity, task_detail_payload, task_unfurl_entity,
};

#[test]
fn task_unfurl_entity_shape() {
    let entity = task_unfurl_entity("https://example.com/task/1042", "1042");

    assert_eq!(entity["app_unfurl_url"], "https://example.com/task/1042");
    assert_eq!(entity["url"], "https://example.com/task/1042");
    assert_eq!(entity["entity_type"], "slack#/entities/task");
    assert_eq!(entity["external_ref"]["id"], "1042");
    assert_eq!(entity["external_ref"]["type"], "task");

    let payload = &entity["entity_payload"];
    assert_eq!(payload["attributes"]["title"]["text"], "Task #1042");
    assert_eq!(payload["attributes"]["display_id"], "1042");
    assert_eq!(payload["attributes"]["display_type"], "Task");
    assert_eq!(payload["attributes"]["product_name"], TASK_PRODUCT_NAME);
    assert_eq!(payload["fields"]["status"]["value"], "open");
    assert_eq!(payload["fields"]["priority"]["value"], "Hot");
    assert_eq!(payload["display_order"][0], "status");
}

#[test]
fn document_unfurl_entity_includes_owner_when_known() {
    let entity = document_unfurl_entity("https://example.com/file/spec", "spec", Some("U123"));

    assert_eq!(entity["entity_type"], "slack#/entities/file");
    assert_eq!(entity["external_ref"]["type"], "document");

    let payload = &entity["entity_payload"];
    assert_eq!(payload["attributes"]["title"]["text"], "Document spec");
    assert_eq!(payload["attributes"]["product_name"], DOCUMENT_PRODUCT_NAME);
    assert_eq!(payload["fields"]["preview"]["image_url"], PREVIEW_IMAGE_URL);
    assert_eq!(payload["fields"]["file_type"]["value"], "PDF");
    assert_eq!(payload["fields"]["size"]["value"], "2.5 MB");
    assert_eq!(payload["fields"]["owner"]["user"]["user_id"], "U123");

    let order = payload["display_order"].as_array().expect("display order");
    assert_eq!(order.len(), 4);
}

#[test]
fn document_unfurl_entity_omits_owner_when_unknown() {
    let entity = document_unfurl_entity("https://example.com/file/spec", "spec", None);
    assert!(entity["entity_payload"]["fields"]["owner"].is_null());
}

#[test]
fn task_detail_due_date_is_one_week_out() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let payload = task_detail_payload("77", Some("U42"), now);

    assert_eq!(payload["attributes"]["title"]["text"], "Task #77 - Detail View");
    assert_eq!(
        payload["fields"]["due_date"]["value"],
        serde_json::json!((now + Duration::days(7)).timestamp())
    );
    assert_eq!(payload["fields"]["status"]["value"], "in_progress");
    assert_eq!(payload["fields"]["status"]["tag_color"], "yellow");
    assert_eq!(payload["fields"]["priority"]["tag_color"], "red");
    assert_eq!(payload["fields"]["assignee"]["user"]["user_id"], "U42");
    assert_eq!(payload["fields"]["description"]["edit"]["enabled"], true);
    assert_eq!(
        payload["fields"]["description"]["edit"]["text"]["max_length"],
        500
    );
}

#[test]
fn task_detail_without_user_shows_unassigned() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let payload = task_detail_payload("77", None, now);
    assert_eq!(payload["fields"]["assignee"]["user"]["text"], "Unassigned");
}

#[test]
fn task_detail_actions() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let payload = task_detail_payload("77", None, now);

    assert_eq!(
        payload["actions"]["primary_actions"][0]["action_id"],
        "complete_task"
    );
    assert_eq!(
        payload["actions"]["overflow_actions"][0]["action_id"],
        "edit_task"
    );
    assert_eq!(
        payload["actions"]["overflow_actions"][1]["action_id"],
        "delete_task"
    );
}

#[test]
fn document_detail_shape() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let payload = document_detail_payload("spec", Some("U9"), now);

    assert_eq!(
        payload["attributes"]["title"]["text"],
        "Document spec - Detail View"
    );
    assert_eq!(payload["custom_fields"][0]["key"], "version");
    assert_eq!(payload["custom_fields"][0]["value"], "1.0");
    assert_eq!(payload["fields"]["modified"]["value"], "2026-03-01 12:00:00 UTC");
    assert_eq!(
        payload["actions"]["primary_actions"][0]["action_id"],
        "download_file"
    );
    assert_eq!(
        payload["actions"]["overflow_actions"][0]["action_id"],
        "share_file"
    );
}

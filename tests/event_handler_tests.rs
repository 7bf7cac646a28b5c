use serde_json::json;
use worklink::events::event_handler::entities_for_links;

#[test]
fn builds_entities_for_recognized_links_only() {
    let event = json!({
        "type": "link_shared",
        "channel": "C123",
        "message_ts": "1730000000.000100",
        "user": "U777",
        "links": [
            { "domain": "example.com", "url": "https://example.com/task/1042" },
            { "domain": "example.com", "url": "https://example.com/file/report" },
            { "domain": "other.com", "url": "https://other.com/task/9" }
        ]
    });

    let entities = entities_for_links(&event);
    assert_eq!(entities.len(), 2);

    assert_eq!(entities[0]["entity_type"], "slack#/entities/task");
    assert_eq!(entities[0]["external_ref"]["id"], "1042");

    assert_eq!(entities[1]["entity_type"], "slack#/entities/file");
    assert_eq!(entities[1]["external_ref"]["id"], "report");
    // The sharing user becomes the document owner
    assert_eq!(
        entities[1]["entity_payload"]["fields"]["owner"]["user"]["user_id"],
        "U777"
    );
}

#[test]
fn no_entities_for_event_without_links() {
    let event = json!({
        "type": "link_shared",
        "channel": "C123",
        "message_ts": "1730000000.000100"
    });

    assert!(entities_for_links(&event).is_empty());
}

#[test]
fn document_owner_omitted_when_user_missing() {
    let event = json!({
        "type": "link_shared",
        "channel": "C123",
        "message_ts": "1730000000.000100",
        "links": [
            { "url": "https://example.com/file/report" }
        ]
    });

    let entities = entities_for_links(&event);
    assert_eq!(entities.len(), 1);
    assert!(entities[0]["entity_payload"]["fields"]["owner"].is_null());
}

#[test]
fn links_without_urls_are_skipped() {
    let event = json!({
        "type": "link_shared",
        "channel": "C123",
        "message_ts": "1730000000.000100",
        "links": [ { "domain": "example.com" } ]
    });

    assert!(entities_for_links(&event).is_empty());
}

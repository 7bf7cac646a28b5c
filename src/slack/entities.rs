//! Sample work-object payload builders.
//!
//! Every payload here is hardcoded demo content parameterised only by the
//! identifier extracted from the shared URL and the interacting user. The
//! unfurl builders feed `chat.unfurl` metadata; the detail builders feed
//! `entity.presentDetails` for the flexpane view.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

pub const TASK_PRODUCT_NAME: &str = "Sample Task Manager";
pub const DOCUMENT_PRODUCT_NAME: &str = "Sample Document Manager";

/// Preview thumbnail shown on document entities.
pub const PREVIEW_IMAGE_URL: &str =
    "https://media.connpass.com/thumbs/59/40/5940cfd8a5040dc8ce6c7d10ddd24ee9.png";

/// Build the unfurl entity for a shared task link.
#[must_use]
pub fn task_unfurl_entity(url: &str, task_id: &str) -> Value {
    json!({
        "app_unfurl_url": url,
        "url": url,
        "external_ref": {
            "id": task_id,
            "type": "task",
        },
        "entity_type": "slack#/entities/task",
        "entity_payload": {
            "attributes": {
                "title": {
                    "text": format!("Task #{task_id}"),
                },
                "display_id": task_id,
                "display_type": "Task",
                "product_name": TASK_PRODUCT_NAME,
            },
            "fields": {
                "status": {
                    "value": "open",
                    "label": "Status",
                },
                "priority": {
                    "value": "Hot",
                    "label": "Priority",
                },
            },
            "display_order": ["status"],
        },
    })
}

/// Build the unfurl entity for a shared document link.
///
/// The owner field is attached only when the sharing user is known.
#[must_use]
pub fn document_unfurl_entity(url: &str, file_id: &str, owner: Option<&str>) -> Value {
    let mut fields = json!({
        "preview": {
            "type": "slack#/types/image",
            "alt_text": format!("Document {file_id} preview image"),
            "image_url": PREVIEW_IMAGE_URL,
        },
        "file_type": {
            "value": "PDF",
            "label": "File type",
        },
        "size": {
            "value": "2.5 MB",
            "label": "Size",
        },
    });

    if let Some(user_id) = owner {
        fields["owner"] = json!({
            "type": "slack#/types/user",
            "label": "Owner",
            "user": {
                "user_id": user_id,
            },
        });
    }

    json!({
        "app_unfurl_url": url,
        "url": url,
        "external_ref": {
            "id": file_id,
            "type": "document",
        },
        "entity_type": "slack#/entities/file",
        "entity_payload": {
            "attributes": {
                "title": {
                    "text": format!("Document {file_id}"),
                },
                "display_id": file_id,
                "product_name": DOCUMENT_PRODUCT_NAME,
            },
            "fields": fields,
            "display_order": ["preview", "file_type", "owner", "size"],
        },
    })
}

/// Build the flexpane detail payload for a task entity.
///
/// The due date lands one week after `now`; `now` is injected so callers
/// (and tests) control the clock.
#[must_use]
pub fn task_detail_payload(task_id: &str, user_id: Option<&str>, now: DateTime<Utc>) -> Value {
    let assignee = match user_id {
        Some(uid) => json!({ "user_id": uid }),
        None => json!({ "text": "Unassigned" }),
    };
    let due_date = (now + Duration::days(7)).timestamp();

    json!({
        "attributes": {
            "title": {
                "text": format!("Task #{task_id} - Detail View"),
            },
            "display_id": task_id,
            "product_name": TASK_PRODUCT_NAME,
        },
        "fields": {
            "status": {
                "value": "in_progress",
                "label": "Status",
                "tag_color": "yellow",
            },
            "assignee": {
                "type": "slack#/types/user",
                "label": "Assignee",
                "user": assignee,
            },
            "priority": {
                "value": "high",
                "label": "Priority",
                "tag_color": "red",
            },
            "description": {
                "value": "This is a detailed description of the sample task, shown in the detail view.",
                "label": "Description",
                "edit": {
                    "enabled": true,
                    "text": {
                        "max_length": 500,
                    },
                },
            },
            "due_date": {
                "type": "slack#/types/timestamp",
                "label": "Due date",
                "value": due_date,
            },
        },
        "custom_fields": [
            {
                "key": "created_at",
                "label": "Created",
                "value": format_timestamp(now),
                "type": "string",
            },
            {
                "key": "project",
                "label": "Project",
                "value": "Sample Project",
                "type": "string",
            },
        ],
        "display_order": [
            "status",
            "priority",
            "assignee",
            "description",
            "due_date",
        ],
        "actions": {
            "primary_actions": [
                {
                    "action_id": "complete_task",
                    "text": "Complete task",
                },
            ],
            "overflow_actions": [
                {
                    "action_id": "edit_task",
                    "text": "Edit task",
                },
                {
                    "action_id": "delete_task",
                    "text": "Delete task",
                },
            ],
        },
    })
}

/// Build the flexpane detail payload for a document entity.
#[must_use]
pub fn document_detail_payload(file_id: &str, user_id: Option<&str>, now: DateTime<Utc>) -> Value {
    let mut fields = json!({
        "preview": {
            "type": "slack#/types/image",
            "alt_text": format!("Document {file_id} preview image"),
            "image_url": PREVIEW_IMAGE_URL,
        },
        "file_type": {
            "value": "PDF",
            "label": "File type",
        },
        "size": {
            "value": "2.5 MB",
            "label": "Size",
        },
        "modified": {
            "value": format_timestamp(now),
            "label": "Last modified",
        },
    });

    if let Some(uid) = user_id {
        fields["owner"] = json!({
            "type": "slack#/types/user",
            "label": "Owner",
            "user": {
                "user_id": uid,
            },
        });
    }

    json!({
        "attributes": {
            "title": {
                "text": format!("Document {file_id} - Detail View"),
            },
            "display_id": file_id,
            "product_name": DOCUMENT_PRODUCT_NAME,
        },
        "fields": fields,
        "custom_fields": [
            {
                "key": "version",
                "label": "Version",
                "value": "1.0",
                "type": "string",
            },
        ],
        "display_order": ["preview", "file_type", "owner", "size", "modified"],
        "actions": {
            "primary_actions": [
                {
                    "action_id": "download_file",
                    "text": "Download",
                },
            ],
            "overflow_actions": [
                {
                    "action_id": "share_file",
                    "text": "Share",
                },
            ],
        },
    })
}

fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

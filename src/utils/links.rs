use url::Url;

/// A shared URL that maps to one of the demo work-object families.
///
/// Task links look like `https://example.com/task/<id>` and document links
/// like `https://example.com/file/<id>`. The identifier is the last path
/// segment of the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedLink {
    Task { url: String, id: String },
    Document { url: String, id: String },
}

impl SharedLink {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            SharedLink::Task { url, .. } | SharedLink::Document { url, .. } => url,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            SharedLink::Task { id, .. } | SharedLink::Document { id, .. } => id,
        }
    }

    /// The `type` value used in `external_ref`.
    #[must_use]
    pub fn external_type(&self) -> &'static str {
        match self {
            SharedLink::Task { .. } => "task",
            SharedLink::Document { .. } => "document",
        }
    }

    /// The Slack entity type for this link family.
    #[must_use]
    pub fn entity_type(&self) -> &'static str {
        match self {
            SharedLink::Task { .. } => "slack#/entities/task",
            SharedLink::Document { .. } => "slack#/entities/file",
        }
    }
}

/// Classify a shared URL as a task link, a document link, or neither.
///
/// Only `example.com` (and its subdomains) qualifies, and the path must
/// start with a `task` or `file` segment followed by an identifier. Query
/// strings and fragments never leak into the identifier.
#[must_use]
pub fn classify_link(raw: &str) -> Option<SharedLink> {
    let parsed = Url::parse(raw).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }

    let host = parsed.host_str()?.to_ascii_lowercase();
    if host != "example.com" && !host.ends_with(".example.com") {
        return None;
    }

    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    let marker = *segments.first()?;
    if segments.len() < 2 {
        // Marker segment with nothing after it carries no identifier.
        return None;
    }

    let url = raw.to_string();
    let id = (*segments.last()?).to_string();

    match marker {
        "task" => Some(SharedLink::Task { url, id }),
        "file" => Some(SharedLink::Document { url, id }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_task_and_document_links() {
        let task = classify_link("https://example.com/task/T-1042").expect("task link");
        assert_eq!(task, SharedLink::Task {
            url: "https://example.com/task/T-1042".to_string(),
            id: "T-1042".to_string(),
        });

        let doc = classify_link("https://example.com/file/spec-v2").expect("document link");
        assert_eq!(doc.id(), "spec-v2");
        assert_eq!(doc.entity_type(), "slack#/entities/file");
    }

    #[test]
    fn ignores_other_hosts_and_paths() {
        assert_eq!(classify_link("https://other.com/task/123"), None);
        assert_eq!(classify_link("https://example.com/about"), None);
        assert_eq!(classify_link("not a url"), None);
    }

    #[test]
    fn identifier_excludes_query_and_trailing_slash() {
        let link = classify_link("https://example.com/task/123/?ref=share").expect("task link");
        assert_eq!(link.id(), "123");

        // A marker segment with no identifier after it is not a link we unfurl.
        assert_eq!(classify_link("https://example.com/task/"), None);
    }
}

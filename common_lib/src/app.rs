use serde::{Deserialize, Serialize};

/// An application the user has chosen to monitor, identified by its App
/// Store numeric id (kept as text). The name is absent until some
/// enrichment step supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedApp {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TrackedApp {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Label shown in selectors and headers: the store name when known,
    /// otherwise "App <id>".
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("App {}", self.id))
    }
}

/// Body of the app registration request, `{"appId": "<id>"}` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAppRequest {
    pub app_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&TrackedApp::new("595068606")).unwrap();
        assert_eq!(json, r#"{"id":"595068606"}"#);
    }

    #[test]
    fn missing_name_deserializes_to_none() {
        let app: TrackedApp = serde_json::from_str(r#"{"id":"42"}"#).unwrap();
        assert_eq!(app, TrackedApp::new("42"));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut app = TrackedApp::new("42");
        assert_eq!(app.display_name(), "App 42");
        app.name = Some("Dropbox".to_owned());
        assert_eq!(app.display_name(), "Dropbox");
    }

    #[test]
    fn add_request_uses_camel_case() {
        let json = serde_json::to_string(&AddAppRequest {
            app_id: "42".to_owned(),
        })
        .unwrap();
        assert_eq!(json, r#"{"appId":"42"}"#);
    }
}

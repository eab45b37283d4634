use serde::{Deserialize, Serialize};

/// A single customer review. Held in memory only for the lifetime of the
/// current selection, never persisted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub app_id: String,
    pub author: String,
    pub content: String,
    pub score: i32,
    /// Date-time text as sent by the backend; parsed (leniently) only when
    /// sorting and rendering.
    pub submitted_at: String,
}

/// Response of the recent-reviews endpoint. The backend may answer with an
/// empty object, so every field defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_decodes_to_empty_response() {
        let response: ReviewsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.reviews.is_empty());
    }

    #[test]
    fn review_fields_use_camel_case() {
        let review: Review = serde_json::from_str(
            r#"{
                "id": "r1",
                "appId": "42",
                "author": "Alice",
                "content": "Great app",
                "score": 5,
                "submittedAt": "2023-12-01T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(review.app_id, "42");
        assert_eq!(review.submitted_at, "2023-12-01T10:00:00Z");

        let json = serde_json::to_string(&review).unwrap();
        assert!(json.contains(r#""appId":"42""#));
        assert!(json.contains(r#""submittedAt":"2023-12-01T10:00:00Z""#));
    }

    #[test]
    fn response_round_trips() {
        let response = ReviewsResponse {
            reviews: vec![Review {
                id: "r1".to_owned(),
                app_id: "42".to_owned(),
                author: "Bob".to_owned(),
                content: String::new(),
                score: 3,
                submitted_at: "2023-12-01".to_owned(),
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        let decoded: ReviewsResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, response);
    }
}

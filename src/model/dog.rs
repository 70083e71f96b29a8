//! Wire types for the shelter API

use serde::{Deserialize, Serialize};

/// A single adoptable dog as returned by `POST /dogs`
///
/// Snapshots are never mutated locally; only the sets they belong to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: String,
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

impl Dog {
    pub fn age_label(&self) -> String {
        if self.age == 1 {
            "1 year".to_string()
        } else {
            format!("{} years", self.age)
        }
    }
}

/// Body of `GET /dogs/search`
///
/// The service also returns `next`/`prev` cursors; paging is computed
/// locally from `total`, so they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_ids: Vec<String>,
    pub total: usize,
}

/// Body of `POST /dogs/match`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub matched_id: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_ignores_cursors() {
        let json = r#"{
            "resultIds": ["a", "b"],
            "total": 30,
            "next": "/dogs/search?size=25&from=25",
            "prev": null
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.result_ids, vec!["a", "b"]);
        assert_eq!(response.total, 30);
    }

    #[test]
    fn test_dog_parses_api_record() {
        let json = r#"{
            "id": "VXGFTIcBOvEgQ5OCx40W",
            "img": "https://frontend-take-home.fetch.com/dog-images/n02085620-Chihuahua/n02085620_10074.jpg",
            "name": "Emory",
            "age": 10,
            "zip_code": "48333",
            "breed": "Chihuahua"
        }"#;
        let dog: Dog = serde_json::from_str(json).unwrap();
        assert_eq!(dog.name, "Emory");
        assert_eq!(dog.age_label(), "10 years");
        assert_eq!(dog.zip_code, "48333");
    }

    #[test]
    fn test_match_response_renames_field() {
        let response: MatchResponse = serde_json::from_str(r#"{"match": "a"}"#).unwrap();
        assert_eq!(response.matched_id, "a");
    }

    #[test]
    fn test_login_request_shape() {
        let body = serde_json::to_value(LoginRequest {
            name: "Ada",
            email: "ada@example.com",
        })
        .unwrap();
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["email"], "ada@example.com");
    }
}

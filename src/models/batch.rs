use serde::{Deserialize, Deserializer, Serialize};

/// One batch of keyword search results pushed to the panel.
///
/// Producers may omit any field or send it as `null`; both read as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResultBatch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<Article>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageResult>,
    #[serde(default, rename = "pairId", alias = "pair_id")]
    pub pair_id: Option<String>,
}

impl SearchResultBatch {
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippet: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_collections_default_to_empty() {
        let batch: SearchResultBatch = serde_json::from_value(json!({})).unwrap();
        assert!(batch.keywords.is_empty());
        assert!(batch.articles.is_empty());
        assert!(batch.images.is_empty());
        assert!(batch.pair_id.is_none());
        assert!(!batch.has_keywords());
    }

    #[test]
    fn null_collections_read_as_empty() {
        let batch: SearchResultBatch = serde_json::from_value(json!({
            "keywords": null,
            "articles": null,
            "images": null,
            "pairId": "p1"
        }))
        .unwrap();
        assert!(!batch.has_keywords());
        assert!(batch.articles.is_empty());
        assert!(batch.images.is_empty());
        assert_eq!(batch.pair_id.as_deref(), Some("p1"));
    }

    #[test]
    fn null_entry_fields_read_as_empty_strings() {
        let batch: SearchResultBatch = serde_json::from_value(json!({
            "keywords": ["k"],
            "articles": [{ "link": null, "title": null, "snippet": null }],
            "images": [{ "url": null, "thumbnail": null, "image": "https://img.example/a.png", "title": null }]
        }))
        .unwrap();
        let article = &batch.articles[0];
        assert_eq!((article.link.as_str(), article.title.as_str(), article.snippet.as_str()), ("", "", ""));
        assert_eq!(batch.images[0].url, "");
        assert!(batch.images[0].title.is_none());
    }

    #[test]
    fn pair_id_accepts_both_spellings() {
        let camel: SearchResultBatch =
            serde_json::from_value(json!({ "keywords": ["a"], "pairId": "p1" })).unwrap();
        let snake: SearchResultBatch =
            serde_json::from_value(json!({ "keywords": ["a"], "pair_id": "p2" })).unwrap();
        assert_eq!(camel.pair_id.as_deref(), Some("p1"));
        assert_eq!(snake.pair_id.as_deref(), Some("p2"));
    }

    #[test]
    fn wrong_types_are_still_rejected() {
        assert!(serde_json::from_value::<SearchResultBatch>(json!({ "keywords": "k" })).is_err());
        assert!(serde_json::from_value::<SearchResultBatch>(json!({ "articles": [1, 2] })).is_err());
    }
}

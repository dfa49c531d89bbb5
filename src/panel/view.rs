//! View model for a single result group.
//!
//! `build_group` is the whole batch-to-group transformation. It does no I/O
//! and produces no markup; `panel::html` turns the result into HTML.
//!
//! Only `http`/`https` URLs survive into the view model. An article whose
//! link is unusable keeps its text but loses the anchor; an image with no
//! usable source is dropped, and one with an unusable page URL is shown
//! without an activation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Article, ImageResult, SearchResultBatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub id: Uuid,
    pub pair_id: Option<String>,
    pub keywords: Vec<KeywordTag>,
    pub articles: Vec<ArticleCard>,
    pub images: Vec<ImageTile>,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordTag {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCard {
    pub href: Option<String>,
    pub title: String,
    pub snippet: String,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTile {
    /// Displayed image: the thumbnail, or the full image when no thumbnail exists.
    pub src: String,
    /// Tooltip and alt text.
    pub title: String,
    pub on_activate: Option<TileAction>,
}

/// Where a link opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    NewContext,
}

/// Behavior attached to an image tile, carried as data rather than markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TileAction {
    OpenUrl { url: String, target: LinkTarget },
}

/// Builds the group for `batch`, or `None` when the batch has no keywords.
pub fn build_group(batch: &SearchResultBatch) -> Option<ResultGroup> {
    if !batch.has_keywords() {
        return None;
    }

    Some(ResultGroup {
        id: Uuid::new_v4(),
        pair_id: batch.pair_id.clone(),
        keywords: batch
            .keywords
            .iter()
            .map(|keyword| KeywordTag {
                text: keyword.clone(),
            })
            .collect(),
        articles: batch.articles.iter().map(article_card).collect(),
        images: batch.images.iter().filter_map(image_tile).collect(),
        received_at: Utc::now(),
    })
}

fn article_card(article: &Article) -> ArticleCard {
    ArticleCard {
        href: web_url(&article.link),
        title: article.title.clone(),
        snippet: article.snippet.clone(),
        target: LinkTarget::NewContext,
    }
}

fn image_tile(image: &ImageResult) -> Option<ImageTile> {
    let src = [image.thumbnail.as_deref(), image.image.as_deref()]
        .into_iter()
        .flatten()
        .find_map(web_url)?;

    Some(ImageTile {
        src,
        title: image.title.clone().unwrap_or_default(),
        on_activate: web_url(&image.url).map(|url| TileAction::OpenUrl {
            url,
            target: LinkTarget::NewContext,
        }),
    })
}

/// `Some(url)` for a well-formed absolute `http`/`https` URL.
pub fn web_url(candidate: &str) -> Option<String> {
    let url = candidate.trim();
    let web_scheme = ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    (web_scheme && validator::validate_url(url)).then(|| url.to_string())
}

//! HTML rendering adapter.
//!
//! Every piece of batch text is escaped here before it reaches markup.
//! Escaping leaves line breaks from batch text in place, so fragments may
//! span several lines.

use crate::panel::results_panel::{EventBinding, PanelAction, PanelContent};
use crate::panel::view::{ArticleCard, ImageTile, LinkTarget, ResultGroup, TileAction};

pub const CONTAINER_ID: &str = "results-container";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn target_attrs(target: LinkTarget) -> &'static str {
    match target {
        LinkTarget::NewContext => r#" target="_blank" rel="noopener noreferrer""#,
    }
}

/// Inner HTML of the results container.
pub fn render_content(content: &PanelContent<'_>) -> String {
    match content {
        PanelContent::Placeholder(message) => {
            format!(r#"<p class="placeholder">{}</p>"#, escape_html(message))
        }
        PanelContent::Groups(groups) => groups.iter().map(render_group).collect(),
    }
}

pub fn render_group(group: &ResultGroup) -> String {
    let mut html = format!(r#"<div class="result-group" id="group-{}""#, group.id);
    if let Some(pair_id) = &group.pair_id {
        html.push_str(&format!(r#" data-pair-id="{}""#, escape_html(pair_id)));
    }
    html.push('>');

    html.push_str(r#"<div class="keywords-section">"#);
    for tag in &group.keywords {
        html.push_str(&format!(
            r#"<span class="keyword-tag">{}</span>"#,
            escape_html(&tag.text)
        ));
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="articles-section">"#);
    for card in &group.articles {
        html.push_str(&render_article(card));
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="images-section">"#);
    if !group.images.is_empty() {
        html.push_str(r#"<div class="image-grid">"#);
        for tile in &group.images {
            html.push_str(&render_tile(tile));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    html.push_str("</div>");
    html
}

fn render_article(card: &ArticleCard) -> String {
    let heading = match &card.href {
        Some(href) => format!(
            r#"<a href="{}"{}>{}</a>"#,
            escape_html(href),
            target_attrs(card.target),
            escape_html(&card.title)
        ),
        None => format!(
            r#"<span class="article-title">{}</span>"#,
            escape_html(&card.title)
        ),
    };
    format!(
        r#"<div class="article-card">{}<p>{}</p></div>"#,
        heading,
        escape_html(&card.snippet)
    )
}

fn render_tile(tile: &ImageTile) -> String {
    let title = escape_html(&tile.title);
    let img = format!(
        r#"<img src="{}" title="{}" alt="{}" loading="lazy">"#,
        escape_html(&tile.src),
        title,
        title
    );

    match &tile.on_activate {
        Some(TileAction::OpenUrl { url, target }) => format!(
            r#"<a class="image-tile" href="{}"{}>{}</a>"#,
            escape_html(url),
            target_attrs(*target),
            img
        ),
        None => format!(r#"<span class="image-tile">{}</span>"#, img),
    }
}

fn render_control(binding: &EventBinding) -> String {
    let label = match binding.action {
        PanelAction::ClearResults => "Clear",
    };
    format!(
        r#"<button type="button" id="{}" class="panel-control">{}</button>"#,
        escape_html(&binding.element_id),
        label
    )
}

const PAGE_SCRIPT: &str = r#"
(function () {
  var container = document.getElementById('results-container');
  var bindings = JSON.parse(document.body.dataset.bindings || '[]');
  bindings.forEach(function (binding) {
    var control = document.getElementById(binding.element_id);
    if (!control) { return; }
    control.addEventListener(binding.event, function () {
      fetch('/api/controls/' + encodeURIComponent(binding.element_id), { method: 'POST' });
    });
  });
  var source = new EventSource('/panel/stream');
  source.onmessage = function (event) { container.innerHTML = event.data; };
})();
"#;

/// Full host page: the results container, any bound controls, and the
/// script that registers control listeners and follows the update stream.
pub fn render_page(bindings: &[EventBinding], content: &PanelContent<'_>) -> String {
    let bindings_json = serde_json::to_string(bindings).unwrap_or_else(|_| "[]".to_string());
    let controls: String = bindings.iter().map(render_control).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Keyword results</title>
</head>
<body data-bindings="{bindings}">
<section class="results-panel">
<header class="results-header"><h2>Related info</h2>{controls}</header>
<div id="{container}">{content}</div>
</section>
<script>{script}</script>
</body>
</html>
"#,
        bindings = escape_html(&bindings_json),
        controls = controls,
        container = CONTAINER_ID,
        content = render_content(content),
        script = PAGE_SCRIPT,
    )
}

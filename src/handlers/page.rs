use actix_web::http::header;
use actix_web::{web, HttpResponse, Result};
use bytes::Bytes;
use futures_util::future::ready;
use futures_util::stream::{self, StreamExt};
use tokio_stream::wrappers::BroadcastStream;

use crate::AppState;

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.panel_service.page().await))
}

pub async fn panel_fragment(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.panel_service.fragment().await))
}

/// Server-sent events: the current fragment, then one frame per change.
pub async fn panel_stream(state: web::Data<AppState>) -> Result<HttpResponse> {
    // Subscribe before rendering so no change falls between the two.
    let updates = BroadcastStream::new(state.panel_service.subscribe())
        .filter_map(|update| ready(update.ok()));
    let initial = state.panel_service.fragment().await;

    let frames = stream::once(ready(initial))
        .chain(updates)
        .map(|fragment| Ok::<Bytes, std::io::Error>(Bytes::from(sse_frame(&fragment))));

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/event-stream"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(frames))
}

/// One SSE event carrying `data`. CR, LF and CRLF all end a line on the
/// wire, so each line of `data` gets its own `data:` field.
fn sse_frame(data: &str) -> String {
    let data = data.replace("\r\n", "\n").replace('\r', "\n");
    let mut frame = String::with_capacity(data.len() + 8);
    for line in data.split('\n') {
        frame.push_str("data: ");
        frame.push_str(line);
        frame.push('\n');
    }
    frame.push('\n');
    frame
}

#[cfg(test)]
mod tests {
    use super::sse_frame;

    #[test]
    fn frames_prefix_every_line() {
        assert_eq!(sse_frame("<p>x</p>"), "data: <p>x</p>\n\n");
        assert_eq!(sse_frame("a\nb"), "data: a\ndata: b\n\n");
        assert_eq!(sse_frame(""), "data: \n\n");
    }

    #[test]
    fn carriage_returns_split_lines_too() {
        assert_eq!(
            sse_frame("<p>line1\rline2</p>"),
            "data: <p>line1\ndata: line2</p>\n\n"
        );
        assert_eq!(sse_frame("a\r\nb"), "data: a\ndata: b\n\n");
        assert_eq!(sse_frame("a\n"), "data: a\ndata: \n\n");
    }
}

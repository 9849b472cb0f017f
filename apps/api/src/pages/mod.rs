//! Static pages served by the app shell.
//!
//! Two pages, both embedded at compile time:
//! - the chat form (`/`), which talks to `POST /api/v1/consult`
//! - the company / recruiting page (`/recruit`), plain informational markup
//!   with no scripts and no forms.

use axum::response::Html;

pub const CHAT_PAGE: &str = include_str!("chat.html");
pub const RECRUIT_PAGE: &str = include_str!("recruit.html");

/// GET /
pub async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

/// GET /recruit
pub async fn recruit_page() -> Html<&'static str> {
    Html(RECRUIT_PAGE)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

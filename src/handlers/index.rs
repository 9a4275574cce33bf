use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::state::AppState;

const PAGE: &str = include_str!("../../assets/index.html");
const MODEL_PLACEHOLDER: &str = "{{DISPLAY_MODEL}}";

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.display_model))
}

fn render_page(display_model: &str) -> String {
    PAGE.replace(MODEL_PLACEHOLDER, &escape_html(display_model))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_is_injected_and_escaped() {
        let page = render_page("<llama>");
        assert!(page.contains("&lt;llama&gt;"));
        assert!(!page.contains(MODEL_PLACEHOLDER));
    }

    #[test]
    fn test_page_wires_both_endpoints() {
        assert!(PAGE.contains("/api/ollama/check"));
        assert!(PAGE.contains("/api/ollama/generate"));
    }
}

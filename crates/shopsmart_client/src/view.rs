//! Page markup for the status display.
//!
//! Rendering is a pure function of [`ViewState`]: the same state always
//! produces the same page.

use crate::{HealthStatus, ViewState};

pub const TITLE: &str = "ShopSmart";
pub const CARD_HEADING: &str = "Backend Status";
pub const LOADING_TEXT: &str = "Loading backend status...";

/// Seconds between browser re-reads while the fetch is outstanding.
pub const LOADING_REFRESH_SECS: u32 = 2;

/// Render the whole page for `state`.
pub fn render_page(state: &ViewState) -> String {
    let refresh = match state {
        ViewState::Loading => format!(
            "\n    <meta http-equiv=\"refresh\" content=\"{LOADING_REFRESH_SECS}\">"
        ),
        ViewState::Resolved(_) => String::new(),
    };
    format!(
        "<!doctype html>
<html lang=\"en\">
  <head>
    <meta charset=\"utf-8\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">{refresh}
    <title>{TITLE}</title>
  </head>
  <body>
    <div class=\"app\">
      <h1>{TITLE}</h1>
{card}
    </div>
  </body>
</html>
",
        card = render_card(state)
    )
}

/// Render only the status card.
pub fn render_card(state: &ViewState) -> String {
    let body = match state {
        ViewState::Loading => format!("        <p>{LOADING_TEXT}</p>\n"),
        ViewState::Resolved(health) => render_fields(health),
    };
    format!(
        "      <div class=\"card\">\n        <h2>{CARD_HEADING}</h2>\n{body}      </div>"
    )
}

fn render_fields(health: &HealthStatus) -> String {
    [
        ("Status:", &health.status),
        ("Message:", &health.message),
        ("Timestamp:", &health.timestamp),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            "        <p><strong>{label}</strong> {}</p>\n",
            escape_html(value)
        )
    })
    .collect()
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

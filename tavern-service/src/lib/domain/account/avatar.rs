use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Build the default profile picture for `username`.
///
/// A round badge showing the uppercased first character of the username, or
/// `?` for an empty one, as a base64 SVG data URI. Deterministic: the same
/// username always yields the same image.
pub fn generate_default_avatar(username: &str) -> String {
    let initial: String = username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string());

    let svg = format!(
        concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">"##,
            r##"<circle cx="50" cy="50" r="46" fill="#8B4513" stroke="#654321" stroke-width="3"/>"##,
            r##"<text x="50" y="64" font-family="serif" font-size="40" font-weight="bold" "##,
            r##"text-anchor="middle" fill="#F4E4BC">{}</text>"##,
            "</svg>"
        ),
        escape_xml(&initial)
    );

    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(svg))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

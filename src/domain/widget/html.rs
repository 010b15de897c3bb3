//! Iframe markup for embedding a widget.

/// Attributes applied to every widget frame unless the caller overrides them.
pub const DEFAULT_FRAME_ATTRIBUTES: [(&str, &str); 3] =
    [("frameborder", "0"), ("width", "750"), ("height", "800")];

/// Escapes a string for use inside a double-quoted HTML attribute.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders an iframe pointing at `src`.
///
/// Default attributes come first in a fixed order; caller attributes replace
/// a default in place or are appended in the order given. Attribute names
/// that are not plain identifiers are dropped.
pub fn render_iframe(src: &str, attributes: &[(&str, &str)]) -> String {
    let mut merged: Vec<(&str, &str)> = DEFAULT_FRAME_ATTRIBUTES.to_vec();

    for &(name, value) in attributes {
        if !is_safe_attribute_name(name) {
            tracing::warn!(attribute = name, "Dropping unsafe iframe attribute");
            continue;
        }
        match merged.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => merged.push((name, value)),
        }
    }

    let rendered: Vec<String> = merged
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", name, escape_html(value)))
        .collect();

    format!(
        "<iframe src=\"{}\" {}></iframe>",
        escape_html(src),
        rendered.join(" ")
    )
}

fn is_safe_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

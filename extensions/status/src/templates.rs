//! HTML templates for the block fragment.

use service_status_core::StatusBadge;

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Status icon element.
pub fn badge_icon(badge: StatusBadge) -> String {
    format!(
        r#"<i class="{css_class} {icon}">{label}</i>"#,
        css_class = badge.css_class(),
        icon = badge.icon_classes(),
        label = badge.label(),
    )
}

/// One list item: icon, space, anchor.
pub fn list_item(badge: StatusBadge, name: &str, url: &str) -> String {
    format!(
        r#"<li>{icon} <a href="{url}">{name}</a></li>"#,
        icon = badge_icon(badge),
        url = escape_html(url),
        name = escape_html(name),
    )
}

/// Call-to-action block with the detail link.
pub fn detail_link(href: &str, text: &str) -> String {
    let text = escape_html(text);
    format!(
        r#"<div class="status-detail btn"><a href="{href}" class="call-out-box__link" title="{text}">{text}</a></div>"#,
        href = escape_html(href),
        text = text,
    )
}

/// Outer container.
pub fn generate_fragment(items_html: &str, detail_html: &str) -> String {
    format!(
        r#"<div class="service-status-tl"><ul>{items_html}</ul>{detail_html}</div>"#,
        items_html = items_html,
        detail_html = detail_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_badge_icons() {
        assert_eq!(
            badge_icon(StatusBadge::Normal),
            r#"<i class="status-normal fa-sharp fa-solid fa-circle-check"></i>"#
        );
        assert_eq!(
            badge_icon(StatusBadge::Severe),
            r#"<i class="status-severe fa-sharp fa-solid fa-triangle-exclamation">Severe</i>"#
        );
        assert_eq!(
            badge_icon(StatusBadge::Issues),
            r#"<i class="status-issues fa-solid fa-circle-info">Issues</i>"#
        );
    }
}

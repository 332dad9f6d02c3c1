use std::path::Path;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::wonder::Wonder;

const PREVIOUS_WONDERS: usize = 5;
const DEFAULT_TITLE: &str = "Daily Wonder";

const STYLE: &str = concat!(
    "body{font-family:system-ui,sans-serif;color:#18181b;display:flex;justify-content:center;padding:4rem 1rem}",
    "main{width:100%;max-width:42rem;text-align:center}",
    ".date,.muted{color:#71717a;font-size:.875rem}",
    "article{text-align:left;line-height:1.7}",
    ".previous{display:flex;flex-wrap:wrap;justify-content:center;gap:.5rem}",
    "a{color:inherit}",
);

pub(crate) fn wonder_href(slug: &str) -> String {
    format!("/wonder/{}", urlencoding::encode(slug))
}

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                main { (content) }
            }
        }
    }
}

fn wonder_header(wonder: &Wonder) -> Markup {
    html! {
        header {
            p.date { (wonder.date) }
            h1 { (wonder.title.as_deref().unwrap_or(DEFAULT_TITLE)) }
        }
        // journal HTML is trusted
        article { (PreEscaped(&wonder.content_html)) }
    }
}

/// The home page: the latest wonder and links to the ones before it.
pub(crate) fn render_index(wonders: &[Wonder], journal_root: &Path) -> String {
    let Some((latest, rest)) = wonders.split_first() else {
        return render_empty(journal_root);
    };
    let previous = &rest[..rest.len().min(PREVIOUS_WONDERS)];

    layout(
        latest.title.as_deref().unwrap_or(DEFAULT_TITLE),
        html! {
            (wonder_header(latest))
            footer {
                a.muted href=(wonder_href(&latest.slug)) { "View this wonder →" }
                @if !previous.is_empty() {
                    div {
                        p.muted { "Previous wonders:" }
                        div.previous {
                            @for wonder in previous {
                                a.muted href=(wonder_href(&wonder.slug)) { (wonder.date) }
                            }
                        }
                    }
                }
            }
        },
    )
    .into_string()
}

pub(crate) fn render_wonder(wonder: &Wonder) -> String {
    layout(
        wonder.title.as_deref().unwrap_or(DEFAULT_TITLE),
        html! {
            (wonder_header(wonder))
            footer {
                a.muted href="/" { "← All wonders" }
            }
        },
    )
    .into_string()
}

fn render_empty(journal_root: &Path) -> String {
    layout(
        "No wonders found",
        html! {
            h1 { "No wonders found." }
            p.muted { "Please check the directory `" (journal_root.display().to_string()) "`." }
        },
    )
    .into_string()
}

pub(crate) fn render_not_found(slug: &str) -> String {
    layout(
        "Not found",
        html! {
            h1 { "No such wonder." }
            p.muted { "Nothing is recorded for " code { (slug) } "." }
            a.muted href="/" { "← All wonders" }
        },
    )
    .into_string()
}

pub(crate) fn render_error() -> String {
    layout(
        "Error",
        html! {
            h1 { "Something went wrong." }
            p.muted { "This wonder could not be read." }
            a.muted href="/" { "← All wonders" }
        },
    )
    .into_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    use super::*;

    fn wonder(slug: &str, title: Option<&str>) -> Wonder {
        Wonder {
            slug: slug.to_string(),
            date: slug.to_string(),
            title: title.map(str::to_string),
            content_html: format!("<p>{slug} <em>body</em></p>\n"),
            metadata: Map::new(),
        }
    }

    #[test]
    fn test_index_features_latest() {
        let wonders = vec![wonder("2024-01-02", Some("Tides")), wonder("2024-01-01", None)];
        let html = render_index(&wonders, Path::new("/journal"));

        assert!(html.contains("<h1>Tides</h1>"), "{html}");
        assert!(html.contains("<p>2024-01-02 <em>body</em></p>"), "{html}");
        assert!(html.contains("href=\"/wonder/2024-01-02\""), "{html}");
        assert!(html.contains("Previous wonders:"), "{html}");
        assert!(html.contains("href=\"/wonder/2024-01-01\""), "{html}");
        // only the featured body is embedded
        assert!(!html.contains("<p>2024-01-01 <em>body</em></p>"), "{html}");
    }

    #[test]
    fn test_index_limits_previous() {
        let wonders: Vec<_> = (1..=9)
            .rev()
            .map(|day| wonder(&format!("2024-01-0{day}"), None))
            .collect();
        let html = render_index(&wonders, Path::new("/journal"));

        let linked = (1..=9)
            .filter(|day| html.contains(&format!("href=\"/wonder/2024-01-0{day}\"")))
            .count();
        // the featured link plus five previous
        assert_eq!(linked, 6);
        assert!(html.contains("href=\"/wonder/2024-01-04\""));
        assert!(!html.contains("href=\"/wonder/2024-01-03\""));
    }

    #[test]
    fn test_index_single_wonder_has_no_previous() {
        let html = render_index(&[wonder("2024-01-01", None)], Path::new("/journal"));
        assert!(html.contains("<h1>Daily Wonder</h1>"), "{html}");
        assert!(!html.contains("Previous wonders:"), "{html}");
    }

    #[test]
    fn test_empty_state() {
        let html = render_index(&[], Path::new("/home/me/clawd/memory/daily-wonders"));
        assert!(html.contains("No wonders found."), "{html}");
        assert!(html.contains("/home/me/clawd/memory/daily-wonders"), "{html}");
    }

    #[test]
    fn test_not_found_escapes_slug() {
        let html = render_not_found("<b>");
        assert!(html.contains("&lt;b&gt;"), "{html}");
    }
}

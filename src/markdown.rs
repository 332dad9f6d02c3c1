use std::sync::OnceLock;

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

static H1_LINE: OnceLock<Regex> = OnceLock::new();

fn h1_line() -> &'static Regex {
    H1_LINE.get_or_init(|| {
        Regex::new(r"(?m)^#[ \t]+(.+)$").expect("failed to compile regex for level-1 heading")
    })
}

pub(crate) fn markdown_to_html(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(body, options);
    let mut body_html = String::new();
    html::push_html(&mut body_html, parser);

    body_html
}

/// Text of the first `# heading` line in `body`, if any.
pub(crate) fn first_heading(body: &str) -> Option<String> {
    h1_line()
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|title| !title.is_empty())
        .map(str::to_string)
}

use crate::models::Post;
use regex::{Regex, RegexBuilder};

/// A run of displayed text, marked when it matches the search keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl<'a> Span<'a> {
    fn plain(text: &'a str) -> Self {
        Self { text, matched: false }
    }

    fn marked(text: &'a str) -> Self {
        Self { text, matched: true }
    }
}

/// Splits `text` into spans, marking every case-insensitive occurrence of
/// `keyword`. Matches are found left to right without overlap, and the spans
/// concatenate back to exactly `text`.
pub fn highlight<'a>(text: &'a str, keyword: &str) -> Vec<Span<'a>> {
    split(text, keyword_pattern(keyword).as_ref())
}

/// The keyword as a literal, case-insensitive pattern. `None` when there is
/// nothing to mark.
fn keyword_pattern(keyword: &str) -> Option<Regex> {
    if keyword.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .ok()
}

fn split<'a>(text: &'a str, pattern: Option<&Regex>) -> Vec<Span<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    let Some(pattern) = pattern else {
        return vec![Span::plain(text)];
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if last < found.start() {
            spans.push(Span::plain(&text[last..found.start()]));
        }
        spans.push(Span::marked(found.as_str()));
        last = found.end();
    }
    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }

    spans
}

/// A search result with its company name and content split for emphasis.
/// The underlying post is borrowed untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedPost<'a> {
    pub post: &'a Post,
    pub company: Vec<Span<'a>>,
    pub content: Vec<Span<'a>>,
}

impl<'a> HighlightedPost<'a> {
    pub fn new(post: &'a Post, keyword: &str) -> Self {
        let pattern = keyword_pattern(keyword);
        Self {
            post,
            company: split(&post.company, pattern.as_ref()),
            content: split(&post.content, pattern.as_ref()),
        }
    }
}

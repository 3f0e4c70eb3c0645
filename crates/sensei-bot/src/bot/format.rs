//! Reply formatting helpers

use crate::api::NewsArticle;
use regex::Regex;
use std::sync::OnceLock;

/// Maximum length of a single chat message
pub const MESSAGE_CHUNK_SIZE: usize = 4096;

fn markdown_escape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[_*\[\]()~`>#+\-=|{}.!]").expect("valid escape pattern"))
}

/// Escape characters reserved in MarkdownV2
pub fn escape_markdown_v2(text: &str) -> String {
    markdown_escape_re().replace_all(text, r"\$0").into_owned()
}

/// Format one headline as a MarkdownV2 block
pub fn format_article(article: &NewsArticle) -> String {
    let title = escape_markdown_v2(article.title.as_deref().unwrap_or("No Title"));
    let description = escape_markdown_v2(article.description.as_deref().unwrap_or("No Description"));
    let url = article.url.as_deref().unwrap_or("");
    format!("**{title}**\n*{description}*\n[Read more]({url})\n")
}

/// Split a long reply into chunks that fit a single chat message
pub fn chunk_message(text: &str) -> Vec<String> {
    if text.len() <= MESSAGE_CHUNK_SIZE {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in text.lines().flat_map(split_line) {
        // +1 for the newline re-added below
        if !current.is_empty() && current.len() + line.len() + 1 > MESSAGE_CHUNK_SIZE {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Break a single line that exceeds the chunk size into pieces that fit,
/// cutting only at char boundaries
fn split_line(mut line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    while line.len() > MESSAGE_CHUNK_SIZE {
        let mut end = MESSAGE_CHUNK_SIZE;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        pieces.push(&line[..end]);
        line = &line[end..];
    }
    pieces.push(line);
    pieces
}

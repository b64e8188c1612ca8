#[cfg(test)]
mod tests;

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Extracted article content
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedArticle {
    /// The article title
    pub title: String,
    /// The article body text, whitespace-normalized
    pub text: String,
}

/// Extract the title and primary text content from an HTML page.
#[inline]
pub fn extract_article(html: &str) -> Result<ExtractedArticle> {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let root = find_article_root(&document);

    let mut text = String::new();
    extract_text_recursive(root, &mut text);
    let text = clean_text(&text);

    debug!(
        "Extracted article: title='{}', {} chars of text",
        title,
        text.chars().count()
    );

    Ok(ExtractedArticle { title, text })
}

/// Extract the page title from an HTML document
fn extract_title(document: &Html) -> String {
    let title_selectors = ["h1", "title", ".headline", ".article-title", "[data-title]"];

    for selector_str in &title_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let title = normalize_whitespace(&element.text().collect::<String>());
                if !title.is_empty() {
                    debug!(
                        "Extracted title using selector '{}': '{}'",
                        selector_str, title
                    );
                    return title;
                }
            }
        }
    }

    "Untitled".to_string()
}

/// Find the element most likely to hold the article body
fn find_article_root(document: &Html) -> ElementRef<'_> {
    let main_selectors = [
        "article",
        "main",
        "[role=\"main\"]",
        ".article-content",
        ".story-content",
        ".post-content",
        ".content",
        "#content",
    ];

    for selector_str in &main_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                debug!("Found article body using selector: {}", selector_str);
                return element;
            }
        }
    }

    // Fallback to document root
    document.root_element()
}

/// Recursively extract text content, skipping page chrome
fn extract_text_recursive(element: ElementRef, text: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            match child_element.value().name() {
                // Page chrome carries no article text
                "head" | "script" | "style" | "noscript" | "nav" | "header" | "footer"
                | "aside" | "form" | "iframe" => {}

                "li" => {
                    text.push_str("• ");
                    extract_text_recursive(child_element, text);
                    text.push('\n');
                }

                "br" => text.push('\n'),

                "p" | "div" | "section" | "article" | "blockquote" | "h1" | "h2" | "h3"
                | "h4" | "h5" | "h6" => {
                    extract_text_recursive(child_element, text);
                    text.push_str("\n\n");
                }

                _ => extract_text_recursive(child_element, text),
            }
        } else if let Some(text_node) = child.value().as_text() {
            text.push_str(text_node);
        }
    }
}

/// Normalize whitespace within each paragraph while keeping paragraph breaks
fn clean_text(text: &str) -> String {
    text.split("\n\n")
        .map(normalize_whitespace)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

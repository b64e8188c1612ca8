use super::*;

#[test]
fn extracts_title_and_body() {
    let html = r#"
        <html>
        <head><title>Page Title</title></head>
        <body>
            <article>
                <h1>Scheme Announcement</h1>
                <p>The government announced a new savings scheme today.</p>
                <p>Applications open next month.</p>
            </article>
        </body>
        </html>
    "#;

    let article = extract_article(html).expect("extract article");

    assert_eq!(article.title, "Scheme Announcement");
    assert!(article.text.contains("savings scheme"));
    assert!(article.text.contains("Applications open"));
}

#[test]
fn falls_back_to_document_title() {
    let html = "<html><head><title>Only Title</title></head><body><p>Body text.</p></body></html>";

    let article = extract_article(html).expect("extract article");
    assert_eq!(article.title, "Only Title");
}

#[test]
fn untitled_when_no_title_present() {
    let html = "<html><body><p>Body text.</p></body></html>";

    let article = extract_article(html).expect("extract article");
    assert_eq!(article.title, "Untitled");
}

#[test]
fn skips_page_chrome() {
    let html = r#"
        <html><body>
            <nav>Home | About | Contact</nav>
            <script>var tracking = true;</script>
            <article><p>Real article content here.</p></article>
            <footer>Copyright 2024</footer>
        </body></html>
    "#;

    let article = extract_article(html).expect("extract article");

    assert!(article.text.contains("Real article content"));
    assert!(!article.text.contains("tracking"));
    assert!(!article.text.contains("Copyright"));
    assert!(!article.text.contains("Home | About"));
}

#[test]
fn preserves_paragraph_breaks() {
    let html = "<html><body><article><p>First paragraph.</p><p>Second paragraph.</p></article></body></html>";

    let article = extract_article(html).expect("extract article");
    assert_eq!(article.text, "First paragraph.\n\nSecond paragraph.");
}

#[test]
fn collapses_internal_whitespace() {
    let html = "<html><body><article><p>Spaced    out\n   text</p></article></body></html>";

    let article = extract_article(html).expect("extract article");
    assert_eq!(article.text, "Spaced out text");
}

#[test]
fn list_items_become_bullets() {
    let html = "<html><body><article><ul><li>First benefit</li><li>Second benefit</li></ul></article></body></html>";

    let article = extract_article(html).expect("extract article");
    assert!(article.text.contains("• First benefit"));
    assert!(article.text.contains("• Second benefit"));
}

#[test]
fn empty_page_yields_empty_text() {
    let article = extract_article("<html><body></body></html>").expect("extract article");
    assert!(article.text.is_empty());
}

use reqwest::Url;

use markdown_gateway::infrastructure::conversion::{is_watch_page, render_watch_page};

#[test]
fn given_watch_urls_when_checking_then_recognises_video_pages() {
    for url in [
        "https://www.youtube.com/watch?v=abc123",
        "https://youtube.com/watch?v=abc123&t=10",
        "https://m.youtube.com/watch?v=abc123",
        "https://youtu.be/abc123",
        "https://youtu.be/abc123?t=42",
    ] {
        assert!(is_watch_page(&Url::parse(url).unwrap()), "{url}");
    }
}

#[test]
fn given_other_urls_when_checking_then_rejects_them() {
    for url in [
        "https://www.youtube.com/",
        "https://www.youtube.com/watch",
        "https://www.youtube.com/watch?v=",
        "https://www.youtube.com/channel/xyz",
        "https://example.com/watch?v=abc123",
        "https://youtu.be/",
    ] {
        assert!(!is_watch_page(&Url::parse(url).unwrap()), "{url}");
    }
}

#[test]
fn given_watch_page_html_when_rendering_then_lists_title_metadata_and_description() {
    let html = r#"<html><head>
        <title>Ignored - YouTube</title>
        <meta property="og:title" content="Rust in 100 Seconds">
        <meta name="keywords" content="rust, programming">
        <meta itemprop="interactionCount" content="12345">
        <meta itemprop="duration" content="PT2M20S">
        <meta name="description" content="Fast &amp; safe.">
        </head><body></body></html>"#;

    let markdown = render_watch_page(html);

    assert_eq!(
        markdown,
        "# YouTube\n\n\
         ## Rust in 100 Seconds\n\n\
         ### Video Metadata\n\
         - **Views:** 12345\n\
         - **Keywords:** rust, programming\n\
         - **Runtime:** PT2M20S\n\n\
         ### Description\n\
         Fast & safe."
    );
}

#[test]
fn given_page_without_meta_when_rendering_then_falls_back_to_title_tag() {
    let markdown = render_watch_page("<html><head><title>Plain &amp; Simple</title></head></html>");

    assert_eq!(markdown, "# YouTube\n\n## Plain & Simple");
}

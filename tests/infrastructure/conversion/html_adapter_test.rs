use markdown_gateway::infrastructure::conversion::html_to_markdown;

#[test]
fn given_paragraph_when_converting_then_returns_its_text() {
    assert_eq!(html_to_markdown("<p>hello</p>"), "hello");
}

#[test]
fn given_scripts_and_styles_when_converting_then_drops_them() {
    let markdown = html_to_markdown(
        "<html><head><style>p{color:red}</style></head><body><script>alert(1)</script><p>kept</p></body></html>",
    );

    assert!(markdown.contains("kept"));
    assert!(!markdown.contains("alert"));
    assert!(!markdown.contains("color"));
}

#[test]
fn given_title_without_body_heading_when_converting_then_title_becomes_heading() {
    let markdown =
        html_to_markdown("<html><head><title>Report &amp; Notes</title></head><body><p>x</p></body></html>");

    assert!(markdown.starts_with("# Report & Notes"));
}

#[test]
fn given_body_heading_when_converting_then_title_is_not_added() {
    let markdown = html_to_markdown(
        "<html><head><title>Tab title</title></head><body><h1>Real</h1></body></html>",
    );

    assert!(!markdown.contains("Tab title"));
    assert!(markdown.contains("Real"));
}

#[test]
fn given_setext_rendered_subheading_when_converting_then_title_is_not_added() {
    let markdown = html_to_markdown(
        "<html><head><title>Tab title</title></head><body><h2 class=\"x\">Section</h2><p>text</p></body></html>",
    );

    assert!(!markdown.starts_with("# Tab title"));
    assert!(markdown.contains("Section"));
    assert!(markdown.contains("text"));
}

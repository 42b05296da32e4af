use markdown_gateway::domain::{SnippetSelectionError, TextSnippet};

#[test]
fn given_single_field_when_selecting_then_returns_matching_variant() {
    let snippet = TextSnippet::exactly_one(None, Some("a,b".to_string()), None, None).unwrap();

    assert_eq!(snippet, TextSnippet::Csv("a,b".to_string()));
    assert_eq!(snippet.extension(), "csv");
    assert_eq!(snippet.mime(), "text/csv");
}

#[test]
fn given_empty_strings_when_selecting_then_treats_them_as_absent() {
    let result = TextSnippet::exactly_one(
        Some(String::new()),
        None,
        Some("{}".to_string()),
        Some(String::new()),
    );

    assert_eq!(result, Ok(TextSnippet::Json("{}".to_string())));
}

#[test]
fn given_no_fields_when_selecting_then_returns_missing() {
    let result = TextSnippet::exactly_one(None, Some(String::new()), None, None);

    assert_eq!(result, Err(SnippetSelectionError::Missing));
}

#[test]
fn given_several_fields_when_selecting_then_names_all_of_them() {
    let result = TextSnippet::exactly_one(
        Some("<p/>".to_string()),
        Some("a".to_string()),
        None,
        Some("<a/>".to_string()),
    );

    assert_eq!(
        result,
        Err(SnippetSelectionError::Contradictory(vec!["html", "csv", "xml"]))
    );
}

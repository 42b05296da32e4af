use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use super::xml_text::decode_entities;

static META_KEY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+(?:property|name|itemprop)\s*=\s*"([^"]+)"\s+content\s*=\s*"([^"]*)""#)
        .expect("static pattern")
});
static META_CONTENT_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+content\s*=\s*"([^"]*)"\s+(?:property|name|itemprop)\s*=\s*"([^"]+)""#)
        .expect("static pattern")
});
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("static pattern"));

/// True for `youtube.com/watch?v=...` video pages and `youtu.be/<id>` short links.
pub fn is_watch_page(url: &Url) -> bool {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = host.strip_prefix("m.").unwrap_or(host);

    match host {
        "youtube.com" => {
            url.path() == "/watch"
                && url.query_pairs().any(|(key, value)| key == "v" && !value.is_empty())
        }
        "youtu.be" => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .is_some_and(|id| !id.is_empty()),
        _ => false,
    }
}

fn collect_meta(html: &str) -> HashMap<String, String> {
    let mut meta = HashMap::new();
    for caps in META_KEY_FIRST.captures_iter(html) {
        meta.entry(caps[1].to_string())
            .or_insert_with(|| decode_entities(&caps[2]).into_owned());
    }
    for caps in META_CONTENT_FIRST.captures_iter(html) {
        meta.entry(caps[2].to_string())
            .or_insert_with(|| decode_entities(&caps[1]).into_owned());
    }
    meta
}

fn first_of<'a>(meta: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| meta.get(*key))
        .map(String::as_str)
        .find(|value| !value.trim().is_empty())
}

/// Renders the metadata of a YouTube watch page.
pub fn render_watch_page(html: &str) -> String {
    let meta = collect_meta(html);

    let title = first_of(&meta, &["og:title", "title"])
        .map(str::to_string)
        .or_else(|| {
            TITLE
                .captures(html)
                .map(|caps| decode_entities(caps[1].trim()).into_owned())
        })
        .unwrap_or_default();

    let mut markdown = String::from("# YouTube\n");
    if !title.is_empty() {
        markdown.push_str(&format!("\n## {title}\n"));
    }

    let details: Vec<String> = [
        ("Views", first_of(&meta, &["interactionCount"])),
        ("Keywords", first_of(&meta, &["keywords"])),
        ("Runtime", first_of(&meta, &["duration"])),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("- **{label}:** {v}")))
    .collect();

    if !details.is_empty() {
        markdown.push_str("\n### Video Metadata\n");
        markdown.push_str(&details.join("\n"));
        markdown.push('\n');
    }

    if let Some(description) = first_of(&meta, &["description", "og:description"]) {
        markdown.push_str(&format!("\n### Description\n{description}\n"));
    }

    markdown.trim_end().to_string()
}

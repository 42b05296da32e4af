/// A raw text payload of a known kind, converted as if it were an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSnippet {
    Html(String),
    Csv(String),
    Json(String),
    Xml(String),
}

impl TextSnippet {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html(_) => "html",
            Self::Csv(_) => "csv",
            Self::Json(_) => "json",
            Self::Xml(_) => "xml",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Html(_) => "text/html",
            Self::Csv(_) => "text/csv",
            Self::Json(_) => "application/json",
            Self::Xml(_) => "application/xml",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Html(s) | Self::Csv(s) | Self::Json(s) | Self::Xml(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnippetSelectionError {
    #[error("Provide one of the fields: html, csv, json_text or xml")]
    Missing,
    #[error("Provide only one of the fields html, csv, json_text or xml; got {}", .0.join(", "))]
    Contradictory(Vec<&'static str>),
}

impl TextSnippet {
    /// Picks the single populated field. Empty strings count as absent.
    pub fn exactly_one(
        html: Option<String>,
        csv: Option<String>,
        json_text: Option<String>,
        xml: Option<String>,
    ) -> Result<Self, SnippetSelectionError> {
        let candidates = [
            ("html", html.filter(|s| !s.is_empty()).map(Self::Html)),
            ("csv", csv.filter(|s| !s.is_empty()).map(Self::Csv)),
            ("json_text", json_text.filter(|s| !s.is_empty()).map(Self::Json)),
            ("xml", xml.filter(|s| !s.is_empty()).map(Self::Xml)),
        ];

        let mut present: Vec<(&'static str, Self)> = candidates
            .into_iter()
            .filter_map(|(name, snippet)| snippet.map(|s| (name, s)))
            .collect();

        match present.len() {
            0 => Err(SnippetSelectionError::Missing),
            1 => Ok(present.remove(0).1),
            _ => Err(SnippetSelectionError::Contradictory(
                present.into_iter().map(|(name, _)| name).collect(),
            )),
        }
    }
}

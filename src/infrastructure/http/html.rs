use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::domain::entities::PageSummary;

static H1: LazyLock<Selector> = LazyLock::new(|| parse_selector("h1"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| parse_selector("title"));
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(r#"meta[name="description"]"#));

fn parse_selector(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector is valid")
}

/// Extracts the first `<h1>`, the `<title>` and the `<meta name="description">`
/// content of an HTML document.
///
/// Values are trimmed; a missing or blank element yields `None`.
pub fn extract_page_summary(html: &str) -> PageSummary {
    let doc = Html::parse_document(html);

    let text_of = |selector: &Selector| {
        doc.select(selector)
            .next()
            .map(|node| node.text().collect::<String>())
            .and_then(non_blank)
    };

    let description = doc
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .and_then(|content| non_blank(content.to_string()));

    PageSummary {
        h1: text_of(&H1),
        title: text_of(&TITLE),
        description,
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_fields() {
        let html = r#"
            <html>
              <head>
                <title> Example Domain </title>
                <meta name="description" content="An example page">
              </head>
              <body>
                <h1>Welcome</h1>
                <h1>Second heading</h1>
              </body>
            </html>
        "#;

        let summary = extract_page_summary(html);

        assert_eq!(summary.title.as_deref(), Some("Example Domain"));
        assert_eq!(summary.h1.as_deref(), Some("Welcome"));
        assert_eq!(summary.description.as_deref(), Some("An example page"));
    }

    #[test]
    fn test_missing_elements_are_none() {
        let summary = extract_page_summary("<html><body><p>Nothing here</p></body></html>");

        assert_eq!(summary, PageSummary::default());
    }

    #[test]
    fn test_blank_values_are_none() {
        let html = r#"<title>   </title><meta name="description" content=""><h1> </h1>"#;

        let summary = extract_page_summary(html);

        assert_eq!(summary, PageSummary::default());
    }

    #[test]
    fn test_nested_h1_text_is_joined() {
        let summary = extract_page_summary("<h1>Hello <b>world</b></h1>");

        assert_eq!(summary.h1.as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_other_meta_tags_ignored() {
        let html = r#"<meta name="keywords" content="a, b"><meta property="og:description" content="x">"#;

        assert!(extract_page_summary(html).description.is_none());
    }
}

use crate::domain::model::Anchor;
use scraper::{Html, Selector};
use std::sync::OnceLock;

/// Cached anchor selector, compiled once.
static ANCHOR_SELECTOR: OnceLock<Selector> = OnceLock::new();

/// Collect every `<a href>` whose href contains `filter`, in document order.
///
/// Returns the href as written in the document (trimmed, not resolved) and
/// the anchor's visible text. Callers that need absolute URLs resolve the
/// href against the page URL themselves.
pub fn extract_anchors(html: &str, filter: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);

    let selector = ANCHOR_SELECTOR
        .get_or_init(|| Selector::parse("a[href]").expect("a[href] is a valid CSS selector"));

    document
        .select(selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim();
            if href.is_empty() || !href.contains(filter) {
                return None;
            }
            let text: String = element.text().collect::<Vec<_>>().join(" ");
            Some(Anchor {
                href: href.to_string(),
                text: text.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_by_substring() {
        let html = r#"
            <html><body>
              <a href="pref/01.html">Hokkaido</a>
              <a href="pref/13.html">Tokyo</a>
              <a href="about.html">About this site</a>
            </body></html>
        "#;

        let anchors = extract_anchors(html, "pref/");
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].href, "pref/01.html");
        assert_eq!(anchors[0].text, "Hokkaido");
        assert_eq!(anchors[1].href, "pref/13.html");
        assert_eq!(anchors[1].text, "Tokyo");
    }

    #[test]
    fn test_preserves_document_order() {
        let html = r#"
            <html><body>
              <a href="../data/00003.zip">Third ward</a>
              <a href="../data/00001.zip">First ward</a>
              <a href="../data/00002.zip">Second ward</a>
            </body></html>
        "#;

        let anchors = extract_anchors(html, ".zip");
        let hrefs: Vec<&str> = anchors.iter().map(|a| a.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec!["../data/00003.zip", "../data/00001.zip", "../data/00002.zip"]
        );
    }

    #[test]
    fn test_skips_anchors_without_href() {
        let html = r#"<html><body><a name="top">Top</a><a href="x.zip">Zip</a></body></html>"#;
        let anchors = extract_anchors(html, ".zip");
        assert_eq!(anchors.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_anchors("", ".zip").is_empty());
    }

    #[test]
    fn test_trims_anchor_text() {
        let html = r#"<html><body><a href="data/01.zip">  Sapporo
        </a></body></html>"#;
        let anchors = extract_anchors(html, ".zip");
        assert_eq!(anchors[0].text, "Sapporo");
    }
}

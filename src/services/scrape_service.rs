use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::USER_AGENT;
use scraper::{ElementRef, Html, Node, Selector};

use crate::errors::{AppError, AppResult};

/// Extracted text is capped to bound downstream prompt size.
pub const MAX_CONTENT_CHARS: usize = 12_000;
const MIN_CONTENT_CHARS: usize = 100;
const MIN_PARAGRAPH_CHARS: usize = 50;
const MIN_PARAGRAPH_COUNT: usize = 3;
const MIN_SENTENCE_CHARS: usize = 30;
const SENTENCE_FALLBACK_CAP: usize = 20;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const TITLE_SELECTORS: &[&str] = &["h1#firstHeading", "h1.firstHeading", "h1"];

const CONTENT_SELECTORS: &[&str] = &[
    "div#mw-content-text",
    "div.mw-content-text",
    "div.mw-parser-output",
    "div.content",
];

/// Extraction denylist. Subtrees rooted at these element names, or at elements
/// carrying one of these class tokens, never contribute prose. This is a
/// best-effort cleanup, not a guarantee of perfect cleanliness.
const EXCLUDED_ELEMENTS: &[&str] = &[
    "script", "style", "table", "sup", "link", "meta", "img", "figure", "aside", "nav", "footer",
    "header",
];

const EXCLUDED_CLASSES: &[&str] = &[
    "navbox",
    "infobox",
    "hatnote",
    "reference",
    "citation",
    "references",
    "mw-references-wrap",
    "thumb",
    "external",
    "mw-editsection",
    "mw-redirect",
    "geo",
    "coordinates",
    "metadata",
    "ambox",
    "sidebar",
];

const BOILERPLATE_PREFIXES: &[&str] = &["This article", "For other uses", "In other projects"];

static NUMERIC_CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]").expect("valid citation regex"));
static WORD_CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\w+\]").expect("valid citation regex"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("valid paragraph selector"));
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("valid body selector"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapedArticle {
    pub title: String,
    pub content: String,
}

pub fn is_wikipedia_url(url: &str) -> bool {
    url.to_lowercase().contains("wikipedia.org")
}

/// Fetches the raw HTML of a Wikipedia article. Checks the URL before any
/// network traffic; a single failed request is terminal, no retries.
pub async fn fetch_article_html(http: &reqwest::Client, url: &str) -> AppResult<String> {
    if !is_wikipedia_url(url) {
        return Err(AppError::InvalidInput(
            "Please provide a valid Wikipedia URL".to_string(),
        ));
    }

    log::info!("Fetching Wikipedia URL: {}", url);

    let response = http
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(|err| AppError::FetchError(format!("Failed to fetch the Wikipedia page: {err}")))?
        .error_for_status()
        .map_err(|err| {
            AppError::FetchError(format!("Failed to fetch the Wikipedia page: {err}"))
        })?;

    response
        .text()
        .await
        .map_err(|err| AppError::FetchError(format!("Failed to read the Wikipedia page: {err}")))
}

pub async fn scrape_wikipedia(http: &reqwest::Client, url: &str) -> AppResult<ScrapedArticle> {
    let html = fetch_article_html(http, url).await?;
    extract_article(&html)
}

/// Reduces raw article markup to a title and clean prose. Pure; all network
/// concerns live in [`fetch_article_html`].
pub fn extract_article(html: &str) -> AppResult<ScrapedArticle> {
    let document = Html::parse_document(html);

    let title = select_first(&document, TITLE_SELECTORS)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Unknown Title".to_string());

    let content_area = select_first(&document, CONTENT_SELECTORS)
        .or_else(|| document.select(&BODY_SELECTOR).next())
        .ok_or_else(|| {
            AppError::ExtractionError("Could not find any content area on the page".to_string())
        })?;

    let mut paragraph_total = 0;
    let mut fragments = Vec::new();
    for paragraph in content_area.select(&PARAGRAPH_SELECTOR) {
        paragraph_total += 1;
        if has_excluded_ancestor(&paragraph) {
            continue;
        }

        let text = clean_paragraph(&visible_text(paragraph));
        if text.chars().count() > MIN_PARAGRAPH_CHARS && !is_boilerplate(&text) {
            fragments.push(text);
        }
    }

    if fragments.len() < MIN_PARAGRAPH_COUNT {
        log::info!(
            "Only {} qualifying paragraphs out of {}, falling back to sentence extraction",
            fragments.len(),
            paragraph_total
        );
        fragments = sentence_fallback(&visible_text(content_area));
    }

    let joined = collapse_whitespace(&fragments.join(" "));
    let content: String = joined.chars().take(MAX_CONTENT_CHARS).collect();

    let char_count = content.chars().count();
    if char_count < MIN_CONTENT_CHARS {
        return Err(AppError::ExtractionError(format!(
            "Not enough meaningful content found: only {} characters extracted from {} paragraphs",
            char_count, paragraph_total
        )));
    }

    log::info!(
        "Extracted article \"{}\" with {} characters",
        title,
        char_count
    );

    Ok(ScrapedArticle { title, content })
}

fn select_first<'a>(document: &'a Html, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|raw| {
        let selector = Selector::parse(raw).expect("valid fallback selector");
        document.select(&selector).next()
    })
}

/// True when the element itself matches the extraction denylist.
fn is_excluded(element: &ElementRef) -> bool {
    let name = element.value().name();
    if EXCLUDED_ELEMENTS.contains(&name) {
        return true;
    }
    element
        .value()
        .classes()
        .any(|class| EXCLUDED_CLASSES.contains(&class))
}

fn has_excluded_ancestor(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_excluded(&ancestor))
}

/// Concatenated text of an element, skipping denylisted subtrees.
fn visible_text(element: ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    if !is_excluded(&child_element) {
                        collect_text(child_element, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Strips citation-bracket markers and collapses runs of whitespace.
fn clean_paragraph(text: &str) -> String {
    let text = NUMERIC_CITATION_RE.replace_all(text, "");
    let text = WORD_CITATION_RE.replace_all(&text, "");
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

fn is_boilerplate(text: &str) -> bool {
    BOILERPLATE_PREFIXES
        .iter()
        .any(|prefix| text.starts_with(prefix))
        || text.to_lowercase().contains("disambiguation")
}

/// Last-resort extraction: naive sentence splitting of the whole container.
fn sentence_fallback(all_text: &str) -> Vec<String> {
    SENTENCE_SPLIT_RE
        .split(all_text)
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .take(SENTENCE_FALLBACK_CAP)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wikipedia_url() {
        assert!(is_wikipedia_url("https://en.wikipedia.org/wiki/Rust"));
        assert!(is_wikipedia_url("HTTPS://EN.WIKIPEDIA.ORG/wiki/Rust"));
        assert!(!is_wikipedia_url("https://example.com/wiki/Rust"));
        assert!(!is_wikipedia_url("not a url"));
    }

    #[test]
    fn test_clean_paragraph_strips_citations_and_whitespace() {
        let cleaned = clean_paragraph("Rust[1] is  a language[2]\n valued[note1] widely.");
        assert_eq!(cleaned, "Rust is a language valued widely.");
    }

    #[test]
    fn test_clean_paragraph_has_no_double_spaces() {
        let cleaned = clean_paragraph("a[1] b[2] c[3]   d");
        assert!(!cleaned.contains("  "));
    }

    #[test]
    fn test_is_boilerplate() {
        assert!(is_boilerplate("This article is about the metal."));
        assert!(is_boilerplate("For other uses, see Iron (disambiguation)."));
        assert!(is_boilerplate("In other projects"));
        assert!(is_boilerplate("See the Disambiguation page for details."));
        assert!(!is_boilerplate("Iron is a chemical element."));
    }

    #[test]
    fn test_excluded_subtree_predicate() {
        let html = Html::parse_fragment(
            r#"<div><table><tr><td>cell</td></tr></table><div class="navbox inner">nav</div><p>prose</p></div>"#,
        );
        let table_sel = Selector::parse("table").unwrap();
        let navbox_sel = Selector::parse("div.navbox").unwrap();
        let p_sel = Selector::parse("p").unwrap();

        let table = html.select(&table_sel).next().unwrap();
        let navbox = html.select(&navbox_sel).next().unwrap();
        let paragraph = html.select(&p_sel).next().unwrap();

        assert!(is_excluded(&table));
        assert!(is_excluded(&navbox));
        assert!(!is_excluded(&paragraph));
    }

    #[test]
    fn test_visible_text_skips_denylisted_children() {
        let html = Html::parse_fragment(
            r#"<p>Rust is a language<sup class="reference">[1]</sup> for systems.</p>"#,
        );
        let p_sel = Selector::parse("p").unwrap();
        let paragraph = html.select(&p_sel).next().unwrap();

        let text = visible_text(paragraph);
        assert!(text.contains("Rust is a language"));
        assert!(!text.contains("[1]"));
    }

    #[test]
    fn test_sentence_fallback_filters_and_caps() {
        let long = "This sentence is certainly longer than thirty characters in total";
        let text = std::iter::repeat(long)
            .take(30)
            .collect::<Vec<_>>()
            .join(". ")
            + ". no! tiny?";

        let sentences = sentence_fallback(&text);
        assert_eq!(sentences.len(), SENTENCE_FALLBACK_CAP);
        assert!(sentences.iter().all(|s| s.chars().count() > MIN_SENTENCE_CHARS));
    }

    #[test]
    fn test_extract_article_unknown_title_default() {
        let body: String = format!(
            "<html><body><div id=\"mw-content-text\">{}</div></body></html>",
            "<p>This paragraph has plenty of characters to pass the length filter for prose, easily.</p>".repeat(3)
        );
        let article = extract_article(&body).unwrap();
        assert_eq!(article.title, "Unknown Title");
    }

    #[test]
    fn test_extract_article_reads_title_from_first_heading() {
        let paragraph = "This paragraph carries enough prose characters to clear the fifty character minimum.";
        let html = crate::test_utils::fixtures::wiki_article_html(
            "Test Subject",
            &[paragraph, paragraph, paragraph],
        );

        let article = extract_article(&html).unwrap();
        assert_eq!(article.title, "Test Subject");
        assert!(article.content.starts_with("This paragraph carries"));
    }

    #[test]
    fn test_extract_article_fails_on_short_content() {
        let html = "<html><body><div id=\"mw-content-text\"><p>Too short.</p></div></body></html>";
        let err = extract_article(html).unwrap_err();
        assert!(matches!(err, AppError::ExtractionError(_)));
    }
}

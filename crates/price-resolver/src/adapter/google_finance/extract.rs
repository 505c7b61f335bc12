//! Pure extraction strategies for the scraped quote page.
//!
//! The page markup shifts under us regularly, so extraction is an explicit
//! ordered cascade rather than a single selector: each strategy is a pure
//! function over the document text, independently testable against fixed
//! HTML fixtures. The first strategy to yield text wins; the text still has
//! to survive normalization before it counts as a price.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

lazy_static! {
    /// Currency-preceded numeric pattern across the common glyphs.
    static ref CURRENCY_PRICE_RE: Regex =
        Regex::new(r"[$€£¥]\s?\d[\d.,]*").expect("currency price pattern is valid");

    /// Plain decimal, the shape quote pages put in price-bearing meta tags.
    static ref PLAIN_DECIMAL_RE: Regex =
        Regex::new(r"^\d+\.\d{1,4}$").expect("plain decimal pattern is valid");

    /// Price container identified by its stable class-name pair.
    static ref PRICE_CONTAINER: Selector =
        Selector::parse("div.YMlKec.fxKbKc").expect("price container selector is valid");

    static ref META_TAG: Selector =
        Selector::parse("meta[content]").expect("meta selector is valid");
}

/// One extraction stage: document text in, candidate price text out.
pub(super) type Strategy = fn(&str) -> Option<String>;

/// The cascade, in the order the stages are attempted.
pub(super) const STRATEGIES: &[(&str, Strategy)] = &[
    ("price-container", price_container),
    ("currency-glyph", currency_glyph),
    ("meta-content", meta_content),
];

/// Run the cascade; returns the winning stage's name and extracted text.
pub(super) fn extract_price_text(html: &str) -> Option<(&'static str, String)> {
    for (name, strategy) in STRATEGIES {
        if let Some(text) = strategy(html) {
            return Some((name, text));
        }
    }
    None
}

/// Stage 1: the known price-container markup pattern.
fn price_container(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let element = document.select(&PRICE_CONTAINER).next()?;
    let text: String = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Stage 2: first currency-preceded number anywhere in the document.
fn currency_glyph(html: &str) -> Option<String> {
    CURRENCY_PRICE_RE
        .find(html)
        .map(|m| m.as_str().to_string())
}

/// Stage 3: a `<meta>` tag whose content attribute is a plain decimal.
fn meta_content(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&META_TAG)
        .filter_map(|element| element.value().attr("content"))
        .find(|content| PLAIN_DECIMAL_RE.is_match(content.trim()))
        .map(|content| content.trim().to_string())
}

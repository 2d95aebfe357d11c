//! Field extraction from listing detail pages
//!
//! Turns a fetched document into a [`ListingRecord`]. Extraction is pure
//! and deterministic given the same document; every field defaults to
//! absent when its markup is missing or unparseable.
//!
//! The markup uses generated class names ("title--3yncE", "amount--2vZk1"),
//! so elements are matched by class prefix rather than exact class.

mod record;

pub use record::ListingRecord;

use crate::config::{LabeledField, LocaleConfig};
use crate::locale::{normalize_digits, resolve_timestamp};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

/// Extracts a structured record from a detail page
///
/// `url` is the record key and is also used to recognize non-listing pages
/// (an ad-creation form link carries `post-ad?`). `now` supplies both the
/// reference year for timestamp resolution and the scraped date.
pub fn extract_listing(
    html: &str,
    url: &str,
    locale: &LocaleConfig,
    now: NaiveDateTime,
) -> ListingRecord {
    let document = Html::parse_document(html);

    let (published_time, published_date) = extract_timestamp(&document, url, locale, now);
    let locations = extract_locations(&document);
    let mut labeled = extract_labeled_fields(&document, locale);

    ListingRecord {
        url: url.to_string(),
        title: extract_title(&document),
        price: extract_price(&document, locale),
        published_time,
        published_date,
        seller_name: extract_seller_name(&document),
        location: locations.first().cloned(),
        division: locations.get(1).cloned(),
        condition: labeled.remove(&LabeledField::Condition),
        model: labeled.remove(&LabeledField::Model),
        brand: labeled.remove(&LabeledField::Brand),
        features: extract_features(&document),
        description: extract_description(&document),
        image_urls: extract_images(&document, locale),
        scraped_date: now.format("%Y-%m-%d").to_string(),
    }
}

/// Collects an element's text content, trimmed
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// True when any individual class token on the element starts with `prefix`
///
/// An attribute-substring selector alone would also match the attribute as
/// a whole, so `class="ltr amount--x"` needs this second, per-token check.
fn has_class_prefix(element: &ElementRef, prefix: &str) -> bool {
    element.value().classes().any(|class| class.starts_with(prefix))
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"h1[class*="title--"]"#).ok()?;
    document
        .select(&selector)
        .find(|el| has_class_prefix(el, "title--"))
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Parses the price block into a currency-normalized integer
///
/// Strips the currency glyph, thousands separators, and whitespace before
/// translating native digits. Any leftover non-numeric character makes the
/// field absent, as does a negative amount.
fn extract_price(document: &Html, locale: &LocaleConfig) -> Option<i64> {
    let selector = Selector::parse(r#"div[class*="amount"]"#).ok()?;
    let block = document
        .select(&selector)
        .find(|el| has_class_prefix(el, "amount"))?;
    let raw = element_text(block);

    let cleaned: String = normalize_digits(&raw, locale)
        .chars()
        .filter(|c| *c != '৳' && *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.parse::<i64>() {
        Ok(price) if price >= 0 => Some(price),
        Ok(price) => {
            tracing::debug!("Rejecting negative price {} from {:?}", price, raw);
            None
        }
        Err(e) => {
            tracing::debug!("Could not parse price {:?}: {}", raw, e);
            None
        }
    }
}

/// Locates the posted-at phrase and resolves it to (time, date)
///
/// The phrase sits between the marker and the next comma. Ad-creation form
/// pages are skipped without logging.
fn extract_timestamp(
    document: &Html,
    url: &str,
    locale: &LocaleConfig,
    now: NaiveDateTime,
) -> (Option<String>, Option<String>) {
    if url.contains("post-ad?") {
        return (None, None);
    }

    let text = document.root_element().text().collect::<Vec<_>>().join(" ");

    let Some(start) = text.find(&locale.posted_marker) else {
        tracing::debug!("Posted-at marker not found for {}", url);
        return (None, None);
    };

    let rest = &text[start + locale.posted_marker.len()..];
    let phrase = rest.split(',').next().unwrap_or("").trim();

    match resolve_timestamp(phrase, now, locale) {
        Some((time, date)) => (Some(time), Some(date)),
        None => {
            tracing::debug!("Unresolvable posted-at phrase {:?} for {}", phrase, url);
            (None, None)
        }
    }
}

/// Reads the location hierarchy from the subtitle block
///
/// The first anchor is the location, the second (when present) the
/// division.
fn extract_locations(document: &Html) -> Vec<String> {
    let Ok(wrapper_selector) = Selector::parse(r#"div[class*="subtitle-wrapper"]"#) else {
        return Vec::new();
    };
    let Ok(link_selector) = Selector::parse(r#"a[class*="subtitle-location-link"]"#) else {
        return Vec::new();
    };

    document
        .select(&wrapper_selector)
        .next()
        .map(|wrapper| wrapper.select(&link_selector).map(element_text).collect())
        .unwrap_or_default()
}

/// Scans container elements for known labels and reads the adjacent value
///
/// A div whose exact text matches a configured label (e.g. "কন্ডিশন:")
/// takes the text of its next sibling div as the field value. Unmatched
/// labels leave their fields absent.
fn extract_labeled_fields(
    document: &Html,
    locale: &LocaleConfig,
) -> HashMap<LabeledField, String> {
    let mut fields = HashMap::new();
    let Ok(selector) = Selector::parse("div") else {
        return fields;
    };

    for div in document.select(&selector) {
        let text = element_text(div);
        if let Some(field) = locale.labels.get(&text) {
            if let Some(value) = next_sibling_div_text(div) {
                fields.insert(*field, value);
            }
        }
    }

    fields
}

/// Text of the next sibling element that is a div, skipping other nodes
fn next_sibling_div_text(element: ElementRef) -> Option<String> {
    let mut node = element.next_sibling();
    while let Some(sibling) = node {
        if let Some(sibling_element) = ElementRef::wrap(sibling) {
            if sibling_element.value().name() == "div" {
                return Some(element_text(sibling_element));
            }
        }
        node = sibling.next_sibling();
    }
    None
}

fn extract_features(document: &Html) -> Option<String> {
    let container = Selector::parse(r#"div[class*="features"]"#).ok()?;
    let paragraph = Selector::parse("p").ok()?;
    document
        .select(&container)
        .find(|el| has_class_prefix(el, "features"))?
        .select(&paragraph)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Joins all non-empty description paragraphs with newlines
fn extract_description(document: &Html) -> Option<String> {
    let container = Selector::parse(r#"div[class*="description"]"#).ok()?;
    let paragraph = Selector::parse("p").ok()?;

    let paragraphs: Vec<String> = document
        .select(&container)
        .find(|el| has_class_prefix(el, "description"))?
        .select(&paragraph)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n"))
    }
}

fn extract_seller_name(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"div[class*="contact-name"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// All image sources except seller avatars, in document order
fn extract_images(document: &Html, locale: &LocaleConfig) -> Vec<String> {
    let Ok(selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.starts_with(&locale.avatar_prefix))
        .map(|src| src.to_string())
        .collect()
}

//! Field extraction against parsed HTML.
//!
//! The one policy that matters here: extraction never fails the caller.
//! A missing selection target degrades to the spec's default (or to plain
//! omission), and an unparsable selector behaves like a missing target.

pub mod detail;
pub mod row;

use scraper::{ElementRef, Selector};

/// Text normalization applied to an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    /// Strip surrounding whitespace.
    Trim,
    /// Turn a human label into a record key: trim, drop colons, lowercase,
    /// spaces to underscores.
    Keyify,
}

/// Declarative rule for pulling one field out of a document subtree.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Record key the value lands under.
    pub name: &'static str,
    /// CSS selection path, resolved under the given scope.
    pub selector: &'static str,
    /// Read this attribute instead of the element text.
    pub attr: Option<&'static str>,
    /// Value used when the path resolves to nothing. `None` means the
    /// field is omitted rather than defaulted.
    pub default: Option<&'static str>,
    pub normalize: Normalize,
}

/// Best-effort extraction of a single scalar. Returns the spec default when
/// the path (or the requested attribute) resolves to nothing.
pub fn extract(scope: ElementRef<'_>, spec: &FieldSpec) -> Option<String> {
    let Ok(selector) = Selector::parse(spec.selector) else {
        return spec.default.map(str::to_owned);
    };
    let Some(element) = scope.select(&selector).next() else {
        return spec.default.map(str::to_owned);
    };
    let raw = match spec.attr {
        Some(name) => match element.value().attr(name) {
            Some(value) => value.to_owned(),
            None => return spec.default.map(str::to_owned),
        },
        None => element.text().collect::<String>(),
    };
    Some(match spec.normalize {
        Normalize::Trim => raw.trim().to_owned(),
        Normalize::Keyify => keyify(&raw),
    })
}

/// `"Date of birth:"` -> `"date_of_birth"`.
pub fn keyify(s: &str) -> String {
    s.trim().replace(':', "").to_lowercase().replace(' ', "_")
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

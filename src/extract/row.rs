//! Listing-row extraction.
//!
//! Each listing variant describes its layout with a [`RowSpec`]: which
//! element anchors the row, which positional columns carry which fields,
//! and how to find the club. The extractor itself is variant-agnostic.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::extract::{FieldSpec, Normalize, element_text, extract};
use crate::record::{EntityRecord, FieldValue};

static NAME_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.hauptlink a").unwrap());
static INLINE_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td table.inline-table").unwrap());
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static CLUB_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"td a[href*="/verein/"]"#).unwrap());

/// Where the name/profile anchor lives in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLayout {
    /// Name and position sit in a nested `table.inline-table`
    /// (the top-value listing).
    InlineTable,
    /// Name link is a direct `td.hauptlink a` cell (the under-21 listings).
    DirectLink,
}

/// Column map and selectors for one listing variant.
#[derive(Debug, Clone)]
pub struct RowSpec {
    /// Selector for the listing rows themselves.
    pub row_selector: &'static str,
    pub name_layout: NameLayout,
    /// Positional column for the player position (`DirectLink` layouts).
    pub position_col: Option<usize>,
    pub age_col: Option<usize>,
    /// Club crest image; its alt text is the preferred club name.
    pub crest_selector: &'static str,
    /// Fall back to a club-page anchor when the crest is absent.
    pub club_link_fallback: bool,
    pub market_value: FieldSpec,
    /// Per-row statistics columns, `(record key, td index)`, default `"0"`.
    pub stat_cols: &'static [(&'static str, usize)],
}

/// Parses one listing row. `None` means the mandatory name anchor could not
/// be located; every other field degrades to its default instead.
pub fn extract_row(
    row: ElementRef<'_>,
    spec: &RowSpec,
    site_root: &str,
) -> Option<EntityRecord> {
    let (name, href, inline_position) = match spec.name_layout {
        NameLayout::InlineTable => {
            let info = row.select(&INLINE_TABLE).next()?;
            let link = info.select(&NAME_LINK).next()?;
            let href = link.value().attr("href")?.to_owned();
            let position = info
                .select(&TR)
                .nth(1)
                .and_then(|tr| tr.select(&TD).next())
                .map(|td| element_text(&td));
            (element_text(&link), href, position)
        }
        NameLayout::DirectLink => {
            let link = row.select(&NAME_LINK).next()?;
            let href = link.value().attr("href")?.to_owned();
            (element_text(&link), href, None)
        }
    };

    let cells: Vec<String> = row.select(&TD).map(|td| element_text(&td)).collect();

    let position = match spec.name_layout {
        NameLayout::InlineTable => inline_position,
        NameLayout::DirectLink => spec
            .position_col
            .and_then(|i| cells.get(i))
            .cloned(),
    }
    .unwrap_or_else(|| "Unknown".to_owned());

    let crest = FieldSpec {
        name: "club",
        selector: spec.crest_selector,
        attr: Some("alt"),
        default: None,
        normalize: Normalize::Trim,
    };
    let club = extract(row, &crest)
        .or_else(|| {
            if spec.club_link_fallback {
                row.select(&CLUB_LINK).next().map(|a| element_text(&a))
            } else {
                None
            }
        })
        .unwrap_or_else(|| "Unknown club".to_owned());

    let market_value = extract(row, &spec.market_value)
        .unwrap_or_else(|| "Not specified".to_owned());

    let mut record = EntityRecord::new();
    record.insert("name".to_owned(), FieldValue::text(name));
    record.insert("position".to_owned(), FieldValue::text(position));
    if let Some(i) = spec.age_col {
        let age = cells.get(i).cloned().unwrap_or_else(|| "Unknown".to_owned());
        record.insert("age".to_owned(), FieldValue::text(age));
    }
    record.insert("club".to_owned(), FieldValue::text(club));
    record.insert(
        spec.market_value.name.to_owned(),
        FieldValue::text(market_value),
    );
    record.insert(
        "profile_url".to_owned(),
        FieldValue::text(format!("{site_root}{href}")),
    );
    for (key, index) in spec.stat_cols {
        let value = cells.get(*index).cloned().unwrap_or_else(|| "0".to_owned());
        record.insert((*key).to_owned(), FieldValue::text(value));
    }
    Some(record)
}

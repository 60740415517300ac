//! Detail-page enrichment.
//!
//! Two passes over a biography document: the bulk pass pairs up the generic
//! info-table label/value spans, and the targeted pass re-reads a fixed set
//! of labels through the label-proximity mechanism so those fields always
//! land under their canonical keys. The targeted pass runs last and wins
//! key collisions.
//!
//! A second entry point parses the per-competition statistics document
//! instead of the biography.

use std::sync::LazyLock;

use indexmap::IndexMap;
use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ScrapeError;
use crate::extract::{element_text, keyify};
use crate::fetch::Fetcher;
use crate::record::StatsTable;

static INFO_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.info-table").unwrap());
static LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.info-table__content").unwrap());
static BOLD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.info-table__content--bold").unwrap());
static CURRENT_VALUE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.tm-market-value-development-graph-small .current-value").unwrap()
});
static STAT_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.items > tbody > tr:not(.bg_grey)").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// A statistics row under this many columns is malformed and skipped whole.
const MIN_STAT_COLUMNS: usize = 13;

const STAT_COLS: &[(&str, usize)] = &[
    ("matches", 3),
    ("goals", 4),
    ("assists", 5),
    ("minutes_played", 6),
    ("yellow_cards", 7),
    ("second_yellows", 8),
    ("red_cards", 9),
    ("goals_conceded", 10),
    ("clean_sheets", 11),
];

/// Goalkeeping columns render a dash when inapplicable; the original
/// pipeline treats that as zero and we keep that behavior.
const DASH_AS_ZERO: &[&str] = &["goals_conceded", "clean_sheets"];

/// Which detail fields a variant wants guaranteed canonical keys for.
#[derive(Debug, Clone)]
pub struct DetailSpec {
    /// Also read the small market-value widget outside the info table.
    pub market_value: bool,
    /// `(record key, label phrase)` pairs for the targeted pass.
    pub targeted: &'static [(&'static str, &'static str)],
}

/// Fetches and parses a biography page. A non-success status yields an
/// empty mapping; only a transport failure is an error.
pub fn enrich(
    fetcher: &dyn Fetcher,
    spec: &DetailSpec,
    url: &str,
) -> Result<IndexMap<String, String>, ScrapeError> {
    let response = fetcher.fetch(url)?;
    if !response.is_success() {
        return Ok(IndexMap::new());
    }
    Ok(parse_detail(&response.body, spec))
}

/// Fetches and parses the competition-by-competition statistics page for a
/// profile URL. Same failure contract as [`enrich`].
pub fn enrich_stats(fetcher: &dyn Fetcher, url: &str) -> Result<StatsTable, ScrapeError> {
    let stats_url = url.replace("/profil/", "/leistungsdatendetails/");
    let response = fetcher.fetch(&stats_url)?;
    if !response.is_success() {
        return Ok(StatsTable::new());
    }
    Ok(parse_stats(&response.body))
}

/// Both extraction passes over an already-fetched biography document.
pub fn parse_detail(body: &str, spec: &DetailSpec) -> IndexMap<String, String> {
    let doc = Html::parse_document(body);
    let mut details = IndexMap::new();

    // Bulk pass: label/value spans pair up two at a time inside the info
    // table; a dangling final label has no pair and is dropped.
    if let Some(table) = doc.select(&INFO_TABLE).next() {
        let spans: Vec<String> = table.select(&LABEL).map(|el| element_text(&el)).collect();
        for pair in spans.chunks_exact(2) {
            details.insert(keyify(&pair[0]), pair[1].clone());
        }
    }

    if spec.market_value {
        if let Some(value) = doc.select(&CURRENT_VALUE).next() {
            details.insert("market_value".to_owned(), element_text(&value));
        }
    }

    // Targeted pass, applied last so it overwrites bulk keys on collision.
    for (key, phrase) in spec.targeted {
        if let Some(value) = labelled_value(&doc, phrase) {
            details.insert((*key).to_owned(), value);
        }
    }

    details
}

/// Parses the statistics document into competition -> stats record.
pub fn parse_stats(body: &str) -> StatsTable {
    let doc = Html::parse_document(body);
    let mut table = StatsTable::new();
    for row in doc.select(&STAT_ROWS) {
        let cells: Vec<String> = row.select(&TD).map(|td| element_text(&td)).collect();
        if cells.len() < MIN_STAT_COLUMNS {
            continue;
        }
        let competition = cells[2].clone();
        let mut stats = IndexMap::new();
        for (key, index) in STAT_COLS {
            let mut value = cells[*index].clone();
            if value == "-" && DASH_AS_ZERO.contains(key) {
                value = "0".to_owned();
            }
            stats.insert((*key).to_owned(), value);
        }
        table.insert(competition, stats);
    }
    table
}

/// Label-proximity read: locate the label span containing `phrase`, then
/// return the text of the next bold value span in document order.
pub fn labelled_value(doc: &Html, phrase: &str) -> Option<String> {
    locate_label(doc, phrase).and_then(next_bold_value)
}

fn locate_label<'a>(doc: &'a Html, phrase: &str) -> Option<ElementRef<'a>> {
    doc.select(&LABEL)
        .find(|el| el.text().collect::<String>().contains(phrase))
}

fn next_bold_value(label: ElementRef<'_>) -> Option<String> {
    let mut node = *label;
    while let Some(next) = next_in_document(node) {
        if let Some(el) = ElementRef::wrap(next) {
            if BOLD.matches(&el) {
                return Some(element_text(&el));
            }
        }
        node = next;
    }
    None
}

/// Document-order successor: first child, else next sibling, else the next
/// sibling of the nearest ancestor that has one.
fn next_in_document<'a>(node: NodeRef<'a, Node>) -> Option<NodeRef<'a, Node>> {
    if let Some(child) = node.first_child() {
        return Some(child);
    }
    let mut current = node;
    loop {
        if let Some(sibling) = current.next_sibling() {
            return Some(sibling);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;

    const BIO_SPEC: DetailSpec = DetailSpec {
        market_value: false,
        targeted: &[
            ("nationality", "Citizenship"),
            ("birth_date", "Date of birth"),
        ],
    };

    #[test]
    fn bulk_pass_pairs_labels_and_drops_dangling_label() {
        let body = r#"
            <div class="info-table">
              <span class="info-table__content info-table__content--regular">Date of birth:</span>
              <span class="info-table__content info-table__content--bold">1 Jan 2000</span>
              <span class="info-table__content info-table__content--regular">Place of birth:</span>
            </div>"#;
        let spec = DetailSpec { market_value: false, targeted: &[] };
        let details = parse_detail(body, &spec);
        assert_eq!(details.get("date_of_birth").map(String::as_str), Some("1 Jan 2000"));
        assert!(!details.contains_key("place_of_birth"));
        assert_eq!(details.len(), 1);
    }

    #[test]
    fn targeted_pass_wins_key_collisions() {
        // The bulk pair for this label carries a stale value; the targeted
        // pass must replace it.
        let body = r#"
            <div class="info-table">
              <span class="info-table__content">Date of birth:</span>
              <span class="info-table__content">wrong</span>
            </div>
            <span class="info-table__content">Date of birth</span>
            <span class="info-table__content info-table__content--bold">1 Jan 2000</span>"#;
        let spec = DetailSpec {
            market_value: false,
            targeted: &[("date_of_birth", "Date of birth")],
        };
        let details = parse_detail(body, &spec);
        assert_eq!(details.get("date_of_birth").map(String::as_str), Some("1 Jan 2000"));
    }

    #[test]
    fn targeted_label_missing_means_field_omitted() {
        let body = r#"<div class="info-table"></div>"#;
        let details = parse_detail(body, &BIO_SPEC);
        assert!(!details.contains_key("nationality"));
        assert!(!details.contains_key("birth_date"));
    }

    #[test]
    fn label_without_following_bold_value_is_omitted() {
        let body = r#"
            <span class="info-table__content">Citizenship:</span>
            <span class="info-table__content">plain, not bold</span>"#;
        let doc = Html::parse_document(body);
        assert_eq!(labelled_value(&doc, "Citizenship"), None);
    }

    #[test]
    fn bold_value_may_sit_outside_the_label_parent() {
        let body = r#"
            <div><span class="info-table__content">Height:</span></div>
            <div><span class="info-table__content info-table__content--bold">1,88 m</span></div>"#;
        let doc = Html::parse_document(body);
        assert_eq!(labelled_value(&doc, "Height").as_deref(), Some("1,88 m"));
    }

    #[test]
    fn market_value_widget_read_when_enabled() {
        let body = r#"
            <div class="tm-market-value-development-graph-small">
              <div class="current-value">€90.00m</div>
            </div>"#;
        let spec = DetailSpec { market_value: true, targeted: &[] };
        let details = parse_detail(body, &spec);
        assert_eq!(details.get("market_value").map(String::as_str), Some("€90.00m"));
    }

    fn stats_row(cols: &[&str]) -> String {
        let tds: String = cols.iter().map(|c| format!("<td>{c}</td>")).collect();
        format!("<tr>{tds}</tr>")
    }

    #[test]
    fn dash_normalizes_to_zero_only_for_goalkeeping_columns() {
        let row = stats_row(&[
            "1", "logo", "LaLiga", "30", "-", "8", "2500", "3", "0", "1", "-", "-", "x",
        ]);
        let body = format!(r#"<table class="items"><tbody>{row}</tbody></table>"#);
        let table = parse_stats(&body);
        let stats = table.get("LaLiga").unwrap();
        assert_eq!(stats.get("goals_conceded").map(String::as_str), Some("0"));
        assert_eq!(stats.get("clean_sheets").map(String::as_str), Some("0"));
        // Not exempted: a dash in the goals column stays a dash.
        assert_eq!(stats.get("goals").map(String::as_str), Some("-"));
    }

    #[test]
    fn short_rows_and_spacer_rows_are_skipped() {
        let good = stats_row(&[
            "1", "logo", "Champions League", "8", "4", "2", "700", "1", "0", "0", "5", "2", "x",
        ]);
        let short = stats_row(&["only", "three", "cells"]);
        let body = format!(
            r#"<table class="items"><tbody>
                {good}
                {short}
                <tr class="bg_grey">{}</tr>
            </tbody></table>"#,
            "<td>s</td>".repeat(13),
        );
        let table = parse_stats(&body);
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("Champions League"));
    }

    #[test]
    fn non_success_detail_fetch_yields_empty_mapping() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert("https://test.local/x/profil/spieler/1", 503, "");
        let details = enrich(&fetcher, &BIO_SPEC, "https://test.local/x/profil/spieler/1").unwrap();
        assert!(details.is_empty());
    }

    #[test]
    fn stats_url_rewrites_profile_segment() {
        let row = stats_row(&[
            "1", "logo", "Serie A", "10", "2", "1", "800", "0", "0", "0", "9", "3", "x",
        ]);
        let body = format!(r#"<table class="items"><tbody>{row}</tbody></table>"#);
        let mut fetcher = StaticFetcher::new();
        fetcher.insert(
            "https://test.local/x/leistungsdatendetails/spieler/1",
            200,
            &body,
        );
        let table =
            enrich_stats(&fetcher, "https://test.local/x/profil/spieler/1").unwrap();
        assert!(table.contains_key("Serie A"));
    }

    #[test]
    fn transport_failure_propagates_to_caller() {
        let mut fetcher = StaticFetcher::new();
        fetcher.break_url("https://test.local/x/profil/spieler/1");
        let result = enrich(&fetcher, &BIO_SPEC, "https://test.local/x/profil/spieler/1");
        assert!(result.is_err());
    }
}

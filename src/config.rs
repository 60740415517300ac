//! Crawl configuration: listing URL templates, column maps, detail field
//! sets, and rate-limit delays for the three supported listings.

use std::time::Duration;

use crate::extract::detail::DetailSpec;
use crate::extract::row::{NameLayout, RowSpec};
use crate::extract::{FieldSpec, Normalize};

/// Delay after each captured row, to bound the request rate.
pub const ROW_DELAY: Duration = Duration::from_secs(2);
/// Delay after each completed page, before the next page request.
pub const PAGE_DELAY: Duration = Duration::from_secs(5);
/// The crawl runs for a fixed page count; it does not probe for the end.
pub const DEFAULT_TOTAL_PAGES: u32 = 20;

/// The two listing URL-template families. They are mechanically different
/// on the site (an AJAX panel path vs. a plain query parameter) and must
/// not be interchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    /// Page 1 is the bare listing URL; page N appends
    /// `/plus/?ajax=yw1&page=N`.
    AjaxPanel,
    /// Page 1 is the bare listing URL; page N appends `&page=N`.
    QueryParam,
}

/// Per-entity detail fetch performed inside the row loop.
#[derive(Debug, Clone)]
pub enum Detail {
    Off,
    /// Biography page: bulk info-table pass plus targeted labels.
    Biography(DetailSpec),
    /// Per-competition statistics page, stored under `competitions`.
    CompetitionStats,
}

/// Everything one pipeline instance needs: where to page, how to read a
/// row, what to enrich with, and how hard to throttle.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The page-1 listing URL.
    pub listing_url: String,
    /// Site origin, prepended to relative profile hrefs.
    pub site_root: String,
    pub page_style: PageStyle,
    pub total_pages: u32,
    pub row: RowSpec,
    pub detail: Detail,
    pub row_delay: Duration,
    pub page_delay: Duration,
}

impl CrawlConfig {
    /// Request target for a 1-based page number. Page 1 is always the raw
    /// listing URL; the two template families differ only from page 2 on.
    pub fn page_url(&self, page: u32) -> String {
        if page <= 1 {
            return self.listing_url.clone();
        }
        match self.page_style {
            PageStyle::AjaxPanel => {
                format!("{}/plus/?ajax=yw1&page={page}", self.listing_url)
            }
            PageStyle::QueryParam => format!("{}&page={page}", self.listing_url),
        }
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = total_pages;
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    /// Override the rate-limit floors (tests run with zero delays).
    pub fn with_delays(mut self, row_delay: Duration, page_delay: Duration) -> Self {
        self.row_delay = row_delay;
        self.page_delay = page_delay;
        self
    }
}

/// Top-value players: inline-table rows, AJAX pager, biographical
/// enrichment including the market-value widget.
pub fn top_players() -> CrawlConfig {
    CrawlConfig {
        listing_url:
            "https://www.transfermarkt.fr/spieler-statistik/wertvollstespieler/marktwertetop"
                .to_owned(),
        site_root: "https://www.transfermarkt.fr".to_owned(),
        page_style: PageStyle::AjaxPanel,
        total_pages: DEFAULT_TOTAL_PAGES,
        row: RowSpec {
            row_selector: "table.items > tbody > tr",
            name_layout: NameLayout::InlineTable,
            position_col: None,
            age_col: None,
            crest_selector: "td.zentriert img.tiny_wappen",
            club_link_fallback: false,
            market_value: FieldSpec {
                name: "value",
                selector: "td.rechts.hauptlink a",
                attr: None,
                default: Some("Not specified"),
                normalize: Normalize::Trim,
            },
            stat_cols: &[],
        },
        detail: Detail::Biography(DetailSpec {
            market_value: true,
            targeted: &[
                ("birth_date", "Date of birth"),
                ("nationality", "Citizenship"),
                ("contract_expires", "Contract expires"),
            ],
        }),
        row_delay: ROW_DELAY,
        page_delay: PAGE_DELAY,
    }
}

/// Under-21 players with the full match-statistics column set. The
/// per-competition breakdown is available via
/// `with_detail(Detail::CompetitionStats)` but is off by default.
pub fn young_player_stats() -> CrawlConfig {
    CrawlConfig {
        listing_url: "https://www.transfermarkt.com/spieler-statistik/wertvollstespieler/marktwertetop?land_id=0&ausrichtung=alle&spielerposition_id=alle&altersklasse=u21&jahrgang=0&kontinent_id=0&plus=1".to_owned(),
        site_root: "https://www.transfermarkt.com".to_owned(),
        page_style: PageStyle::QueryParam,
        total_pages: DEFAULT_TOTAL_PAGES,
        row: RowSpec {
            row_selector: "table.items > tbody > tr:not(.thead)",
            name_layout: NameLayout::DirectLink,
            position_col: Some(1),
            age_col: Some(3),
            crest_selector: "td img.tiny_wappen",
            club_link_fallback: true,
            market_value: FieldSpec {
                name: "market_value",
                selector: "td.rechts.hauptlink",
                attr: None,
                default: Some("Not specified"),
                normalize: Normalize::Trim,
            },
            stat_cols: &[
                ("matches", 4),
                ("goals", 5),
                ("assists", 6),
                ("yellow_cards", 7),
                ("second_yellows", 8),
                ("red_cards", 9),
                ("minutes_played", 10),
                ("goals_conceded", 11),
                ("clean_sheets", 12),
            ],
        },
        detail: Detail::Off,
        row_delay: ROW_DELAY,
        page_delay: PAGE_DELAY,
    }
}

/// Under-21 talents: gallery listing, biographical + physical enrichment.
pub fn young_talents() -> CrawlConfig {
    CrawlConfig {
        listing_url: "https://www.transfermarkt.com/spieler-statistik/wertvollstespieler/marktwertetop/plus/0/galerie/0?ausrichtung=alle&spielerposition_id=alle&altersklasse=u21&jahrgang=0&land_id=0&kontinent_id=0&yt0=Anzeigen".to_owned(),
        site_root: "https://www.transfermarkt.com".to_owned(),
        page_style: PageStyle::QueryParam,
        total_pages: DEFAULT_TOTAL_PAGES,
        row: RowSpec {
            row_selector: "table.items > tbody > tr:not(.thead)",
            name_layout: NameLayout::DirectLink,
            position_col: Some(1),
            age_col: Some(3),
            crest_selector: "td img.tiny_wappen",
            club_link_fallback: false,
            market_value: FieldSpec {
                name: "market_value",
                selector: "td.rechts.hauptlink",
                attr: None,
                default: Some("Not specified"),
                normalize: Normalize::Trim,
            },
            stat_cols: &[],
        },
        detail: Detail::Biography(DetailSpec {
            market_value: false,
            targeted: &[
                ("nationality", "Citizenship"),
                ("birth_date", "Date of birth"),
                ("preferred_foot", "Foot"),
                ("height", "Height"),
                ("youth_clubs", "Youth clubs"),
            ],
        }),
        row_delay: ROW_DELAY,
        page_delay: PAGE_DELAY,
    }
}

//! Fetching fresh augment statistics from the Mobalytics tier list.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use super::model::{AugmentStats, Rank, ReferenceTable, TierSlot};
use super::store::SettingsStore;
use crate::log;
use crate::ocr::strip_legend_marker;

const TIER_LIST_URL: &str = "https://app.mobalytics.gg/tft/tier-list/augments";

/// CSS classes of the tier list markup.
const CONTAINER_CLASS: &str = "m-ub27pe";
const NAME_CLASS: &str = "m-po6via";
const STAT_CLASS: &str = "m-virx8l";

/// A source of reference statistics for one rank and tier slot.
pub trait StatsSource {
    fn fetch(&self, rank: Rank, slot: TierSlot) -> Result<ReferenceTable>;
}

/// Scrapes the public Mobalytics augment tier list.
pub struct MobalyticsSource {
    client: reqwest::blocking::Client,
}

impl MobalyticsSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("tft-augments-helper")
            .build()?;
        Ok(Self { client })
    }
}

impl StatsSource for MobalyticsSource {
    fn fetch(&self, rank: Rank, slot: TierSlot) -> Result<ReferenceTable> {
        let url = format!("{}?rank={}&tier={}", TIER_LIST_URL, rank, slot);
        log(&format!("Getting stats from {} {}", rank, slot));

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to retrieve stats for {} tier {}: HTTP {}",
                rank,
                slot,
                response.status()
            ));
        }

        let html = response.text()?;
        parse_tier_list(&html)
    }
}

/// Extracts augment rows from the tier list HTML.
///
/// Each augment container holds a name cell and three stat cells in the
/// order average placement, win rate, pick rate. Containers missing any of
/// these are skipped.
pub fn parse_tier_list(html: &str) -> Result<ReferenceTable> {
    let container = class_selector(CONTAINER_CLASS)?;
    let name_cell = class_selector(NAME_CLASS)?;
    let stat_cell = class_selector(STAT_CLASS)?;

    let document = Html::parse_document(html);
    let mut table = ReferenceTable::new();

    for row in document.select(&container) {
        let Some(name) = row.select(&name_cell).next().map(cell_text) else {
            continue;
        };
        let name = strip_legend_marker(&name);
        if name.is_empty() {
            continue;
        }

        let cells: Vec<String> = row.select(&stat_cell).map(cell_text).collect();
        if cells.len() < 3 {
            log(&format!("Skipping {}: only {} stat cells", name, cells.len()));
            continue;
        }

        let stats = match (
            parse_stat(&cells[0]),
            parse_stat(&cells[1]),
            parse_stat(&cells[2]),
        ) {
            (Ok(avg_place), Ok(win_rate), Ok(pick_rate)) => AugmentStats {
                pick_rate,
                avg_place,
                win_rate,
            },
            _ => {
                log(&format!("Skipping {}: unreadable stats {:?}", name, cells));
                continue;
            }
        };

        table.insert(name, stats);
    }

    Ok(table)
}

fn class_selector(class_name: &str) -> Result<Selector> {
    Selector::parse(&format!(".{}", class_name))
        .map_err(|e| anyhow!("Bad selector for {}: {:?}", class_name, e))
}

/// All text below `cell`, whitespace collapsed.
fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses "4.12", "15.3%" or "1,234" into a non-negative number.
pub fn parse_stat(text: &str) -> Result<f32> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '%' && *c != ',')
        .collect();
    let value: f32 = cleaned
        .parse()
        .with_context(|| format!("Not a number: {:?}", text))?;
    if !value.is_finite() || value < 0.0 {
        return Err(anyhow!("Out of range: {:?}", text));
    }
    Ok(value)
}

/// True if the data was never fetched or is at least `interval_days` old.
pub fn needs_refresh(last: Option<NaiveDate>, today: NaiveDate, interval_days: i64) -> bool {
    match last {
        Some(day) => (today - day).num_days() >= interval_days,
        None => true,
    }
}

/// Fetches every rank and tier slot and persists each table as it arrives,
/// then records `today` as the fetch date. Stops at the first failure.
pub fn refresh_reference_data(
    source: &dyn StatsSource,
    store: &SettingsStore,
    today: NaiveDate,
) -> Result<()> {
    for rank in Rank::ALL {
        for slot in TierSlot::ALL {
            let table = source.fetch(rank, slot)?;
            log(&format!(
                "Fetched {} augments for {} tier {}",
                table.len(),
                rank,
                slot
            ));
            store.set_table(rank, slot, table)?;
        }
    }

    store.mark_fetched(today)?;
    log(&format!("Reference data refreshed on {}", today));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const SAMPLE: &str = r#"
        <div class="m-ub27pe">
          <div class="m-po6via">Jeweled Lotus (Legend)</div>
          <div class="m-virx8l">4.12</div>
          <div class="m-virx8l">16.8%</div>
          <div class="m-virx8l">2.3%</div>
        </div>
        <div class="row m-ub27pe">
          <span class="x m-po6via y">Pandora&#x27;s Items</span>
          <span class="m-virx8l">4.51</span><span class="m-virx8l">11.0%</span>
          <span class="m-virx8l">7.9%</span>
        </div>
        <div class="m-ub27pe">
          <div class="m-po6via">Broken Row</div>
          <div class="m-virx8l">4.00</div>
        </div>
        <div class="m-ub27pe-other">
          <div class="m-po6via">Not A Container</div>
        </div>
    "#;

    #[test]
    fn test_parse_tier_list() {
        let table = parse_tier_list(SAMPLE).unwrap();
        assert_eq!(table.len(), 2);

        let lotus = table.get("Jeweled Lotus").unwrap();
        assert!((lotus.avg_place - 4.12).abs() < 1e-6);
        assert!((lotus.win_rate - 16.8).abs() < 1e-6);
        assert!((lotus.pick_rate - 2.3).abs() < 1e-6);

        let pandora = table.get("Pandora's Items").unwrap();
        assert!((pandora.pick_rate - 7.9).abs() < 1e-6);
        assert!(table.get("Broken Row").is_none());
    }

    #[test]
    fn test_parse_nested_markup() {
        let html = r#"
            <div class='card m-ub27pe'>
              <a href="/augments/lotus"><div class="m-po6via">
                <span>Jeweled</span> <span>Lotus</span>
              </div></a>
              <div class="m-virx8l"><span>4.12</span></div>
              <div class="m-virx8l"><b>16.8</b>%</div>
              <div class="m-virx8l">2.3<small>%</small></div>
            </div>
            <div class="m-ub27pe">
              <div class="m-po6via">Tom &amp; Jerry&#8217;s &eacute;clair</div>
              <div class="m-virx8l">4.0</div>
              <div class="m-virx8l">10.0%</div>
              <div class="m-virx8l">5.0%</div>
            </div>
        "#;

        let table = parse_tier_list(html).unwrap();
        assert_eq!(table.len(), 2);

        let lotus = table.get("Jeweled Lotus").unwrap();
        assert!((lotus.avg_place - 4.12).abs() < 1e-6);
        assert!((lotus.win_rate - 16.8).abs() < 1e-6);
        assert!((lotus.pick_rate - 2.3).abs() < 1e-6);

        assert!(table.contains_key("Tom & Jerry\u{2019}s \u{e9}clair"));
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(parse_tier_list("<html></html>").unwrap().is_empty());
    }

    #[test]
    fn test_parse_stat() {
        assert_eq!(parse_stat("4.5").unwrap(), 4.5);
        assert_eq!(parse_stat(" 12.5% ").unwrap(), 12.5);
        assert_eq!(parse_stat("1,234").unwrap(), 1234.0);
        assert!(parse_stat("-1").is_err());
        assert!(parse_stat("n/a").is_err());
    }

    #[test]
    fn test_needs_refresh() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();

        assert!(needs_refresh(None, today, 1));
        assert!(!needs_refresh(Some(today), today, 1));
        assert!(needs_refresh(Some(yesterday), today, 1));
        assert!(!needs_refresh(Some(yesterday), today, 2));
    }

    struct FakeSource {
        calls: Cell<usize>,
        fail_after: Option<usize>,
    }

    impl StatsSource for FakeSource {
        fn fetch(&self, rank: Rank, slot: TierSlot) -> Result<ReferenceTable> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if self.fail_after.is_some_and(|limit| n >= limit) {
                return Err(anyhow!("HTTP 503"));
            }
            let name = format!("{} {}", rank, slot);
            Ok([(name, AugmentStats::default())].into_iter().collect())
        }
    }

    #[test]
    fn test_refresh_fetches_every_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let source = FakeSource { calls: Cell::new(0), fail_after: None };

        refresh_reference_data(&source, &store, today).unwrap();

        assert_eq!(source.calls.get(), 27);
        let settings = store.load().unwrap();
        assert_eq!(settings.fetch_last_update, Some(today));
        let tables = settings.augments.tables(Rank::Challenger).unwrap();
        assert!(tables.slot(TierSlot::Three).contains_key("challenger 3"));
    }

    #[test]
    fn test_refresh_stops_on_first_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let source = FakeSource { calls: Cell::new(0), fail_after: Some(4) };

        assert!(refresh_reference_data(&source, &store, today).is_err());
        assert_eq!(source.calls.get(), 5);

        let settings = store.load().unwrap();
        assert!(settings.fetch_last_update.is_none());
        // Tables fetched before the failure are kept
        assert!(settings.augments.tables(Rank::Iron).is_ok());
    }
}

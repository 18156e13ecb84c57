// Daily totals per region and the before/after comparison around the price increase
use chrono::NaiveDate;
use shared::models::{Region, SalesRecord, UnknownRegion};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn matches(&self, record: &SalesRecord) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(region) => record.region.trim().eq_ignore_ascii_case(region.as_str()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RegionFilter::All);
        }
        s.parse::<Region>().map(RegionFilter::Only)
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("all"),
            RegionFilter::Only(region) => fmt::Display::fmt(region, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: f64,
}

/// Sums sales per calendar day for the selected region(s), ordered by date.
pub fn daily_totals(records: &[SalesRecord], filter: RegionFilter) -> Vec<DailySales> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records.iter().filter(|r| filter.matches(r)) {
        *by_date.entry(record.date).or_insert(0.0) += record.sales;
    }
    by_date
        .into_iter()
        .map(|(date, sales)| DailySales { date, sales })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PeriodTotals {
    pub days: usize,
    pub total_sales: f64,
}

impl PeriodTotals {
    pub fn average_daily_sales(&self) -> Option<f64> {
        if self.days == 0 {
            None
        } else {
            Some(self.total_sales / self.days as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceChangeSummary {
    pub change_date: NaiveDate,
    /// Days strictly before `change_date`.
    pub before: PeriodTotals,
    /// `change_date` and later.
    pub after: PeriodTotals,
}

impl PriceChangeSummary {
    /// `None` when either side has no data to compare.
    pub fn sales_higher_after(&self) -> Option<bool> {
        let before = self.before.average_daily_sales()?;
        let after = self.after.average_daily_sales()?;
        Some(after > before)
    }
}

pub fn price_change_summary(daily: &[DailySales], change_date: NaiveDate) -> PriceChangeSummary {
    let mut before = PeriodTotals::default();
    let mut after = PeriodTotals::default();
    for day in daily {
        let period = if day.date < change_date { &mut before } else { &mut after };
        period.days += 1;
        period.total_sales += day.sales;
    }
    PriceChangeSummary { change_date, before, after }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, month, day).unwrap()
    }

    fn record(sales: f64, day: u32, region: &str) -> SalesRecord {
        SalesRecord { sales, date: date(1, day), region: region.to_string() }
    }

    #[test]
    fn test_region_filter_from_str() {
        assert_eq!("all".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!("North".parse::<RegionFilter>().unwrap(), RegionFilter::Only(Region::North));
        assert!("middle".parse::<RegionFilter>().is_err());
        assert_eq!(RegionFilter::Only(Region::West).to_string(), "west");
    }

    #[test]
    fn test_daily_totals_groups_and_sorts() {
        let records = vec![
            record(5.0, 12, "north"),
            record(30.0, 10, "north"),
            record(17.5, 10, "east"),
            record(2.5, 12, "south"),
        ];
        let daily = daily_totals(&records, RegionFilter::All);
        assert_eq!(daily, vec![
            DailySales { date: date(1, 10), sales: 47.5 },
            DailySales { date: date(1, 12), sales: 7.5 },
        ]);
    }

    #[test]
    fn test_daily_totals_with_region_filter() {
        let records = vec![
            record(30.0, 10, "north"),
            record(17.5, 10, "east"),
            record(5.0, 11, "North"),
        ];
        let daily = daily_totals(&records, RegionFilter::Only(Region::North));
        assert_eq!(daily, vec![
            DailySales { date: date(1, 10), sales: 30.0 },
            DailySales { date: date(1, 11), sales: 5.0 },
        ]);
    }

    #[test]
    fn test_price_change_summary_splits_on_change_date() {
        let daily = vec![
            DailySales { date: date(1, 13), sales: 10.0 },
            DailySales { date: date(1, 14), sales: 20.0 },
            DailySales { date: date(1, 15), sales: 40.0 },
        ];
        let summary = price_change_summary(&daily, date(1, 15));
        assert_eq!(summary.before, PeriodTotals { days: 2, total_sales: 30.0 });
        assert_eq!(summary.after, PeriodTotals { days: 1, total_sales: 40.0 });
        assert_eq!(summary.before.average_daily_sales(), Some(15.0));
        assert_eq!(summary.sales_higher_after(), Some(true));
    }

    #[test]
    fn test_price_change_summary_without_data_after() {
        let daily = vec![DailySales { date: date(1, 1), sales: 10.0 }];
        let summary = price_change_summary(&daily, date(1, 15));
        assert_eq!(summary.after.average_daily_sales(), None);
        assert_eq!(summary.sales_higher_after(), None);
    }
}

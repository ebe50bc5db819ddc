//! Built-in static metric data
//!
//! A fixed snapshot of both business units' KPI sets, used until a live
//! feed exists. Sparklines are generated with seeded jitter so repeated
//! fetches return identical data; tests rely on that.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate, Utc};

use crate::error::Result;
use crate::format::MetricFormat;
use crate::models::{
    BreakdownRow, BusinessUnit, ChannelBreakdown, ChartPoint, ComparisonData, ComparisonSeries,
    DashboardData, Metric, MetricDrilldown, MetricGoal, MetricStatus, MetricTarget,
    ProductBreakdown, SparklinePoint, TimeBreakdown, TimePeriod, TrendDirection,
};

use super::MetricsProvider;

/// Points in a generated sparkline
const SPARKLINE_POINTS: usize = 7;

/// Serves the built-in metric snapshot for both business units
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProvider;

impl StaticProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsProvider for StaticProvider {
    async fn fetch_dashboard(
        &self,
        unit: BusinessUnit,
        period: TimePeriod,
    ) -> Result<DashboardData> {
        let (metrics, drilldowns) = match unit {
            BusinessUnit::WellBefore => (wellbefore_metrics(), wellbefore_drilldowns()),
            BusinessUnit::D2cBuilders => (d2c_builders_metrics(), d2c_builders_drilldowns()),
        };

        tracing::debug!(
            unit = unit.as_str(),
            period = period.as_str(),
            metrics = metrics.len(),
            "Serving static dashboard data"
        );

        Ok(DashboardData {
            business_unit: unit,
            time_period: period,
            last_updated: Utc::now(),
            metrics,
            drilldowns,
        })
    }

    async fn fetch_comparison(
        &self,
        unit: BusinessUnit,
        metric_id: &str,
    ) -> Result<Option<ComparisonData>> {
        // Comparison series exist for the flagship revenue metric only
        if unit == BusinessUnit::WellBefore && metric_id == "wb-revenue" {
            Ok(Some(revenue_comparison()))
        } else {
            Ok(None)
        }
    }
}

/// Deterministic jitter in [-1, 1], FNV-1a over the seed and point index
fn jitter(seed: &str, index: usize) -> f64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in seed.bytes().chain(index.to_le_bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    (hash % 2001) as f64 / 1000.0 - 1.0
}

/// Generate a sparkline around a base value, most recent point last
fn sparkline(seed: &str, base: f64, variance: f64) -> Vec<SparklinePoint> {
    let today = Local::now().date_naive();
    (0..SPARKLINE_POINTS)
        .map(|i| {
            let days_back = (SPARKLINE_POINTS - 1 - i) as u64;
            SparklinePoint {
                value: base + jitter(seed, i) * variance,
                date: today - Days::new(days_back),
            }
        })
        .collect()
}

fn metric_base(id: &str, label: &str, value: f64, format: MetricFormat) -> Metric {
    Metric {
        id: id.to_string(),
        label: label.to_string(),
        value,
        previous_value: None,
        format,
        trend: None,
        change: None,
        change_formatted: None,
        status: None,
        target: None,
        goal: None,
        sparkline: vec![],
        higher_is_better: true,
        description: None,
    }
}

fn goal(target: f64, current: f64, label: &str) -> MetricGoal {
    MetricGoal {
        target,
        current,
        label: label.to_string(),
    }
}

fn wellbefore_metrics() -> Vec<Metric> {
    vec![
        Metric {
            previous_value: Some(798_456.0),
            trend: Some(TrendDirection::Up),
            change: Some(6.1),
            change_formatted: Some("+6.1%".to_string()),
            status: Some(MetricStatus::Success),
            goal: Some(goal(833_333.0, 847_234.0, "Monthly Goal")),
            sparkline: sparkline("wb-revenue", 120_000.0, 15_000.0),
            description: Some("Total revenue for the period".to_string()),
            ..metric_base("wb-revenue", "Revenue", 847_234.0, MetricFormat::Currency)
        },
        Metric {
            previous_value: Some(53.1),
            trend: Some(TrendDirection::Up),
            change: Some(1.1),
            change_formatted: Some("+1.1%".to_string()),
            status: Some(MetricStatus::Success),
            target: Some(MetricTarget {
                min: Some(52.0),
                max: Some(56.0),
                optimal: None,
            }),
            goal: Some(goal(54.0, 54.2, "Target Range")),
            sparkline: sparkline("wb-gross-margin", 54.0, 2.0),
            description: Some("Gross margin percentage".to_string()),
            ..metric_base("wb-gross-margin", "Gross Margin", 54.2, MetricFormat::Percent)
        },
        Metric {
            previous_value: Some(25.8),
            trend: Some(TrendDirection::Up),
            change: Some(1.5),
            change_formatted: Some("+1.5%".to_string()),
            status: Some(MetricStatus::Success),
            target: Some(MetricTarget {
                min: Some(25.0),
                max: None,
                optimal: None,
            }),
            sparkline: sparkline("wb-contribution-margin", 26.0, 2.0),
            description: Some("Revenue minus variable costs".to_string()),
            ..metric_base(
                "wb-contribution-margin",
                "Contribution Margin",
                27.3,
                MetricFormat::Percent,
            )
        },
        Metric {
            previous_value: Some(38.2),
            trend: Some(TrendDirection::Down),
            change: Some(-9.7),
            change_formatted: Some("-9.7%".to_string()),
            status: Some(MetricStatus::Success),
            sparkline: sparkline("wb-cac", 36.0, 4.0),
            higher_is_better: false,
            description: Some("Customer acquisition cost".to_string()),
            ..metric_base("wb-cac", "CAC", 34.50, MetricFormat::Currency)
        },
        Metric {
            previous_value: Some(3.2),
            trend: Some(TrendDirection::Down),
            change: Some(-12.5),
            change_formatted: Some("-12.5%".to_string()),
            status: Some(MetricStatus::Success),
            sparkline: sparkline("wb-cac-payback", 3.0, 0.5),
            higher_is_better: false,
            description: Some("Months to recover CAC".to_string()),
            ..metric_base("wb-cac-payback", "CAC Payback", 2.8, MetricFormat::Months)
        },
        Metric {
            previous_value: Some(3.8),
            trend: Some(TrendDirection::Up),
            change: Some(10.5),
            change_formatted: Some("+10.5%".to_string()),
            status: Some(MetricStatus::Success),
            target: Some(MetricTarget {
                min: Some(3.0),
                max: None,
                optimal: None,
            }),
            sparkline: sparkline("wb-ltv-cac", 4.0, 0.5),
            description: Some("Lifetime value to CAC ratio".to_string()),
            ..metric_base("wb-ltv-cac", "LTV:CAC Ratio", 4.2, MetricFormat::Ratio)
        },
        Metric {
            previous_value: Some(89.8),
            trend: Some(TrendDirection::Up),
            change: Some(1.4),
            change_formatted: Some("+1.4%".to_string()),
            status: Some(MetricStatus::Success),
            target: Some(MetricTarget {
                min: Some(90.0),
                max: None,
                optimal: None,
            }),
            goal: Some(goal(90.0, 91.2, "Target")),
            sparkline: sparkline("wb-net-sales-ratio", 90.0, 2.0),
            description: Some("Net sales after returns".to_string()),
            ..metric_base(
                "wb-net-sales-ratio",
                "Net Sales Ratio",
                91.2,
                MetricFormat::Percent,
            )
        },
        Metric {
            previous_value: Some(4.9),
            trend: Some(TrendDirection::Up),
            change: Some(0.9),
            change_formatted: Some("+0.9%".to_string()),
            status: Some(MetricStatus::Warning),
            target: Some(MetricTarget {
                min: Some(5.0),
                max: Some(7.0),
                optimal: None,
            }),
            goal: Some(goal(6.0, 5.8, "Target Range")),
            sparkline: sparkline("wb-ebitda", 5.5, 1.0),
            description: Some(
                "Earnings before interest, taxes, depreciation, amortization".to_string(),
            ),
            ..metric_base("wb-ebitda", "EBITDA", 5.8, MetricFormat::Percent)
        },
    ]
}

fn d2c_builders_metrics() -> Vec<Metric> {
    vec![
        Metric {
            previous_value: Some(98.2),
            trend: Some(TrendDirection::Up),
            change: Some(0.5),
            change_formatted: Some("+0.5%".to_string()),
            status: Some(MetricStatus::Success),
            target: Some(MetricTarget {
                min: Some(98.0),
                max: None,
                optimal: None,
            }),
            goal: Some(goal(98.0, 98.7, "Target")),
            sparkline: sparkline("d2c-perfect-order", 98.5, 0.5),
            description: Some("Orders delivered without issues".to_string()),
            ..metric_base(
                "d2c-perfect-order",
                "Perfect Order Rate",
                98.7,
                MetricFormat::Percent,
            )
        },
        Metric {
            previous_value: Some(21.3),
            trend: Some(TrendDirection::Down),
            change: Some(-13.1),
            change_formatted: Some("-13.1%".to_string()),
            status: Some(MetricStatus::Success),
            sparkline: sparkline("d2c-order-cycle", 20.0, 3.0),
            higher_is_better: false,
            description: Some("Hours from order to ship".to_string()),
            ..metric_base("d2c-order-cycle", "Order Cycle Time", 18.5, MetricFormat::Time)
        },
        Metric {
            previous_value: Some(22.5),
            trend: Some(TrendDirection::Down),
            change: Some(-19.1),
            change_formatted: Some("-19.1%".to_string()),
            status: Some(MetricStatus::Success),
            target: Some(MetricTarget {
                min: None,
                max: Some(24.0),
                optimal: None,
            }),
            goal: Some(goal(24.0, 18.2, "Max Hours")),
            sparkline: sparkline("d2c-dock-to-stock", 20.0, 4.0),
            higher_is_better: false,
            description: Some("Hours from receipt to inventory".to_string()),
            ..metric_base("d2c-dock-to-stock", "Dock-to-Stock", 18.2, MetricFormat::Time)
        },
        Metric {
            previous_value: Some(99.95),
            trend: Some(TrendDirection::Up),
            change: Some(0.02),
            change_formatted: Some("+0.02%".to_string()),
            status: Some(MetricStatus::Success),
            target: Some(MetricTarget {
                min: Some(99.99),
                max: None,
                optimal: None,
            }),
            sparkline: sparkline("d2c-pick-accuracy", 99.96, 0.02),
            description: Some("Correct picks percentage".to_string()),
            ..metric_base(
                "d2c-pick-accuracy",
                "Pick Accuracy",
                99.97,
                MetricFormat::Percent,
            )
        },
        Metric {
            previous_value: Some(82.1),
            trend: Some(TrendDirection::Down),
            change: Some(-3.6),
            change_formatted: Some("-3.6%".to_string()),
            status: Some(MetricStatus::Warning),
            target: Some(MetricTarget {
                min: Some(75.0),
                max: Some(85.0),
                optimal: None,
            }),
            sparkline: sparkline("d2c-space-util", 80.0, 5.0),
            description: Some("Warehouse space usage".to_string()),
            ..metric_base(
                "d2c-space-util",
                "Space Utilization",
                78.5,
                MetricFormat::Percent,
            )
        },
        Metric {
            previous_value: Some(39.8),
            trend: Some(TrendDirection::Up),
            change: Some(6.3),
            change_formatted: Some("+6.3%".to_string()),
            status: Some(MetricStatus::Success),
            sparkline: sparkline("d2c-revenue-sqft", 41.0, 3.0),
            description: Some("Revenue efficiency".to_string()),
            ..metric_base(
                "d2c-revenue-sqft",
                "Revenue per Sq Ft",
                42.30,
                MetricFormat::Currency,
            )
        },
    ]
}

fn row(label: &str, value: f64, percentage: f64, change: Option<f64>) -> BreakdownRow {
    BreakdownRow {
        label: label.to_string(),
        value,
        percentage,
        change,
    }
}

fn product(
    label: &str,
    value: f64,
    percentage: f64,
    change: Option<f64>,
    sku: Option<&str>,
    category: Option<&str>,
) -> ProductBreakdown {
    ProductBreakdown {
        row: row(label, value, percentage, change),
        sku: sku.map(str::to_string),
        category: category.map(str::to_string),
    }
}

fn channel(
    label: &str,
    value: f64,
    percentage: f64,
    change: Option<f64>,
    channel: &str,
) -> ChannelBreakdown {
    ChannelBreakdown {
        row: row(label, value, percentage, change),
        channel: channel.to_string(),
    }
}

fn week(label: &str, value: f64, percentage: f64, change: Option<f64>, date: NaiveDate) -> TimeBreakdown {
    TimeBreakdown {
        row: row(label, value, percentage, change),
        period: "week".to_string(),
        date,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn wellbefore_drilldowns() -> HashMap<String, MetricDrilldown> {
    let mut drilldowns = HashMap::new();

    drilldowns.insert(
        "wb-revenue".to_string(),
        MetricDrilldown {
            metric_id: "wb-revenue".to_string(),
            metric_label: "Revenue".to_string(),
            total_value: 847_234.0,
            by_product: Some(vec![
                product("N95 Respirators", 287_260.0, 33.9, Some(8.2), Some("N95-001"), Some("PPE")),
                product("Surgical Masks", 211_808.0, 25.0, Some(4.5), Some("SM-001"), Some("PPE")),
                product("Nitrile Gloves", 169_446.0, 20.0, Some(12.3), Some("NG-001"), Some("PPE")),
                product("Hand Sanitizer", 101_668.0, 12.0, Some(-2.1), Some("HS-001"), Some("Hygiene")),
                product("Face Shields", 50_834.0, 6.0, Some(15.7), Some("FS-001"), Some("PPE")),
                product("Other Products", 26_218.0, 3.1, Some(1.2), Some("OTHER"), Some("Misc")),
            ]),
            by_channel: Some(vec![
                channel("Direct (wellbefore.com)", 423_617.0, 50.0, Some(7.8), "direct"),
                channel("Amazon", 254_170.0, 30.0, Some(5.2), "amazon"),
                channel("Walmart", 101_668.0, 12.0, Some(3.9), "walmart"),
                channel("B2B / Wholesale", 67_779.0, 8.0, Some(11.4), "b2b"),
            ]),
            by_time: Some(vec![
                week("Week 1", 198_234.0, 23.4, None, date(2024, 1, 1)),
                week("Week 2", 212_456.0, 25.1, Some(7.2), date(2024, 1, 8)),
                week("Week 3", 224_890.0, 26.5, Some(5.8), date(2024, 1, 15)),
                week("Week 4", 211_654.0, 25.0, Some(-5.9), date(2024, 1, 22)),
            ]),
        },
    );

    drilldowns.insert(
        "wb-gross-margin".to_string(),
        MetricDrilldown {
            metric_id: "wb-gross-margin".to_string(),
            metric_label: "Gross Margin".to_string(),
            total_value: 54.2,
            by_product: Some(vec![
                product("N95 Respirators", 58.2, 0.0, Some(1.2), None, Some("PPE")),
                product("Surgical Masks", 52.8, 0.0, Some(0.8), None, Some("PPE")),
                product("Nitrile Gloves", 48.5, 0.0, Some(2.1), None, Some("PPE")),
                product("Hand Sanitizer", 61.2, 0.0, Some(-0.5), None, Some("Hygiene")),
                product("Face Shields", 55.7, 0.0, Some(1.8), None, Some("PPE")),
            ]),
            by_channel: Some(vec![
                channel("Direct", 62.5, 0.0, Some(0.9), "direct"),
                channel("Amazon", 45.2, 0.0, Some(1.5), "amazon"),
                channel("Walmart", 48.8, 0.0, Some(0.7), "walmart"),
                channel("B2B", 42.3, 0.0, Some(2.2), "b2b"),
            ]),
            by_time: None,
        },
    );

    drilldowns
}

fn d2c_builders_drilldowns() -> HashMap<String, MetricDrilldown> {
    let mut drilldowns = HashMap::new();

    drilldowns.insert(
        "d2c-perfect-order".to_string(),
        MetricDrilldown {
            metric_id: "d2c-perfect-order".to_string(),
            metric_label: "Perfect Order Rate".to_string(),
            total_value: 98.7,
            by_product: Some(vec![
                product("Small Parcels", 99.2, 45.0, Some(0.3), None, None),
                product("Medium Boxes", 98.5, 35.0, Some(0.5), None, None),
                product("Large/Bulky", 97.8, 15.0, Some(0.8), None, None),
                product("Hazmat Items", 99.5, 5.0, Some(0.1), None, None),
            ]),
            by_channel: Some(vec![
                channel("WellBefore Fulfillment", 98.9, 60.0, Some(0.4), "wellbefore"),
                channel("External Clients", 98.4, 40.0, Some(0.6), "external"),
            ]),
            by_time: None,
        },
    );

    drilldowns
}

fn revenue_comparison() -> ComparisonData {
    let points = [
        (date(2024, 1, 1), "Jan 1", 28_500.0, 26_200.0),
        (date(2024, 1, 8), "Jan 8", 31_200.0, 28_900.0),
        (date(2024, 1, 15), "Jan 15", 29_800.0, 27_100.0),
        (date(2024, 1, 22), "Jan 22", 33_400.0, 30_500.0),
        (date(2024, 1, 29), "Jan 29", 35_100.0, 31_800.0),
    ];

    let current: Vec<ChartPoint> = points
        .iter()
        .map(|&(date, label, value, previous_value)| ChartPoint {
            date,
            label: label.to_string(),
            value,
            previous_value: Some(previous_value),
        })
        .collect();

    let previous: Vec<ChartPoint> = points
        .iter()
        .map(|&(date, label, _, previous_value)| ChartPoint {
            date,
            label: label.to_string(),
            value: previous_value,
            previous_value: None,
        })
        .collect();

    ComparisonData {
        current: ComparisonSeries {
            label: "This Month".to_string(),
            value: 847_234.0,
            data: current,
        },
        previous: ComparisonSeries {
            label: "Last Month".to_string(),
            value: 798_456.0,
            data: previous,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_is_deterministic() {
        let provider = StaticProvider::new();
        let a = provider
            .fetch_dashboard(BusinessUnit::WellBefore, TimePeriod::Mtd)
            .await
            .unwrap();
        let b = provider
            .fetch_dashboard(BusinessUnit::WellBefore, TimePeriod::Mtd)
            .await
            .unwrap();
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.drilldowns, b.drilldowns);
    }

    #[tokio::test]
    async fn test_wellbefore_metric_set() {
        let provider = StaticProvider::new();
        let data = provider
            .fetch_dashboard(BusinessUnit::WellBefore, TimePeriod::Mtd)
            .await
            .unwrap();

        assert_eq!(data.metrics.len(), 8);
        assert!(data.metrics.iter().any(|m| m.id == "wb-revenue"));
        assert!(data.drilldowns.contains_key("wb-revenue"));
        assert!(data.drilldowns.contains_key("wb-gross-margin"));

        let cac = data.metrics.iter().find(|m| m.id == "wb-cac").unwrap();
        assert!(!cac.higher_is_better);
    }

    #[tokio::test]
    async fn test_d2c_metric_set() {
        let provider = StaticProvider::new();
        let data = provider
            .fetch_dashboard(BusinessUnit::D2cBuilders, TimePeriod::Today)
            .await
            .unwrap();

        assert_eq!(data.metrics.len(), 6);
        assert_eq!(data.business_unit, BusinessUnit::D2cBuilders);
        assert_eq!(data.time_period, TimePeriod::Today);
        assert!(data.drilldowns.contains_key("d2c-perfect-order"));
    }

    #[tokio::test]
    async fn test_sparklines_have_seven_chronological_points() {
        let provider = StaticProvider::new();
        let data = provider
            .fetch_dashboard(BusinessUnit::WellBefore, TimePeriod::Mtd)
            .await
            .unwrap();

        for metric in &data.metrics {
            assert_eq!(metric.sparkline.len(), SPARKLINE_POINTS);
            for pair in metric.sparkline.windows(2) {
                assert!(pair[0].date < pair[1].date);
            }
        }
    }

    #[tokio::test]
    async fn test_comparison_only_for_revenue() {
        let provider = StaticProvider::new();

        let revenue = provider
            .fetch_comparison(BusinessUnit::WellBefore, "wb-revenue")
            .await
            .unwrap();
        assert!(revenue.is_some());
        let revenue = revenue.unwrap();
        assert_eq!(revenue.current.data.len(), 5);
        assert_eq!(revenue.previous.data.len(), 5);

        let other = provider
            .fetch_comparison(BusinessUnit::WellBefore, "wb-cac")
            .await
            .unwrap();
        assert!(other.is_none());
    }
}

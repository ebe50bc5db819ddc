//! Value formatting for metric display
//!
//! Each metric carries a [`MetricFormat`] and rendering dispatches on the
//! closed enum, so an invalid format is unrepresentable rather than a
//! runtime lookup miss.

use serde::{Deserialize, Serialize};

use crate::models::TrendDirection;

/// Display format of a metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    Currency,
    Percent,
    Number,
    Ratio,
    /// Hours, rendered as minutes/hours/days
    Time,
    /// Months, rendered as days below one month
    Months,
}

impl MetricFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::Percent => "percent",
            Self::Number => "number",
            Self::Ratio => "ratio",
            Self::Time => "time",
            Self::Months => "months",
        }
    }

    /// Render a value in this format
    pub fn format(&self, value: f64, compact: bool) -> String {
        match self {
            Self::Currency => format_currency(value, compact),
            Self::Percent => format_percent(value, 1),
            Self::Number => format_number(value, compact),
            Self::Ratio => format!("{:.1}:1", value),
            Self::Time => format_time(value),
            Self::Months => format_months(value),
        }
    }
}

impl std::str::FromStr for MetricFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "currency" => Ok(Self::Currency),
            "percent" => Ok(Self::Percent),
            "number" => Ok(Self::Number),
            "ratio" => Ok(Self::Ratio),
            "time" => Ok(Self::Time),
            "months" => Ok(Self::Months),
            _ => Err(format!("Unknown metric format: {}", s)),
        }
    }
}

impl std::fmt::Display for MetricFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Period-over-period change with a display-ready rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Signed percent delta
    pub value: f64,
    /// e.g. "+6.1%"
    pub formatted: String,
    pub direction: TrendDirection,
}

/// Percent change of `current` vs. `previous`.
///
/// A zero previous value yields a flat 0% rather than a division blow-up.
pub fn change_summary(current: f64, previous: f64) -> ChangeSummary {
    if previous == 0.0 {
        return ChangeSummary {
            value: 0.0,
            formatted: "0%".to_string(),
            direction: TrendDirection::Flat,
        };
    }

    let change = (current - previous) / previous * 100.0;
    let direction = if change > 0.5 {
        TrendDirection::Up
    } else if change < -0.5 {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    ChangeSummary {
        value: change,
        formatted: format_signed_percent(change),
        direction,
    }
}

/// Signed percent with one decimal, e.g. "+6.1%" / "-9.7%"
pub fn format_signed_percent(change: f64) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, change)
}

pub fn format_currency(value: f64, compact: bool) -> String {
    let negative = value < 0.0;
    let abs = value.abs();
    let body = if compact && abs >= 1_000.0 {
        format!("${}", compact_abbrev(abs))
    } else {
        format!("${}", group_thousands(abs.round() as i64))
    };
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

pub fn format_number(value: f64, compact: bool) -> String {
    let negative = value < 0.0;
    let abs = value.abs();
    let body = if compact && abs >= 1_000.0 {
        compact_abbrev(abs)
    } else if abs.fract() < 1e-9 {
        group_thousands(abs.round() as i64)
    } else {
        let rendered = format!("{:.1}", abs);
        match rendered.split_once('.') {
            Some((int_part, dec_part)) => {
                let grouped = group_thousands(int_part.parse().unwrap_or(0));
                format!("{}.{}", grouped, dec_part)
            }
            None => rendered,
        }
    };
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Hours rendered at a human scale
pub fn format_time(hours: f64) -> String {
    if hours < 1.0 {
        format!("{}m", (hours * 60.0).round())
    } else if hours < 24.0 {
        format!("{:.1}h", hours)
    } else {
        format!("{:.1}d", hours / 24.0)
    }
}

/// Months rendered at a human scale
pub fn format_months(months: f64) -> String {
    if months < 1.0 {
        format!("{}d", (months * 30.0).round())
    } else {
        format!("{:.1}mo", months)
    }
}

/// Abbreviate a non-negative value to K/M with one decimal, trailing .0 trimmed
fn compact_abbrev(abs: f64) -> String {
    let (scaled, suffix) = if abs >= 1_000_000.0 {
        (abs / 1_000_000.0, "M")
    } else {
        (abs / 1_000.0, "K")
    };
    let rendered = format!("{:.1}", scaled);
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    format!("{}{}", rendered, suffix)
}

/// Insert comma separators into a non-negative integer
fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(847_234.0, false), "$847,234");
        assert_eq!(format_currency(34.5, false), "$35");
        assert_eq!(format_currency(-1_234.0, false), "-$1,234");
    }

    #[test]
    fn test_currency_compact() {
        assert_eq!(format_currency(1_200_000.0, true), "$1.2M");
        assert_eq!(format_currency(847_234.0, true), "$847.2K");
        assert_eq!(format_currency(847_000.0, true), "$847K");
        assert_eq!(format_currency(950.0, true), "$950");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(54.2, 1), "54.2%");
        assert_eq!(format_percent(0.0, 1), "0.0%");
    }

    #[test]
    fn test_number() {
        assert_eq!(format_number(12_345.0, false), "12,345");
        assert_eq!(format_number(12_345.0, true), "12.3K");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(MetricFormat::Ratio.format(4.2, false), "4.2:1");
    }

    #[test]
    fn test_time() {
        assert_eq!(format_time(0.5), "30m");
        assert_eq!(format_time(18.5), "18.5h");
        assert_eq!(format_time(36.0), "1.5d");
    }

    #[test]
    fn test_months() {
        assert_eq!(format_months(0.5), "15d");
        assert_eq!(format_months(2.8), "2.8mo");
    }

    #[test]
    fn test_change_summary() {
        let change = change_summary(847_234.0, 798_456.0);
        assert_eq!(change.formatted, "+6.1%");
        assert_eq!(change.direction, TrendDirection::Up);

        let change = change_summary(34.5, 38.2);
        assert_eq!(change.formatted, "-9.7%");
        assert_eq!(change.direction, TrendDirection::Down);
    }

    #[test]
    fn test_change_summary_zero_previous() {
        let change = change_summary(100.0, 0.0);
        assert_eq!(change.value, 0.0);
        assert_eq!(change.formatted, "0%");
        assert_eq!(change.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_change_summary_flat_band() {
        let change = change_summary(100.3, 100.0);
        assert_eq!(change.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_format_round_trip() {
        use std::str::FromStr;
        for fmt in [
            MetricFormat::Currency,
            MetricFormat::Percent,
            MetricFormat::Number,
            MetricFormat::Ratio,
            MetricFormat::Time,
            MetricFormat::Months,
        ] {
            assert_eq!(MetricFormat::from_str(fmt.as_str()).unwrap(), fmt);
        }
    }
}

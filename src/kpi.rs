//! Scalar KPIs over the filtered record set, plus their display forms.

use crate::models::Record;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// The three headline numbers, recomputed per interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Quantity-weighted mean discount; `None` when the filtered set is
    /// empty (0/0 has no defined value).
    pub avg_discount: Option<f64>,
}

/// Presentation strings for [`Kpis`], with `NA` standing in for the
/// no-data sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedKpis {
    pub total_sales: String,
    pub total_profit: String,
    pub avg_discount: String,
}

/// Compute the KPIs over an already-filtered record view.
pub fn compute(records: &[&Record]) -> Kpis {
    let total_sales = records.iter().map(|r| r.sales).sum();
    let total_profit = records.iter().map(|r| r.profit).sum();
    let avg_discount = if records.is_empty() {
        None
    } else {
        let weighted: f64 = records
            .iter()
            .map(|r| r.discount * f64::from(r.quantity))
            .sum();
        let quantity: f64 = records.iter().map(|r| f64::from(r.quantity)).sum();
        Some(weighted / quantity)
    };
    Kpis {
        total_sales,
        total_profit,
        avg_discount,
    }
}

impl Kpis {
    pub fn formatted(&self) -> FormattedKpis {
        FormattedKpis {
            total_sales: format_currency(self.total_sales),
            total_profit: format_currency(self.total_profit),
            avg_discount: format_percent(self.avg_discount),
        }
    }
}

/// `$1,234,567.89`, with a leading minus for losses.
pub fn format_currency(v: f64) -> String {
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{frac:02}", whole.to_formatted_string(&Locale::en))
}

/// `18.3%`, or `NA` for the no-data sentinel.
pub fn format_percent(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.1}%", x * 100.0),
        None => "NA".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_grouping_and_sign() {
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-42.5), "-$42.50");
        // Rounds away the sign rather than printing "-$0.00".
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn percent_and_sentinel() {
        assert_eq!(format_percent(Some(0.1833)), "18.3%");
        assert_eq!(format_percent(None), "NA");
    }
}

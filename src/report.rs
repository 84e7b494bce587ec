//! Aggregates computed by the backend for the dashboard and reports pages.

use serde::{Deserialize, Serialize};

/// Income and expense totals over a set of transactions.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Sum of all income.
    pub total_income: f64,
    /// Sum of all expenses.
    pub total_expense: f64,
    /// Income minus expenses, negative when more was spent than earned.
    pub net_balance: f64,
    /// The number of transactions in the set.
    pub transaction_count: u64,
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// The month label, e.g. "2024-01".
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// The total and number of transactions in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub total: f64,
    pub count: u64,
}

/// The last `count` months of `monthly`, which the backend returns in chronological order.
pub fn most_recent_months(monthly: &[MonthlyReport], count: usize) -> &[MonthlyReport] {
    &monthly[monthly.len().saturating_sub(count)..]
}

/// The first `count` categories, the backend decides the order.
pub fn top_categories(categories: &[CategoryReport], count: usize) -> &[CategoryReport] {
    &categories[..categories.len().min(count)]
}

#[cfg(test)]
mod tests {
    use super::{CategoryReport, MonthlyReport, most_recent_months, top_categories};

    fn month(label: &str) -> MonthlyReport {
        MonthlyReport {
            month: label.to_owned(),
            income: 0.0,
            expense: 0.0,
            net: 0.0,
        }
    }

    fn category(name: &str) -> CategoryReport {
        CategoryReport {
            category: name.to_owned(),
            total: 1.0,
            count: 1,
        }
    }

    #[test]
    fn takes_most_recent_months_from_end() {
        let monthly = (1..=8)
            .map(|m| month(&format!("2024-{m:02}")))
            .collect::<Vec<_>>();

        let got = most_recent_months(&monthly, 6);

        let labels = got.iter().map(|m| m.month.as_str()).collect::<Vec<_>>();
        assert_eq!(
            labels,
            ["2024-03", "2024-04", "2024-05", "2024-06", "2024-07", "2024-08"]
        );
    }

    #[test]
    fn takes_all_months_when_fewer_than_requested() {
        let monthly = vec![month("2024-01"), month("2024-02")];

        assert_eq!(most_recent_months(&monthly, 6), monthly.as_slice());
    }

    #[test]
    fn keeps_backend_order_for_top_categories() {
        let categories = ["Housing", "Food", "Other", "Utilities", "Shopping", "Healthcare"]
            .map(category);

        let got = top_categories(&categories, 5);

        let names = got.iter().map(|c| c.category.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Housing", "Food", "Other", "Utilities", "Shopping"]);
    }

    #[test]
    fn handles_no_categories() {
        assert!(top_categories(&[], 5).is_empty());
    }
}

//! Defines the core data models for transactions exchanged with the backend.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The backend-assigned identifier of a transaction.
pub type TransactionId = i64;

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the backend.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always non-negative, whether money came in or went out is given by
    /// [Transaction::transaction_type].
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category as stored by the backend.
    ///
    /// This is usually one of [Category::ALL], but the backend is the source of
    /// truth so any other value is displayed as-is.
    pub category: String,
    /// Whether the transaction was money coming in or going out.
    pub transaction_type: TransactionType,
    /// When the backend first stored the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// When the backend last modified the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Transaction {
    /// The transaction's category if it is one of the known categories.
    pub fn known_category(&self) -> Option<Category> {
        self.category.parse().ok()
    }
}

/// The direction money moved in a transaction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    #[default]
    Expense,
}

impl TransactionType {
    /// Both transaction types in the order they are offered in selectors.
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// The value used on the wire and in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(Error::InvalidFormInput(format!(
                "\"{s}\" is not a transaction type"
            ))),
        }
    }
}

/// The fixed set of categories a user can file a transaction under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Entertainment,
    Utilities,
    Healthcare,
    Shopping,
    Salary,
    Investment,
    Other,
}

impl Category {
    /// Every category in the order they are offered in selectors.
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::Shopping,
        Category::Salary,
        Category::Investment,
        Category::Other,
    ];

    /// The category name used on the wire and in the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Salary => "Salary",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidFormInput(format!("\"{s}\" is not a category")))
    }
}

/// The data needed to create a transaction, the backend assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub date: Date,
    pub amount: f64,
    pub description: String,
    pub category: Category,
    pub transaction_type: TransactionType,
}

/// A partial update to a transaction.
///
/// Only the fields that are `Some` are sent, the backend keeps the stored value
/// for every other field.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
}

impl From<TransactionCreate> for TransactionUpdate {
    fn from(value: TransactionCreate) -> Self {
        Self {
            date: Some(value.date),
            amount: Some(value.amount),
            description: Some(value.description),
            category: Some(value.category),
            transaction_type: Some(value.transaction_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{Category, Transaction, TransactionType, TransactionUpdate};

    #[test]
    fn deserializes_backend_transaction() {
        let json = r#"{
            "id": 7,
            "date": "2024-01-15",
            "amount": 2500.0,
            "description": "Monthly Salary",
            "category": "Salary",
            "transaction_type": "income",
            "created_at": "2024-01-15T09:30:00",
            "updated_at": null
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.id, 7);
        assert_eq!(transaction.date, date!(2024 - 01 - 15));
        assert_eq!(transaction.transaction_type, TransactionType::Income);
        assert_eq!(transaction.known_category(), Some(Category::Salary));
        assert_eq!(transaction.created_at.as_deref(), Some("2024-01-15T09:30:00"));
        assert_eq!(transaction.updated_at, None);
    }

    #[test]
    fn keeps_unknown_categories_from_backend() {
        let json = r#"{
            "id": 1,
            "date": "2024-01-15",
            "amount": 1.0,
            "description": "Gift",
            "category": "Gifts",
            "transaction_type": "expense"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.category, "Gifts");
        assert_eq!(transaction.known_category(), None);
    }

    #[test]
    fn partial_update_only_serializes_provided_fields() {
        let update = TransactionUpdate {
            description: Some("New description".to_owned()),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json, serde_json::json!({ "description": "New description" }));
    }

    #[test]
    fn parses_categories_by_name() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }

        assert!("food".parse::<Category>().is_err());
    }

    #[test]
    fn parses_transaction_types_case_insensitively() {
        assert_eq!(
            "Income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            "expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert!("refund".parse::<TransactionType>().is_err());
    }
}

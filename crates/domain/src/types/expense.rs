//! Expense-tracking models: accounts, categories, transactions, budgets and
//! the read-only insight aggregates

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
    Closed,
}

crate::impl_wire_enum_conversions!(AccountStatus {
    Active => "active",
    Inactive => "inactive",
    Closed => "closed",
});

/// What a category is used for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    #[default]
    Expense,
    Transfer,
}

crate::impl_wire_enum_conversions!(CategoryType {
    Income => "income",
    Expense => "expense",
    Transfer => "transfer",
});

/// Direction of money relative to the account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    #[default]
    Debit,
}

crate::impl_wire_enum_conversions!(TransactionType {
    Credit => "credit",
    Debit => "debit",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Yearly,
}

crate::impl_wire_enum_conversions!(BudgetPeriod {
    Monthly => "monthly",
    Yearly => "yearly",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub id: Option<i64>,
    pub account_name: String,
    pub account_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    pub opening_balance: Decimal,
    pub current_balance: Decimal,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    pub account_name: String,
    pub account_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    pub opening_balance: Decimal,
    #[serde(default)]
    pub status: AccountStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub id: Option<i64>,
    pub category_name: String,
    pub category_type: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub category_name: String,
    pub category_type: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    pub account_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub txn_date: NaiveDate,
    pub txn_amount: Decimal,
    #[serde(default)]
    pub txn_type: TransactionType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub account_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub txn_date: NaiveDate,
    pub txn_amount: Decimal,
    pub txn_type: TransactionType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

/// Optional filters for the transaction list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub account_id: Option<i64>,
    pub category_id: Option<i64>,
    pub txn_type: Option<TransactionType>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub merchant: Option<String>,
}

impl TransactionFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.account_id {
            query.push(("accountId".to_string(), id.to_string()));
        }
        if let Some(id) = self.category_id {
            query.push(("categoryId".to_string(), id.to_string()));
        }
        if let Some(kind) = self.txn_type {
            query.push(("txnType".to_string(), kind.to_string()));
        }
        if let Some(date) = self.from_date {
            query.push(("fromDate".to_string(), date.to_string()));
        }
        if let Some(date) = self.to_date {
            query.push(("toDate".to_string(), date.to_string()));
        }
        if let Some(merchant) = self.merchant.as_deref().filter(|m| !m.trim().is_empty()) {
            query.push(("merchant".to_string(), merchant.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub id: Option<i64>,
    pub category_id: i64,
    pub budget_name: String,
    pub budget_amount: Decimal,
    #[serde(default)]
    pub budget_period: BudgetPeriod,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    pub category_id: i64,
    pub budget_name: String,
    pub budget_amount: Decimal,
    pub budget_period: BudgetPeriod,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Date range (and optional account subset) for insight endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsQuery {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub account_ids: Vec<i64>,
}

impl InsightsQuery {
    pub fn between(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self { from_date, to_date, account_ids: Vec::new() }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("fromDate".to_string(), self.from_date.to_string()),
            ("toDate".to_string(), self.to_date.to_string()),
        ];
        if !self.account_ids.is_empty() {
            let ids: Vec<String> = self.account_ids.iter().map(ToString::to_string).collect();
            query.push(("accountIds".to_string(), ids.join(",")));
        }
        query
    }
}

/// Income against expense for one period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CashFlowSummary {
    pub period: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_flow: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryBreakdown {
    pub category_id: Option<i64>,
    pub category_name: String,
    pub category_type: CategoryType,
    pub total_amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountTrend {
    pub account_id: Option<i64>,
    pub account_name: String,
    pub period: String,
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn transaction_decodes_numeric_amounts() {
        let body = r#"{
            "id": 11,
            "accountId": 3,
            "txnDate": "2024-03-31",
            "txnAmount": 42.15,
            "txnType": "credit",
            "description": "Refund"
        }"#;

        let txn: Transaction = serde_json::from_str(body).unwrap();
        assert_eq!(txn.txn_amount, Decimal::from_str("42.15").unwrap());
        assert_eq!(txn.txn_type, TransactionType::Credit);
        assert_eq!(txn.txn_date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert!(txn.category_id.is_none());
    }

    #[test]
    fn transaction_filter_skips_unset_fields() {
        let filter = TransactionFilter {
            account_id: Some(3),
            txn_type: Some(TransactionType::Debit),
            merchant: Some("   ".to_string()),
            ..TransactionFilter::default()
        };

        assert_eq!(
            filter.to_query(),
            vec![
                ("accountId".to_string(), "3".to_string()),
                ("txnType".to_string(), "debit".to_string()),
            ]
        );
    }

    #[test]
    fn insights_query_joins_account_ids() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let mut query = InsightsQuery::between(from, to);
        query.account_ids = vec![4, 8];

        let rendered = query.to_query();
        assert_eq!(rendered[0], ("fromDate".to_string(), "2024-01-01".to_string()));
        assert_eq!(rendered[2], ("accountIds".to_string(), "4,8".to_string()));
    }
}

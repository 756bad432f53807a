//! Write-side records

use chrono::NaiveDate;

/// New row for the Account table
#[derive(Debug, Clone, PartialEq)]
pub struct AccountInsert {
    pub username: String,
    pub platform: String,
    pub influencer_id: i64,
    pub followers: i64,
    pub activation_date: NaiveDate,
}

/// Replacement values for one BrandDealOne row
#[derive(Debug, Clone, PartialEq)]
pub struct BrandDealUpdate {
    pub brand_deal_id: i64,
    pub ad_type: String,
    pub payment_rate: f64,
    pub company_id: i64,
    pub post_id: i64,
}

//! Whole-table reads behind the browse endpoints

use crate::data::QueryExecutor;
use crate::data::error::DataError;
use crate::data::sql::NamedQuery;
use crate::data::types::Row;

/// Tables the browse endpoints expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedTable {
    Account,
    Influencer,
    BrandDeal,
    Company,
    Post,
}

impl FixedTable {
    pub const fn table_name(&self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::Influencer => "Influencer",
            Self::BrandDeal => "BrandDealOne",
            Self::Company => "SponsorCompany",
            Self::Post => "PostOne",
        }
    }

    const fn select_all(&self) -> &'static str {
        match self {
            Self::Account => "SELECT * FROM Account",
            Self::Influencer => "SELECT * FROM Influencer",
            Self::BrandDeal => "SELECT * FROM BrandDealOne",
            Self::Company => "SELECT * FROM SponsorCompany",
            Self::Post => "SELECT * FROM PostOne",
        }
    }
}

/// Every row of a fixed table
pub async fn fetch_table(
    executor: &dyn QueryExecutor,
    table: FixedTable,
) -> Result<Vec<Row>, DataError> {
    executor
        .fetch_rows(&NamedQuery::new(table.select_all()))
        .await
}

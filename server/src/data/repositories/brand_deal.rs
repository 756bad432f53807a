//! Brand deal updates

use crate::data::QueryExecutor;
use crate::data::error::DataError;
use crate::data::sql::NamedQuery;
use crate::data::types::BrandDealUpdate;

/// Overwrite every column of one brand deal
///
/// Returns the number of updated rows (0 when the deal does not exist).
pub async fn update_brand_deal(
    executor: &dyn QueryExecutor,
    deal: BrandDealUpdate,
) -> Result<u64, DataError> {
    let query = NamedQuery::new(
        "UPDATE BrandDealOne \
         SET adType = :adType, paymentRate = :paymentRate, companyID = :companyID, postID = :postID \
         WHERE brandDealID = :brandDealID",
    )
    .bind("adType", deal.ad_type)
    .bind("paymentRate", deal.payment_rate)
    .bind("companyID", deal.company_id)
    .bind("postID", deal.post_id)
    .bind("brandDealID", deal.brand_deal_id);

    let affected = executor.execute(&query).await?;
    tracing::debug!(brand_deal_id = deal.brand_deal_id, affected, "Brand deal update");
    Ok(affected)
}

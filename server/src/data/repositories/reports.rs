//! Join and aggregation reports
//!
//! Averages are cast to DOUBLE PRECISION so PostgreSQL returns FLOAT8
//! instead of NUMERIC; SQLite treats the cast as REAL.

use crate::data::QueryExecutor;
use crate::data::error::DataError;
use crate::data::sql::NamedQuery;
use crate::data::types::Row;

/// Ad type and production cost of deals whose post cost more than `min_cost`
pub async fn deals_above_production_cost(
    executor: &dyn QueryExecutor,
    min_cost: f64,
) -> Result<Vec<Row>, DataError> {
    let query = NamedQuery::new(
        "SELECT b.adType, p.productionCost \
         FROM BrandDealOne b JOIN PostOne p ON b.postID = p.postID \
         WHERE p.productionCost > :productionCost \
         ORDER BY b.brandDealID",
    )
    .bind("productionCost", min_cost);
    executor.fetch_rows(&query).await
}

/// Niches whose posts average more than `min_rate` engagement
pub async fn high_engagement_niches(
    executor: &dyn QueryExecutor,
    min_rate: f64,
) -> Result<Vec<Row>, DataError> {
    let query = NamedQuery::new(
        "SELECT i.niche, CAST(AVG(p.engagementRate) AS DOUBLE PRECISION) \
         FROM Influencer i JOIN PostOne p ON p.influencerID = i.influencerID \
         GROUP BY i.niche \
         HAVING AVG(p.engagementRate) > :engagementRate \
         ORDER BY i.niche",
    )
    .bind("engagementRate", min_rate);
    executor.fetch_rows(&query).await
}

/// Influencers whose mean follower count beats the mean over all accounts
pub async fn above_average_followers(
    executor: &dyn QueryExecutor,
) -> Result<Vec<Row>, DataError> {
    executor
        .fetch_rows(&NamedQuery::new(
            "SELECT a.influencerID, CAST(AVG(a.followerCount) AS DOUBLE PRECISION) \
             FROM Account a \
             GROUP BY a.influencerID \
             HAVING AVG(a.followerCount) > (SELECT AVG(followerCount) FROM Account) \
             ORDER BY a.influencerID",
        ))
        .await
}

/// Influencer count and mean age per niche
pub async fn average_age_by_niche(executor: &dyn QueryExecutor) -> Result<Vec<Row>, DataError> {
    executor
        .fetch_rows(&NamedQuery::new(
            "SELECT niche, COUNT(*), CAST(AVG(age) AS DOUBLE PRECISION) \
             FROM Influencer \
             GROUP BY niche \
             ORDER BY niche",
        ))
        .await
}

/// Influencers holding an account on every platform seen in Account
///
/// Relational division: no platform exists without a matching account.
pub async fn accounts_on_every_platform(
    executor: &dyn QueryExecutor,
) -> Result<Vec<Row>, DataError> {
    executor
        .fetch_rows(&NamedQuery::new(
            "SELECT i.influencerID, i.influencerName \
             FROM Influencer i \
             WHERE NOT EXISTS ( \
                 SELECT a.platformName FROM Account a \
                 WHERE NOT EXISTS ( \
                     SELECT 1 FROM Account a2 \
                     WHERE a2.influencerID = i.influencerID \
                       AND a2.platformName = a.platformName \
                 ) \
             ) \
             ORDER BY i.influencerID",
        ))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatabaseService;
    use crate::data::repositories::fixtures;
    use serde_json::json;

    fn first_column(rows: &[Row]) -> Vec<serde_json::Value> {
        rows.iter().map(|r| r[0].clone()).collect()
    }

    #[tokio::test]
    async fn test_deals_above_production_cost() {
        let db = DatabaseService::sqlite_in_memory().await;
        fixtures::seed(db.executor()).await;

        let rows = deals_above_production_cost(db.executor(), 1000.0).await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec![json!("review"), json!(1500.0)],
                vec![json!("video"), json!(3000.0)],
            ]
        );
        assert!(deals_above_production_cost(db.executor(), 5000.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_high_engagement_niches() {
        let db = DatabaseService::sqlite_in_memory().await;
        fixtures::seed(db.executor()).await;

        let rows = high_engagement_niches(db.executor(), 0.05).await.unwrap();
        assert_eq!(first_column(&rows), vec![json!("fitness")]);

        let rows = high_engagement_niches(db.executor(), 0.01).await.unwrap();
        assert_eq!(
            first_column(&rows),
            vec![json!("fitness"), json!("food"), json!("tech")]
        );
    }

    #[tokio::test]
    async fn test_above_average_followers() {
        let db = DatabaseService::sqlite_in_memory().await;
        fixtures::seed(db.executor()).await;

        let rows = above_average_followers(db.executor()).await.unwrap();
        assert_eq!(first_column(&rows), vec![json!(1), json!(4)]);
        assert_eq!(rows[1][1], json!(70000.0));
    }

    #[tokio::test]
    async fn test_average_age_by_niche() {
        let db = DatabaseService::sqlite_in_memory().await;
        fixtures::seed(db.executor()).await;

        let rows = average_age_by_niche(db.executor()).await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec![json!("fitness"), json!(2), json!(24.5)],
                vec![json!("food"), json!(1), json!(41.0)],
                vec![json!("tech"), json!(1), json!(34.0)],
            ]
        );
    }

    #[tokio::test]
    async fn test_accounts_on_every_platform() {
        let db = DatabaseService::sqlite_in_memory().await;
        fixtures::seed(db.executor()).await;

        let rows = accounts_on_every_platform(db.executor()).await.unwrap();
        assert_eq!(rows, vec![vec![json!(1), json!("Ana")]]);
    }

    #[tokio::test]
    async fn test_reports_on_empty_database() {
        let db = DatabaseService::sqlite_in_memory().await;
        assert!(average_age_by_niche(db.executor()).await.unwrap().is_empty());
        assert!(above_average_followers(db.executor()).await.unwrap().is_empty());
        assert!(accounts_on_every_platform(db.executor()).await.unwrap().is_empty());
    }
}

//! Account inserts

use crate::data::QueryExecutor;
use crate::data::error::DataError;
use crate::data::sql::NamedQuery;
use crate::data::types::AccountInsert;

/// Insert one account row
///
/// Returns the number of inserted rows. Duplicate (username, platform) pairs
/// and unknown influencers surface as constraint violations.
pub async fn insert_account(
    executor: &dyn QueryExecutor,
    account: AccountInsert,
) -> Result<u64, DataError> {
    let query = NamedQuery::new(
        "INSERT INTO Account (username, platformName, influencerID, followerCount, activationDate) \
         VALUES (:username, :platform, :influencer, :followers, :activationDate)",
    )
    .bind("username", account.username)
    .bind("platform", account.platform)
    .bind("influencer", account.influencer_id)
    .bind("followers", account.followers)
    .bind("activationDate", account.activation_date);

    executor.execute(&query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatabaseService;
    use crate::data::repositories::fixtures;
    use chrono::NaiveDate;
    use serde_json::json;

    fn account(username: &str, influencer_id: i64) -> AccountInsert {
        AccountInsert {
            username: username.to_string(),
            platform: "twitch".to_string(),
            influencer_id,
            followers: 1234,
            activation_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_account() {
        let db = DatabaseService::sqlite_in_memory().await;
        fixtures::seed(db.executor()).await;

        assert_eq!(insert_account(db.executor(), account("ben_live", 2)).await.unwrap(), 1);

        let rows = db
            .executor()
            .fetch_rows(&NamedQuery::new("SELECT * FROM Account WHERE username = 'ben_live'"))
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![vec![json!("ben_live"), json!("twitch"), json!(2), json!(1234), json!("2024-05-06")]]
        );
    }

    #[tokio::test]
    async fn test_duplicate_account_is_constraint_violation() {
        let db = DatabaseService::sqlite_in_memory().await;
        fixtures::seed(db.executor()).await;

        insert_account(db.executor(), account("dup", 1)).await.unwrap();
        let err = insert_account(db.executor(), account("dup", 1)).await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_unknown_influencer_is_constraint_violation() {
        let db = DatabaseService::sqlite_in_memory().await;
        let err = insert_account(db.executor(), account("ghost", 42)).await.unwrap_err();
        assert!(err.is_constraint_violation());
    }
}

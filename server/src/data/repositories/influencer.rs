//! Influencer filtering and deletion

use crate::data::QueryExecutor;
use crate::data::error::DataError;
use crate::data::sql::NamedQuery;
use crate::data::types::Row;
use crate::domain::filters::{FilterMode, FilterSet, QueryBuilder};

const SELECT_ALL: &str = "SELECT * FROM Influencer";

/// Run a parsed filter against the Influencer table
///
/// `FilterSet::All` selects every row without touching the builder.
pub async fn filter_influencers(
    executor: &dyn QueryExecutor,
    filters: FilterSet,
    mode: FilterMode,
) -> Result<Vec<Row>, DataError> {
    let conditions = match filters {
        FilterSet::All => {
            tracing::debug!("No filter conditions, selecting all influencers");
            return executor.fetch_rows(&NamedQuery::new(SELECT_ALL)).await;
        }
        FilterSet::Where(conditions) => conditions,
    };

    let fragment = QueryBuilder::new(mode)
        .numeric_like_as_text(executor.backend().dialect().like_needs_text_cast())
        .build(&conditions);
    let sql = format!("{} WHERE {}", SELECT_ALL, fragment.where_clause());
    tracing::debug!(
        %sql,
        ?mode,
        binds = ?fragment.binds().iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
        "Filtering influencers"
    );

    let query = fragment
        .binds()
        .iter()
        .fold(NamedQuery::new(sql), |q, (key, value)| {
            q.bind(key.as_str(), value.clone())
        });
    executor.fetch_rows(&query).await
}

/// Delete one influencer; accounts and posts cascade
///
/// Returns the number of deleted rows (0 when the id is unknown).
pub async fn delete_influencer(executor: &dyn QueryExecutor, id: i64) -> Result<u64, DataError> {
    let affected = executor
        .execute(&NamedQuery::new("DELETE FROM Influencer WHERE influencerID = :id").bind("id", id))
        .await?;
    tracing::debug!(influencer_id = id, affected, "Influencer delete");
    Ok(affected)
}

//! PostgreSQL schema definitions
//!
//! Same tables as the SQLite schema. Identifiers are unquoted, so PostgreSQL
//! stores them lower-cased.

use sqlx::PgPool;

use super::error::PostgresError;

/// Complete schema SQL for PostgreSQL
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Influencer (
    influencerID BIGINT PRIMARY KEY,
    influencerName TEXT NOT NULL,
    location TEXT,
    age INTEGER CHECK (age IS NULL OR age >= 0),
    niche TEXT
);

CREATE TABLE IF NOT EXISTS Account (
    username TEXT NOT NULL,
    platformName TEXT NOT NULL,
    influencerID BIGINT NOT NULL REFERENCES Influencer(influencerID) ON DELETE CASCADE,
    followerCount BIGINT CHECK (followerCount IS NULL OR followerCount >= 0),
    activationDate DATE,
    PRIMARY KEY (username, platformName)
);

CREATE INDEX IF NOT EXISTS idx_account_influencer ON Account(influencerID);

CREATE TABLE IF NOT EXISTS SponsorCompany (
    companyID BIGINT PRIMARY KEY,
    companyName TEXT NOT NULL,
    industry TEXT
);

CREATE TABLE IF NOT EXISTS PostOne (
    postID BIGINT PRIMARY KEY,
    influencerID BIGINT REFERENCES Influencer(influencerID) ON DELETE CASCADE,
    platformName TEXT,
    productionCost DOUBLE PRECISION,
    engagementRate DOUBLE PRECISION,
    postDate DATE
);

CREATE INDEX IF NOT EXISTS idx_post_influencer ON PostOne(influencerID);

CREATE TABLE IF NOT EXISTS BrandDealOne (
    brandDealID BIGINT PRIMARY KEY,
    adType TEXT,
    paymentRate DOUBLE PRECISION,
    companyID BIGINT UNIQUE REFERENCES SponsorCompany(companyID) ON DELETE CASCADE,
    postID BIGINT UNIQUE REFERENCES PostOne(postID) ON DELETE CASCADE
);
"#;

/// Create any missing tables
pub async fn bootstrap(pool: &PgPool) -> Result<(), PostgresError> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| PostgresError::Schema(e.to_string()))?;
    tracing::debug!("PostgreSQL schema ready");
    Ok(())
}

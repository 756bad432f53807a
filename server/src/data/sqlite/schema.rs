//! SQLite schema definitions
//!
//! Tables are created on startup when missing; existing tables are left as is.

use sqlx::SqlitePool;

use super::error::SqliteError;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- 1. Influencers
-- =============================================================================
CREATE TABLE IF NOT EXISTS Influencer (
    influencerID INTEGER PRIMARY KEY,
    influencerName TEXT NOT NULL,
    location TEXT,
    age INTEGER CHECK (age IS NULL OR age >= 0),
    niche TEXT
);

-- =============================================================================
-- 2. Accounts (one per influencer and platform)
-- =============================================================================
CREATE TABLE IF NOT EXISTS Account (
    username TEXT NOT NULL,
    platformName TEXT NOT NULL,
    influencerID INTEGER NOT NULL REFERENCES Influencer(influencerID) ON DELETE CASCADE,
    followerCount INTEGER CHECK (followerCount IS NULL OR followerCount >= 0),
    activationDate DATE,
    PRIMARY KEY (username, platformName)
);

CREATE INDEX IF NOT EXISTS idx_account_influencer ON Account(influencerID);

-- =============================================================================
-- 3. Sponsor companies
-- =============================================================================
CREATE TABLE IF NOT EXISTS SponsorCompany (
    companyID INTEGER PRIMARY KEY,
    companyName TEXT NOT NULL,
    industry TEXT
);

-- =============================================================================
-- 4. Posts
-- =============================================================================
CREATE TABLE IF NOT EXISTS PostOne (
    postID INTEGER PRIMARY KEY,
    influencerID INTEGER REFERENCES Influencer(influencerID) ON DELETE CASCADE,
    platformName TEXT,
    productionCost REAL,
    engagementRate REAL,
    postDate DATE
);

CREATE INDEX IF NOT EXISTS idx_post_influencer ON PostOne(influencerID);

-- =============================================================================
-- 5. Brand deals (one company and one post per deal)
-- =============================================================================
CREATE TABLE IF NOT EXISTS BrandDealOne (
    brandDealID INTEGER PRIMARY KEY,
    adType TEXT,
    paymentRate REAL,
    companyID INTEGER UNIQUE REFERENCES SponsorCompany(companyID) ON DELETE CASCADE,
    postID INTEGER UNIQUE REFERENCES PostOne(postID) ON DELETE CASCADE
);
"#;

/// Create any missing tables
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), SqliteError> {
    let start = std::time::Instant::now();

    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| SqliteError::Schema(e.to_string()))?;

    tracing::debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "SQLite schema ready"
    );
    Ok(())
}

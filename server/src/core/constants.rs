// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Brandlink";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "brandlink";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".brandlink";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "brandlink.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "BRANDLINK_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "BRANDLINK_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "BRANDLINK_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "BRANDLINK_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "BRANDLINK_LOG";

/// Environment variable for the static frontend directory
pub const ENV_STATIC_DIR: &str = "BRANDLINK_STATIC_DIR";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5304;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "BRANDLINK_DATA_DIR";

// =============================================================================
// SQLite
// =============================================================================

/// SQLite database file name (inside the `sqlite` data subdirectory)
pub const SQLITE_DB_FILENAME: &str = "brandlink.db";

/// Maximum pooled SQLite connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// Busy timeout before a locked write fails
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// Page cache size (negative = KiB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// Pages between automatic WAL checkpoints
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// Interval of the background WAL checkpoint task
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// PostgreSQL
// =============================================================================

/// Environment variable for the PostgreSQL connection URL
pub const ENV_POSTGRES_URL: &str = "BRANDLINK_POSTGRES_URL";

/// Environment variable for the database backend (sqlite or postgres)
pub const ENV_DB_BACKEND: &str = "BRANDLINK_DB_BACKEND";

/// Default maximum pool size
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default number of warm connections
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default acquire timeout
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default connection max lifetime
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Default statement timeout
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 30;

/// Interval of the background health check
pub const POSTGRES_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;

// =============================================================================
// API Limits
// =============================================================================

/// Default request body limit
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Maximum filter conditions per request
pub const MAX_FILTER_CONDITIONS: u64 = 32;

/// Maximum columns in a projection request
pub const MAX_PROJECTION_COLUMNS: usize = 64;

// =============================================================================
// Shutdown
// =============================================================================

/// Time allowed for background tasks to stop
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

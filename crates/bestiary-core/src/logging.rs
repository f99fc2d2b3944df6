//! Structured logging schema and field name constants for the bestiary
//! catalog.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |

/// Subsystem originating the log event.
/// Values: "catalog", "db", "provider"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "service", "pool", "creatures", "http"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create", "update", "delete", "find_many", "import_by_id"
pub const OPERATION: &str = "op";

/// Creature id being operated on.
pub const CREATURE_ID: &str = "creature_id";

/// External catalog id used by an import.
pub const EXTERNAL_ID: &str = "external_id";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a listing.
pub const RESULT_COUNT: &str = "result_count";

use std::time::Duration;

pub const PROGRAM_NAME: &str = "shuttle";
pub const PROGRAM_LOG_LEVEL: &str = "SHUTTLE_LOG_LEVEL";
pub const PROGRAM_BATCH: &str = "SHUTTLE_BATCH";
pub const PROGRAM_SEED: &str = "SHUTTLE_SEED";

/// Number of records pulled before each flush when no batch size is given.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Host label of the simulated puller.
pub const DEFAULT_SOURCE_HOST: &str = "localhost:3000";

/// Host label of the simulated storer.
pub const DEFAULT_SINK_HOST: &str = "localhost:4000";

// Carried on the simulated endpoints, never consulted.
pub const DEFAULT_TIMEOUT: Duration = Duration::ZERO;

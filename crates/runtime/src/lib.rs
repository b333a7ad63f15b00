mod config;
pub mod logging;

pub use config::{
    DEFAULT_BATCH_SIZE, DEFAULT_SINK_HOST, DEFAULT_SOURCE_HOST, DEFAULT_TIMEOUT, PROGRAM_BATCH,
    PROGRAM_LOG_LEVEL, PROGRAM_NAME, PROGRAM_SEED,
};

pub use logging::init;

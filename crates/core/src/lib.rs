mod capability;
mod copier;
mod error;
pub mod memory;
mod record;

pub use capability::{PullStorer, Pulled, Puller, Storer, System};
pub use copier::{CopyReport, Fill, Stop, StoreFailure, copy, pull, store};
pub use error::{CopyError, Op, OperationError};
pub use record::Record;

pub mod copy;

pub use copy::CopyArgs;

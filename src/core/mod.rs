pub mod assemble;
pub mod describe;
pub mod etl;
pub mod export;
pub mod extract;
pub mod pipeline;
pub mod retry;
pub mod temporal;
pub mod units;

pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;

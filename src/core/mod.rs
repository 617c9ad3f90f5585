pub mod accumulator;
pub mod aggregator;
pub mod coordinator;
pub mod detail;
pub mod etl;
pub mod listing;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fakes;

pub use crate::domain::model::{Entity, ListingEntry, StatEntry};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, Transport};
pub use crate::utils::error::Result;

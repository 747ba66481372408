pub mod due_dates;
pub mod engine;
pub mod members;
pub mod ordering;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{BoardList, Card, CardUpdate, DelayRule, DelayRules};
pub use crate::domain::ports::{BoardClient, Clock, ConfigProvider, SystemClock};
pub use crate::utils::error::Result;

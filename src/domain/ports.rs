use crate::domain::model::{BoardList, Card, CardUpdate, DelayRules};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Remote task board. Every call is a fresh read or an immediately committed write.
#[async_trait]
pub trait BoardClient: Send + Sync {
    async fn list_lists(&self, board_id: &str) -> Result<Vec<BoardList>>;
    async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>>;
    async fn update_card(&self, card_id: &str, update: &CardUpdate) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn board_id(&self) -> &str;
    fn delay_rules(&self) -> &DelayRules;
    fn member_ids(&self) -> &[String];
    fn default_delay_days(&self) -> i64;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

use crate::core::{BoardClient, BoardList, Card, CardUpdate, Clock, Result};
use crate::utils::error::UpkeepError;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::sync::{Arc, Mutex};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn card(id: &str, name: &str, due: Option<&str>, pos: f64, members: &[&str]) -> Card {
    Card {
        id: id.to_string(),
        name: name.to_string(),
        due: due.map(str::to_string),
        pos,
        id_members: members.iter().map(|m| m.to_string()).collect(),
    }
}

pub fn due_string(due: DateTime<Utc>) -> String {
    due.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// In-memory board that applies updates, so later reads see earlier writes.
#[derive(Clone, Default)]
pub struct MockBoard {
    lists: Vec<BoardList>,
    cards: Arc<Mutex<Vec<(String, Card)>>>,
    updates: Arc<Mutex<Vec<(String, CardUpdate)>>>,
    failing_list: Option<String>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, id: &str, name: &str, cards: Vec<Card>) -> Self {
        self.lists.push(BoardList {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.cards
            .lock()
            .unwrap()
            .extend(cards.into_iter().map(|card| (id.to_string(), card)));
        self
    }

    pub fn failing_on(mut self, list_id: &str) -> Self {
        self.failing_list = Some(list_id.to_string());
        self
    }

    pub fn list(&self, id: &str) -> BoardList {
        self.lists.iter().find(|l| l.id == id).cloned().unwrap()
    }

    pub fn card(&self, id: &str) -> Card {
        self.cards
            .lock()
            .unwrap()
            .iter()
            .find(|(_, c)| c.id == id)
            .map(|(_, c)| c.clone())
            .unwrap()
    }

    pub fn updates(&self) -> Vec<(String, CardUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn clear_updates(&self) {
        self.updates.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl BoardClient for MockBoard {
    async fn list_lists(&self, _board_id: &str) -> Result<Vec<BoardList>> {
        Ok(self.lists.clone())
    }

    async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>> {
        if self.failing_list.as_deref() == Some(list_id) {
            return Err(UpkeepError::RemoteError {
                status: 500,
                message: "list unavailable".to_string(),
            });
        }

        let mut cards: Vec<Card> = self
            .cards
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == list_id)
            .map(|(_, c)| c.clone())
            .collect();
        cards.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        Ok(cards)
    }

    async fn update_card(&self, card_id: &str, update: &CardUpdate) -> Result<()> {
        let mut cards = self.cards.lock().unwrap();
        let (_, card) = cards
            .iter_mut()
            .find(|(_, c)| c.id == card_id)
            .ok_or_else(|| UpkeepError::RemoteError {
                status: 404,
                message: format!("card {} not found", card_id),
            })?;

        if let Some(due) = update.due {
            card.due = Some(due_string(due));
        }
        if let Some(pos) = update.pos {
            card.pos = pos as f64;
        }
        if let Some(members) = &update.id_members {
            card.id_members = members.clone();
        }

        self.updates
            .lock()
            .unwrap()
            .push((card_id.to_string(), update.clone()));
        Ok(())
    }
}

use crate::core::{BoardClient, BoardList, Card, CardUpdate, Result};

/// Orders cards by due date ascending.
///
/// The sort is stable, so equal due dates keep fetch order. Cards without a due
/// date go after every dated card. A malformed due date is an error.
pub fn order_by_due(cards: Vec<Card>) -> Result<Vec<Card>> {
    let mut keyed = cards
        .into_iter()
        .map(|card| Ok((card.due_at()?, card)))
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by_key(|(due, _)| (due.is_none(), *due));

    Ok(keyed.into_iter().map(|(_, card)| card).collect())
}

/// Re-reads the list and moves every card whose position differs from its index
/// in due-date order. Returns the number of cards moved.
pub async fn sort_by_due<B>(board: &B, list: &BoardList) -> Result<usize>
where
    B: BoardClient + ?Sized,
{
    let cards = board.list_cards(&list.id).await?;
    let undated = cards.iter().filter(|c| c.due.is_none()).count();
    if undated > 0 {
        tracing::warn!(list = %list.name, undated, "Cards without a due date sorted last");
    }

    let mut moved = 0;
    for (index, card) in order_by_due(cards)?.into_iter().enumerate() {
        if card.pos == index as f64 {
            continue;
        }

        tracing::debug!(card_id = %card.id, from = card.pos, to = index, "Moving card");
        board
            .update_card(&card.id, &CardUpdate::position(index))
            .await?;
        moved += 1;
    }

    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{card, due_string, fixed_now, MockBoard};
    use crate::utils::error::UpkeepError;
    use chrono::TimeDelta;

    fn in_days(days: i64) -> String {
        due_string(fixed_now() + TimeDelta::days(days))
    }

    fn ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_order_is_stable_for_equal_due_dates() {
        let same = in_days(1);
        let cards = vec![
            card("first", "A", Some(&same), 0.0, &[]),
            card("later", "B", Some(&in_days(0)), 1.0, &[]),
            card("second", "C", Some(&same), 2.0, &[]),
        ];

        let ordered = order_by_due(cards).unwrap();
        assert_eq!(ids(&ordered), vec!["later", "first", "second"]);
    }

    #[test]
    fn test_undated_cards_go_last_in_fetch_order() {
        let cards = vec![
            card("u1", "A", None, 0.0, &[]),
            card("d1", "B", Some(&in_days(4)), 1.0, &[]),
            card("u2", "C", None, 2.0, &[]),
            card("d2", "D", Some(&in_days(2)), 3.0, &[]),
        ];

        let ordered = order_by_due(cards).unwrap();
        assert_eq!(ids(&ordered), vec!["d2", "d1", "u1", "u2"]);
    }

    #[test]
    fn test_malformed_due_date_is_an_error() {
        let cards = vec![
            card("ok", "A", Some(&in_days(1)), 0.0, &[]),
            card("bad", "B", Some("next tuesday"), 1.0, &[]),
        ];

        let err = order_by_due(cards).unwrap_err();
        assert!(matches!(err, UpkeepError::DueDateParse { card_id, .. } if card_id == "bad"));
    }

    #[tokio::test]
    async fn test_reorders_three_cards_by_due_date() {
        let board = MockBoard::new().with_list(
            "l1",
            "Doing",
            vec![
                card("card1", "One", Some(&in_days(5)), 0.0, &[]),
                card("card2", "Two", Some(&in_days(1)), 1.0, &[]),
                card("card3", "Three", Some(&in_days(3)), 2.0, &[]),
            ],
        );

        let moved = sort_by_due(&board, &board.list("l1")).await.unwrap();

        assert_eq!(moved, 3);
        assert_eq!(board.card("card2").pos, 0.0);
        assert_eq!(board.card("card3").pos, 1.0);
        assert_eq!(board.card("card1").pos, 2.0);
    }

    #[tokio::test]
    async fn test_only_misplaced_cards_are_written() {
        let board = MockBoard::new().with_list(
            "l1",
            "Doing",
            vec![
                card("a", "A", Some(&in_days(1)), 0.0, &[]),
                card("b", "B", Some(&in_days(3)), 1.0, &[]),
                card("c", "C", Some(&in_days(2)), 2.0, &[]),
            ],
        );

        let moved = sort_by_due(&board, &board.list("l1")).await.unwrap();

        assert_eq!(moved, 2);
        let written: Vec<String> = board.updates().into_iter().map(|(id, _)| id).collect();
        assert_eq!(written, vec!["c".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_second_sort_issues_no_updates() {
        let board = MockBoard::new().with_list(
            "l1",
            "Doing",
            vec![
                card("a", "A", Some(&in_days(9)), 16384.0, &[]),
                card("b", "B", Some(&in_days(2)), 32768.0, &[]),
            ],
        );
        let list = board.list("l1");

        assert_eq!(sort_by_due(&board, &list).await.unwrap(), 2);
        board.clear_updates();
        assert_eq!(sort_by_due(&board, &list).await.unwrap(), 0);
        assert!(board.updates().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_due_aborts_before_any_write() {
        let board = MockBoard::new().with_list(
            "l1",
            "Doing",
            vec![
                card("a", "A", Some(&in_days(9)), 5.0, &[]),
                card("b", "B", Some("soon"), 6.0, &[]),
            ],
        );

        assert!(sort_by_due(&board, &board.list("l1")).await.is_err());
        assert!(board.updates().is_empty());
    }
}

use crate::core::{BoardClient, BoardList, CardUpdate, Clock, DelayRules, Result};
use chrono::TimeDelta;

/// Gives every due-less card whose name matches a rule `now + rule.days`.
///
/// Rules are tried in order and the first match wins. Cards matching no rule are
/// left for [`assign_due_by_list`]. Returns the number of cards updated.
pub async fn assign_due_by_title<B>(
    board: &B,
    list: &BoardList,
    rules: &DelayRules,
    clock: &dyn Clock,
) -> Result<usize>
where
    B: BoardClient + ?Sized,
{
    let mut assigned = 0;

    for card in board.list_cards(&list.id).await? {
        if card.due.is_some() {
            continue;
        }
        let Some(rule) = rules.first_match(&card.name) else {
            continue;
        };

        let due = clock.now() + TimeDelta::days(rule.days);
        tracing::debug!(
            card_id = %card.id,
            pattern = %rule.pattern,
            %due,
            "Assigning due date from card name"
        );
        board.update_card(&card.id, &CardUpdate::due(due)).await?;
        assigned += 1;
    }

    Ok(assigned)
}

/// Gives every card still lacking a due date the list's delay.
///
/// The delay comes from the first rule matching the list name, or `default_days`.
pub async fn assign_due_by_list<B>(
    board: &B,
    list: &BoardList,
    rules: &DelayRules,
    default_days: i64,
    clock: &dyn Clock,
) -> Result<usize>
where
    B: BoardClient + ?Sized,
{
    let delay_days = match rules.first_match(&list.name) {
        Some(rule) => {
            tracing::debug!(
                list = %list.name,
                pattern = %rule.pattern,
                days = rule.days,
                "List rule matched"
            );
            rule.days
        }
        None => default_days,
    };

    let mut assigned = 0;
    for card in board.list_cards(&list.id).await? {
        if card.due.is_some() {
            continue;
        }

        let due = clock.now() + TimeDelta::days(delay_days);
        tracing::debug!(card_id = %card.id, %due, "Assigning list default due date");
        board.update_card(&card.id, &CardUpdate::due(due)).await?;
        assigned += 1;
    }

    Ok(assigned)
}

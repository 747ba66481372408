use crate::core::{BoardClient, BoardList, CardUpdate, Result};

/// Sets `members` on every card with no members. Cards with any member are untouched.
pub async fn assign_default_members<B>(
    board: &B,
    list: &BoardList,
    members: &[String],
) -> Result<usize>
where
    B: BoardClient + ?Sized,
{
    let mut assigned = 0;

    for card in board.list_cards(&list.id).await? {
        if !card.id_members.is_empty() {
            continue;
        }

        tracing::debug!(card_id = %card.id, members = members.len(), "Assigning default members");
        board
            .update_card(&card.id, &CardUpdate::members(members.to_vec()))
            .await?;
        assigned += 1;
    }

    Ok(assigned)
}

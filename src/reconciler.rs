//! Drag Reconciler
//!
//! Pure functions turning drag gesture phases into the next board snapshot.
//! Lookup misses (pointer over nothing droppable, stale ids) are ordinary
//! no-ops, never errors.

use leptos_dragdrop::{DropTarget, KeyDirection};

use crate::board::Board;
use crate::models::{ColumnKey, Task, TaskId};

/// What the pointer is over: a column's empty space or a task card
pub type BoardTarget = DropTarget<ColumnKey, TaskId>;

/// Snapshot of the dragged task taken when the gesture starts
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub active: TaskId,
    /// Task as it was before any preview moves
    pub task: Task,
    pub origin_column: ColumnKey,
    pub origin_index: usize,
}

/// Result of finishing a gesture
#[derive(Debug, Clone, PartialEq)]
pub enum DragEnd {
    /// Nothing to finalize
    Ignored,
    /// Dropped on the delete column: `board` no longer holds `task`
    Delete { board: Board, task: Task },
    /// Dropped inside a real column: `task` carries its final column/completed
    Settle { board: Board, task: Task },
}

/// Column owning a drop target
pub fn find_column(board: &Board, target: BoardTarget) -> Option<ColumnKey> {
    match target {
        DropTarget::Container(key) => board.column(key).map(|c| c.key),
        DropTarget::Item(id) => board.locate(id).map(|(key, _)| key),
    }
}

/// Record the dragged task; the board itself is left alone
pub fn drag_start(board: &Board, active: TaskId) -> Option<DragSession> {
    let (origin_column, origin_index) = board.locate(active)?;
    let task = board.find_task(active)?.clone();
    Some(DragSession {
        active,
        task,
        origin_column,
        origin_index,
    })
}

/// Live preview of a cross-column move. Returns None when the board
/// should stay as it is: unresolved ids or both ends in the same column
/// (same-column reordering waits for the drop).
pub fn drag_over(board: &Board, active: TaskId, over: Option<BoardTarget>, delta_y: i32) -> Option<Board> {
    let over = over?;
    let from = find_column(board, DropTarget::Item(active))?;
    let to = find_column(board, over)?;
    if from == to {
        return None;
    }

    let task = board.find_task(active)?;
    let destination = board.column(to)?;
    let index = match over {
        DropTarget::Item(over_id) => {
            let over_index = destination.position(over_id)?;
            // Moving down past the last card appends after it
            let below_last = over_index + 1 == destination.tasks.len() && delta_y > 0;
            over_index + usize::from(below_last)
        }
        DropTarget::Container(_) => destination.tasks.len(),
    };

    Some(board.with_task_inserted_at(task, to, index))
}

/// Finalize a gesture. Cross-column moves were already applied by
/// `drag_over`, so only drops landing in the active task's own column
/// do anything here.
pub fn drag_end(board: &Board, active: TaskId, over: Option<BoardTarget>) -> DragEnd {
    let Some(over) = over else { return DragEnd::Ignored };
    let (Some(from), Some(to)) = (find_column(board, DropTarget::Item(active)), find_column(board, over)) else {
        return DragEnd::Ignored;
    };
    if from != to {
        return DragEnd::Ignored;
    }
    let (Some(task), Some(column)) = (board.find_task(active), board.column(to)) else {
        return DragEnd::Ignored;
    };

    if to == ColumnKey::Delete {
        return DragEnd::Delete {
            board: board.with_task_removed(active),
            task: task.clone(),
        };
    }

    let settled = task.placed_in(to);
    let Some(active_index) = column.position(active) else { return DragEnd::Ignored };
    let over_index = match over {
        DropTarget::Item(over_id) => column.position(over_id),
        DropTarget::Container(_) => None,
    };

    let next = board.with_task_replaced(&settled);
    let next = match over_index {
        Some(over_index) if over_index != active_index => {
            // Index in the sequence with the active task lifted out
            let target = if over_index > active_index { over_index - 1 } else { over_index };
            next.with_task_inserted_at(&settled, to, target)
        }
        Some(_) => next,
        None => next.with_task_inserted_at(&settled, to, usize::MAX),
    };

    DragEnd::Settle { board: next, task: settled }
}

/// Next drop target for an arrow key during a keyboard drag.
///
/// Left/Right jump to the neighbouring column's empty space. Up/Down walk
/// the gaps between the other tasks of the current column; a task target
/// means "land just before it", the column itself means "land at the end".
pub fn keyboard_target(
    board: &Board,
    active: TaskId,
    current: Option<BoardTarget>,
    direction: KeyDirection,
) -> Option<BoardTarget> {
    let column_key = match current {
        Some(target) => find_column(board, target)?,
        None => find_column(board, DropTarget::Item(active))?,
    };
    let column_index = ColumnKey::ALL.iter().position(|&key| key == column_key)?;

    match direction {
        KeyDirection::Left => {
            let key = ColumnKey::ALL.get(column_index.checked_sub(1)?)?;
            Some(DropTarget::Container(*key))
        }
        KeyDirection::Right => ColumnKey::ALL.get(column_index + 1).map(|&key| DropTarget::Container(key)),
        KeyDirection::Up | KeyDirection::Down => {
            let column = board.column(column_key)?;
            let others: Vec<TaskId> = column.tasks.iter().map(|t| t.id).filter(|&id| id != active).collect();
            let gap = match current {
                Some(DropTarget::Item(id)) if id != active => others.iter().position(|&other| other == id)?,
                Some(DropTarget::Container(_)) => others.len(),
                _ => column.position(active).unwrap_or(others.len()),
            };

            if direction == KeyDirection::Up {
                others.get(gap.checked_sub(1)?).map(|&id| DropTarget::Item(id))
            } else if gap + 1 < others.len() {
                Some(DropTarget::Item(others[gap + 1]))
            } else if gap + 1 == others.len() {
                Some(DropTarget::Container(column_key))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::{ids, make_task};

    fn board_with(columns: &[(ColumnKey, &[TaskId])]) -> Board {
        let tasks = columns
            .iter()
            .flat_map(|(key, ids)| ids.iter().map(move |&id| make_task(id, *key)))
            .collect();
        Board::from_tasks(tasks)
    }

    fn occurrences(board: &Board, id: TaskId) -> usize {
        board.tasks().filter(|t| t.id == id).count()
    }

    #[test]
    fn test_find_column() {
        let board = board_with(&[(ColumnKey::ToDo, &[1, 2]), (ColumnKey::Done, &[3])]);
        assert_eq!(find_column(&board, DropTarget::Item(3)), Some(ColumnKey::Done));
        assert_eq!(find_column(&board, DropTarget::Container(ColumnKey::OnHold)), Some(ColumnKey::OnHold));
        assert_eq!(find_column(&board, DropTarget::Item(99)), None);
    }

    #[test]
    fn test_drag_start_records_origin() {
        let board = board_with(&[(ColumnKey::InProgress, &[5, 6])]);
        let session = drag_start(&board, 6).unwrap();
        assert_eq!(session.origin_column, ColumnKey::InProgress);
        assert_eq!(session.origin_index, 1);
        assert_eq!(session.task.id, 6);
        assert!(drag_start(&board, 7).is_none());
    }

    #[test]
    fn test_drag_over_same_column_is_noop() {
        let board = board_with(&[(ColumnKey::ToDo, &[1, 2])]);
        assert_eq!(drag_over(&board, 1, Some(DropTarget::Item(2)), 10), None);
        assert_eq!(drag_over(&board, 1, Some(DropTarget::Container(ColumnKey::ToDo)), 10), None);
    }

    #[test]
    fn test_drag_over_unresolved_is_noop() {
        let board = board_with(&[(ColumnKey::ToDo, &[1])]);
        assert_eq!(drag_over(&board, 1, None, 0), None);
        assert_eq!(drag_over(&board, 1, Some(DropTarget::Item(42)), 0), None);
        assert_eq!(drag_over(&board, 42, Some(DropTarget::Container(ColumnKey::Done)), 0), None);
    }

    #[test]
    fn test_drag_over_inserts_before_over_task() {
        let board = board_with(&[(ColumnKey::ToDo, &[1]), (ColumnKey::Done, &[10, 11, 12])]);
        let next = drag_over(&board, 1, Some(DropTarget::Item(11)), 40).unwrap();
        assert_eq!(ids(&next, ColumnKey::Done), vec![10, 1, 11, 12]);
        assert!(ids(&next, ColumnKey::ToDo).is_empty());
    }

    #[test]
    fn test_drag_over_below_last_task_appends() {
        let board = board_with(&[(ColumnKey::ToDo, &[1]), (ColumnKey::Done, &[10, 11])]);

        let down = drag_over(&board, 1, Some(DropTarget::Item(11)), 25).unwrap();
        assert_eq!(ids(&down, ColumnKey::Done), vec![10, 11, 1]);

        let up = drag_over(&board, 1, Some(DropTarget::Item(11)), -25).unwrap();
        assert_eq!(ids(&up, ColumnKey::Done), vec![10, 1, 11]);

        let still = drag_over(&board, 1, Some(DropTarget::Item(11)), 0).unwrap();
        assert_eq!(ids(&still, ColumnKey::Done), vec![10, 1, 11]);
    }

    #[test]
    fn test_drag_over_column_space_appends() {
        let board = board_with(&[(ColumnKey::ToDo, &[1, 2]), (ColumnKey::OnHold, &[3])]);
        let next = drag_over(&board, 2, Some(DropTarget::Container(ColumnKey::OnHold)), -5).unwrap();
        assert_eq!(ids(&next, ColumnKey::OnHold), vec![3, 2]);
        assert_eq!(ids(&next, ColumnKey::ToDo), vec![1]);
    }

    #[test]
    fn test_drag_over_sequence_keeps_task_unique() {
        let mut board = board_with(&[
            (ColumnKey::OnHold, &[1, 2]),
            (ColumnKey::ToDo, &[3, 4]),
            (ColumnKey::InProgress, &[5]),
        ]);
        let total = board.task_count();
        let path = [
            Some(DropTarget::Item(3)),
            Some(DropTarget::Item(4)),
            Some(DropTarget::Container(ColumnKey::InProgress)),
            Some(DropTarget::Item(5)),
            Some(DropTarget::Container(ColumnKey::Done)),
            Some(DropTarget::Container(ColumnKey::Delete)),
            Some(DropTarget::Item(2)),
        ];
        for (step, over) in path.into_iter().enumerate() {
            if let Some(next) = drag_over(&board, 1, over, step as i32 * 10) {
                board = next;
            }
            assert_eq!(occurrences(&board, 1), 1, "step {}", step);
            assert_eq!(board.task_count(), total, "step {}", step);
        }
        assert_eq!(board.locate(1), Some((ColumnKey::OnHold, 1)));
    }

    #[test]
    fn test_drag_end_into_delete_removes_task() {
        let board = board_with(&[(ColumnKey::ToDo, &[1, 2])]);
        let preview = drag_over(&board, 1, Some(DropTarget::Container(ColumnKey::Delete)), 0).unwrap();
        assert_eq!(ids(&preview, ColumnKey::Delete), vec![1]);

        match drag_end(&preview, 1, Some(DropTarget::Container(ColumnKey::Delete))) {
            DragEnd::Delete { board, task } => {
                assert_eq!(task.id, 1);
                assert_eq!(occurrences(&board, 1), 0);
                assert!(ids(&board, ColumnKey::Delete).is_empty());
                assert_eq!(ids(&board, ColumnKey::ToDo), vec![2]);
            }
            other => panic!("expected delete, got {:?}", other),
        }
    }

    #[test]
    fn test_completed_follows_every_column_transition() {
        let real = [ColumnKey::OnHold, ColumnKey::ToDo, ColumnKey::InProgress, ColumnKey::Done];
        for from in real {
            for to in real {
                let board = board_with(&[(from, &[1])]);
                let board = drag_over(&board, 1, Some(DropTarget::Container(to)), 0).unwrap_or(board);
                match drag_end(&board, 1, Some(DropTarget::Container(to))) {
                    DragEnd::Settle { board, task } => {
                        assert_eq!(task.column, to);
                        assert_eq!(task.completed, to == ColumnKey::Done, "{:?} -> {:?}", from, to);
                        assert_eq!(board.find_task(1), Some(&task));
                    }
                    other => panic!("expected settle, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_drag_end_reorder_example() {
        let board = board_with(&[(ColumnKey::ToDo, &[1, 2, 3])]);
        match drag_end(&board, 1, Some(DropTarget::Item(3))) {
            DragEnd::Settle { board, .. } => assert_eq!(ids(&board, ColumnKey::ToDo), vec![2, 1, 3]),
            other => panic!("expected settle, got {:?}", other),
        }
        match drag_end(&board, 3, Some(DropTarget::Item(1))) {
            DragEnd::Settle { board, .. } => assert_eq!(ids(&board, ColumnKey::ToDo), vec![3, 1, 2]),
            other => panic!("expected settle, got {:?}", other),
        }
    }

    #[test]
    fn test_drag_end_reorder_preserves_relative_order() {
        let order: Vec<TaskId> = vec![1, 2, 3, 4, 5];
        let board = board_with(&[(ColumnKey::InProgress, &order)]);
        for &active in &order {
            for &over in &order {
                let DragEnd::Settle { board: next, .. } = drag_end(&board, active, Some(DropTarget::Item(over))) else {
                    panic!("expected settle for {} over {}", active, over);
                };
                let result = ids(&next, ColumnKey::InProgress);
                let others: Vec<_> = result.iter().copied().filter(|&id| id != active).collect();
                let expected: Vec<_> = order.iter().copied().filter(|&id| id != active).collect();
                assert_eq!(others, expected, "{} over {}", active, over);
                assert_eq!(result.len(), order.len());
            }
        }
    }

    #[test]
    fn test_drag_end_on_own_column_space_moves_to_end() {
        let board = board_with(&[(ColumnKey::ToDo, &[1, 2, 3])]);
        let DragEnd::Settle { board, .. } = drag_end(&board, 1, Some(DropTarget::Container(ColumnKey::ToDo))) else {
            panic!("expected settle");
        };
        assert_eq!(ids(&board, ColumnKey::ToDo), vec![2, 3, 1]);
    }

    #[test]
    fn test_drag_end_ignored_cases() {
        let board = board_with(&[(ColumnKey::ToDo, &[1]), (ColumnKey::Done, &[2])]);
        assert_eq!(drag_end(&board, 1, None), DragEnd::Ignored);
        assert_eq!(drag_end(&board, 1, Some(DropTarget::Item(2))), DragEnd::Ignored);
        assert_eq!(drag_end(&board, 1, Some(DropTarget::Item(77))), DragEnd::Ignored);
        assert_eq!(drag_end(&board, 77, Some(DropTarget::Container(ColumnKey::ToDo))), DragEnd::Ignored);
    }

    #[test]
    fn test_keyboard_down_then_drop_moves_one_step() {
        let board = board_with(&[(ColumnKey::ToDo, &[1, 2, 3])]);

        let first = keyboard_target(&board, 1, None, KeyDirection::Down);
        assert_eq!(first, Some(DropTarget::Item(3)));
        let DragEnd::Settle { board: moved, .. } = drag_end(&board, 1, first) else { panic!("expected settle") };
        assert_eq!(ids(&moved, ColumnKey::ToDo), vec![2, 1, 3]);

        let second = keyboard_target(&board, 1, first, KeyDirection::Down);
        assert_eq!(second, Some(DropTarget::Container(ColumnKey::ToDo)));
        assert_eq!(keyboard_target(&board, 1, second, KeyDirection::Down), None);
    }

    #[test]
    fn test_keyboard_up_walks_back() {
        let board = board_with(&[(ColumnKey::ToDo, &[1, 2, 3])]);
        let up = keyboard_target(&board, 3, None, KeyDirection::Up);
        assert_eq!(up, Some(DropTarget::Item(2)));
        let DragEnd::Settle { board: moved, .. } = drag_end(&board, 3, up) else { panic!("expected settle") };
        assert_eq!(ids(&moved, ColumnKey::ToDo), vec![1, 3, 2]);

        assert_eq!(keyboard_target(&board, 1, None, KeyDirection::Up), None);
        let from_end = Some(DropTarget::Container(ColumnKey::ToDo));
        assert_eq!(keyboard_target(&board, 1, from_end, KeyDirection::Up), Some(DropTarget::Item(3)));
    }

    #[test]
    fn test_keyboard_left_right_change_column() {
        let board = board_with(&[(ColumnKey::OnHold, &[1]), (ColumnKey::Done, &[2])]);
        assert_eq!(keyboard_target(&board, 1, None, KeyDirection::Left), None);
        assert_eq!(
            keyboard_target(&board, 1, None, KeyDirection::Right),
            Some(DropTarget::Container(ColumnKey::ToDo))
        );
        assert_eq!(
            keyboard_target(&board, 2, None, KeyDirection::Right),
            Some(DropTarget::Container(ColumnKey::Delete))
        );
        assert_eq!(keyboard_target(&board, 2, Some(DropTarget::Container(ColumnKey::Delete)), KeyDirection::Right), None);
    }

    #[test]
    fn test_keyboard_move_across_then_settle() {
        let board = board_with(&[(ColumnKey::ToDo, &[1]), (ColumnKey::InProgress, &[5, 6])]);
        let right = keyboard_target(&board, 1, None, KeyDirection::Right);
        let preview = drag_over(&board, 1, right, 0).unwrap();
        assert_eq!(ids(&preview, ColumnKey::InProgress), vec![5, 6, 1]);

        let up = keyboard_target(&preview, 1, right, KeyDirection::Up);
        assert_eq!(up, Some(DropTarget::Item(6)));
        assert_eq!(drag_over(&preview, 1, up, -1), None);

        let DragEnd::Settle { board: done, task } = drag_end(&preview, 1, up) else { panic!("expected settle") };
        assert_eq!(ids(&done, ColumnKey::InProgress), vec![5, 1, 6]);
        assert_eq!(task.column, ColumnKey::InProgress);
    }
}

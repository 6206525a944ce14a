use super::*;

/// Push `value` onto `state`, recording the previous value first.
fn mutate(history: &mut History<Vec<i32>>, state: &mut Vec<i32>, value: i32) {
    history.record(state.clone());
    state.push(value);
}

#[test]
fn empty_history_has_nothing_to_undo_or_redo() {
    let mut h: History<Vec<i32>> = History::new();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert_eq!(h.undo(vec![1]), None);
    assert_eq!(h.redo(vec![1]), None);
}

#[test]
fn n_mutations_then_n_undos_restores_initial_state() {
    let mut h = History::new();
    let initial = vec![7, 8];
    let mut state = initial.clone();
    for v in 0..5 {
        mutate(&mut h, &mut state, v);
    }
    for _ in 0..5 {
        state = h.undo(state).unwrap();
    }
    assert_eq!(state, initial);
    assert!(!h.can_undo());
}

#[test]
fn redo_replays_undone_state() {
    let mut h = History::new();
    let mut state = Vec::new();
    mutate(&mut h, &mut state, 1);
    mutate(&mut h, &mut state, 2);
    state = h.undo(state).unwrap();
    assert_eq!(state, vec![1]);
    assert!(h.can_redo());
    state = h.redo(state).unwrap();
    assert_eq!(state, vec![1, 2]);
    assert!(!h.can_redo());
    assert!(h.can_undo());
}

#[test]
fn new_mutation_after_undo_discards_redo_branch() {
    let mut h = History::new();
    let mut state = Vec::new();
    mutate(&mut h, &mut state, 1);
    mutate(&mut h, &mut state, 2);
    state = h.undo(state).unwrap();
    mutate(&mut h, &mut state, 3);
    assert!(!h.can_redo());
    assert_eq!(h.redo(state.clone()), None);
    assert_eq!(state, vec![1, 3]);
}

#[test]
fn limit_drops_oldest_snapshots() {
    let mut h = History::with_limit(3);
    let mut state = Vec::new();
    for v in 0..10 {
        mutate(&mut h, &mut state, v);
    }
    assert_eq!(h.undo_depth(), 3);
    for _ in 0..3 {
        state = h.undo(state).unwrap();
    }
    assert_eq!(state, (0..7).collect::<Vec<_>>());
    assert!(!h.can_undo());
}

#[test]
fn default_history_keeps_every_step() {
    let mut h = History::new();
    for v in 0..500 {
        h.record(v);
    }
    assert_eq!(h.undo_depth(), 500);
    let mut state = 500;
    for _ in 0..500 {
        state = h.undo(state).unwrap();
    }
    assert_eq!(state, 0);
}

#[test]
fn clear_forgets_everything() {
    let mut h = History::new();
    h.record(1);
    h.undo(2);
    h.record(3);
    h.clear();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}

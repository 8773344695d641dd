use demineur::{CellState, GameConfig, GameError, GameEvent, Minefield, RevealResult, RngSource, SequenceSource};

fn count_mines(f: &Minefield) -> usize {
    let mut n = 0;
    for y in 0..f.height() {
        for x in 0..f.width() {
            if f.cell_is_mine(x, y).unwrap() { n += 1; }
        }
    }
    n
}

fn states(f: &Minefield) -> Vec<CellState> {
    let mut out = Vec::new();
    for y in 0..f.height() {
        for x in 0..f.width() {
            out.push(f.cell_state(x, y).unwrap());
        }
    }
    out
}

/// 5x5 with a full column of mines at x = 2. Opening the left side cannot win.
fn walled() -> Minefield {
    let wall = [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)];
    Minefield::from_mine_coords(5, 5, &wall, SequenceSource::new((0..10).collect())).expect("board")
}

#[test]
fn placement_puts_exact_mine_count() {
    for seed in 1..20 {
        let f = Minefield::new(GameConfig::new(8, 8, 8), RngSource::from_seed(seed)).expect("board");
        assert_eq!(count_mines(&f), 8);
        assert_eq!(f.remaining_mines(), 8);
        assert!(states(&f).iter().all(|&s| s == CellState::Hidden));
    }
    let full = Minefield::new(GameConfig::new(8, 8, 55), RngSource::from_seed(7)).expect("board");
    assert_eq!(count_mines(&full), 55);
}

#[test]
fn too_many_mines_or_empty_board_is_rejected() {
    let err = Minefield::new(GameConfig::new(8, 8, 64), RngSource::from_seed(1)).err();
    assert_eq!(err, Some(GameError::InvalidConfiguration { width: 8, height: 8, mines: 64 }));
    assert!(Minefield::new(GameConfig::new(8, 8, 56), RngSource::from_seed(1)).is_err());
    assert!(Minefield::new(GameConfig::new(0, 8, 0), RngSource::from_seed(1)).is_err());
    assert!(Minefield::new(GameConfig::new(8, 0, 0), RngSource::from_seed(1)).is_err());
    assert!(Minefield::new(GameConfig::new(2, 2, 0), RngSource::from_seed(1)).is_err());
    assert!(Minefield::new(GameConfig::new(usize::MAX, 2, usize::MAX), RngSource::from_seed(1)).is_err());
}

#[test]
fn rejection_sampling_skips_duplicates() {
    // draws (0,0), (0,0) again, then (4,4)
    let f = Minefield::new(GameConfig::new(5, 5, 2), SequenceSource::new(vec![0, 0, 0, 0, 4, 4])).expect("board");
    assert!(f.cell_is_mine(0, 0).unwrap());
    assert!(f.cell_is_mine(4, 4).unwrap());
    assert_eq!(count_mines(&f), 2);
}

#[test]
fn first_open_moves_mines_out_of_the_opening() {
    // both mines sit next to the first click; replacements land at (4,4) and (0,4)
    let mut f = Minefield::from_mine_coords(5, 5, &[(1, 1), (2, 2)], SequenceSource::new(vec![4, 4, 0, 4])).expect("board");
    let res = f.open(1, 1).unwrap();
    assert_ne!(res, RevealResult::HitMine);
    assert!(f.has_started());
    for y in 0..=2 {
        for x in 0..=2 {
            assert!(!f.cell_is_mine(x, y).unwrap(), "mine left at ({},{})", x, y);
        }
    }
    assert!(f.cell_is_mine(4, 4).unwrap());
    assert!(f.cell_is_mine(0, 4).unwrap());
    assert_eq!(count_mines(&f), 2);
}

#[test]
fn first_open_is_always_safe_with_random_boards() {
    for seed in 1..50 {
        let mut f = Minefield::new(GameConfig::new(9, 9, 72), RngSource::from_seed(seed)).expect("board");
        let res = f.open(4, 4).unwrap();
        assert_ne!(res, RevealResult::HitMine);
        assert_eq!(count_mines(&f), 72);
        for (x, y) in f.grid().neighbors(4, 4) {
            assert!(!f.cell_is_mine(x, y).unwrap());
        }
        // only the opening is left safe, so it is won right away
        assert_eq!(res, RevealResult::Won);
    }
}

#[test]
fn relocation_runs_only_once() {
    let mut f = walled();
    f.open(0, 0).unwrap();
    f.open(1, 2).unwrap();
    // the wall next to (1,2) did not move
    assert!(f.cell_is_mine(2, 2).unwrap());
    assert_eq!(count_mines(&f), 5);
}

#[test]
fn empty_board_opens_entirely_in_one_call() {
    let mut f = Minefield::new(GameConfig::new(3, 3, 0), RngSource::from_seed(3)).expect("board");
    assert_eq!(f.open(1, 1).unwrap(), RevealResult::Won);
    assert!(states(&f).iter().all(|&s| s == CellState::Revealed));
    assert!(f.is_over() && f.won());

    let mut g = Minefield::new(GameConfig::new(10, 6, 0), RngSource::from_seed(3)).expect("board");
    assert_eq!(g.open(0, 0).unwrap(), RevealResult::Won);
    assert!(states(&g).iter().all(|&s| s == CellState::Revealed));
}

#[test]
fn zero_cell_opens_its_hidden_neighbors() {
    let mut f = walled();
    assert_eq!(f.open(0, 2).unwrap(), RevealResult::RevealedSafe);
    for y in 0..5 {
        assert_eq!(f.cell_state(0, y).unwrap(), CellState::Revealed);
        assert_eq!(f.cell_state(1, y).unwrap(), CellState::Revealed);
        assert_eq!(f.cell_state(2, y).unwrap(), CellState::Hidden);
        assert_eq!(f.cell_state(3, y).unwrap(), CellState::Hidden);
    }
    assert_eq!(f.mines_around(1, 2).unwrap(), 3);
    assert_eq!(f.mines_around(1, 0).unwrap(), 2);
    assert_eq!(f.hidden_around(1, 2).unwrap(), 3);
    assert!(!f.is_over());
}

#[test]
fn flood_leaves_flags_alone() {
    let mut f = walled();
    f.set_flag(0, 4, CellState::Flagged).unwrap();
    f.set_flag(1, 4, CellState::FlaggedUnsure).unwrap();
    f.open(0, 0).unwrap();
    assert_eq!(f.cell_state(0, 4).unwrap(), CellState::Flagged);
    assert_eq!(f.cell_state(1, 4).unwrap(), CellState::FlaggedUnsure);
    assert_eq!(f.cell_state(0, 3).unwrap(), CellState::Revealed);
}

#[test]
fn opening_a_mine_loses_and_changes_nothing_else() {
    let mut f = walled();
    f.open(0, 0).unwrap();
    f.set_flag(4, 4, CellState::Flagged).unwrap();
    let before = states(&f);
    assert_eq!(f.open(2, 2).unwrap(), RevealResult::HitMine);
    assert!(f.is_over());
    assert!(!f.won());
    assert_eq!(f.exploded(), Some((2, 2)));
    let after = states(&f);
    for (i, (b, a)) in before.iter().zip(after.iter()).enumerate() {
        if i == 2 * 5 + 2 {
            assert_eq!(*a, CellState::Revealed);
        } else {
            assert_eq!(a, b, "cell {} changed", i);
        }
    }
}

#[test]
fn finished_game_rejects_moves() {
    let mut f = walled();
    f.open(0, 0).unwrap();
    f.open(2, 0).unwrap();
    let frozen = states(&f);
    assert!(matches!(f.open(4, 4), Err(GameError::InvalidTransition(_))));
    assert!(matches!(f.cycle_flag(4, 4), Err(GameError::InvalidTransition(_))));
    assert!(matches!(f.set_flag(4, 4, CellState::Flagged), Err(GameError::InvalidTransition(_))));
    assert_eq!(states(&f), frozen);
}

#[test]
fn chord_with_correct_flags_opens_and_wins() {
    let mut f = walled();
    f.open(0, 0).unwrap();
    f.set_flag(2, 1, CellState::Flagged).unwrap();
    f.set_flag(2, 2, CellState::Flagged).unwrap();
    f.set_flag(2, 3, CellState::Flagged).unwrap();
    // (3,2) sees three flagged mines, so its hidden neighbors open and the right side floods
    assert_eq!(f.open(3, 2).unwrap(), RevealResult::Won);
    for y in 0..5 {
        assert_eq!(f.cell_state(4, y).unwrap(), CellState::Revealed);
    }
    assert_eq!(f.cell_state(2, 0).unwrap(), CellState::Hidden);
}

#[test]
fn chord_with_a_wrong_flag_hits_a_mine() {
    let mut f = walled();
    f.open(0, 0).unwrap();
    f.set_flag(2, 1, CellState::Flagged).unwrap();
    f.set_flag(2, 2, CellState::Flagged).unwrap();
    f.set_flag(4, 2, CellState::Flagged).unwrap();
    assert_eq!(f.open(3, 2).unwrap(), RevealResult::HitMine);
    assert!(f.is_over() && !f.won());
    assert_eq!(f.cell_state(4, 2).unwrap(), CellState::Flagged);
}

#[test]
fn reopening_a_revealed_cell_chords_only_when_flags_match() {
    let mut f = walled();
    f.open(0, 0).unwrap();
    assert_eq!(f.open(1, 2).unwrap(), RevealResult::NoOp);
    f.set_flag(2, 1, CellState::Flagged).unwrap();
    f.set_flag(2, 2, CellState::Flagged).unwrap();
    f.set_flag(2, 3, CellState::Flagged).unwrap();
    // flags match but every other neighbor is already open
    assert_eq!(f.open(1, 2).unwrap(), RevealResult::NoOp);
    assert_eq!(f.flags_around(1, 2).unwrap(), 3);
    assert!(!f.is_over());
}

#[test]
fn opening_a_flagged_cell_is_ignored() {
    let mut f = walled();
    f.cycle_flag(0, 0).unwrap();
    assert_eq!(f.open(0, 0).unwrap(), RevealResult::NoOp);
    assert!(!f.has_started());
    assert!(f.take_events().is_empty());
    assert_eq!(f.cell_state(0, 0).unwrap(), CellState::Flagged);
}

#[test]
fn win_is_declared_when_only_mines_remain() {
    let mut f = Minefield::from_mine_coords(4, 4, &[(3, 3)], SequenceSource::new(vec![0])).expect("board");
    assert!(!f.check_win());
    assert_eq!(f.open(0, 0).unwrap(), RevealResult::Won);
    assert_eq!(f.unrevealed(), f.mine_count());
    assert_eq!(f.cell_state(3, 3).unwrap(), CellState::Hidden);
    assert!(f.check_win());
}

#[test]
fn flag_cycle_returns_to_hidden() {
    let mut f = walled();
    assert_eq!(f.cycle_flag(4, 4).unwrap(), CellState::Flagged);
    assert_eq!(f.cycle_flag(4, 4).unwrap(), CellState::FlaggedUnsure);
    assert_eq!(f.cycle_flag(4, 4).unwrap(), CellState::Hidden);
}

#[test]
fn flags_cannot_touch_revealed_cells() {
    let mut f = walled();
    f.open(0, 0).unwrap();
    assert!(matches!(f.cycle_flag(0, 0), Err(GameError::InvalidTransition(_))));
    assert!(matches!(f.set_flag(0, 0, CellState::Flagged), Err(GameError::InvalidTransition(_))));
    assert!(matches!(f.set_flag(4, 4, CellState::Revealed), Err(GameError::InvalidTransition(_))));
    assert_eq!(f.cell_state(4, 4).unwrap(), CellState::Hidden);
}

#[test]
fn remaining_mines_counts_only_sure_flags_and_goes_negative() {
    let mut f = walled();
    f.set_flag(4, 4, CellState::FlaggedUnsure).unwrap();
    assert_eq!(f.remaining_mines(), 5);
    for y in 0..5 {
        for x in 3..5 {
            f.set_flag(x, y, CellState::Flagged).unwrap();
        }
    }
    assert_eq!(f.remaining_mines(), -5);
}

#[test]
fn out_of_bounds_is_reported() {
    let mut f = walled();
    assert_eq!(f.open(5, 0), Err(GameError::OutOfBounds { x: 5, y: 0 }));
    assert_eq!(f.cycle_flag(0, 5), Err(GameError::OutOfBounds { x: 0, y: 5 }));
    assert_eq!(f.cell_state(9, 9), Err(GameError::OutOfBounds { x: 9, y: 9 }));
    assert!(f.mines_around(5, 5).is_err());
    assert!(f.cell(5, 5).is_none());
    let bad = Minefield::from_mine_coords(5, 5, &[(7, 0)], SequenceSource::new(vec![0]));
    assert_eq!(bad.err(), Some(GameError::OutOfBounds { x: 7, y: 0 }));
}

#[test]
fn events_signal_start_and_end() {
    let mut f = walled();
    f.open(0, 0).unwrap();
    assert_eq!(f.take_events(), vec![GameEvent::Started]);
    f.open(0, 1).unwrap();
    assert!(f.take_events().is_empty());
    f.open(2, 4).unwrap();
    assert_eq!(f.take_events(), vec![GameEvent::Ended { won: false }]);
}

#[test]
fn new_game_resets_everything_and_failure_keeps_state() {
    let mut f = Minefield::new(GameConfig::new(8, 8, 8), RngSource::from_seed(11)).expect("board");
    f.open(3, 3).unwrap();
    let before = states(&f);
    assert!(f.new_game(GameConfig::new(8, 8, 64)).is_err());
    assert_eq!(states(&f), before);
    assert!(f.has_started());

    f.new_game(GameConfig::new(9, 7, 10)).unwrap();
    assert_eq!((f.width(), f.height(), f.mine_count()), (9, 7, 10));
    assert_eq!(count_mines(&f), 10);
    assert!(!f.has_started() && !f.is_over());
    assert!(states(&f).iter().all(|&s| s == CellState::Hidden));
    assert!(f.take_events().is_empty());
}

#[test]
fn adjacency_matches_neighbor_mines() {
    let mut f = Minefield::new(GameConfig::new(8, 8, 10), RngSource::from_seed(999)).expect("board");
    let _ = f.open(0, 0);
    for y in 0..f.height() {
        for x in 0..f.width() {
            let adj = f.grid().neighbors(x, y).filter(|&(nx, ny)| f.cell_is_mine(nx, ny).unwrap()).count();
            assert_eq!(f.mines_around(x, y).unwrap() as usize, adj, "adjacency mismatch at ({},{})", x, y);
        }
    }
}

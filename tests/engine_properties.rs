//! Properties of the board model, registry and policy engine

mod common;

use common::{assert_distribution, ephemeral_registry, play};
use selfplay::{
    Error, ValuePair,
    engine::{greedy_policy, uniform_policy},
    tictactoe::{Board, GameOutcome, Player},
};

#[test]
fn test_empty_board() {
    let mut registry = ephemeral_registry();
    let root = registry.initial().unwrap();
    let position = registry.position(root).unwrap();

    assert_eq!(position.legal_moves(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(position.to_move(), Some(Player::X));
    assert!(!position.is_terminal());
    assert_eq!(position.value(), ValuePair::ZERO);
}

#[test]
fn test_legal_move_count_along_a_game() {
    let mut registry = ephemeral_registry();
    let moves = [4, 0, 8, 2, 1, 7, 6, 3, 5];
    let mut id = registry.initial().unwrap();

    for &mv in &moves {
        let position = registry.position(id).unwrap();
        if position.is_terminal() {
            assert!(position.legal_moves().is_empty());
            break;
        }
        assert_eq!(position.legal_moves().len(), 9 - position.ply_count());
        assert_eq!(position.policy().len(), position.legal_moves().len());
        id = registry.apply_move(id, mv).unwrap();
    }
}

#[test]
fn test_top_row_is_a_win_for_x() {
    let mut registry = ephemeral_registry();
    let id = registry
        .get_or_create(Board::from_key("XXX------").unwrap())
        .unwrap();
    let position = registry.position(id).unwrap();

    assert_eq!(position.winner(), Some(Player::X));
    assert!(position.is_terminal());
    assert!(position.legal_moves().is_empty());
    assert_eq!(position.reward(), ValuePair::new(1.0, -1.0));
}

#[test]
fn test_terminal_rewards() {
    let mut registry = ephemeral_registry();
    // O completes the left column.
    let o_wins = play(&mut registry, &[1, 0, 2, 3, 4, 6]);
    assert_eq!(
        registry.position(o_wins).unwrap().reward(),
        ValuePair::new(-1.0, 1.0)
    );

    let draw = registry
        .get_or_create(Board::from_key("XOXXOOOXX").unwrap())
        .unwrap();
    let position = registry.position(draw).unwrap();
    assert!(position.is_terminal());
    assert_eq!(position.winner(), None);
    assert_eq!(position.outcome(), Some(GameOutcome::Draw));
    assert_eq!(position.reward(), ValuePair::ZERO);
}

#[test]
fn test_same_sequence_same_position() {
    let mut registry = ephemeral_registry();
    let first = play(&mut registry, &[4, 0, 8]);
    let second = play(&mut registry, &[4, 0, 8]);
    assert_eq!(first, second);

    let board = *registry.position(first).unwrap().board();
    assert_eq!(registry.get_or_create(board).unwrap(), first);
}

#[test]
fn test_winner_independent_of_move_order() {
    let mut registry = ephemeral_registry();
    let a = play(&mut registry, &[0, 3, 1, 4, 2]);
    let b = play(&mut registry, &[2, 4, 1, 3, 0]);

    assert_eq!(a, b);
    assert_eq!(registry.position(a).unwrap().winner(), Some(Player::X));
}

#[test]
fn test_invalid_move_is_surfaced() {
    let mut registry = ephemeral_registry();
    let id = play(&mut registry, &[4]);
    let before = registry.len();

    assert!(matches!(
        registry.apply_move(id, 4),
        Err(Error::InvalidMove { position: 4, .. })
    ));
    assert_eq!(registry.len(), before);
}

#[test]
fn test_blended_policy_is_a_distribution() {
    let mut registry = ephemeral_registry();
    let id = play(&mut registry, &[0, 4, 1]);

    for explore_factor in [0.0, 0.5, 1.0] {
        let policy = registry.blended_policy(id, explore_factor).unwrap();
        assert_distribution(&policy);
    }
}

#[test]
fn test_blend_endpoints() {
    let mut registry = ephemeral_registry();
    // O to move and must block at 2; X threatens the top row.
    let id = play(&mut registry, &[0, 4, 1]);
    let moves = registry.position(id).unwrap().legal_moves().to_vec();

    let uniform = uniform_policy(moves.len());
    assert_eq!(registry.blended_policy(id, 1.0).unwrap(), uniform);

    let next_values = registry.next_values(id).unwrap();
    let greedy = greedy_policy(&next_values, Player::O);
    assert_eq!(registry.blended_policy(id, 0.0).unwrap(), greedy);
    assert_eq!(registry.greedy_policy(id, Player::O).unwrap(), greedy);
}

#[test]
fn test_revision_learns_to_block() {
    let mut registry = ephemeral_registry();
    // After X at 0 and 1, O must take 2.
    let id = play(&mut registry, &[0, 4, 1]);
    let block = play(&mut registry, &[0, 4, 1, 2]);

    // Teach the blocking successor that X's follow-ups are harmless, and the
    // others that X wins at 2.
    let moves = registry.position(id).unwrap().legal_moves().to_vec();
    for mv in moves.iter().copied().filter(|&m| m != 2) {
        let next = registry.apply_move(id, mv).unwrap();
        registry.revise(next, 0.0).unwrap();
        assert_eq!(registry.position(next).unwrap().value().x(), 1.0);
    }
    registry.revise(block, 0.0).unwrap();
    assert!(registry.position(block).unwrap().value().x() < 1.0);

    registry.revise(id, 0.0).unwrap();
    let position = registry.position(id).unwrap();
    assert_eq!(position.probability_of(2), Some(1.0));
    assert_eq!(position.revision_count(), 1);
}

#[test]
fn test_value_stays_zero_sum() {
    let mut registry = ephemeral_registry();
    let id = play(&mut registry, &[0, 4, 1]);
    for _ in 0..3 {
        let successors = registry.successors(id).unwrap();
        for next in successors {
            registry.revise(next, 0.5).unwrap();
        }
        registry.revise(id, 0.5).unwrap();
    }
    for (_, position) in registry.iter() {
        let value = position.value();
        assert_eq!(value.x(), -value.o(), "{}", position.key());
    }
}

#[test]
fn test_weighted_scheme_is_a_distribution() {
    let mut registry = ephemeral_registry();
    let id = play(&mut registry, &[0, 4]);
    for _ in 0..4 {
        registry
            .revise_with(id, selfplay::PolicyScheme::Weighted)
            .unwrap();
        assert_distribution(registry.position(id).unwrap().policy());
    }
    assert_eq!(registry.position(id).unwrap().revision_count(), 4);
}

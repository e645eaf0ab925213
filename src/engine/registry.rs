//! Arena of canonical positions
//!
//! The registry owns every [`Position`] created in a process and hands out
//! [`PositionId`]s. `get_or_create` is the only way to obtain a position, so
//! a board reached through different move orders always maps to the same
//! entry and its statistics accumulate across all of those paths.

use std::collections::HashMap;

use rand::Rng;

use super::{
    policy::{
        PolicyScheme, blend, check_explore_factor, greedy_policy, sample_move, uniform_policy,
        validate_distribution, weighted_policy,
    },
    position::Position,
    value::backup_value,
};
use crate::{
    Error, Result,
    ports::{Snapshot, StatsStore},
    tictactoe::{Board, Player},
    types::{PositionId, ValuePair},
};

/// Process-wide table from board to position.
///
/// Grows without bound. Tic-tac-toe has at most 5478 legal positions, so the
/// table stays small; reusing the registry for a larger game would need an
/// eviction policy.
///
/// Single-threaded by construction: concurrent trials would race both on
/// the table and on the stored files.
pub struct StateRegistry {
    store: Box<dyn StatsStore>,
    positions: Vec<Position>,
    index: HashMap<Board, PositionId>,
}

impl StateRegistry {
    pub fn new(store: impl StatsStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            positions: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn store(&self) -> &dyn StatsStore {
        self.store.as_ref()
    }

    /// Id of the canonical position for `board`.
    ///
    /// The first request for a board creates the position and hydrates its
    /// statistics from the store; later requests return the live entry
    /// untouched. Stored records that are unreadable or do not fit the board
    /// are discarded and defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails with an I/O error.
    pub fn get_or_create(&mut self, board: Board) -> Result<PositionId> {
        if let Some(&id) = self.index.get(&board) {
            return Ok(id);
        }

        let mut position = Position::new(board);
        if let Some(record) = self.store.load(position.key())? {
            match position.check_record(&record) {
                Ok(()) => {
                    position.seed_from(&record);
                    log::trace!(
                        "hydrated {} at revision {}",
                        position.key(),
                        position.revision_count()
                    );
                }
                Err(err) => {
                    log::warn!("discarding {err}");
                    self.store.discard(position.key())?;
                }
            }
        }

        let id = PositionId(self.positions.len());
        self.positions.push(position);
        self.index.insert(board, id);
        Ok(id)
    }

    /// Id of the empty starting board.
    pub fn initial(&mut self) -> Result<PositionId> {
        self.get_or_create(Board::new())
    }

    /// Id for `board` if it has already been created.
    pub fn lookup(&self, board: &Board) -> Option<PositionId> {
        self.index.get(board).copied()
    }

    pub fn position(&self, id: PositionId) -> Result<&Position> {
        self.positions
            .get(id.0)
            .ok_or(Error::UnknownPosition { id: id.0 })
    }

    fn position_mut(&mut self, id: PositionId) -> Result<&mut Position> {
        self.positions
            .get_mut(id.0)
            .ok_or(Error::UnknownPosition { id: id.0 })
    }

    /// Overwrite a value in place without touching the store.
    #[cfg(test)]
    pub(crate) fn set_value(&mut self, id: PositionId, value: ValuePair) -> Result<()> {
        let position = self.position_mut(id)?;
        let policy = position.policy().to_vec();
        position.apply_revision(policy, value);
        Ok(())
    }

    /// Play `mv` and return the position it leads to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] if `mv` is not one of the position's
    /// legal moves.
    pub fn apply_move(&mut self, id: PositionId, mv: usize) -> Result<PositionId> {
        let position = self.position(id)?;
        let mover = match position.to_move() {
            Some(player) if position.is_legal(mv) => player,
            _ => {
                return Err(Error::InvalidMove {
                    position: mv,
                    board: position.key().to_string(),
                });
            }
        };
        let next = position.board().with_move(mv, mover)?;
        self.get_or_create(next)
    }

    /// Positions reached by each legal move, in legal-move order.
    pub fn successors(&mut self, id: PositionId) -> Result<Vec<PositionId>> {
        let moves = self.position(id)?.legal_moves().to_vec();
        moves
            .into_iter()
            .map(|mv| self.apply_move(id, mv))
            .collect()
    }

    /// Current values of the successors, in legal-move order.
    pub fn next_values(&mut self, id: PositionId) -> Result<Vec<ValuePair>> {
        let successors = self.successors(id)?;
        successors
            .into_iter()
            .map(|next| self.position(next).map(Position::value))
            .collect()
    }

    pub fn uniform_policy(&self, id: PositionId) -> Result<Vec<f64>> {
        Ok(uniform_policy(self.position(id)?.legal_moves().len()))
    }

    /// Greedy distribution from `perspective`'s point of view.
    pub fn greedy_policy(&mut self, id: PositionId, perspective: Player) -> Result<Vec<f64>> {
        let next_values = self.next_values(id)?;
        Ok(greedy_policy(&next_values, perspective))
    }

    /// Greedy and uniform policies blended for the player to move, validated
    /// as a distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an explore factor outside
    /// `[0, 1]` and [`Error::PolicyInvariant`] if the result is not a
    /// probability distribution.
    pub fn blended_policy(&mut self, id: PositionId, explore_factor: f64) -> Result<Vec<f64>> {
        check_explore_factor(explore_factor)?;
        self.build_policy(id, PolicyScheme::Blended { explore_factor })
    }

    /// Revision-weighted distribution for the player to move.
    pub fn weighted_policy(&mut self, id: PositionId) -> Result<Vec<f64>> {
        self.build_policy(id, PolicyScheme::Weighted)
    }

    fn build_policy(&mut self, id: PositionId, scheme: PolicyScheme) -> Result<Vec<f64>> {
        let next_values = self.next_values(id)?;
        let position = self.position(id)?;
        let Some(mover) = position.to_move() else {
            return Ok(Vec::new());
        };

        let policy = match scheme {
            PolicyScheme::Blended { explore_factor } => blend(
                &greedy_policy(&next_values, mover),
                &uniform_policy(next_values.len()),
                explore_factor,
            ),
            PolicyScheme::Weighted => {
                weighted_policy(&next_values, mover, position.revision_count())
            }
        };
        validate_distribution(&policy)?;
        Ok(policy)
    }

    /// One revision with the blended scheme.
    pub fn revise(&mut self, id: PositionId, explore_factor: f64) -> Result<()> {
        self.revise_with(id, PolicyScheme::Blended { explore_factor })
    }

    /// Recompute the policy, back up the value, bump the revision count and
    /// persist the position. Terminal positions are left alone.
    ///
    /// Nothing is stored or persisted when the new policy fails validation.
    pub fn revise_with(&mut self, id: PositionId, scheme: PolicyScheme) -> Result<()> {
        if self.position(id)?.is_terminal() {
            return Ok(());
        }
        if let PolicyScheme::Blended { explore_factor } = scheme {
            check_explore_factor(explore_factor)?;
        }

        let policy = self.build_policy(id, scheme)?;
        let next_values = self.next_values(id)?;
        let value = backup_value(&policy, &next_values);

        let position = self.position_mut(id)?;
        position.apply_revision(policy, value);
        let record = position.to_record();
        let key = position.key().clone();
        self.store.save(&key, &record)?;
        log::trace!("revised {key}: value {value}");
        Ok(())
    }

    /// Sample a move from the position's current policy; `None` when there
    /// are no legal moves.
    pub fn choose_move<R: Rng>(&self, id: PositionId, rng: &mut R) -> Result<Option<usize>> {
        let position = self.position(id)?;
        if position.legal_moves().is_empty() {
            return Ok(None);
        }
        let ticket: f64 = rng.random();
        Ok(sample_move(position.legal_moves(), position.policy(), ticket))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Live positions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (PositionId, &Position)> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| (PositionId(i), p))
    }

    /// Forget every live position. Ids handed out earlier become invalid and
    /// the next access reloads from the store.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.index.clear();
    }

    /// Create a live position for every record in the store.
    pub fn hydrate_all(&mut self) -> Result<usize> {
        let keys = self.store.keys()?;
        for key in &keys {
            self.get_or_create(key.to_board())?;
        }
        Ok(keys.len())
    }

    /// Statistics of every live position that has been revised at least once.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.positions
                .iter()
                .filter(|p| p.revision_count() > 0)
                .map(Position::to_record)
                .collect(),
        )
    }

    /// Seed positions from a snapshot and persist them. Records that do not
    /// fit their board are skipped. Returns the number of records applied.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported snapshot version or a store
    /// failure.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<usize> {
        if snapshot.version != Snapshot::VERSION {
            return Err(Error::SerializationContext {
                operation: "restore snapshot".to_string(),
                message: format!(
                    "unsupported version {} (expected {})",
                    snapshot.version,
                    Snapshot::VERSION
                ),
            });
        }

        let mut applied = 0;
        for record in &snapshot.records {
            let Some(board) = record.board() else {
                log::warn!("skipping snapshot record without a board");
                continue;
            };
            let id = self.get_or_create(board)?;
            let position = self.position_mut(id)?;
            if let Err(err) = position.check_record(record) {
                log::warn!("skipping snapshot record: {err}");
                continue;
            }
            position.seed_from(record);
            let record = position.to_record();
            let key = position.key().clone();
            self.store.save(&key, &record)?;
            applied += 1;
        }
        Ok(applied)
    }
}

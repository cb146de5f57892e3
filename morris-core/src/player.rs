//! Player abstraction: a searcher bound to one side

use crate::game::Side;
use crate::search::{Game, SearchError, Searcher};

/// Failures surfaced by a player
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Search(#[from] SearchError),

    /// `decide` was called before `assume` wired the opponent
    #[error("player has no opponent: call assume() before decide()")]
    OpponentUnbound,

    /// `assume` must be called exactly once per pair
    #[error("player is already wired to an opponent")]
    AlreadyBound,

    /// A maximizer can only face a minimizer and vice versa
    #[error("players of the same side cannot be opponents")]
    SameSide,

    /// The search produced no move for a non-terminal position, or the
    /// position was already decided; either way the caller asked the
    /// impossible and this is not recoverable
    #[error("search produced no move for this position")]
    NoMoveAvailable,
}

/// A minimax player for one side.
///
/// Construction is two-phase: build both players, then wire them with
/// `assume` before asking either to decide. Wiring records the opponent's
/// side rather than a shared handle, which keeps the pairing checkable
/// without a reference cycle.
#[derive(Clone, Debug)]
pub struct SearchPlayer {
    side: Side,
    searcher: Searcher,
    opponent: Option<Side>,
}

impl SearchPlayer {
    pub fn maximizer(searcher: Searcher) -> Self {
        Self::new(Side::Max, searcher)
    }

    pub fn minimizer(searcher: Searcher) -> Self {
        Self::new(Side::Min, searcher)
    }

    fn new(side: Side, searcher: Searcher) -> Self {
        Self {
            side,
            searcher,
            opponent: None,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Whether this player maximizes utility; fixed at construction
    pub fn maximizes(&self) -> bool {
        self.side.maximizes()
    }

    /// Record the opponent. Must be called exactly once per player, with a
    /// player of the other side.
    pub fn assume(&mut self, opponent: &SearchPlayer) -> Result<(), PlayerError> {
        if self.opponent.is_some() {
            return Err(PlayerError::AlreadyBound);
        }
        if opponent.side == self.side {
            return Err(PlayerError::SameSide);
        }
        self.opponent = Some(opponent.side);
        Ok(())
    }

    /// Choose a move for this player's side by full-width search
    pub fn decide<G: Game>(&self, state: &G) -> Result<G::Move, PlayerError> {
        if self.opponent.is_none() {
            return Err(PlayerError::OpponentUnbound);
        }

        let (_, best) = self.searcher.best_move(state, self.side)?;
        best.ok_or(PlayerError::NoMoveAvailable)
    }
}

/// Build and wire a maximizer/minimizer pair sharing one search config
pub fn player_pair(searcher: Searcher) -> (SearchPlayer, SearchPlayer) {
    let mut max_player = SearchPlayer::maximizer(searcher);
    let mut min_player = SearchPlayer::minimizer(searcher);

    // Both assume calls are infallible for a fresh, opposite-side pair
    let _ = max_player.assume(&min_player);
    let _ = min_player.assume(&max_player);

    (max_player, min_player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Variant;
    use crate::game::MorrisState;

    #[test]
    fn test_decide_before_assume_fails() {
        let player = SearchPlayer::maximizer(Searcher::default());
        let state = MorrisState::new(Variant::SixMens);
        assert_eq!(player.decide(&state), Err(PlayerError::OpponentUnbound));
    }

    #[test]
    fn test_assume_twice_fails() {
        let (mut max_player, min_player) = player_pair(Searcher::default());
        assert_eq!(
            max_player.assume(&min_player),
            Err(PlayerError::AlreadyBound)
        );
    }

    #[test]
    fn test_same_side_pair_rejected() {
        let mut a = SearchPlayer::maximizer(Searcher::default());
        let b = SearchPlayer::maximizer(Searcher::default());
        assert_eq!(a.assume(&b), Err(PlayerError::SameSide));
    }

    #[test]
    fn test_roles_are_fixed() {
        let (max_player, min_player) = player_pair(Searcher::default());
        assert!(max_player.maximizes());
        assert!(!min_player.maximizes());
    }

    #[test]
    fn test_wired_player_opens() {
        let (max_player, _) = player_pair(Searcher::new(2));
        let state = MorrisState::new(Variant::SixMens);
        let mv = max_player.decide(&state).unwrap();
        let next = state.apply_move(mv, Side::Max);
        assert_eq!(next.in_hand(Side::Max), 5);
    }
}

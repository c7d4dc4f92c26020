use crate::play::ActorId;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionState {
    /// No carrier has been chosen for this play.
    Unassigned,
    Held(ActorId),
    Airborne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierChange {
    /// First carrier of the play; the football must be reset onto it.
    FirstPossession(ActorId),
    Changed,
    Released,
}

/// Who has the football. All references are registry ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallCarrier {
    football: ActorId,
    carrier: Option<ActorId>,
    most_recent: Option<ActorId>,
    initial: Option<ActorId>,
}

impl BallCarrier {
    pub fn new(football: ActorId) -> Self {
        BallCarrier {
            football,
            carrier: None,
            most_recent: None,
            initial: None,
        }
    }

    pub fn set_carrier(&mut self, player: Option<ActorId>) -> CarrierChange {
        self.carrier = player;

        let Some(player) = player else {
            return CarrierChange::Released;
        };

        self.most_recent = Some(player);

        if self.initial.is_none() {
            debug!("player {player:?} starts the play with the ball");
            self.initial = Some(player);
            return CarrierChange::FirstPossession(player);
        }

        CarrierChange::Changed
    }

    /// Back to the start of the play.
    pub fn reset(&mut self) {
        self.carrier = self.initial;
        self.most_recent = self.initial;
    }

    pub fn clear_player_state(&mut self) {
        self.carrier = None;
        self.most_recent = None;
        self.initial = None;
    }

    /// Drops every reference to a removed player.
    pub fn forget_player(&mut self, player: ActorId) {
        if self.initial == Some(player) {
            self.clear_player_state();
            return;
        }

        if self.carrier == Some(player) {
            self.carrier = None;
        }
        if self.most_recent == Some(player) {
            self.most_recent = self.carrier;
        }
    }

    pub fn state(&self) -> PossessionState {
        match (self.initial, self.carrier) {
            (None, _) => PossessionState::Unassigned,
            (_, Some(player)) => PossessionState::Held(player),
            (Some(_), None) => PossessionState::Airborne,
        }
    }

    #[inline]
    pub fn football(&self) -> ActorId {
        self.football
    }

    #[inline]
    pub fn set_football(&mut self, football: ActorId) {
        self.football = football;
    }

    #[inline]
    pub fn carrier(&self) -> Option<ActorId> {
        self.carrier
    }

    #[inline]
    pub fn most_recent(&self) -> Option<ActorId> {
        self.most_recent
    }

    #[inline]
    pub fn initial(&self) -> Option<ActorId> {
        self.initial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALL: ActorId = ActorId(0);
    const P1: ActorId = ActorId(1);
    const P2: ActorId = ActorId(2);

    #[test]
    fn test_first_possession_fixes_initial() {
        let mut carrier = BallCarrier::new(BALL);
        assert_eq!(carrier.state(), PossessionState::Unassigned);

        assert_eq!(carrier.set_carrier(Some(P1)), CarrierChange::FirstPossession(P1));
        assert_eq!(carrier.set_carrier(Some(P2)), CarrierChange::Changed);

        assert_eq!(carrier.initial(), Some(P1));
        assert_eq!(carrier.carrier(), Some(P2));
        assert_eq!(carrier.most_recent(), Some(P2));
    }

    #[test]
    fn test_release_keeps_most_recent() {
        let mut carrier = BallCarrier::new(BALL);
        carrier.set_carrier(Some(P1));

        assert_eq!(carrier.set_carrier(None), CarrierChange::Released);
        assert_eq!(carrier.carrier(), None);
        assert_eq!(carrier.most_recent(), Some(P1));
        assert_eq!(carrier.state(), PossessionState::Airborne);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut carrier = BallCarrier::new(BALL);
        carrier.set_carrier(Some(P1));
        carrier.set_carrier(None);
        carrier.set_carrier(Some(P2));

        carrier.reset();

        assert_eq!(carrier.carrier(), Some(P1));
        assert_eq!(carrier.most_recent(), Some(P1));
        assert_eq!(carrier.state(), PossessionState::Held(P1));
    }

    #[test]
    fn test_initial_frozen_until_cleared() {
        let mut carrier = BallCarrier::new(BALL);
        carrier.set_carrier(Some(P1));
        for _ in 0..3 {
            carrier.set_carrier(Some(P2));
            carrier.set_carrier(None);
        }
        assert_eq!(carrier.initial(), Some(P1));

        carrier.clear_player_state();
        assert_eq!(carrier.state(), PossessionState::Unassigned);
        assert_eq!(carrier.set_carrier(Some(P2)), CarrierChange::FirstPossession(P2));
    }

    #[test]
    fn test_forget_player() {
        let mut carrier = BallCarrier::new(BALL);
        carrier.set_carrier(Some(P1));
        carrier.set_carrier(Some(P2));

        carrier.forget_player(P2);
        assert_eq!(carrier.carrier(), None);
        assert_eq!(carrier.most_recent(), None);
        assert_eq!(carrier.initial(), Some(P1));

        carrier.forget_player(P1);
        assert_eq!(carrier.state(), PossessionState::Unassigned);
    }
}

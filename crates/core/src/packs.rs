//! Pack contents and the random card draw.
//!
//! The player universe is reached through the [`PlayerPool`] provider so
//! weighting and exclusion rules can evolve without touching the trade
//! engine; the draw itself is pure given a sample and an RNG.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Precondition};
use crate::scoring::Position;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound on the player sample a draw is uniform over.
pub const POOL_SAMPLE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Scarcity
// ---------------------------------------------------------------------------

/// Scarcity tier of a collectible card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scarcity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Scarcity {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scarcity::Common => "common",
            Scarcity::Rare => "rare",
            Scarcity::Epic => "epic",
            Scarcity::Legendary => "legendary",
        }
    }

    /// Parse from a stored string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Scarcity::Common),
            "rare" => Some(Scarcity::Rare),
            "epic" => Some(Scarcity::Epic),
            "legendary" => Some(Scarcity::Legendary),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pack contents
// ---------------------------------------------------------------------------

/// One draw instruction in a pack's ordered contents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackSlot {
    pub scarcity: Scarcity,
    pub count: u32,
}

/// Total number of cards a pack's contents materialize.
pub fn card_count(contents: &[PackSlot]) -> u32 {
    contents.iter().map(|s| s.count).sum()
}

// ---------------------------------------------------------------------------
// Player pool provider
// ---------------------------------------------------------------------------

/// Player reference data needed to mint a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub player_id: DbId,
    pub name: String,
    pub position: Position,
}

/// Source of the bounded player sample a pack draw is uniform over.
#[async_trait]
pub trait PlayerPool: Send + Sync {
    /// Return up to `limit` players. An empty result makes every draw fail
    /// with [`Precondition::EmptyPlayerPool`].
    async fn sample(&self, limit: usize) -> Result<Vec<PlayerSnapshot>, CoreError>;
}

// ---------------------------------------------------------------------------
// Draw
// ---------------------------------------------------------------------------

/// A card blueprint produced by a pack draw, ready to be minted.
#[derive(Debug, Clone)]
pub struct DrawnCard {
    pub player: PlayerSnapshot,
    pub scarcity: Scarcity,
}

/// Draw cards for every contents entry, uniformly with replacement over
/// `sample`.
pub fn draw_with_replacement<R: Rng>(
    rng: &mut R,
    sample: &[PlayerSnapshot],
    contents: &[PackSlot],
) -> Result<Vec<DrawnCard>, CoreError> {
    if sample.is_empty() {
        return Err(CoreError::PreconditionFailed(Precondition::EmptyPlayerPool));
    }

    let mut cards = Vec::with_capacity(card_count(contents) as usize);
    for slot in contents {
        for _ in 0..slot.count {
            let idx = rng.gen_range(0..sample.len());
            cards.push(DrawnCard {
                player: sample[idx].clone(),
                scarcity: slot.scarcity,
            });
        }
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player(id: DbId) -> PlayerSnapshot {
        PlayerSnapshot {
            player_id: id,
            name: format!("Player {id}"),
            position: Position::Midfielder,
        }
    }

    #[test]
    fn scarcity_round_trips_through_strings() {
        for s in [
            Scarcity::Common,
            Scarcity::Rare,
            Scarcity::Epic,
            Scarcity::Legendary,
        ] {
            assert_eq!(Scarcity::from_str(s.as_str()), Some(s));
        }
        assert_eq!(Scarcity::from_str("mythic"), None);
    }

    #[test]
    fn draw_produces_one_card_per_contents_count() {
        let sample = vec![player(1), player(2), player(3)];
        let contents = [
            PackSlot {
                scarcity: Scarcity::Common,
                count: 3,
            },
            PackSlot {
                scarcity: Scarcity::Rare,
                count: 2,
            },
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let cards = draw_with_replacement(&mut rng, &sample, &contents).unwrap();

        assert_eq!(cards.len(), 5);
        assert_eq!(cards.len() as u32, card_count(&contents));
        assert_eq!(
            cards.iter().filter(|c| c.scarcity == Scarcity::Rare).count(),
            2
        );
    }

    #[test]
    fn draw_only_uses_players_from_the_sample() {
        let sample = vec![player(1), player(2)];
        let contents = [PackSlot {
            scarcity: Scarcity::Common,
            count: 20,
        }];
        let mut rng = StdRng::seed_from_u64(42);
        let cards = draw_with_replacement(&mut rng, &sample, &contents).unwrap();

        assert!(cards.iter().all(|c| [1, 2].contains(&c.player.player_id)));
    }

    #[test]
    fn draw_with_replacement_can_repeat_players() {
        let sample = vec![player(1)];
        let contents = [PackSlot {
            scarcity: Scarcity::Common,
            count: 4,
        }];
        let mut rng = StdRng::seed_from_u64(1);
        let cards = draw_with_replacement(&mut rng, &sample, &contents).unwrap();

        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|c| c.player.player_id == 1));
    }

    #[test]
    fn empty_sample_fails_the_draw() {
        let contents = [PackSlot {
            scarcity: Scarcity::Common,
            count: 1,
        }];
        let mut rng = StdRng::seed_from_u64(1);
        let err = draw_with_replacement(&mut rng, &[], &contents).unwrap_err();

        assert!(matches!(
            err,
            CoreError::PreconditionFailed(Precondition::EmptyPlayerPool)
        ));
    }
}

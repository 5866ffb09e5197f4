//! The per-player statistics record.

use serde::{Deserialize, Serialize};

use delve_types::Player;

/// Accumulated statistics for one player, fed entirely by bus events.
///
/// The embedded [`Player`] is the projector's own copy, updated from
/// `player.moved` and `player.damaged` events; it can briefly trail the
/// engine's live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    /// The player as last seen in the event stream.
    pub player: Player,
    /// Sum of all damage events applied to this player.
    pub total_damage_received: i64,
    /// Number of monster strikes received. Counts every attack, not
    /// distinct monsters.
    pub monsters_encountered: u64,
    /// Loot picked up. No event credits this yet, so it stays at zero;
    /// the field is part of the profile wire shape regardless.
    pub loot_collected: u64,
}

impl PlayerProfile {
    /// A fresh profile with zeroed counters.
    pub const fn new(player: Player) -> Self {
        Self {
            player,
            total_damage_received: 0,
            monsters_encountered: 0,
            loot_collected: 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use delve_types::{PlayerClass, Position};

    use super::*;

    #[test]
    fn profile_serializes_with_camel_case_counters() {
        let player = Player::new("Tor", PlayerClass::Warrior, Position::new(1, 1));
        let profile = PlayerProfile::new(player);

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["totalDamageReceived"], 0);
        assert_eq!(value["monstersEncountered"], 0);
        assert_eq!(value["lootCollected"], 0);
        assert_eq!(value["player"]["playerClass"], "warrior");
    }
}

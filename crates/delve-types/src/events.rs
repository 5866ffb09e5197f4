//! Event types flowing over the dungeon event bus.
//!
//! Every state change the engine makes is announced as a [`DungeonEvent`].
//! The serialized form is an envelope with a dotted `topic` string and a
//! `data` payload, e.g.
//!
//! ```json
//! { "topic": "player.damaged",
//!   "data": { "playerId": "…", "damage": 8, "remainingHp": 92 } }
//! ```
//!
//! [`Topic`] names the seven channels; subscribers can filter on it
//! without inspecting payloads.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::{MonsterId, PlayerId};
use crate::structs::{Loot, Monster, Player, Position};

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

/// The channel an event belongs to.
///
/// Wire form is the dotted string (`"monster.spawned"`), produced by
/// [`Topic::as_str`] and accepted by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// A new monster entered the dungeon.
    #[serde(rename = "monster.spawned")]
    MonsterSpawned,
    /// A monster stepped to an adjacent cell.
    #[serde(rename = "monster.moved")]
    MonsterMoved,
    /// A monster struck a player.
    #[serde(rename = "monster.attacked")]
    MonsterAttacked,
    /// A player lost hit points.
    #[serde(rename = "player.damaged")]
    PlayerDamaged,
    /// A player stepped to an adjacent cell.
    #[serde(rename = "player.moved")]
    PlayerMoved,
    /// A new player entered the dungeon.
    #[serde(rename = "player.joined")]
    PlayerJoined,
    /// Loot appeared on the floor.
    #[serde(rename = "loot.dropped")]
    LootDropped,
}

impl Topic {
    /// All topics, in the order the tick pipeline can emit them.
    pub const ALL: [Self; 7] = [
        Self::MonsterSpawned,
        Self::MonsterMoved,
        Self::MonsterAttacked,
        Self::PlayerDamaged,
        Self::PlayerMoved,
        Self::PlayerJoined,
        Self::LootDropped,
    ];

    /// The dotted wire name for this topic.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MonsterSpawned => "monster.spawned",
            Self::MonsterMoved => "monster.moved",
            Self::MonsterAttacked => "monster.attacked",
            Self::PlayerDamaged => "player.damaged",
            Self::PlayerMoved => "player.moved",
            Self::PlayerJoined => "player.joined",
            Self::LootDropped => "loot.dropped",
        }
    }
}

impl core::fmt::Display for Topic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a topic string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topic: {0}")]
pub struct ParseTopicError(pub String);

impl FromStr for Topic {
    type Err = ParseTopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monster.spawned" => Ok(Self::MonsterSpawned),
            "monster.moved" => Ok(Self::MonsterMoved),
            "monster.attacked" => Ok(Self::MonsterAttacked),
            "player.damaged" => Ok(Self::PlayerDamaged),
            "player.moved" => Ok(Self::PlayerMoved),
            "player.joined" => Ok(Self::PlayerJoined),
            "loot.dropped" => Ok(Self::LootDropped),
            _ => Err(ParseTopicError(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A single event published on the dungeon bus.
///
/// Variants carry exactly the payload their topic promises, so matching on
/// the variant gives typed access without a second decode step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "data", rename_all_fields = "camelCase")]
pub enum DungeonEvent {
    /// A new monster entered the dungeon.
    #[serde(rename = "monster.spawned")]
    MonsterSpawned {
        /// The monster as spawned, including rolled stats.
        monster: Monster,
    },
    /// A monster stepped from one cell to another.
    #[serde(rename = "monster.moved")]
    MonsterMoved {
        /// Which monster moved.
        monster_id: MonsterId,
        /// Cell before the step.
        from: Position,
        /// Cell after the step.
        to: Position,
    },
    /// A monster struck a player. Always followed by the matching
    /// [`DungeonEvent::PlayerDamaged`].
    #[serde(rename = "monster.attacked")]
    MonsterAttacked {
        /// The attacker.
        monster_id: MonsterId,
        /// The target.
        player_id: PlayerId,
        /// Damage dealt by the strike.
        damage: i32,
    },
    /// A player lost hit points.
    #[serde(rename = "player.damaged")]
    PlayerDamaged {
        /// The wounded player.
        player_id: PlayerId,
        /// Damage applied.
        damage: i32,
        /// Hit points left after the hit, floored at zero.
        remaining_hp: i32,
    },
    /// A player stepped from one cell to another.
    #[serde(rename = "player.moved")]
    PlayerMoved {
        /// Which player moved.
        player_id: PlayerId,
        /// Cell before the step.
        from: Position,
        /// Cell after the step.
        to: Position,
    },
    /// A new player entered the dungeon.
    #[serde(rename = "player.joined")]
    PlayerJoined {
        /// The player as created at the entrance.
        player: Player,
    },
    /// Loot appeared on the dungeon floor.
    #[serde(rename = "loot.dropped")]
    LootDropped {
        /// The dropped item.
        loot: Loot,
    },
}

impl DungeonEvent {
    /// The topic this event belongs to.
    pub const fn topic(&self) -> Topic {
        match self {
            Self::MonsterSpawned { .. } => Topic::MonsterSpawned,
            Self::MonsterMoved { .. } => Topic::MonsterMoved,
            Self::MonsterAttacked { .. } => Topic::MonsterAttacked,
            Self::PlayerDamaged { .. } => Topic::PlayerDamaged,
            Self::PlayerMoved { .. } => Topic::PlayerMoved,
            Self::PlayerJoined { .. } => Topic::PlayerJoined,
            Self::LootDropped { .. } => Topic::LootDropped,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::enums::{MonsterKind, PlayerClass};

    #[test]
    fn topic_roundtrips_through_strings() {
        for topic in Topic::ALL {
            let parsed: Topic = topic.as_str().parse().unwrap();
            assert_eq!(parsed, topic);
        }
    }

    #[test]
    fn topic_parse_rejects_unknown() {
        let err = "monster.slain".parse::<Topic>();
        assert_eq!(err, Err(ParseTopicError(String::from("monster.slain"))));
    }

    #[test]
    fn event_envelope_shape() {
        let event = DungeonEvent::PlayerDamaged {
            player_id: PlayerId::new(),
            damage: 8,
            remaining_hp: 92,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["topic"], "player.damaged");
        assert_eq!(value["data"]["damage"], 8);
        assert_eq!(value["data"]["remainingHp"], 92);
        assert!(value["data"]["playerId"].is_string());
    }

    #[test]
    fn moved_event_uses_camel_case_ids() {
        let event = DungeonEvent::MonsterMoved {
            monster_id: MonsterId::new(),
            from: Position::new(2, 3),
            to: Position::new(2, 4),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["topic"], "monster.moved");
        assert!(value["data"]["monsterId"].is_string());
        assert_eq!(value["data"]["from"]["y"], 3);
        assert_eq!(value["data"]["to"]["y"], 4);
    }

    #[test]
    fn spawned_event_embeds_full_monster() {
        let monster = Monster::spawn(MonsterKind::Goblin, Position::new(4, 4));
        let event = DungeonEvent::MonsterSpawned {
            monster: monster.clone(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["data"]["monster"]["type"], "goblin");
        assert_eq!(value["data"]["monster"]["hp"], 20);
        assert_eq!(event.topic(), Topic::MonsterSpawned);
    }

    #[test]
    fn joined_event_roundtrips() {
        let player = Player::new("Kel", PlayerClass::Rogue, Position::new(1, 1));
        let event = DungeonEvent::PlayerJoined { player };
        let json = serde_json::to_string(&event).unwrap();
        let back: DungeonEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.topic(), Topic::PlayerJoined);
    }

    #[test]
    fn every_variant_reports_its_topic() {
        let events = [
            DungeonEvent::MonsterSpawned {
                monster: Monster::spawn(MonsterKind::Goblin, Position::new(1, 2)),
            },
            DungeonEvent::MonsterMoved {
                monster_id: MonsterId::new(),
                from: Position::new(1, 2),
                to: Position::new(1, 3),
            },
            DungeonEvent::MonsterAttacked {
                monster_id: MonsterId::new(),
                player_id: PlayerId::new(),
                damage: 5,
            },
            DungeonEvent::PlayerDamaged {
                player_id: PlayerId::new(),
                damage: 5,
                remaining_hp: 95,
            },
            DungeonEvent::PlayerMoved {
                player_id: PlayerId::new(),
                from: Position::new(1, 1),
                to: Position::new(1, 2),
            },
            DungeonEvent::PlayerJoined {
                player: Player::new("Kel", PlayerClass::Mage, Position::new(1, 1)),
            },
            DungeonEvent::LootDropped {
                loot: Loot::new(crate::enums::LootKind::Gold, Position::new(6, 6)),
            },
        ];
        let topics: Vec<Topic> = events.iter().map(DungeonEvent::topic).collect();
        assert_eq!(topics, Topic::ALL.to_vec());
    }
}

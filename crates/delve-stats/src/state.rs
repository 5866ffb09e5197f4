//! The projector's internal state: profiles plus the raw event log.

use std::collections::BTreeMap;

use delve_types::{DungeonEvent, PlayerId};

use crate::profile::PlayerProfile;

/// A stored profile tagged with its join sequence.
///
/// The sequence number orders profiles by arrival, independent of id,
/// and breaks leaderboard ties deterministically.
#[derive(Debug, Clone)]
struct ProfileEntry {
    seq: u64,
    profile: PlayerProfile,
}

/// Everything the stats projector has folded so far.
#[derive(Debug, Default)]
pub struct StatsState {
    next_seq: u64,
    profiles: BTreeMap<PlayerId, ProfileEntry>,
    event_log: Vec<DungeonEvent>,
}

impl StatsState {
    /// An empty read model.
    pub const fn new() -> Self {
        Self {
            next_seq: 0,
            profiles: BTreeMap::new(),
            event_log: Vec::new(),
        }
    }

    /// Append `event` to the log, then fold it into the profiles.
    ///
    /// Unknown players and topics without a fold rule only land in the
    /// log. A duplicate `player.joined` for a known id is ignored, so a
    /// replayed join cannot zero out accumulated counters.
    pub fn apply(&mut self, event: &DungeonEvent) {
        self.event_log.push(event.clone());

        match event {
            DungeonEvent::PlayerJoined { player } => {
                if !self.profiles.contains_key(&player.id) {
                    let entry = ProfileEntry {
                        seq: self.next_seq,
                        profile: PlayerProfile::new(player.clone()),
                    };
                    self.profiles.insert(player.id, entry);
                    self.next_seq = self.next_seq.saturating_add(1);
                }
            }
            DungeonEvent::PlayerMoved { player_id, to, .. } => {
                if let Some(entry) = self.profiles.get_mut(player_id) {
                    entry.profile.player.position = *to;
                }
            }
            DungeonEvent::PlayerDamaged {
                player_id,
                damage,
                remaining_hp,
            } => {
                if let Some(entry) = self.profiles.get_mut(player_id) {
                    entry.profile.total_damage_received = entry
                        .profile
                        .total_damage_received
                        .saturating_add(i64::from(*damage));
                    entry.profile.player.hp = *remaining_hp;
                }
            }
            DungeonEvent::MonsterAttacked { player_id, .. } => {
                if let Some(entry) = self.profiles.get_mut(player_id) {
                    entry.profile.monsters_encountered =
                        entry.profile.monsters_encountered.saturating_add(1);
                }
            }
            _ => {}
        }
    }

    /// The profile for `player_id`, if one has been folded.
    pub fn profile(&self, player_id: PlayerId) -> Option<PlayerProfile> {
        self.profiles.get(&player_id).map(|e| e.profile.clone())
    }

    /// All profiles in join order.
    pub fn profiles(&self) -> Vec<PlayerProfile> {
        let mut entries: Vec<&ProfileEntry> = self.profiles.values().collect();
        entries.sort_by_key(|e| e.seq);
        entries.into_iter().map(|e| e.profile.clone()).collect()
    }

    /// All profiles ordered by xp descending; ties keep join order.
    pub fn leaderboard(&self) -> Vec<PlayerProfile> {
        let mut entries: Vec<&ProfileEntry> = self.profiles.values().collect();
        entries.sort_by(|a, b| {
            b.profile
                .player
                .xp
                .cmp(&a.profile.player.xp)
                .then(a.seq.cmp(&b.seq))
        });
        entries.into_iter().map(|e| e.profile.clone()).collect()
    }

    /// The most recent `limit` events in arrival order, or the whole log.
    pub fn events(&self, limit: Option<usize>) -> Vec<DungeonEvent> {
        match limit {
            Some(n) => {
                let start = self.event_log.len().saturating_sub(n);
                self.event_log
                    .get(start..)
                    .map(<[DungeonEvent]>::to_vec)
                    .unwrap_or_default()
            }
            None => self.event_log.clone(),
        }
    }

    /// How many events have been folded since startup.
    pub const fn event_count(&self) -> usize {
        self.event_log.len()
    }
}

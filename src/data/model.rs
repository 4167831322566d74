//! Reference statistics: augment name → stats, per rank and tier slot.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Statistics for one augment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AugmentStats {
    /// Percentage of games in which the augment was picked
    pub pick_rate: f32,
    /// Average final placement (1.0 - 8.0)
    pub avg_place: f32,
    /// Percentage of games won with the augment
    pub win_rate: f32,
}

impl AugmentStats {
    /// One-line summary drawn on the overlay.
    pub fn summary(&self) -> String {
        format!(
            "Avg {:.2} | Win {:.1}% | Pick {:.1}%",
            self.avg_place, self.win_rate, self.pick_rate
        )
    }
}

/// Augment name → statistics for one rank and tier slot.
///
/// Iteration is in key order, so scans over the table are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTable(BTreeMap<String, AugmentStats>);

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, stats: AugmentStats) {
        self.0.insert(name.into(), stats);
    }

    pub fn get(&self, name: &str) -> Option<&AugmentStats> {
        self.0.get(name)
    }

    pub fn get_key_value(&self, name: &str) -> Option<(&String, &AugmentStats)> {
        self.0.get_key_value(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, AugmentStats)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (S, AugmentStats)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Player skill bracket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Iron,
    Bronze,
    Silver,
    #[default]
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Rank {
    pub const ALL: [Rank; 9] = [
        Rank::Iron,
        Rank::Bronze,
        Rank::Silver,
        Rank::Gold,
        Rank::Platinum,
        Rank::Diamond,
        Rank::Master,
        Rank::Grandmaster,
        Rank::Challenger,
    ];

    /// Lowercase name, as used by the stats site and in settings.json.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Iron => "iron",
            Rank::Bronze => "bronze",
            Rank::Silver => "silver",
            Rank::Gold => "gold",
            Rank::Platinum => "platinum",
            Rank::Diamond => "diamond",
            Rank::Master => "master",
            Rank::Grandmaster => "grandmaster",
            Rank::Challenger => "challenger",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Rank::ALL
            .into_iter()
            .find(|rank| rank.as_str() == lower)
            .ok_or_else(|| anyhow!("Unknown rank: {}", s))
    }
}

/// One of the three sub-buckets of a rank's augment pool
/// (the in-game silver / gold / prismatic tiers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TierSlot {
    One,
    Two,
    Three,
}

impl TierSlot {
    /// Scan order used by lookups.
    pub const ALL: [TierSlot; 3] = [TierSlot::One, TierSlot::Two, TierSlot::Three];

    /// 1-based number, as used by the stats site.
    pub fn number(&self) -> u8 {
        match self {
            TierSlot::One => 1,
            TierSlot::Two => 2,
            TierSlot::Three => 3,
        }
    }
}

impl std::fmt::Display for TierSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The three tier tables of one rank.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RankTables {
    #[serde(rename = "1")]
    pub tier_1: ReferenceTable,
    #[serde(rename = "2")]
    pub tier_2: ReferenceTable,
    #[serde(rename = "3")]
    pub tier_3: ReferenceTable,
}

impl RankTables {
    pub fn slot(&self, slot: TierSlot) -> &ReferenceTable {
        match slot {
            TierSlot::One => &self.tier_1,
            TierSlot::Two => &self.tier_2,
            TierSlot::Three => &self.tier_3,
        }
    }

    pub fn slot_mut(&mut self, slot: TierSlot) -> &mut ReferenceTable {
        match slot {
            TierSlot::One => &mut self.tier_1,
            TierSlot::Two => &mut self.tier_2,
            TierSlot::Three => &mut self.tier_3,
        }
    }

    /// Tables in scan order (slot 1, 2, 3).
    pub fn in_order(&self) -> impl Iterator<Item = (TierSlot, &ReferenceTable)> {
        TierSlot::ALL.into_iter().map(move |slot| (slot, self.slot(slot)))
    }
}

/// Rank → tier tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceData(BTreeMap<Rank, RankTables>);

impl ReferenceData {
    /// Tables for `rank`. Missing data means the stats were never
    /// fetched for this rank.
    pub fn tables(&self, rank: Rank) -> Result<&RankTables> {
        self.0
            .get(&rank)
            .ok_or_else(|| anyhow!("No reference data for rank {}", rank))
    }

    pub fn set_table(&mut self, rank: Rank, slot: TierSlot, table: ReferenceTable) {
        *self.0.entry(rank).or_default().slot_mut(slot) = table;
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(pick_rate: f32) -> AugmentStats {
        AugmentStats { pick_rate, avg_place: 4.0, win_rate: 12.5 }
    }

    #[test]
    fn test_rank_round_trip_names() {
        for rank in Rank::ALL {
            assert_eq!(rank.as_str().parse::<Rank>().unwrap(), rank);
        }
        assert_eq!("Challenger".parse::<Rank>().unwrap(), Rank::Challenger);
        assert!("wood".parse::<Rank>().is_err());
    }

    #[test]
    fn test_rank_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Rank::Grandmaster).unwrap(), "\"grandmaster\"");
    }

    #[test]
    fn test_missing_rank_is_error() {
        let data = ReferenceData::default();
        let err = data.tables(Rank::Gold).unwrap_err();
        assert!(err.to_string().contains("gold"));
    }

    #[test]
    fn test_set_table_fills_slot() {
        let mut data = ReferenceData::default();
        let table: ReferenceTable = [("Tiny Titans", stats(3.0))].into_iter().collect();
        data.set_table(Rank::Diamond, TierSlot::Two, table.clone());

        let tables = data.tables(Rank::Diamond).unwrap();
        assert!(tables.slot(TierSlot::One).is_empty());
        assert_eq!(tables.slot(TierSlot::Two), &table);
        assert!(tables.slot(TierSlot::Three).is_empty());
    }

    #[test]
    fn test_in_order_scans_slots_one_to_three() {
        let tables = RankTables::default();
        let order: Vec<u8> = tables.in_order().map(|(slot, _)| slot.number()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_reference_data_json_shape() {
        let mut data = ReferenceData::default();
        data.set_table(
            Rank::Gold,
            TierSlot::One,
            [("Level Up", stats(10.0))].into_iter().collect(),
        );

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["gold"]["1"]["Level Up"]["pick_rate"], 10.0);
        assert!(json["gold"]["3"].as_object().unwrap().is_empty());

        let back: ReferenceData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_summary() {
        let s = AugmentStats { pick_rate: 2.34, avg_place: 4.126, win_rate: 15.0 };
        assert_eq!(s.summary(), "Avg 4.13 | Win 15.0% | Pick 2.3%");
    }
}

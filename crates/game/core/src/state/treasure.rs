//! Loot found in treasure chests.

use crate::rng::RngOracle;

use super::actor::{Actor, ActorError, Spell, Weapon};

/// A single piece of loot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Treasure {
    Weapon(Weapon),
    Spell(Spell),
    HealthPotion { amount: u32 },
    ManaPotion { amount: u32 },
}

impl Treasure {
    /// Gives the treasure to `actor`.
    ///
    /// Weapons and spells replace the equipped item of the same kind; potions
    /// restore their fixed amount.
    pub fn apply_to(&self, actor: &mut Actor) -> Result<(), ActorError> {
        match self {
            Treasure::Weapon(weapon) => actor.equip(weapon.clone()),
            Treasure::Spell(spell) => actor.learn(spell.clone()),
            Treasure::HealthPotion { amount } => actor.heal(*amount)?,
            Treasure::ManaPotion { amount } => actor.regen_mana(*amount),
        }
        Ok(())
    }

    pub fn label(&self) -> String {
        match self {
            Treasure::Weapon(weapon) => format!("weapon '{}'", weapon.name),
            Treasure::Spell(spell) => format!("spell '{}'", spell.name),
            Treasure::HealthPotion { amount } => format!("health potion (+{amount})"),
            Treasure::ManaPotion { amount } => format!("mana potion (+{amount})"),
        }
    }
}

/// A chest holding a non-empty catalog of treasures.
///
/// Opening a chest draws with replacement: the drawn treasure stays in the
/// catalog and every draw is uniform over the full contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreasureChest {
    contents: Vec<Treasure>,
}

impl TreasureChest {
    /// Returns `None` for an empty catalog.
    pub fn new(contents: Vec<Treasure>) -> Option<Self> {
        if contents.is_empty() {
            None
        } else {
            Some(Self { contents })
        }
    }

    pub fn contents(&self) -> &[Treasure] {
        &self.contents
    }

    /// Draws one treasure uniformly at random.
    pub fn open(&self, rng: &dyn RngOracle, seed: u64) -> &Treasure {
        let last = (self.contents.len() - 1) as u32;
        let index = rng.range(seed, 0, last) as usize;
        &self.contents[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use crate::rng::{PcgRng, compute_seed};
    use crate::state::{ActorId, ActorStats, Behavior};

    fn wounded_orc() -> Actor {
        let mut orc = Actor::enemy(
            ActorId(3),
            Position::ORIGIN,
            ActorStats::new(20, 10, 0, 2),
            Behavior::Friendly,
        );
        orc.damage(15);
        orc.spend_mana(10);
        orc
    }

    #[test]
    fn potions_restore_clamped_amounts() {
        let mut orc = wounded_orc();
        Treasure::HealthPotion { amount: 7 }.apply_to(&mut orc).unwrap();
        assert_eq!(orc.health(), 12);
        Treasure::HealthPotion { amount: 70 }.apply_to(&mut orc).unwrap();
        assert_eq!(orc.health(), 20);

        Treasure::ManaPotion { amount: 4 }.apply_to(&mut orc).unwrap();
        assert_eq!(orc.mana(), 4);
        Treasure::ManaPotion { amount: 40 }.apply_to(&mut orc).unwrap();
        assert_eq!(orc.mana(), 10);
    }

    #[test]
    fn equipment_replaces_in_place() {
        let mut orc = wounded_orc();
        Treasure::Weapon(Weapon::new("Axe", 9)).apply_to(&mut orc).unwrap();
        Treasure::Spell(Spell::new("Fireball", 12, 5, 4))
            .apply_to(&mut orc)
            .unwrap();
        assert_eq!(orc.weapon, Weapon::new("Axe", 9));
        assert_eq!(orc.spell.name, "Fireball");
    }

    #[test]
    fn empty_catalog_is_not_a_chest() {
        assert!(TreasureChest::new(Vec::new()).is_none());
    }

    #[test]
    fn draws_are_uniform_and_with_replacement() {
        let chest = TreasureChest::new(vec![
            Treasure::HealthPotion { amount: 1 },
            Treasure::ManaPotion { amount: 1 },
            Treasure::Weapon(Weapon::new("Dagger", 3)),
            Treasure::Spell(Spell::new("Spark", 2, 1, 3)),
        ])
        .unwrap();
        let rng = PcgRng;
        let trials = 40_000u64;
        let mut counts = [0u32; 4];

        for nonce in 0..trials {
            let drawn = chest.open(&rng, compute_seed(0xC0FFEE, nonce, 0, 0));
            let index = chest
                .contents()
                .iter()
                .position(|treasure| treasure == drawn)
                .unwrap();
            counts[index] += 1;
        }

        assert_eq!(chest.contents().len(), 4);
        let expected = trials as f64 / 4.0;
        for count in counts {
            let ratio = count as f64 / expected;
            assert!((0.9..1.1).contains(&ratio), "skewed draw counts: {counts:?}");
        }
    }
}

//! Character-template levels.
//!
//! A template draws the map as rows of symbols and keeps the stat blocks
//! separate:
//!
//! ```text
//! #######
//! #S..E.#
//! #.#T#.#
//! #S...G#
//! #######
//! ```
//!
//! | symbol | cell |
//! |--------|------|
//! | `.` | walkable |
//! | `#` | obstacle |
//! | `S` | hero spawn |
//! | `E` | enemy |
//! | `T` | treasure chest |
//! | `G` | gateway |
//!
//! Every `S` yields its own [`LevelDefinition`]; the other spawns of that
//! level are plain floor.

use game_core::{
    Behavior, EnemySpec, HeroSpec, LevelDefinition, LevelError, Position, Spell, Treasure, Weapon,
};

/// Hero stat block without a position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroStats {
    pub name: String,
    pub title: String,
    pub max_health: u32,
    pub max_mana: u32,
    pub mana_regen: u32,
    pub fist_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell: Option<Spell>,
}

/// Enemy stat block without a position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStats {
    pub max_health: u32,
    pub max_mana: u32,
    pub mana_regen: u32,
    pub fist_damage: u32,
    pub behavior: Behavior,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell: Option<Spell>,
}

/// Stat blocks for the `E` cells of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum EnemyRoster {
    /// One block per `E`, matched in row-major order.
    Each(Vec<EnemyStats>),
    /// The same block for every `E`.
    All { all: EnemyStats },
}

impl EnemyRoster {
    fn stats_for(&self, index: usize) -> Option<&EnemyStats> {
        match self {
            EnemyRoster::Each(list) => list.get(index),
            EnemyRoster::All { all } => Some(all),
        }
    }

    fn available(&self) -> usize {
        match self {
            EnemyRoster::Each(list) => list.len(),
            EnemyRoster::All { .. } => usize::MAX,
        }
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        EnemyRoster::Each(Vec::new())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateLevel {
    pub layout: Vec<String>,
    pub hero: HeroStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: EnemyRoster,
    #[cfg_attr(feature = "serde", serde(default))]
    pub treasure_catalog: Vec<Treasure>,
}

/// Cells pulled out of a template's layout.
#[derive(Debug, Default)]
struct Layout {
    rows: u32,
    cols: u32,
    spawns: Vec<Position>,
    enemies: Vec<Position>,
    chests: Vec<Position>,
    obstacles: Vec<Position>,
    gateway: Option<Position>,
}

impl TemplateLevel {
    /// One level per hero spawn, in row-major spawn order.
    pub fn levels(&self) -> Result<Vec<LevelDefinition>, LevelError> {
        let layout = self.scan()?;
        if layout.spawns.is_empty() {
            return Err(LevelError::MissingSpawn);
        }
        if layout.enemies.len() > self.enemies.available() {
            return Err(LevelError::MissingEnemyStats {
                cells: layout.enemies.len(),
                stats: self.enemies.available(),
            });
        }

        let enemies = layout
            .enemies
            .iter()
            .enumerate()
            .filter_map(|(index, &position)| {
                let stats = self.enemies.stats_for(index)?;
                Some(EnemySpec {
                    max_health: stats.max_health,
                    max_mana: stats.max_mana,
                    mana_regen: stats.mana_regen,
                    fist_damage: stats.fist_damage,
                    start_position: position,
                    behavior: stats.behavior,
                    weapon: stats.weapon.clone(),
                    spell: stats.spell.clone(),
                })
            })
            .collect::<Vec<_>>();

        let levels = layout
            .spawns
            .iter()
            .map(|&spawn| LevelDefinition {
                rows: layout.rows,
                cols: layout.cols,
                hero: HeroSpec {
                    max_health: self.hero.max_health,
                    max_mana: self.hero.max_mana,
                    mana_regen: self.hero.mana_regen,
                    fist_damage: self.hero.fist_damage,
                    start_position: spawn,
                    name: self.hero.name.clone(),
                    title: self.hero.title.clone(),
                    weapon: self.hero.weapon.clone(),
                    spell: self.hero.spell.clone(),
                },
                enemies: enemies.clone(),
                treasure_catalog: self.treasure_catalog.clone(),
                obstacle_positions: layout.obstacles.clone(),
                treasure_chest_positions: layout.chests.clone(),
                gateway_position: layout.gateway,
            })
            .collect();

        Ok(levels)
    }

    fn scan(&self) -> Result<Layout, LevelError> {
        let expected = self.layout.first().map_or(0, |row| row.chars().count());
        let mut layout = Layout {
            rows: self.layout.len() as u32,
            cols: expected as u32,
            ..Layout::default()
        };

        for (row, line) in self.layout.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(LevelError::RaggedRow {
                    row,
                    found,
                    expected,
                });
            }

            for (col, symbol) in line.chars().enumerate() {
                let position = Position::new(row as i32, col as i32);
                match symbol {
                    '.' => {}
                    '#' => layout.obstacles.push(position),
                    'S' => layout.spawns.push(position),
                    'E' => layout.enemies.push(position),
                    'T' => layout.chests.push(position),
                    // a later gateway replaces an earlier one
                    'G' => layout.gateway = Some(position),
                    _ => return Err(LevelError::UnknownSymbol { symbol, position }),
                }
            }
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> HeroStats {
        HeroStats {
            name: "Bron".into(),
            title: "Dragonslayer".into(),
            max_health: 100,
            max_mana: 100,
            mana_regen: 2,
            fist_damage: 1,
            weapon: None,
            spell: None,
        }
    }

    fn grunt(behavior: Behavior) -> EnemyStats {
        EnemyStats {
            max_health: 10,
            max_mana: 0,
            mana_regen: 0,
            fist_damage: 2,
            behavior,
            weapon: None,
            spell: None,
        }
    }

    fn template(layout: &[&str], enemies: EnemyRoster) -> TemplateLevel {
        TemplateLevel {
            layout: layout.iter().map(|row| row.to_string()).collect(),
            hero: hero(),
            enemies,
            treasure_catalog: vec![Treasure::ManaPotion { amount: 4 }],
        }
    }

    #[test]
    fn one_level_per_spawn() {
        let levels = template(
            &["S.E", "#T.", "S.G"],
            EnemyRoster::All {
                all: grunt(Behavior::Rabid),
            },
        )
        .levels()
        .unwrap();

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].hero.start_position, Position::new(0, 0));
        assert_eq!(levels[1].hero.start_position, Position::new(2, 0));
        for level in &levels {
            assert_eq!((level.rows, level.cols), (3, 3));
            assert_eq!(level.obstacle_positions, vec![Position::new(1, 0)]);
            assert_eq!(level.treasure_chest_positions, vec![Position::new(1, 1)]);
            assert_eq!(level.gateway_position, Some(Position::new(2, 2)));
            assert_eq!(level.enemies[0].start_position, Position::new(0, 2));
            assert_eq!(level.enemies[0].behavior, Behavior::Rabid);
        }
    }

    #[test]
    fn enemies_take_stat_blocks_in_row_major_order() {
        let levels = template(
            &["E.S", "..E"],
            EnemyRoster::Each(vec![grunt(Behavior::Friendly), grunt(Behavior::Aggressive)]),
        )
        .levels()
        .unwrap();

        let behaviors: Vec<_> = levels[0].enemies.iter().map(|e| e.behavior).collect();
        assert_eq!(behaviors, vec![Behavior::Friendly, Behavior::Aggressive]);
    }

    #[test]
    fn malformed_templates_are_rejected() {
        let all = || EnemyRoster::All {
            all: grunt(Behavior::Aggressive),
        };

        assert_eq!(
            template(&["S.x"], all()).levels(),
            Err(LevelError::UnknownSymbol {
                symbol: 'x',
                position: Position::new(0, 2)
            })
        );
        assert_eq!(
            template(&["S..", ".."], all()).levels(),
            Err(LevelError::RaggedRow {
                row: 1,
                found: 2,
                expected: 3
            })
        );
        assert_eq!(
            template(&["..E"], all()).levels(),
            Err(LevelError::MissingSpawn)
        );
        assert_eq!(
            template(&["SEE"], EnemyRoster::Each(vec![grunt(Behavior::Rabid)])).levels(),
            Err(LevelError::MissingEnemyStats { cells: 2, stats: 1 })
        );
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::sim::capture::BallKind;
use crate::sim::creature::Creature;
use crate::sim::stages::StageStat;
use crate::sim::status::StatusKind;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Medicine {
    Potion,
    #[strum(to_string = "Super Potion", serialize = "superpotion")]
    SuperPotion,
    #[strum(to_string = "Hyper Potion", serialize = "hyperpotion")]
    HyperPotion,
    #[strum(to_string = "Max Potion", serialize = "maxpotion")]
    MaxPotion,
    #[strum(to_string = "Full Restore", serialize = "fullrestore")]
    FullRestore,
    Antidote,
    #[strum(to_string = "Burn Heal", serialize = "burnheal")]
    BurnHeal,
    #[strum(to_string = "Paralyze Heal", serialize = "paralyzeheal")]
    ParalyzeHeal,
    Awakening,
    #[strum(to_string = "Ice Heal", serialize = "iceheal")]
    IceHeal,
    #[strum(to_string = "Full Heal", serialize = "fullheal")]
    FullHeal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HpRestore {
    Points(u16),
    Full,
}

impl Medicine {
    pub fn hp_restore(self) -> Option<HpRestore> {
        match self {
            Medicine::Potion => Some(HpRestore::Points(20)),
            Medicine::SuperPotion => Some(HpRestore::Points(60)),
            Medicine::HyperPotion => Some(HpRestore::Points(120)),
            Medicine::MaxPotion | Medicine::FullRestore => Some(HpRestore::Full),
            _ => None,
        }
    }

    pub fn cures(self, kind: StatusKind) -> bool {
        match self {
            Medicine::FullRestore | Medicine::FullHeal => true,
            Medicine::Antidote => matches!(kind, StatusKind::Poison | StatusKind::BadPoison),
            Medicine::BurnHeal => kind == StatusKind::Burn,
            Medicine::ParalyzeHeal => kind == StatusKind::Paralysis,
            Medicine::Awakening => kind == StatusKind::Sleep,
            Medicine::IceHeal => kind == StatusKind::Freeze,
            Medicine::Potion | Medicine::SuperPotion | Medicine::HyperPotion | Medicine::MaxPotion => false,
        }
    }
}

/// Stage-raising items usable only on the active creature.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum BattleItem {
    #[strum(to_string = "X Attack", serialize = "xattack")]
    XAttack,
    #[strum(to_string = "X Defense", serialize = "xdefense")]
    XDefense,
    #[strum(to_string = "X Sp. Atk", serialize = "xspatk")]
    XSpAtk,
    #[strum(to_string = "X Sp. Def", serialize = "xspdef")]
    XSpDef,
    #[strum(to_string = "X Speed", serialize = "xspeed")]
    XSpeed,
    #[strum(to_string = "X Accuracy", serialize = "xaccuracy")]
    XAccuracy,
}

impl BattleItem {
    pub fn stat(self) -> StageStat {
        match self {
            BattleItem::XAttack => StageStat::Attack,
            BattleItem::XDefense => StageStat::Defense,
            BattleItem::XSpAtk => StageStat::SpAttack,
            BattleItem::XSpDef => StageStat::SpDefense,
            BattleItem::XSpeed => StageStat::Speed,
            BattleItem::XAccuracy => StageStat::Accuracy,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Medicine,
    Battle,
    Ball,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemAction {
    /// `target` is a party index of the user's side.
    Medicine { item: Medicine, target: usize },
    Battle { item: BattleItem },
    Ball { ball: BallKind },
}

impl ItemAction {
    pub fn category(&self) -> ItemCategory {
        match self {
            ItemAction::Medicine { .. } => ItemCategory::Medicine,
            ItemAction::Battle { .. } => ItemCategory::Battle,
            ItemAction::Ball { .. } => ItemCategory::Ball,
        }
    }

    pub fn name(&self) -> String {
        match self {
            ItemAction::Medicine { item, .. } => item.to_string(),
            ItemAction::Battle { item } => item.to_string(),
            ItemAction::Ball { ball } => ball.to_string(),
        }
    }
}

/// Applies `item` to `creature` and returns the resulting messages; a lone
/// "It won't have any effect." when nothing changed.
pub fn apply_medicine(item: Medicine, creature: &mut Creature) -> Vec<String> {
    let mut messages = Vec::new();
    let name = creature.name().to_string();

    if let Some(restore) = item.hp_restore() {
        let amount = match restore {
            HpRestore::Points(points) => points,
            HpRestore::Full => creature.max_hp(),
        };
        let restored = creature.heal(amount);
        if restored > 0 {
            messages.push(format!("{name}'s HP was restored by {restored} points."));
        }
    }

    if let Some(kind) = creature.status.map(|s| s.kind()) {
        if item.cures(kind) {
            creature.clear_status();
            messages.push(kind.cured_message(&name));
        }
    }

    if messages.is_empty() {
        messages.push("It won't have any effect.".to_string());
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stats::Nature;
    use crate::sim::status::StatusCondition;

    fn hurt(species: &str) -> Creature {
        let mut c = Creature::new(species, 50, Nature::Hardy, &["tackle"]).unwrap();
        c.take_damage(30);
        c
    }

    #[test]
    fn potion_caps_at_max_hp() {
        let mut snorlax = hurt("snorlax");
        let before = snorlax.current_hp;
        let messages = apply_medicine(Medicine::Potion, &mut snorlax);
        assert_eq!(snorlax.current_hp, before + 20);
        assert_eq!(messages, vec!["Snorlax's HP was restored by 20 points.".to_string()]);

        apply_medicine(Medicine::MaxPotion, &mut snorlax);
        assert_eq!(snorlax.current_hp, snorlax.max_hp());
        assert_eq!(
            apply_medicine(Medicine::Potion, &mut snorlax),
            vec!["It won't have any effect.".to_string()]
        );
    }

    #[test]
    fn full_restore_heals_and_cures() {
        let mut snorlax = hurt("snorlax");
        snorlax.status = Some(StatusCondition::Paralysis);
        let messages = apply_medicine(Medicine::FullRestore, &mut snorlax);
        assert_eq!(messages.len(), 2);
        assert_eq!(snorlax.current_hp, snorlax.max_hp());
        assert_eq!(snorlax.status, None);
    }

    #[test]
    fn cures_are_specific() {
        let mut eevee = hurt("eevee");
        eevee.status = Some(StatusCondition::BadPoison);
        assert_eq!(
            apply_medicine(Medicine::BurnHeal, &mut eevee),
            vec!["It won't have any effect.".to_string()]
        );
        apply_medicine(Medicine::Antidote, &mut eevee);
        assert_eq!(eevee.status, None);
    }

    #[test]
    fn names_and_categories() {
        assert_eq!("super potion".parse::<Medicine>().unwrap(), Medicine::SuperPotion);
        assert_eq!("xspeed".parse::<BattleItem>().unwrap(), BattleItem::XSpeed);
        assert_eq!(BattleItem::XSpAtk.stat(), StageStat::SpAttack);
        let action = ItemAction::Ball { ball: BallKind::Ultra };
        assert_eq!(action.category(), ItemCategory::Ball);
        assert_eq!(action.name(), "Ultra Ball");
    }
}

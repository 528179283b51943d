use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::BattleConfig;
use crate::data::moves::{EffectTarget, MoveData, STRUGGLE};
use crate::error::{BattleError, Rejection, Result};
use crate::sim::action::{Action, LegalActions};
use crate::sim::ai::{BattleAI, RandomAI};
use crate::sim::capture::{escape_message, shake_count, BallKind, CaptureContext, CAUGHT};
use crate::sim::combatant::Combatant;
use crate::sim::creature::Creature;
use crate::sim::damage::{accuracy_check, compute_damage, confusion_damage, effective_speed, Battler};
use crate::sim::events::{BattleEvent, TurnReport};
use crate::sim::items::{apply_medicine, ItemAction, ItemCategory};
use crate::sim::party::{HasParty, Party, MAX_PARTY};
use crate::sim::pokedex::Pokedex;
use crate::sim::stages::stage_change_message;
use crate::sim::status::{self, InflictOutcome};
use crate::sim::volatile::{gate_action, GateOutcome, Volatile};
use crate::sim::SideId;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BattleKind {
    Wild,
    Trainer { name: String },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum BattleResult {
    Victory,
    Defeat,
    Fled,
    #[serde(rename_all = "camelCase")]
    Captured {
        species_id: String,
        sent_to_storage: bool,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BattlePhase {
    ActionSelection,
    /// Waiting on `choose_replacement` for the given side.
    ForcedSwitch(SideId),
    Ended(BattleResult),
}

#[derive(Clone, Debug)]
pub struct BattleSide {
    pub party: Party,
    pub combatant: Combatant,
    /// Creatures that fainted during this battle, in fainting order.
    pub fainted: Vec<Creature>,
    pub(crate) needs_replacement: bool,
}

impl BattleSide {
    fn new(mut party: Party) -> Self {
        let fainted = party.drain_fainted();
        Self {
            party,
            combatant: Combatant::default(),
            fainted,
            needs_replacement: false,
        }
    }

    /// The creature currently in battle, if any.
    pub fn active_creature(&self) -> Option<&Creature> {
        if self.needs_replacement {
            None
        } else {
            self.party.active()
        }
    }

    pub fn active_creature_mut(&mut self) -> Option<&mut Creature> {
        if self.needs_replacement {
            None
        } else {
            self.party.active_mut()
        }
    }

    pub fn is_present(&self) -> bool {
        self.active_creature().is_some()
    }
}

impl HasParty for BattleSide {
    fn party(&self) -> &Party {
        &self.party
    }

    fn party_mut(&mut self) -> &mut Party {
        &mut self.party
    }

    fn active(&self) -> Option<&Creature> {
        self.active_creature()
    }
}

/// Everything a finished battle hands back to its owner.
#[derive(Clone, Debug)]
pub struct BattleOutcome {
    pub result: Option<BattleResult>,
    /// Player creatures still in the party, followed by those that fainted.
    pub party: Vec<Creature>,
    /// Caught creatures that did not fit in the party.
    pub storage: Vec<Creature>,
    pub pokedex: Pokedex,
    pub turns: u32,
}

pub(crate) fn pair_mut(sides: &mut [BattleSide; 2], side: SideId) -> (&mut BattleSide, &mut BattleSide) {
    let [player, opponent] = sides;
    match side {
        SideId::Player => (player, opponent),
        SideId::Opponent => (opponent, player),
    }
}

fn with_article(name: &str) -> String {
    let vowel = name.starts_with(|c: char| "AEIOU".contains(c)) || name.starts_with("X ");
    if vowel {
        format!("an {name}")
    } else {
        format!("a {name}")
    }
}

fn roll_percent(chance: u8, rng: &mut impl Rng) -> bool {
    chance >= 100 || rng.gen_range(0..100) < chance
}

pub struct Battle<R: Rng> {
    pub(crate) kind: BattleKind,
    pub(crate) sides: [BattleSide; 2],
    pub(crate) phase: BattlePhase,
    pub(crate) turn: u32,
    pub(crate) rng: R,
    pub(crate) config: BattleConfig,
    pub(crate) pokedex: Pokedex,
    ai: Box<dyn BattleAI + Send>,
    flee_attempts: u32,
    pub(crate) storage: Vec<Creature>,
}

impl<R: Rng> Battle<R> {
    /// Sets up a battle. Creatures that cannot fight are moved to each
    /// side's `fainted` list up front.
    pub fn new(kind: BattleKind, player: Party, opponent: Party, rng: R) -> Result<Self> {
        if kind == BattleKind::Wild && opponent.len() != 1 {
            return Err(BattleError::InvalidWildParty(opponent.len()));
        }
        let sides = [BattleSide::new(player), BattleSide::new(opponent)];
        for side in SideId::BOTH {
            if sides[side.index()].party.is_empty() {
                return Err(BattleError::NoAbleCreature(side));
            }
        }
        Ok(Self {
            kind,
            sides,
            phase: BattlePhase::ActionSelection,
            turn: 0,
            rng,
            config: BattleConfig::default(),
            pokedex: Pokedex::default(),
            ai: Box::new(RandomAI),
            flee_attempts: 0,
            storage: Vec::new(),
        })
    }

    pub fn wild(player: Party, wild: Creature, rng: R) -> Result<Self> {
        let opponent = Party::from_creatures([wild])?;
        Self::new(BattleKind::Wild, player, opponent, rng)
    }

    pub fn trainer(name: impl Into<String>, player: Party, opponent: Party, rng: R) -> Result<Self> {
        Self::new(BattleKind::Trainer { name: name.into() }, player, opponent, rng)
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_pokedex(mut self, pokedex: Pokedex) -> Self {
        self.pokedex = pokedex;
        self
    }

    pub fn with_ai(mut self, ai: impl BattleAI + Send + 'static) -> Self {
        self.ai = Box::new(ai);
        self
    }

    pub fn kind(&self) -> &BattleKind {
        &self.kind
    }

    pub fn phase(&self) -> &BattlePhase {
        &self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Ended(_))
    }

    pub fn result(&self) -> Option<&BattleResult> {
        match &self.phase {
            BattlePhase::Ended(result) => Some(result),
            _ => None,
        }
    }

    /// Turns fully resolved so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn side(&self, side: SideId) -> &BattleSide {
        &self.sides[side.index()]
    }

    pub fn side_mut(&mut self, side: SideId) -> &mut BattleSide {
        &mut self.sides[side.index()]
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Opening messages.
    pub fn start(&mut self) -> TurnReport {
        let mut report = TurnReport::new();
        if let BattleKind::Trainer { name } = &self.kind {
            report.message(format!("{name} wants to battle!"));
        }
        self.announce_entry(SideId::Opponent, &mut report);
        self.announce_entry(SideId::Player, &mut report);
        report
    }

    pub fn legal_actions(&self, side: SideId) -> LegalActions {
        let s = self.side(side);
        let Some(active) = s.active_creature() else {
            return LegalActions::default();
        };
        let moves: Vec<usize> = active
            .moves
            .iter()
            .enumerate()
            .filter_map(|(slot, m)| m.has_pp().then_some(slot))
            .collect();
        let can_switch = side == SideId::Player || matches!(self.kind, BattleKind::Trainer { .. });
        let switches = if can_switch {
            s.party
                .iter()
                .enumerate()
                .skip(1)
                .filter_map(|(index, c)| c.can_fight().then_some(index))
                .collect()
        } else {
            Vec::new()
        };
        let items = match side {
            SideId::Player => vec![ItemCategory::Medicine, ItemCategory::Battle, ItemCategory::Ball],
            SideId::Opponent => Vec::new(),
        };
        LegalActions {
            struggle: moves.is_empty(),
            moves,
            switches,
            items,
            can_flee: side == SideId::Player && self.kind == BattleKind::Wild,
        }
    }

    /// Asks the opponent's AI for this turn's action.
    pub fn opponent_action(&mut self) -> Action {
        let legal = self.legal_actions(SideId::Opponent);
        let [player, opponent] = &self.sides;
        match opponent.active_creature() {
            Some(own) => self
                .ai
                .choose_action(own, player.active_creature(), &legal, &mut self.rng),
            None => Action::Struggle,
        }
    }

    fn expect_selection(&self) -> Result<()> {
        match self.phase {
            BattlePhase::ActionSelection => Ok(()),
            _ => Err(BattleError::WrongPhase(self.phase.clone())),
        }
    }

    /// Checks an action against the current state. A chosen move with no PP
    /// becomes Struggle when nothing else is usable.
    pub fn validate(&self, side: SideId, action: Action) -> Result<Action> {
        let s = self.side(side);
        let active = s.active_creature().ok_or(BattleError::NoAbleCreature(side))?;
        let trainer = matches!(self.kind, BattleKind::Trainer { .. });
        let checked = match action {
            Action::Move(slot) => {
                let m = active.moves.get(slot).ok_or(Rejection::NoSuchMove(slot))?;
                if m.has_pp() {
                    action
                } else if active.has_usable_move() {
                    return Err(Rejection::NoPp(slot).into());
                } else {
                    Action::Struggle
                }
            }
            Action::Struggle => {
                if active.has_usable_move() {
                    return Err(Rejection::StruggleNotNeeded.into());
                }
                action
            }
            Action::Switch(index) => {
                if side == SideId::Opponent && !trainer {
                    return Err(Rejection::NotAvailable("switching").into());
                }
                if index == 0 {
                    return Err(Rejection::AlreadyActive(index).into());
                }
                let target = s.party.get(index).ok_or(Rejection::NoSuchPartyMember(index))?;
                if !target.can_fight() {
                    return Err(Rejection::CannotFight(index).into());
                }
                action
            }
            Action::Item(item) => {
                if side == SideId::Opponent {
                    match item {
                        ItemAction::Ball { .. } => return Err(Rejection::NotAvailable("throwing balls").into()),
                        _ if !trainer => return Err(Rejection::NotAvailable("items").into()),
                        _ => {}
                    }
                }
                if let ItemAction::Medicine { target, .. } = item {
                    s.party.get(target).ok_or(Rejection::NoSuchPartyMember(target))?;
                }
                action
            }
            Action::Flee => {
                if side == SideId::Opponent {
                    return Err(Rejection::NotAvailable("fleeing").into());
                }
                action
            }
        };
        Ok(checked)
    }

    fn move_tier(&self, side: SideId, action: &Action) -> i8 {
        match action {
            Action::Move(slot) => self
                .side(side)
                .active_creature()
                .and_then(|c| c.moves.get(*slot))
                .map_or(0, |m| m.data.priority),
            _ => STRUGGLE.priority,
        }
    }

    fn speed_of(&self, side: SideId) -> u32 {
        let s = self.side(side);
        s.active_creature()
            .map_or(0, |c| effective_speed(c, &s.combatant.stages))
    }

    /// Which side acts first: action bracket, then move tier, then speed,
    /// then a coin flip.
    pub fn first_mover(&mut self, player: &Action, opponent: &Action) -> SideId {
        let (p, o) = (player.priority(), opponent.priority());
        if p != o {
            return if p > o { SideId::Player } else { SideId::Opponent };
        }
        if player.is_move() && opponent.is_move() {
            let (pt, ot) = (self.move_tier(SideId::Player, player), self.move_tier(SideId::Opponent, opponent));
            if pt != ot {
                return if pt > ot { SideId::Player } else { SideId::Opponent };
            }
        }
        let (ps, os) = (self.speed_of(SideId::Player), self.speed_of(SideId::Opponent));
        if ps != os {
            return if ps > os { SideId::Player } else { SideId::Opponent };
        }
        if self.rng.gen_bool(0.5) {
            SideId::Player
        } else {
            SideId::Opponent
        }
    }

    fn player_snapshot(&self) -> (Party, Vec<Creature>) {
        let player = self.side(SideId::Player);
        (player.party.clone(), player.fainted.clone())
    }

    /// Resolves one full turn. Rejected actions leave the battle untouched.
    pub fn resolve_turn(&mut self, player: Action, opponent: Action) -> Result<TurnReport> {
        self.expect_selection()?;
        let player = self.validate(SideId::Player, player).inspect_err(|err| {
            warn!(side = ?SideId::Player, %err, "action rejected");
        })?;
        let opponent = self.validate(SideId::Opponent, opponent).inspect_err(|err| {
            warn!(side = ?SideId::Opponent, %err, "action rejected");
        })?;

        let before = self.player_snapshot();
        let mut report = TurnReport::new();
        let first = self.first_mover(&player, &opponent);
        debug!(turn = self.turn + 1, first = ?first, ?player, ?opponent, "turn order");

        let action_of = |side: SideId| match side {
            SideId::Player => player,
            SideId::Opponent => opponent,
        };
        for (slot, side) in [first, first.other()].into_iter().enumerate() {
            if self.is_over() {
                break;
            }
            if slot == 1 && !self.side(side).is_present() {
                debug!(side = ?side, "second action skipped");
                continue;
            }
            self.execute(side, action_of(side), &mut report);
            self.after_action(side);
        }

        if !self.is_over() {
            self.end_of_turn(first, &mut report);
        }
        self.turn += 1;

        if self.player_snapshot() != before {
            report.push(BattleEvent::PartyChanged);
        }
        report.push(BattleEvent::TurnEnded { turn: self.turn });
        if !self.is_over() {
            self.settle_turn(&mut report);
        }
        if let BattlePhase::Ended(result) = &self.phase {
            report.push(BattleEvent::BattleEnded { result: result.clone() });
        }
        Ok(report)
    }

    fn execute(&mut self, side: SideId, action: Action, report: &mut TurnReport) {
        match action {
            Action::Move(slot) => self.use_move(side, Some(slot), report),
            Action::Struggle => self.use_move(side, None, report),
            Action::Item(item) => self.use_item(side, item, report),
            Action::Switch(index) => self.switch_in(side, index, report),
            Action::Flee => self.try_flee(report),
        }
        self.settle_faints([side.other(), side], report);
    }

    /// Status update and volatile countdown after a side's action slot.
    fn after_action(&mut self, side: SideId) {
        let s = &mut self.sides[side.index()];
        if let Some(creature) = s.active_creature_mut() {
            status::update(creature);
            s.combatant.volatiles.decrement();
        }
    }

    fn end_of_turn(&mut self, first: SideId, report: &mut TurnReport) {
        for s in self.sides.iter_mut() {
            s.combatant.volatiles.clear(Volatile::Flinch);
        }
        for side in [first, first.other()] {
            let Some(creature) = self.sides[side.index()].active_creature_mut() else {
                continue;
            };
            if let Some(residual) = status::after_turn(creature) {
                report.message(residual.message);
                report.hp(side, creature);
            }
            self.settle_faints([side], report);
        }
    }

    fn use_move(&mut self, side: SideId, slot: Option<usize>, report: &mut TurnReport) {
        let foe_side = side.other();
        let config = &self.config;
        let rng = &mut self.rng;
        let (me, foe) = pair_mut(&mut self.sides, side);
        if me.needs_replacement {
            return;
        }
        let Some(user) = me.party.active_mut() else {
            return;
        };

        let move_data: &'static MoveData = match slot.and_then(|i| user.moves.get_mut(i)) {
            Some(m) => {
                m.pp = m.pp.saturating_sub(1);
                m.data
            }
            None => &STRUGGLE,
        };

        let status_before = user.status;
        let pre = status::before_turn(user, rng);
        if let Some(message) = pre.message {
            report.message(message);
        }
        if user.status != status_before {
            report.status(side, user);
        }
        if !pre.can_act {
            return;
        }

        let foe_name = if foe.needs_replacement {
            String::new()
        } else {
            foe.party.active().map(|c| c.name().to_string()).unwrap_or_default()
        };
        let gate = gate_action(
            &mut me.combatant.volatiles,
            user.name(),
            &foe_name,
            config.confusion_self_hit_percent,
            config.infatuation_immobilize_percent,
            rng,
        );
        for message in gate.messages {
            report.message(message);
        }
        match gate.outcome {
            GateOutcome::Proceed => {}
            GateOutcome::HurtItself => {
                let damage = confusion_damage(user, &me.combatant.stages);
                user.take_damage(damage);
                report.hp(side, user);
                return;
            }
            GateOutcome::Flinched | GateOutcome::Immobilized => return,
        }

        report.message(format!("{} used {}!", user.name(), move_data.name));
        if move_data.does_nothing() {
            report.message("But nothing happened!");
            return;
        }
        let target = if foe.needs_replacement { None } else { foe.party.active_mut() };
        let Some(target) = target else {
            report.message("But there was no target!");
            return;
        };

        if !accuracy_check(move_data, &me.combatant.stages, &foe.combatant.stages, rng) {
            report.message(format!("{}'s attack missed!", user.name()));
            return;
        }

        let roll = compute_damage(
            Battler::new(user, &me.combatant.stages),
            Battler::new(target, &foe.combatant.stages),
            move_data,
            rng,
        );
        if roll.effectiveness == 0.0 && move_data.targets_foe() {
            report.message(format!("It doesn't affect {}...", target.name()));
            return;
        }
        if move_data.is_damaging() {
            target.take_damage(roll.damage);
            report.hp(foe_side, target);
            if roll.critical {
                report.message("A critical hit!");
            }
            if roll.effectiveness > 1.0 {
                report.message("It's super effective!");
            } else if roll.effectiveness < 1.0 {
                report.message("It's not very effective...");
            }
        }

        for effect in move_data.stat_effects {
            if !roll_percent(effect.chance, rng) {
                continue;
            }
            let (subject, stages) = match effect.target {
                EffectTarget::User => (&*user, &mut me.combatant.stages),
                EffectTarget::Foe if target.can_fight() => (&*target, &mut foe.combatant.stages),
                EffectTarget::Foe => continue,
            };
            let applied = stages.modify(effect.stat, effect.stages);
            report.message(stage_change_message(subject.name(), effect.stat, effect.stages, applied));
        }

        if let Some(effect) = move_data.status_effect {
            if target.can_fight() {
                match status::try_inflict(target, effect.status, effect.chance, rng) {
                    InflictOutcome::Inflicted => {
                        report.message(effect.status.inflicted_message(target.name()));
                        report.status(foe_side, target);
                    }
                    InflictOutcome::AlreadyAffected | InflictOutcome::Immune if !move_data.is_damaging() => {
                        report.message("But it failed!");
                    }
                    _ => {}
                }
            }
        }

        if let Some(effect) = move_data.volatile_effect {
            if target.can_fight() && roll_percent(effect.chance, rng) {
                if foe.combatant.volatiles.inflict(effect.volatile, rng) {
                    if let Some(message) = effect.volatile.inflicted_message(target.name()) {
                        report.message(message);
                    }
                } else if !move_data.is_damaging() {
                    report.message("But it failed!");
                }
            }
        }

        if let Some(divisor) = move_data.recoil_divisor {
            let recoil = (user.max_hp() / divisor.max(1)).max(1);
            user.take_damage(recoil);
            report.message(format!("{} is damaged by recoil!", user.name()));
            report.hp(side, user);
        }
    }

    fn user_label(&self, side: SideId) -> String {
        match (&self.kind, side) {
            (BattleKind::Trainer { name }, SideId::Opponent) => name.clone(),
            _ => "You".to_string(),
        }
    }

    fn use_item(&mut self, side: SideId, item: ItemAction, report: &mut TurnReport) {
        if let ItemAction::Ball { ball } = item {
            self.throw_ball(ball, report);
            return;
        }
        let who = self.user_label(side);
        report.message(format!("{who} used the {}!", item.name()));
        let stage_amount = self.config.battle_item_stages;
        let s = &mut self.sides[side.index()];
        match item {
            ItemAction::Medicine { item, target } => {
                let visible = target == 0 && !s.needs_replacement;
                let Some(creature) = s.party.get_mut(target) else {
                    return;
                };
                let status_before = creature.status;
                for message in apply_medicine(item, creature) {
                    report.message(message);
                }
                if visible {
                    report.hp(side, creature);
                    if creature.status != status_before {
                        report.status(side, creature);
                    }
                }
            }
            ItemAction::Battle { item } => {
                if s.needs_replacement {
                    return;
                }
                let Some(creature) = s.party.active() else {
                    return;
                };
                let applied = s.combatant.stages.modify(item.stat(), stage_amount);
                report.message(stage_change_message(creature.name(), item.stat(), stage_amount, applied));
            }
            ItemAction::Ball { .. } => {}
        }
    }

    fn throw_ball(&mut self, ball: BallKind, report: &mut TurnReport) {
        report.message(format!("You threw {}!", with_article(&ball.to_string())));
        if matches!(self.kind, BattleKind::Trainer { .. }) {
            report.message("The trainer blocked the ball!");
            report.message("Don't be a thief!");
            return;
        }
        let wild_side = &self.sides[SideId::Opponent.index()];
        let Some(wild) = wild_side.active_creature() else {
            return;
        };
        let ctx = CaptureContext {
            turn: self.turn + 1,
            already_registered: self.pokedex.is_registered(wild.species.id),
            is_night: self.config.is_night(),
        };
        let shakes = shake_count(wild, ball, &ctx, &mut self.rng);
        if shakes != CAUGHT {
            report.message(escape_message(shakes, wild.name()));
            return;
        }

        let Some(caught) = self.sides[SideId::Opponent.index()].party.remove_active() else {
            return;
        };
        let name = caught.name().to_string();
        let species_id = caught.species.id.to_string();
        report.message(format!("Gotcha! {name} was caught!"));
        if self.pokedex.register(&species_id) {
            report.message(format!("{name}'s data was added to the Pokédex."));
        }
        // Fainted creatures still occupy party slots once the battle ends.
        let player = &mut self.sides[SideId::Player.index()];
        let room = player.party.len() + player.fainted.len() < MAX_PARTY;
        let overflow = if room { player.party.add(caught).err() } else { Some(caught) };
        let sent_to_storage = match overflow {
            None => false,
            Some(caught) => {
                report.message(format!("{name} was sent to the PC."));
                self.storage.push(caught);
                true
            }
        };
        info!(species = %species_id, %ball, sent_to_storage, "creature caught");
        self.end_battle(BattleResult::Captured { species_id, sent_to_storage });
    }

    fn try_flee(&mut self, report: &mut TurnReport) {
        if matches!(self.kind, BattleKind::Trainer { .. }) {
            report.message("No! There's no running from a trainer battle!");
            return;
        }
        let player_speed = self.speed_of(SideId::Player);
        let wild_speed = self.speed_of(SideId::Opponent);
        let escaped = if player_speed >= wild_speed {
            true
        } else {
            let odds = (player_speed * 128 / wild_speed + 30 * self.flee_attempts) % 256;
            self.rng.gen_range(0..256) < odds
        };
        self.flee_attempts += 1;
        debug!(player_speed, wild_speed, attempts = self.flee_attempts, escaped, "flee attempt");
        if escaped {
            report.message("Got away safely!");
            self.end_battle(BattleResult::Fled);
        } else {
            report.message("Can't escape!");
        }
    }

    pub(crate) fn end_battle(&mut self, result: BattleResult) {
        info!(?result, turns = self.turn, "battle ended");
        self.phase = BattlePhase::Ended(result);
    }

    /// Consumes the battle, returning parties and the Pokédex to the caller.
    pub fn finish(self) -> BattleOutcome {
        let result = match self.phase {
            BattlePhase::Ended(result) => Some(result),
            _ => None,
        };
        let [player, _] = self.sides;
        let mut party = player.party.into_vec();
        party.extend(player.fainted);
        BattleOutcome {
            result,
            party,
            storage: self.storage,
            pokedex: self.pokedex,
            turns: self.turn,
        }
    }
}

//! Combat session model - initiative order, rounds, hit points, conditions.
//!
//! The session is a two-phase state machine: `Idle` (no fight, empty roster)
//! and `InCombat` (non-empty roster, a valid turn pointer). `start` is the
//! only way in, `end` the only way out; everything else is valid only while
//! a fight is running.
//!
//! Invariants held by every public method:
//! - while `InCombat`, exactly one combatant is active and it is always
//!   `combatants[turn_index]`;
//! - `turn_index` stays within the roster;
//! - initiative order is stable: descending by initiative, ties keep the
//!   order combatants were handed to `start` in.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CombatantId;

// ============================================================================
// Combatants
// ============================================================================

/// Where a combatant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantKind {
    /// Derived from a player character.
    Player,
    /// Derived from a beast/monster stat block.
    Beast,
}

/// A status tag on a combatant ("poisoned", "prone", ...).
///
/// Tags are trimmed and lowercased on construction so "Poisoned" and
/// "poisoned " toggle the same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Condition(String);

impl Condition {
    pub fn new(tag: impl AsRef<str>) -> Result<Self, DomainError> {
        let tag = tag.as_ref().trim().to_lowercase();
        if tag.is_empty() {
            return Err(DomainError::validation("Condition tag cannot be empty"));
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in the turn order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub kind: CombatantKind,
    /// Rolled initiative. Ties are broken by roster insertion order.
    pub initiative: i32,
    pub current_hp: i32,
    pub max_hp: i32,
    pub conditions: BTreeSet<Condition>,
    /// Whose turn it is. Maintained by [`CombatSession`].
    pub is_active: bool,
}

impl Combatant {
    fn new(name: impl Into<String>, kind: CombatantKind, initiative: i32, max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            id: CombatantId::new(),
            name: name.into(),
            kind,
            initiative,
            current_hp: max_hp,
            max_hp,
            conditions: BTreeSet::new(),
            is_active: false,
        }
    }

    /// A combatant derived from a player character, entering at full health.
    pub fn player(name: impl Into<String>, initiative: i32, max_hp: i32) -> Self {
        Self::new(name, CombatantKind::Player, initiative, max_hp)
    }

    /// A combatant derived from a beast stat block, entering at full health.
    pub fn beast(name: impl Into<String>, initiative: i32, max_hp: i32) -> Self {
        Self::new(name, CombatantKind::Beast, initiative, max_hp)
    }

    /// At zero hit points.
    pub fn is_down(&self) -> bool {
        self.current_hp == 0
    }

    fn damage(&mut self, amount: i32) {
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
    }

    fn heal(&mut self, amount: i32) {
        self.current_hp = (self.current_hp + amount.max(0)).min(self.max_hp);
    }

    fn toggle_condition(&mut self, condition: Condition) {
        if !self.conditions.remove(&condition) {
            self.conditions.insert(condition);
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    Idle,
    InCombat,
}

/// One combat's turn order and per-round state.
///
/// Serializable so an in-progress fight survives an app restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSession {
    phase: CombatPhase,
    combatants: Vec<Combatant>,
    round: u32,
    turn_index: usize,
}

impl Default for CombatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatSession {
    /// A fresh idle session.
    pub fn new() -> Self {
        Self {
            phase: CombatPhase::Idle,
            combatants: Vec::new(),
            round: 1,
            turn_index: 0,
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn is_in_combat(&self) -> bool {
        self.phase == CombatPhase::InCombat
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    /// The combatant whose turn it is, while a fight is running.
    pub fn active_combatant(&self) -> Option<&Combatant> {
        if self.phase == CombatPhase::Idle {
            return None;
        }
        self.combatants.get(self.turn_index)
    }

    /// Begin a fight with the given roster.
    ///
    /// Sorts descending by initiative; the sort is stable, so equal
    /// initiatives keep their roster order. Round 1, first combatant active.
    pub fn start(&mut self, mut combatants: Vec<Combatant>) -> Result<(), DomainError> {
        if self.phase == CombatPhase::InCombat {
            return Err(DomainError::invalid_transition(
                "combat already running; end it first",
            ));
        }
        if combatants.is_empty() {
            return Err(DomainError::validation(
                "cannot start combat with no combatants",
            ));
        }

        combatants.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        for c in &mut combatants {
            c.is_active = false;
        }
        combatants[0].is_active = true;

        self.combatants = combatants;
        self.round = 1;
        self.turn_index = 0;
        self.phase = CombatPhase::InCombat;
        Ok(())
    }

    /// Hand the turn to the next combatant, bumping the round on wrap-around.
    pub fn advance_turn(&mut self) -> Result<(), DomainError> {
        self.require_in_combat("advance_turn")?;

        if let Some(current) = self.combatants.get_mut(self.turn_index) {
            current.is_active = false;
        }

        self.turn_index += 1;
        if self.turn_index >= self.combatants.len() {
            self.turn_index = 0;
            self.round += 1;
        }

        if let Some(next) = self.combatants.get_mut(self.turn_index) {
            next.is_active = true;
        }
        Ok(())
    }

    /// Deal damage, clamping hit points at zero. Unknown ids are ignored.
    pub fn apply_damage(&mut self, id: CombatantId, amount: i32) -> Result<(), DomainError> {
        self.require_in_combat("apply_damage")?;
        if let Some(c) = self.combatants.iter_mut().find(|c| c.id == id) {
            c.damage(amount);
        }
        Ok(())
    }

    /// Heal, clamping hit points at the maximum. Unknown ids are ignored.
    pub fn apply_healing(&mut self, id: CombatantId, amount: i32) -> Result<(), DomainError> {
        self.require_in_combat("apply_healing")?;
        if let Some(c) = self.combatants.iter_mut().find(|c| c.id == id) {
            c.heal(amount);
        }
        Ok(())
    }

    /// Add the condition if absent, remove it if present (set semantics).
    /// Unknown ids are ignored.
    pub fn toggle_condition(
        &mut self,
        id: CombatantId,
        condition: Condition,
    ) -> Result<(), DomainError> {
        self.require_in_combat("toggle_condition")?;
        if let Some(c) = self.combatants.iter_mut().find(|c| c.id == id) {
            c.toggle_condition(condition);
        }
        Ok(())
    }

    /// End the fight and return to the idle baseline.
    pub fn end(&mut self) -> Result<(), DomainError> {
        self.require_in_combat("end")?;
        self.combatants.clear();
        self.round = 1;
        self.turn_index = 0;
        self.phase = CombatPhase::Idle;
        Ok(())
    }

    fn require_in_combat(&self, operation: &str) -> Result<(), DomainError> {
        if self.phase == CombatPhase::Idle {
            return Err(DomainError::invalid_transition(format!(
                "{operation} requires a running combat"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Combatant> {
        vec![
            Combatant::player("Thorin", 10, 30),
            Combatant::beast("Owlbear", 15, 59),
            Combatant::player("Merric", 10, 24),
        ]
    }

    #[test]
    fn start_sorts_descending_with_stable_ties() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");

        let names: Vec<&str> = session
            .combatants()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        // 15 first; the two 10s keep their insertion order.
        assert_eq!(names, vec!["Owlbear", "Thorin", "Merric"]);
        assert_eq!(session.round(), 1);
        assert_eq!(session.turn_index(), 0);
    }

    #[test]
    fn exactly_one_combatant_is_active() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");
        for _ in 0..5 {
            let active = session.combatants().iter().filter(|c| c.is_active).count();
            assert_eq!(active, 1);
            assert!(session.combatants()[session.turn_index()].is_active);
            session.advance_turn().expect("advance");
        }
    }

    #[test]
    fn full_cycle_increments_round_once() {
        let mut session = CombatSession::new();
        let n = roster().len();
        session.start(roster()).expect("start");
        for _ in 0..n {
            session.advance_turn().expect("advance");
        }
        assert_eq!(session.turn_index(), 0);
        assert_eq!(session.round(), 2);
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");
        let id = session.combatants()[1].id; // Thorin, 30 hp

        session.apply_damage(id, 1000).expect("damage");
        let thorin = session.combatant(id).expect("combatant");
        assert_eq!(thorin.current_hp, 0);
        assert!(thorin.is_down());
    }

    #[test]
    fn healing_clamps_at_max() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");
        let id = session.combatants()[1].id;

        session.apply_damage(id, 12).expect("damage");
        session.apply_healing(id, 1000).expect("heal");
        assert_eq!(session.combatant(id).expect("combatant").current_hp, 30);
    }

    #[test]
    fn negative_amounts_are_ignored() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");
        let id = session.combatants()[0].id;

        session.apply_damage(id, -5).expect("damage");
        assert_eq!(session.combatant(id).expect("combatant").current_hp, 59);
    }

    #[test]
    fn toggle_condition_twice_restores_original_set() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");
        let id = session.combatants()[0].id;
        let poisoned = Condition::new("Poisoned").expect("condition");

        session
            .toggle_condition(id, poisoned.clone())
            .expect("toggle");
        assert!(session
            .combatant(id)
            .expect("combatant")
            .conditions
            .contains(&poisoned));

        session.toggle_condition(id, poisoned).expect("toggle");
        assert!(session.combatant(id).expect("combatant").conditions.is_empty());
    }

    #[test]
    fn condition_tags_are_normalized() {
        let a = Condition::new("  Poisoned ").expect("condition");
        let b = Condition::new("poisoned").expect("condition");
        assert_eq!(a, b);
        assert!(Condition::new("   ").is_err());
    }

    #[test]
    fn damage_on_unknown_id_is_a_no_op() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");
        let before: Vec<i32> = session.combatants().iter().map(|c| c.current_hp).collect();

        session
            .apply_damage(CombatantId::new(), 10)
            .expect("damage");
        let after: Vec<i32> = session.combatants().iter().map(|c| c.current_hp).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn operations_require_a_running_combat() {
        let mut session = CombatSession::new();
        assert!(session.advance_turn().is_err());
        assert!(session.apply_damage(CombatantId::new(), 5).is_err());
        assert!(session.end().is_err());
        assert!(session.active_combatant().is_none());
    }

    #[test]
    fn start_rejects_empty_roster_and_double_start() {
        let mut session = CombatSession::new();
        assert!(session.start(Vec::new()).is_err());

        session.start(roster()).expect("start");
        assert!(session.start(roster()).is_err());
    }

    #[test]
    fn end_returns_to_idle_baseline() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");
        session.advance_turn().expect("advance");
        session.end().expect("end");

        assert_eq!(session.phase(), CombatPhase::Idle);
        assert!(session.combatants().is_empty());
        assert_eq!(session.round(), 1);
        assert_eq!(session.turn_index(), 0);
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut session = CombatSession::new();
        session.start(roster()).expect("start");
        session.advance_turn().expect("advance");

        let json = serde_json::to_string(&session).expect("serialize");
        let restored: CombatSession = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored.phase(), CombatPhase::InCombat);
        assert_eq!(restored.turn_index(), session.turn_index());
        assert_eq!(restored.round(), session.round());
        assert_eq!(
            restored.active_combatant().map(|c| c.name.clone()),
            session.active_combatant().map(|c| c.name.clone())
        );
    }
}

//! Entity states, triggers and the data-driven transition table.

/// Motion state shared by every entity role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityState {
    #[default]
    Idle,
    Seeking,
    Arrived,
    Fleeing,
    Attached,
}

/// Why an entity is heading for its current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Intent {
    #[default]
    None,
    /// Chasing a moving anchor (e.g. the pointer).
    Pursue,
    /// Closing on a completion target.
    Goal,
    /// Heading to a random point.
    Wander,
    /// Running from a threat.
    Flee,
}

/// Conditions that can move an entity between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    AnchorNear,
    GoalAssigned,
    ThreatNear,
    TargetChosen,
    TargetReached,
    EffectApplied,
    Pinned,
    Released,
}

/// One `(from, trigger) -> to` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub from: EntityState,
    pub trigger: Trigger,
    pub to: EntityState,
}

/// Explicit transition table for one entity role.
///
/// A trigger with no matching rule for the current state is ignored, which is
/// how roles opt out of behavior (a wired bug cannot be pinned).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    rules: Vec<Rule>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Later rules for the same `(from, trigger)` replace earlier ones.
    pub fn on(mut self, from: EntityState, trigger: Trigger, to: EntityState) -> Self {
        self.rules.retain(|r| !(r.from == from && r.trigger == trigger));
        self.rules.push(Rule { from, trigger, to });
        self
    }

    /// Remove the rule for `(from, trigger)` if present.
    pub fn without(mut self, from: EntityState, trigger: Trigger) -> Self {
        self.rules.retain(|r| !(r.from == from && r.trigger == trigger));
        self
    }

    /// Add `Pinned -> Attached` from every other state and `Released -> Idle`.
    pub fn pinnable(mut self) -> Self {
        use EntityState::*;
        for from in [Idle, Seeking, Arrived, Fleeing] {
            self = self.on(from, Trigger::Pinned, Attached);
        }
        self.on(Attached, Trigger::Released, Idle)
    }

    /// The generic idle / seek / arrive / flee template.
    pub fn standard() -> Self {
        use EntityState::*;
        use Trigger::*;
        Self::new()
            .on(Idle, AnchorNear, Seeking)
            .on(Idle, GoalAssigned, Seeking)
            .on(Idle, TargetChosen, Seeking)
            .on(Idle, ThreatNear, Fleeing)
            .on(Seeking, AnchorNear, Seeking)
            .on(Seeking, GoalAssigned, Seeking)
            .on(Seeking, ThreatNear, Fleeing)
            .on(Seeking, TargetReached, Arrived)
            .on(Fleeing, GoalAssigned, Seeking)
            .on(Fleeing, TargetReached, Idle)
            .on(Arrived, EffectApplied, Idle)
            .pinnable()
    }

    pub fn next(&self, from: EntityState, trigger: Trigger) -> Option<EntityState> {
        self.rules
            .iter()
            .find(|r| r.from == from && r.trigger == trigger)
            .map(|r| r.to)
    }

    pub fn accepts(&self, from: EntityState, trigger: Trigger) -> bool {
        self.next(from, trigger).is_some()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EntityState::*;

    #[test]
    fn standard_template_paths() {
        let t = TransitionTable::standard();
        assert_eq!(t.next(Idle, Trigger::AnchorNear), Some(Seeking));
        assert_eq!(t.next(Seeking, Trigger::TargetReached), Some(Arrived));
        assert_eq!(t.next(Arrived, Trigger::EffectApplied), Some(Idle));
        assert_eq!(t.next(Fleeing, Trigger::TargetReached), Some(Idle));
        assert_eq!(t.next(Idle, Trigger::ThreatNear), Some(Fleeing));
    }

    #[test]
    fn attached_ignores_sensors() {
        let t = TransitionTable::standard();
        for trigger in [Trigger::AnchorNear, Trigger::GoalAssigned, Trigger::ThreatNear] {
            assert_eq!(t.next(Attached, trigger), None);
        }
        assert_eq!(t.next(Attached, Trigger::Released), Some(Idle));
        assert_eq!(t.next(Fleeing, Trigger::Pinned), Some(Attached));
    }

    #[test]
    fn later_rules_replace_and_without_removes() {
        let t = TransitionTable::standard()
            .on(Arrived, Trigger::EffectApplied, Seeking)
            .without(Idle, Trigger::ThreatNear);
        assert_eq!(t.next(Arrived, Trigger::EffectApplied), Some(Seeking));
        assert!(!t.accepts(Idle, Trigger::ThreatNear));
        let count = t
            .rules()
            .iter()
            .filter(|r| r.from == Arrived && r.trigger == Trigger::EffectApplied)
            .count();
        assert_eq!(count, 1);
    }
}

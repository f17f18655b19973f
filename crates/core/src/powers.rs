use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! power_ids {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Status effect identifiers, spelled the way the game reports them.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum PowerId {
            $($variant,)+
            Other(String),
        }

        impl PowerId {
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)+
                    Self::Other(name) => name.as_str(),
                }
            }
        }

        impl From<String> for PowerId {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($name => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }
    };
}

power_ids! {
    Strength => "Strength",
    Dexterity => "Dexterity",
    Vulnerable => "Vulnerable",
    Weakened => "Weakened",
    Frail => "Frail",
    Shackled => "Shackled",
    LoseStrength => "Flex",
    Ritual => "Ritual",
    Metallicize => "Metallicize",
    PlatedArmor => "Plated Armor",
    Regeneration => "Regeneration",
    Regenerate => "Regenerate",
    Barricade => "Barricade",
    Intangible => "Intangible",
    Artifact => "Artifact",
    Thorns => "Thorns",
    Angry => "Angry",
    CurlUp => "Curl Up",
    SporeCloud => "Spore Cloud",
    Thievery => "Thievery",
    Entangled => "Entangled",
    NoDraw => "No Draw",
    Combust => "Combust",
    DemonForm => "Demon Form",
    Corruption => "Corruption",
    DarkEmbrace => "Dark Embrace",
    FeelNoPain => "Feel No Pain",
    Evolve => "Evolve",
    FireBreathing => "Fire Breathing",
    Rupture => "Rupture",
    Juggernaut => "Juggernaut",
    Brutality => "Brutality",
    Berserk => "Berserk",
    Rage => "Rage",
    DoubleTap => "Double Tap",
    FlameBarrier => "Flame Barrier",
    ModeShift => "Mode Shift",
    SharpHide => "Sharp Hide",
    Enrage => "Anger",
    Poison => "Poison",
    Minion => "Minion",
}

impl From<PowerId> for String {
    fn from(value: PowerId) -> Self {
        value.name().to_string()
    }
}

impl From<&str> for PowerId {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Display for PowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PowerKind {
    Buff,
    Debuff,
}

impl PowerId {
    /// Debuff classification; Strength and Dexterity flip on sign.
    pub fn kind(&self, amount: i32) -> PowerKind {
        match self {
            Self::Vulnerable
            | Self::Weakened
            | Self::Frail
            | Self::Shackled
            | Self::LoseStrength
            | Self::Entangled
            | Self::NoDraw
            | Self::Poison => PowerKind::Debuff,
            Self::Strength | Self::Dexterity if amount < 0 => PowerKind::Debuff,
            _ => PowerKind::Buff,
        }
    }

    /// Powers that may legitimately go negative.
    pub fn allows_negative(&self) -> bool {
        matches!(self, Self::Strength | Self::Dexterity)
    }

    /// Debuffs that tick down once per round.
    pub fn decays_each_round(&self) -> bool {
        matches!(self, Self::Vulnerable | Self::Weakened | Self::Frail)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Power {
    pub id: PowerId,
    pub amount: i32,
    /// Applied during the current round; skips the next end-of-round tick.
    #[serde(default)]
    pub just_applied: bool,
}

impl Power {
    pub fn new(id: PowerId, amount: i32) -> Self {
        Self {
            id,
            amount,
            just_applied: false,
        }
    }

    pub fn kind(&self) -> PowerKind {
        self.id.kind(self.amount)
    }
}

/// Power list of one creature. Entries with amount 0 are removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Powers(Vec<Power>);

impl Powers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Power> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &PowerId) -> Option<&Power> {
        self.0.iter().find(|power| power.id == *id)
    }

    pub fn get_mut(&mut self, id: &PowerId) -> Option<&mut Power> {
        self.0.iter_mut().find(|power| power.id == *id)
    }

    pub fn amount(&self, id: &PowerId) -> i32 {
        self.get(id).map(|power| power.amount).unwrap_or(0)
    }

    pub fn has(&self, id: &PowerId) -> bool {
        self.get(id).is_some()
    }

    /// Add `delta` to a power, creating or removing it as needed. Returns the new amount.
    pub fn add(&mut self, id: PowerId, delta: i32) -> i32 {
        if delta == 0 {
            return self.amount(&id);
        }
        let allows_negative = id.allows_negative();
        let next = match self.get_mut(&id) {
            Some(power) => {
                power.amount += delta;
                power.amount
            }
            None => {
                self.0.push(Power::new(id.clone(), delta));
                delta
            }
        };
        if next == 0 || (next < 0 && !allows_negative) {
            self.remove(&id);
            return 0;
        }
        next
    }

    pub fn set(&mut self, id: PowerId, amount: i32) {
        if amount == 0 {
            self.remove(&id);
            return;
        }
        match self.get_mut(&id) {
            Some(power) => power.amount = amount,
            None => self.0.push(Power::new(id, amount)),
        }
    }

    pub fn remove(&mut self, id: &PowerId) -> Option<Power> {
        let pos = self.0.iter().position(|power| power.id == *id)?;
        Some(self.0.remove(pos))
    }

    pub fn mark_just_applied(&mut self, id: &PowerId) {
        if let Some(power) = self.get_mut(id) {
            power.just_applied = true;
        }
    }

    pub fn remove_debuffs(&mut self) {
        self.0.retain(|power| power.kind() != PowerKind::Debuff);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// End-of-round decay of Vulnerable, Weakened, Frail and Intangible.
    pub fn tick_round(&mut self) {
        for power in &mut self.0 {
            if !(power.id.decays_each_round() || power.id == PowerId::Intangible) {
                continue;
            }
            if power.just_applied {
                power.just_applied = false;
                continue;
            }
            power.amount -= 1;
        }
        self.0
            .retain(|power| power.amount != 0 && (power.amount > 0 || power.id.allows_negative()));
    }
}

impl FromIterator<Power> for Powers {
    fn from_iter<T: IntoIterator<Item = Power>>(iter: T) -> Self {
        let mut powers = Powers::new();
        for power in iter {
            powers.add(power.id, power.amount);
        }
        powers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_removes_entry() {
        let mut powers = Powers::new();
        powers.add(PowerId::Vulnerable, 2);
        assert_eq!(powers.add(PowerId::Vulnerable, -2), 0);
        assert!(!powers.has(&PowerId::Vulnerable));
    }

    #[test]
    fn strength_can_go_negative() {
        let mut powers = Powers::new();
        assert_eq!(powers.add(PowerId::Strength, -3), -3);
        assert_eq!(powers.get(&PowerId::Strength).map(Power::kind), Some(PowerKind::Debuff));
    }

    #[test]
    fn names_round_trip_through_strings() {
        assert_eq!(PowerId::from("Plated Armor"), PowerId::PlatedArmor);
        assert_eq!(PowerId::from("Flex"), PowerId::LoseStrength);
        assert_eq!(
            PowerId::from("Mystery"),
            PowerId::Other("Mystery".to_string())
        );
        assert_eq!(String::from(PowerId::NoDraw), "No Draw");
    }

    #[test]
    fn tick_round_skips_fresh_debuffs() {
        let mut powers = Powers::new();
        powers.add(PowerId::Weakened, 1);
        powers.mark_just_applied(&PowerId::Weakened);
        powers.tick_round();
        assert_eq!(powers.amount(&PowerId::Weakened), 1);
        powers.tick_round();
        assert!(!powers.has(&PowerId::Weakened));
    }
}

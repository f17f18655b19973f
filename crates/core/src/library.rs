use crate::{
    catalog, Card, CardDef, CardRarity, CardType, CardUuid, CombatSnapshot, CombatState,
    Monster, MonsterDef, RngState, SimError,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Lookup key for definitions: lowercase ASCII alphanumerics only.
pub fn clean_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Card and monster definitions keyed by cleaned name, shared by every fork.
#[derive(Debug, Clone, Default)]
pub struct CardLibrary {
    cards: BTreeMap<String, Arc<CardDef>>,
    monsters: BTreeMap<String, Arc<MonsterDef>>,
}

impl CardLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library preloaded with the built-in catalog.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        for def in catalog::cards() {
            library.insert_card(def);
        }
        for def in catalog::monsters() {
            library.insert_monster(def);
        }
        library
    }

    /// Register a card under both its id and its display name.
    pub fn insert_card(&mut self, def: CardDef) {
        let def = Arc::new(def);
        self.cards.insert(clean_name(&def.name), Arc::clone(&def));
        self.cards.insert(clean_name(&def.id), def);
    }

    pub fn insert_monster(&mut self, def: MonsterDef) {
        let def = Arc::new(def);
        self.monsters.insert(clean_name(&def.name), Arc::clone(&def));
        self.monsters.insert(clean_name(&def.id), def);
    }

    /// Merge `other` into this library; entries of `other` win.
    pub fn extend(&mut self, other: CardLibrary) {
        self.cards.extend(other.cards);
        self.monsters.extend(other.monsters);
    }

    pub fn card_def(&self, name: &str) -> Option<&Arc<CardDef>> {
        self.cards.get(&clean_name(name))
    }

    pub fn monster_def(&self, name: &str) -> Option<&Arc<MonsterDef>> {
        self.monsters.get(&clean_name(name))
    }

    pub fn card_count(&self) -> usize {
        self.unique_cards().count()
    }

    pub fn monster_count(&self) -> usize {
        let mut ids: Vec<&str> = self.monsters.values().map(|def| def.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    fn unique_cards(&self) -> impl Iterator<Item = &Arc<CardDef>> {
        self.cards
            .iter()
            .filter(|(key, def)| **key == clean_name(&def.id))
            .map(|(_, def)| def)
    }

    pub fn make_card(&self, name: &str, uuid: CardUuid, upgrades: u32) -> Option<Card> {
        self.card_def(name)
            .map(|def| Card::from_def(Arc::clone(def), uuid, upgrades))
    }

    pub fn spawn_monster(&self, name: &str, monster_index: usize) -> Option<Monster> {
        self.monster_def(name)
            .map(|def| Monster::from_def(Arc::clone(def), monster_index))
    }

    /// Random collectible card of `card_type`, as generated by Infernal Blade and friends.
    pub fn random_card_of_type(
        &self,
        card_type: CardType,
        rng: &mut RngState,
    ) -> Option<Arc<CardDef>> {
        let pool: Vec<&Arc<CardDef>> = self
            .unique_cards()
            .filter(|def| def.card_type == card_type && is_collectible(def))
            .collect();
        if pool.is_empty() {
            return None;
        }
        pool.get(rng.gen_index(pool.len())).map(|def| Arc::clone(def))
    }

    /// Up to `count` distinct collectible attack, skill or power cards.
    pub fn random_offer(&self, count: usize, rng: &mut RngState) -> Vec<Arc<CardDef>> {
        let mut pool: Vec<&Arc<CardDef>> = self
            .unique_cards()
            .filter(|def| {
                matches!(
                    def.card_type,
                    CardType::Attack | CardType::Skill | CardType::Power
                ) && is_collectible(def)
            })
            .collect();
        let mut offer = Vec::with_capacity(count);
        while offer.len() < count && !pool.is_empty() {
            let pick = rng.gen_index(pool.len());
            offer.push(Arc::clone(pool.swap_remove(pick)));
        }
        offer
    }

    /// Turn an observed snapshot into a simulation-ready state.
    pub fn link_snapshot(
        self: &Arc<Self>,
        snapshot: CombatSnapshot,
        seed: u64,
    ) -> Result<CombatState, SimError> {
        let mut state = CombatState::try_from(snapshot)?;
        state.reseed(seed);
        state.attach_library(Arc::clone(self));
        Ok(state)
    }
}

fn is_collectible(def: &CardDef) -> bool {
    matches!(
        def.rarity,
        CardRarity::Common | CardRarity::Uncommon | CardRarity::Rare
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_name_strips_punctuation_and_case() {
        assert_eq!(clean_name("Strike_R"), "striker");
        assert_eq!(clean_name("J.A.X."), "jax");
        assert_eq!(clean_name("Bash+"), "bash");
    }

    #[test]
    fn cards_resolve_by_id_and_name() {
        let library = CardLibrary::builtin();
        let by_id = library.card_def("Strike_R").map(|def| def.id.clone());
        let by_name = library.card_def("strike").map(|def| def.id.clone());
        assert_eq!(by_id.as_deref(), Some("Strike_R"));
        assert_eq!(by_id, by_name);
    }

    #[test]
    fn random_offer_is_distinct() {
        let library = CardLibrary::builtin();
        let mut rng = RngState::from_seed(3);
        let offer = library.random_offer(3, &mut rng);
        assert_eq!(offer.len(), 3);
        assert_ne!(offer[0].id, offer[1].id);
        assert_ne!(offer[1].id, offer[2].id);
        assert_ne!(offer[0].id, offer[2].id);
    }
}

//! Built-in card and monster definitions. Data files loaded at runtime
//! override entries here by name.

mod cards;
mod monsters;

pub use cards::cards;
pub use monsters::monsters;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardType, TargetMode};
    use std::collections::BTreeSet;

    #[test]
    fn card_ids_are_unique() {
        let defs = cards();
        let ids: BTreeSet<&str> = defs.iter().map(|def| def.id.as_str()).collect();
        assert_eq!(ids.len(), defs.len());
    }

    #[test]
    fn targeted_cards_have_single_target_effects() {
        for def in cards() {
            for variant in [Some(&def.base), def.upgraded.as_ref()].into_iter().flatten() {
                let needs_target = variant
                    .effects
                    .iter()
                    .any(|effect| effect.target == TargetMode::One);
                assert_eq!(variant.has_target, needs_target, "{}", def.id);
            }
        }
    }

    #[test]
    fn status_and_curse_cards_do_not_upgrade() {
        for def in cards() {
            if matches!(def.card_type, CardType::Status | CardType::Curse) {
                assert!(def.upgraded.is_none(), "{}", def.id);
            }
        }
    }

    #[test]
    fn chained_moves_exist() {
        for def in monsters() {
            if let Some(first) = &def.first_move {
                assert!(def.move_named(first).is_some(), "{}: {first}", def.id);
            }
            for item in &def.moves {
                if let Some(next) = &item.next {
                    assert!(def.move_named(next).is_some(), "{}: {next}", def.id);
                }
            }
        }
    }
}

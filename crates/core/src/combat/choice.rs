use super::*;
use crate::*;
use std::sync::Arc;
use tracing::debug;

impl CombatState {
    fn choice_candidates(&self, kind: ChoiceKind) -> Vec<ChoiceOption> {
        let option = |card: &Card| ChoiceOption {
            uuid: card.uuid.clone(),
            name: card.name.clone(),
        };
        match kind {
            ChoiceKind::Armaments => self.hand.iter().filter(|c| c.can_upgrade()).map(option).collect(),
            ChoiceKind::Headbutt => self.discard_pile.iter().map(option).collect(),
            ChoiceKind::Exhume => self
                .exhaust_pile
                .iter()
                .filter(|c| c.id != "Exhume")
                .map(option)
                .collect(),
            ChoiceKind::DualWield { .. } => self
                .hand
                .iter()
                .filter(|c| matches!(c.card_type, CardType::Attack | CardType::Power))
                .map(option)
                .collect(),
            ChoiceKind::HandToDeck | ChoiceKind::Forethought | ChoiceKind::ExhaustSelect => {
                self.hand.iter().map(option).collect()
            }
            ChoiceKind::Discover => Vec::new(),
        }
    }

    /// Start a sub-choice: no candidates is a no-op, one resolves at once,
    /// more suspends until `Choose`.
    pub(crate) fn begin_choice(&mut self, kind: ChoiceKind, ctx: &EffectContext) -> Flow {
        let (candidates, offered) = if kind == ChoiceKind::Discover {
            let library = Arc::clone(self.library());
            let offered: Vec<Card> = library
                .random_offer(3, &mut self.rng)
                .into_iter()
                .map(|def| {
                    let uuid = self.next_uuid();
                    Card::from_def(def, uuid, 0)
                })
                .collect();
            let candidates = offered
                .iter()
                .map(|card| ChoiceOption {
                    uuid: card.uuid.clone(),
                    name: card.name.clone(),
                })
                .collect();
            (candidates, offered)
        } else {
            (self.choice_candidates(kind), Vec::new())
        };
        match candidates.len() {
            0 => Flow::Continue,
            1 => {
                let mut pending = PendingChoice {
                    kind,
                    candidates,
                    offered,
                    remaining: Vec::new(),
                    context: ctx.clone(),
                };
                self.complete_choice(&mut pending, 0);
                Flow::Continue
            }
            n => {
                debug!(action = kind.current_action(), candidates = n, "awaiting choice");
                self.pending_choice = Some(PendingChoice {
                    kind,
                    candidates,
                    offered,
                    remaining: Vec::new(),
                    context: ctx.clone(),
                });
                Flow::Suspended
            }
        }
    }

    /// Answer the pending choice and resume the suspended card.
    pub(crate) fn choose(&mut self, choice: &ChoiceRef) -> Result<(), SimError> {
        let mut pending = self.pending_choice.take().ok_or(SimError::NoPendingChoice)?;
        let picked = match choice {
            ChoiceRef::Index(idx) if *idx < pending.candidates.len() => Some(*idx),
            ChoiceRef::Index(_) => None,
            ChoiceRef::Name(name) => pending
                .candidates
                .iter()
                .position(|option| option.name.eq_ignore_ascii_case(name)),
        };
        let Some(picked) = picked else {
            let err = SimError::InvalidChoice(format!("{choice:?} for {}", pending.current_action()));
            self.pending_choice = Some(pending);
            return Err(err);
        };
        self.complete_choice(&mut pending, picked);
        let remaining = std::mem::take(&mut pending.remaining);
        let ctx = pending.context;
        if self.resolve_effects(&remaining, &ctx)? == Flow::Suspended {
            return Ok(());
        }
        self.finish_play(ctx)
    }

    fn complete_choice(&mut self, pending: &mut PendingChoice, picked: usize) {
        let Some(option) = pending.candidates.get(picked).cloned() else {
            return;
        };
        debug!(action = pending.current_action(), card = %option.name, "choice resolved");
        match pending.kind {
            ChoiceKind::Armaments => {
                if let Some(card) = self.hand.iter_mut().find(|c| c.uuid == option.uuid) {
                    card.upgrade();
                }
            }
            ChoiceKind::Headbutt => {
                if let Some(pos) = self.discard_pile.iter().position(|c| c.uuid == option.uuid) {
                    let card = self.discard_pile.remove(pos);
                    self.draw_pile.push(card);
                }
            }
            ChoiceKind::Exhume => {
                if let Some(pos) = self.exhaust_pile.iter().position(|c| c.uuid == option.uuid) {
                    let card = self.exhaust_pile.remove(pos);
                    self.add_to_hand(card);
                }
            }
            ChoiceKind::HandToDeck => {
                if let Some(pos) = self.hand.iter().position(|c| c.uuid == option.uuid) {
                    let card = self.hand.remove(pos);
                    self.draw_pile.push(card);
                }
            }
            ChoiceKind::DualWield { copies } => {
                if let Some(card) = self.hand.iter().find(|c| c.uuid == option.uuid).cloned() {
                    for _ in 0..copies {
                        let copy = self.copy_card(&card);
                        self.add_to_hand(copy);
                    }
                }
            }
            ChoiceKind::Forethought => {
                if let Some(pos) = self.hand.iter().position(|c| c.uuid == option.uuid) {
                    let mut card = self.hand.remove(pos);
                    if card.cost > 0 {
                        card.free_once = true;
                    }
                    self.draw_pile.insert(0, card);
                }
            }
            ChoiceKind::ExhaustSelect => self.exhaust_from_hand(&option.uuid),
            ChoiceKind::Discover => {
                if let Some(pos) = pending.offered.iter().position(|c| c.uuid == option.uuid) {
                    let mut card = pending.offered.remove(pos);
                    card.cost_for_turn = Some(0);
                    self.add_to_hand(card);
                }
            }
        }
    }
}

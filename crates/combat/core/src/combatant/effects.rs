//! Status effect rules: application, stacking, expiry and cleansing.
//!
//! Every effect-owned stat modifier is tagged with the effect's [`EffectId`],
//! and every removal path goes through `detach`, so an effect can never leave
//! a modifier behind.

use super::{CasterSnapshot, Combatant, round_to_int};
use crate::context::ResolveContext;
use crate::env::RollContext;
use crate::event::CombatEvent;
use crate::skill::StatusApplication;
use crate::stats::{ModifierSource, StatKind, StatModifier};
use crate::status::{
    Classification, EffectId, EffectTraits, StatusEffect, StatusEffectKind,
};

/// Who applied an effect and with which skill parameters.
#[derive(Clone, Copy, Debug)]
pub struct EffectSource<'a> {
    pub caster: CasterSnapshot,
    pub application: &'a StatusApplication,
}

/// Result of [`Combatant::apply_effect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyOutcome {
    /// A new instance now exists.
    Applied(EffectId),
    /// Stacks were added to the existing Wound.
    Stacked { stacks: u32 },
    /// Grit shrugged the effect off.
    Resisted,
    /// The target is warded against debuffs.
    Blocked,
}

impl ApplyOutcome {
    pub fn landed(&self) -> bool {
        matches!(self, Self::Applied(_) | Self::Stacked { .. })
    }
}

impl Combatant {
    pub fn has_effect(&self, kind: StatusEffectKind) -> bool {
        self.effects.has(kind)
    }

    /// Attaches `effect` to this combatant.
    ///
    /// `source` carries the caster and skill parameters; effects raised by
    /// other effects (Freeze's Vulnerable, Wound's Bleed) have none.
    pub fn apply_effect(
        &mut self,
        mut effect: StatusEffect,
        source: Option<EffectSource<'_>>,
        ctx: &mut ResolveContext<'_>,
    ) -> ApplyOutcome {
        let kind = effect.kind;

        if effect.is_debuff() && self.is_warded() {
            tracing::debug!("{} is warded against {}", self.name, kind);
            ctx.emit(CombatEvent::EffectBlocked {
                combatant: self.id,
                kind,
            });
            return ApplyOutcome::Blocked;
        }

        if kind.has_trait(EffectTraits::STACKING) {
            let stacks = source.map_or(effect.stacks, |s| s.application.stacks);
            if let Some(existing) = self.effects.get_mut(kind) {
                existing.stacks += stacks;
                let total = existing.stacks;
                ctx.emit(CombatEvent::EffectApplied {
                    combatant: self.id,
                    kind,
                    stacks: total,
                });
                self.check_for_bleed(ctx);
                self.notify_effects(ctx);
                let stacks = self.effects.get(kind).map_or(0, |e| e.stacks);
                return ApplyOutcome::Stacked { stacks };
            }
            effect.stacks = stacks;
            effect.duration = ctx.config.wound_duration;
        }

        if kind.has_trait(EffectTraits::GRIT_RESISTED) {
            let chance = ctx.config.grit_resist_chance(self.stat(StatKind::Grit));
            if ctx.rng.chance(self.id, RollContext::GritResist, chance) {
                tracing::debug!("{} resisted {}", self.name, kind);
                ctx.emit(CombatEvent::EffectResisted {
                    combatant: self.id,
                    kind,
                });
                return ApplyOutcome::Resisted;
            }
        }

        // Reapplication refreshes: the old instance and its modifiers go first.
        if self.detach(kind).is_some() {
            ctx.emit(CombatEvent::EffectRemoved {
                combatant: self.id,
                kind,
            });
        }

        let id = self.effects.allocate_id();
        effect.id = id;

        if kind.has_trait(EffectTraits::STAT_MODIFIER) {
            match effect.stat_change {
                Some(change) => {
                    let value = match kind {
                        StatusEffectKind::StatDown => -change.value,
                        _ => change.value,
                    };
                    self.stats.add_modifier(
                        change.stat,
                        StatModifier::new(value, change.kind, ModifierSource::Effect(id)),
                    );
                }
                None => tracing::warn!("{} applied to {} without a stat change", kind, self.name),
            }
        }

        if let Some(source) = source
            && kind.has_trait(EffectTraits::SCALED_TICK)
        {
            let application = source.application;
            effect.tick_value = round_to_int(
                application.tick_base
                    + source.caster.intelligence * application.tick_intelligence_ratio,
            );
        }

        // Turn-skipping effects must expire on the bearer's very next tick.
        if kind.has_trait(EffectTraits::SKIPS_TURN) {
            effect.newly_applied = false;
        }

        self.effects.insert(effect);
        tracing::debug!("{} gains {} for {} turn(s)", self.name, kind, effect.duration);
        ctx.emit(CombatEvent::EffectApplied {
            combatant: self.id,
            kind,
            stacks: effect.stacks,
        });

        match kind {
            StatusEffectKind::Freeze => {
                let vulnerable = StatusEffect::of(
                    StatusEffectKind::Vulnerable,
                    ctx.config.freeze_vulnerable_duration,
                );
                self.apply_effect(vulnerable, None, ctx);
            }
            StatusEffectKind::Fortify => {
                self.stats.add_modifier(
                    StatKind::Armor,
                    StatModifier::flat(ctx.config.fortify_armor_bonus, ModifierSource::Effect(id)),
                );
            }
            _ => {}
        }

        self.notify_effects(ctx);
        ApplyOutcome::Applied(id)
    }

    /// Removes the instance of `kind` together with every modifier it owns.
    ///
    /// Returns false when no such effect was active.
    pub fn remove_effect(&mut self, kind: StatusEffectKind, ctx: &mut ResolveContext<'_>) -> bool {
        if self.detach(kind).is_none() {
            return false;
        }
        ctx.emit(CombatEvent::EffectRemoved {
            combatant: self.id,
            kind,
        });
        self.notify_effects(ctx);
        true
    }

    fn detach(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let effect = self.effects.remove(kind)?;
        self.stats
            .remove_source_everywhere(ModifierSource::Effect(effect.id));
        Some(effect)
    }

    /// Converts a full Wound into Bleed and MortalWound.
    pub fn check_for_bleed(&mut self, ctx: &mut ResolveContext<'_>) {
        let threshold = ctx.config.wound_bleed_threshold;
        let Some(wound) = self.effects.get_mut(StatusEffectKind::Wound) else {
            return;
        };
        if wound.stacks < threshold {
            return;
        }
        wound.stacks -= threshold;
        if wound.stacks == 0 {
            self.remove_effect(StatusEffectKind::Wound, ctx);
        }

        tracing::debug!("{}'s wounds open into a bleed", self.name);
        ctx.emit(CombatEvent::BleedTriggered { combatant: self.id });
        let bleed = StatusEffect::of(StatusEffectKind::Bleed, ctx.config.bleed_duration);
        self.apply_effect(bleed, None, ctx);
        let mortal = StatusEffect::of(
            StatusEffectKind::MortalWound,
            ctx.config.mortal_wound_duration,
        );
        self.apply_effect(mortal, None, ctx);
    }

    /// End-of-turn decay.
    ///
    /// An effect gained since the last tick only loses its grace flag; every
    /// other effect loses one turn and expires at zero.
    pub fn tick_end_of_turn(&mut self, ctx: &mut ResolveContext<'_>) {
        let mut expired = Vec::new();
        for kind in self.effects.kinds() {
            let Some(effect) = self.effects.get_mut(kind) else {
                continue;
            };
            if effect.newly_applied {
                effect.newly_applied = false;
                continue;
            }
            effect.duration -= 1;
            if effect.duration <= 0 {
                expired.push(kind);
            }
        }

        for kind in expired {
            if self.detach(kind).is_some() {
                tracing::debug!("{} on {} expired", kind, self.name);
                ctx.emit(CombatEvent::EffectRemoved {
                    combatant: self.id,
                    kind,
                });
            }
        }
        self.notify_effects(ctx);
    }

    /// Purification and Unraveling act at the start of the bearer's turn.
    pub fn tick_start_of_turn_cleansing(&mut self, ctx: &mut ResolveContext<'_>) {
        if self.effects.has(StatusEffectKind::Purification) {
            self.cleanse_debuffs(ctx.config.purification_cleanse_count, ctx);
        }
        if self.effects.has(StatusEffectKind::Unraveling) {
            self.purge_buffs(ctx.config.unraveling_purge_count, ctx);
        }
    }

    /// Removes up to `count` random debuffs. Wound and Bleed are exempt.
    pub fn cleanse_debuffs(&mut self, count: u32, ctx: &mut ResolveContext<'_>) -> usize {
        self.strip_random(Classification::Debuff, count, RollContext::Cleanse, ctx)
    }

    /// Removes up to `count` random buffs.
    pub fn purge_buffs(&mut self, count: u32, ctx: &mut ResolveContext<'_>) -> usize {
        self.strip_random(Classification::Buff, count, RollContext::Purge, ctx)
    }

    fn strip_random(
        &mut self,
        classification: Classification,
        count: u32,
        roll: RollContext,
        ctx: &mut ResolveContext<'_>,
    ) -> usize {
        let candidates = self.effects.removable(classification);
        if count == 0 || candidates.is_empty() {
            return 0;
        }
        let picked = ctx
            .rng
            .sample(self.id, roll, candidates.len(), count as usize);
        for &index in &picked {
            let kind = candidates[index];
            if self.detach(kind).is_some() {
                tracing::debug!("{} loses {}", self.name, kind);
                ctx.emit(CombatEvent::EffectRemoved {
                    combatant: self.id,
                    kind,
                });
            }
        }
        self.notify_effects(ctx);
        picked.len()
    }

    /// Start-of-turn damage and healing over time.
    pub fn process_dots_and_hots(&mut self, ctx: &mut ResolveContext<'_>) {
        // Ticks may remove effects (a heal closing a wound), so walk a copy.
        let snapshot: Vec<StatusEffect> = self.effects.iter().copied().collect();
        for effect in snapshot {
            if self.dead {
                break;
            }
            match effect.kind {
                StatusEffectKind::Burn => {
                    self.take_damage(effect.tick_value, ctx);
                }
                StatusEffectKind::Poison => {
                    self.take_true_damage(effect.tick_value, ctx);
                }
                StatusEffectKind::Regeneration => {
                    self.receive_heal(effect.tick_value, ctx);
                }
                StatusEffectKind::Bleed => {
                    let amount = round_to_int(
                        self.max_health() as f32 * ctx.config.bleed_max_health_fraction,
                    );
                    self.take_true_damage(amount, ctx);
                }
                StatusEffectKind::Fortify
                | StatusEffectKind::Empower
                | StatusEffectKind::PowerUp
                | StatusEffectKind::Dodge
                | StatusEffectKind::Immunity
                | StatusEffectKind::Ethereal
                | StatusEffectKind::Purification
                | StatusEffectKind::StatUp
                | StatusEffectKind::Vulnerable
                | StatusEffectKind::Weaken
                | StatusEffectKind::Stun
                | StatusEffectKind::Freeze
                | StatusEffectKind::MortalWound
                | StatusEffectKind::Blight
                | StatusEffectKind::Wound
                | StatusEffectKind::Unraveling
                | StatusEffectKind::StatDown => {}
            }
        }
    }
}

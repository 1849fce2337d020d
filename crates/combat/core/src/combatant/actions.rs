//! Skill resolution.

use super::effects::{ApplyOutcome, EffectSource};
use super::{Combatant, round_to_int};
use crate::context::ResolveContext;
use crate::env::RollContext;
use crate::error::Rejection;
use crate::event::{CombatEvent, MissReason};
use crate::skill::{SkillEffect, SkillTemplate, TargetKind};
use crate::stats::StatKind;
use crate::status::StatusEffectKind;

/// Result of an attack roll against a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    Hit,
    Miss(MissReason),
}

/// What a successful (non-rejected) skill use did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillOutcome {
    /// Cost was paid but the attack never connected.
    Missed(MissReason),
    Resolved {
        damage: Option<i32>,
        healed: Option<i32>,
        status: Option<ApplyOutcome>,
    },
}

/// Picks the side a skill's effects land on.
fn effect_target<'a>(
    caster: &'a mut Combatant,
    opponent: &'a mut Combatant,
    target: TargetKind,
) -> &'a mut Combatant {
    match target {
        TargetKind::SelfTarget => caster,
        TargetKind::Enemy => opponent,
    }
}

impl Combatant {
    /// Energy `skill` would cost right now; `Empower` makes it free.
    pub fn effective_cost(&self, skill: &SkillTemplate) -> i32 {
        if self.effects.has(StatusEffectKind::Empower) {
            0
        } else {
            skill.energy_cost
        }
    }

    /// Checks every precondition of [`Combatant::use_skill`] without acting.
    pub fn can_use(&self, skill: &SkillTemplate) -> Result<(), Rejection> {
        if self.dead {
            return Err(Rejection::Defeated);
        }
        let remaining = self.cooldowns.remaining(skill.id);
        if remaining > 0 {
            return Err(Rejection::OnCooldown {
                skill: skill.id,
                remaining,
            });
        }
        let cost = self.effective_cost(skill);
        if self.energy < cost {
            return Err(Rejection::InsufficientEnergy {
                cost,
                available: self.energy,
            });
        }
        Ok(())
    }

    /// Uses `skill` against `opponent`.
    ///
    /// A rejected use changes nothing. A miss still spends the energy and
    /// any `Empower`, but starts no cooldown and resolves no effects.
    pub fn use_skill(
        &mut self,
        skill: &SkillTemplate,
        opponent: &mut Combatant,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<SkillOutcome, Rejection> {
        if let Err(rejection) = self.can_use(skill) {
            tracing::debug!("{} cannot use {}: {}", self.name, skill.name, rejection);
            return Err(rejection);
        }
        let cost = self.effective_cost(skill);
        let empowered = self.effects.has(StatusEffectKind::Empower);

        if skill.targets_enemy()
            && let HitOutcome::Miss(reason) = opponent.attempt_to_hit(ctx)
        {
            self.pay_for(skill, cost, empowered, ctx);
            tracing::debug!("{}'s {} missed: {}", self.name, skill.name, reason);
            ctx.emit(CombatEvent::AttackMissed {
                attacker: self.id,
                defender: opponent.id,
                reason,
            });
            return Ok(SkillOutcome::Missed(reason));
        }

        self.pay_for(skill, cost, empowered, ctx);
        if skill.cooldown > 0 {
            self.cooldowns.start(skill.id, skill.cooldown);
            self.notify_cooldowns(ctx);
        }

        let status = skill.status.as_ref().map(|application| {
            let source = EffectSource {
                caster: self.snapshot(),
                application,
            };
            effect_target(self, opponent, skill.target).apply_effect(
                application.to_effect(),
                Some(source),
                ctx,
            )
        });

        let mut damage = None;
        let mut healed = None;
        match skill.effect {
            SkillEffect::Damage { base, might_ratio } => {
                let multiplier = self.consume_damage_modifiers(ctx);
                let raw = base as f32 + self.stat(StatKind::Might) * might_ratio;
                let total = round_to_int(raw * multiplier);
                damage = Some(effect_target(self, opponent, skill.target).take_damage(total, ctx));
            }
            SkillEffect::Healing {
                base,
                intelligence_ratio,
            } => {
                let total =
                    round_to_int(base as f32 + self.stat(StatKind::Intelligence) * intelligence_ratio);
                healed = Some(self.receive_heal(total, ctx));
            }
        }

        if skill.cleanse > 0 {
            effect_target(self, opponent, skill.target).cleanse_debuffs(skill.cleanse, ctx);
        }
        if skill.purge > 0 {
            effect_target(self, opponent, skill.target).purge_buffs(skill.purge, ctx);
        }

        Ok(SkillOutcome::Resolved {
            damage,
            healed,
            status,
        })
    }

    fn pay_for(
        &mut self,
        skill: &SkillTemplate,
        cost: i32,
        empowered: bool,
        ctx: &mut ResolveContext<'_>,
    ) {
        self.spend_energy(cost, ctx);
        if empowered {
            self.remove_effect(StatusEffectKind::Empower, ctx);
        }
        tracing::info!("{} uses {} ({} energy)", self.name, skill.name, cost);
        ctx.emit(CombatEvent::SkillUsed {
            caster: self.id,
            skill: skill.id,
            energy_spent: cost,
        });
    }

    /// Consumes `PowerUp` then `Weaken` and returns the combined multiplier.
    fn consume_damage_modifiers(&mut self, ctx: &mut ResolveContext<'_>) -> f32 {
        let mut multiplier = 1.0;
        if self.remove_effect(StatusEffectKind::PowerUp, ctx) {
            multiplier *= ctx.config.power_up_multiplier;
        }
        if self.remove_effect(StatusEffectKind::Weaken, ctx) {
            multiplier *= ctx.config.weaken_multiplier;
        }
        multiplier
    }

    /// Rolls whether an incoming attack connects with this combatant.
    ///
    /// A `Dodge` buff is consumed by the attempt whatever the roll says.
    pub fn attempt_to_hit(&mut self, ctx: &mut ResolveContext<'_>) -> HitOutcome {
        if self.remove_effect(StatusEffectKind::Dodge, ctx)
            && ctx
                .rng
                .chance(self.id, RollContext::DodgeBuff, ctx.config.dodge_buff_chance)
        {
            return HitOutcome::Miss(MissReason::Dodged);
        }

        let evasion = ctx.config.evasion_chance(self.stat(StatKind::Speed));
        if ctx.rng.chance(self.id, RollContext::Evasion, evasion) {
            return HitOutcome::Miss(MissReason::Evaded);
        }
        HitOutcome::Hit
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{Harness, base, combatant};
    use super::*;
    use crate::combatant::CombatantId;
    use crate::env::FixedRng;
    use crate::skill::{SkillId, StatusApplication};
    use crate::stats::BaseStats;
    use crate::status::StatusEffect;

    fn strike() -> SkillTemplate {
        SkillTemplate::damage(1, "Strike", 20, 10, 1.0).with_cooldown(2)
    }

    #[test]
    fn damage_skill_pays_cost_and_starts_cooldown() {
        let mut h = Harness::new(FixedRng::HIGH);
        let mut caster = combatant(CombatantId::PLAYER, base());
        let mut target = combatant(CombatantId::ENEMY, base());

        let outcome = caster.use_skill(&strike(), &mut target, &mut h.ctx());
        assert_eq!(
            outcome,
            Ok(SkillOutcome::Resolved {
                damage: Some(20),
                healed: None,
                status: None,
            })
        );
        assert_eq!(caster.energy(), 80);
        assert_eq!(target.health(), 80);
        assert_eq!(caster.cooldowns().remaining(SkillId(1)), 2);

        let again = caster.use_skill(&strike(), &mut target, &mut h.ctx());
        assert_eq!(
            again,
            Err(Rejection::OnCooldown {
                skill: SkillId(1),
                remaining: 2
            })
        );
        assert_eq!(caster.energy(), 80);
    }

    #[test]
    fn insufficient_energy_is_rejected_without_changes() {
        let mut h = Harness::new(FixedRng::HIGH);
        let mut caster = combatant(
            CombatantId::PLAYER,
            BaseStats {
                energy: 10.0,
                ..base()
            },
        );
        let mut target = combatant(CombatantId::ENEMY, base());

        let outcome = caster.use_skill(&strike(), &mut target, &mut h.ctx());
        assert_eq!(
            outcome,
            Err(Rejection::InsufficientEnergy {
                cost: 20,
                available: 10
            })
        );
        assert_eq!(caster.energy(), 10);
        assert!(h.events.is_empty());
    }

    #[test]
    fn empower_makes_the_next_skill_free() {
        let mut h = Harness::new(FixedRng::HIGH);
        let mut caster = combatant(
            CombatantId::PLAYER,
            BaseStats {
                energy: 10.0,
                ..base()
            },
        );
        let mut target = combatant(CombatantId::ENEMY, base());
        caster.apply_effect(StatusEffect::of(StatusEffectKind::Empower, 2), None, &mut h.ctx());

        assert!(caster.use_skill(&strike().with_cooldown(0), &mut target, &mut h.ctx()).is_ok());
        assert_eq!(caster.energy(), 10);
        assert!(!caster.has_effect(StatusEffectKind::Empower));
        assert!(caster.use_skill(&strike(), &mut target, &mut h.ctx()).is_err());
    }

    #[test]
    fn power_up_and_weaken_are_consumed_together() {
        let mut h = Harness::new(FixedRng::HIGH);
        let mut caster = combatant(CombatantId::PLAYER, base());
        let mut target = combatant(CombatantId::ENEMY, base());
        caster.apply_effect(StatusEffect::of(StatusEffectKind::PowerUp, 2), None, &mut h.ctx());
        caster.apply_effect(StatusEffect::of(StatusEffectKind::Weaken, 2), None, &mut h.ctx());

        let skill = SkillTemplate::damage(2, "Slam", 0, 40, 0.0);
        caster
            .use_skill(&skill, &mut target, &mut h.ctx())
            .expect("slam resolves");
        assert_eq!(target.health(), 70);
        assert!(!caster.has_effect(StatusEffectKind::PowerUp));
        assert!(!caster.has_effect(StatusEffectKind::Weaken));
    }

    #[test]
    fn dodge_is_consumed_even_when_the_roll_fails() {
        let mut h = Harness::new(FixedRng::HIGH);
        let mut defender = combatant(CombatantId::ENEMY, base());
        defender.apply_effect(StatusEffect::of(StatusEffectKind::Dodge, 2), None, &mut h.ctx());

        assert_eq!(defender.attempt_to_hit(&mut h.ctx()), HitOutcome::Hit);
        assert!(!defender.has_effect(StatusEffectKind::Dodge));
    }

    #[test]
    fn dodged_attack_spends_energy_without_effects() {
        let mut h = Harness::new(FixedRng::LOW);
        let mut caster = combatant(CombatantId::PLAYER, base());
        let mut target = combatant(CombatantId::ENEMY, base());
        target.apply_effect(StatusEffect::of(StatusEffectKind::Dodge, 2), None, &mut h.ctx());

        let outcome = caster.use_skill(&strike(), &mut target, &mut h.ctx());
        assert_eq!(outcome, Ok(SkillOutcome::Missed(MissReason::Dodged)));
        assert_eq!(caster.energy(), 80);
        assert_eq!(target.health(), 100);
        assert!(caster.cooldowns().is_empty());

        // The buff is gone and zero speed gives no passive evasion.
        assert!(caster.use_skill(&strike(), &mut target, &mut h.ctx()).is_ok());
        assert_eq!(target.health(), 80);
    }

    #[test]
    fn healing_is_credited_to_the_caster() {
        let mut h = Harness::new(FixedRng::HIGH);
        let mut caster = combatant(CombatantId::PLAYER, base());
        let mut target = combatant(CombatantId::ENEMY, base());
        caster.take_true_damage(50, &mut h.ctx());
        target.take_true_damage(50, &mut h.ctx());

        let mend = SkillTemplate::healing(3, "Mend", 10, 10, 1.0);
        let outcome = caster.use_skill(&mend, &mut target, &mut h.ctx());
        assert_eq!(
            outcome,
            Ok(SkillOutcome::Resolved {
                damage: None,
                healed: Some(20),
                status: None,
            })
        );
        assert_eq!(caster.health(), 70);
        assert_eq!(target.health(), 50);
    }

    #[test]
    fn self_targeted_status_and_cleanse_land_on_caster() {
        let mut h = Harness::new(FixedRng::HIGH);
        let mut caster = combatant(CombatantId::PLAYER, base());
        let mut target = combatant(CombatantId::ENEMY, base());
        caster.apply_effect(StatusEffect::of(StatusEffectKind::Burn, 3), None, &mut h.ctx());

        let ward = SkillTemplate::healing(4, "Ward", 0, 0, 0.0)
            .with_status(StatusApplication::new(StatusEffectKind::Fortify, 2))
            .with_cleanse(1);
        caster
            .use_skill(&ward, &mut target, &mut h.ctx())
            .expect("ward resolves");

        assert!(caster.has_effect(StatusEffectKind::Fortify));
        assert!(!caster.has_effect(StatusEffectKind::Burn));
        assert!(target.effects().is_empty());
    }

    #[test]
    fn enemy_targeted_utility_purges_the_opponent() {
        let mut h = Harness::new(FixedRng::HIGH);
        let mut caster = combatant(CombatantId::PLAYER, base());
        let mut target = combatant(CombatantId::ENEMY, base());
        caster.apply_effect(StatusEffect::of(StatusEffectKind::Fortify, 2), None, &mut h.ctx());
        target.apply_effect(StatusEffect::of(StatusEffectKind::Fortify, 2), None, &mut h.ctx());

        let shatter = SkillTemplate::healing(5, "Shatter", 10, 0, 0.0)
            .with_target(TargetKind::Enemy)
            .with_purge(1);
        caster
            .use_skill(&shatter, &mut target, &mut h.ctx())
            .expect("shatter resolves");

        assert!(!target.has_effect(StatusEffectKind::Fortify));
        assert_eq!(target.stat(StatKind::Armor), 0.0);
        assert!(caster.has_effect(StatusEffectKind::Fortify));
        assert_eq!(caster.energy(), 90);
    }
}

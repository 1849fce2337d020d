//! Health and energy bookkeeping.

use super::{Combatant, round_to_int};
use crate::context::ResolveContext;
use crate::event::CombatEvent;
use crate::stats::StatKind;
use crate::status::{EffectTraits, StatusEffectKind};

impl Combatant {
    pub fn max_health(&self) -> i32 {
        self.stat(StatKind::MaxHealth) as i32
    }

    pub fn max_energy(&self) -> i32 {
        self.stat(StatKind::Energy) as i32
    }

    /// Immunity or Ethereal: incoming debuffs and damage are ignored.
    pub fn is_warded(&self) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind.has_trait(EffectTraits::WARDS))
    }

    /// Armor-mitigated damage, amplified by `Vulnerable`.
    ///
    /// Returns the health actually lost.
    pub fn take_damage(&mut self, amount: i32, ctx: &mut ResolveContext<'_>) -> i32 {
        let final_damage = if self.is_warded() {
            tracing::debug!("{} is warded and ignores {} damage", self.name, amount);
            0
        } else {
            let reduction = ctx.config.armor_reduction(self.stat(StatKind::Armor));
            let mut mitigated = round_to_int(amount as f32 * (1.0 - reduction));
            if self.effects.has(StatusEffectKind::Vulnerable) {
                mitigated = round_to_int(mitigated as f32 * ctx.config.vulnerable_multiplier);
            }
            mitigated
        };
        self.lose_health(final_damage, false, ctx)
    }

    /// Damage that bypasses armor and `Vulnerable`; still blocked by wards.
    pub fn take_true_damage(&mut self, amount: i32, ctx: &mut ResolveContext<'_>) -> i32 {
        let final_damage = if self.is_warded() {
            tracing::debug!("{} is warded and ignores {} true damage", self.name, amount);
            0
        } else {
            amount
        };
        self.lose_health(final_damage, true, ctx)
    }

    fn lose_health(&mut self, amount: i32, true_damage: bool, ctx: &mut ResolveContext<'_>) -> i32 {
        let amount = amount.max(0);
        let before = self.health;
        self.health = (self.health - amount).max(0);
        let lost = before - self.health;

        ctx.emit(CombatEvent::DamageTaken {
            combatant: self.id,
            amount: lost,
            true_damage,
        });
        self.notify_health(ctx);

        if self.health <= 0 {
            self.die(ctx);
        }
        lost
    }

    /// Marks the combatant dead. Reported once, however many hits land after.
    fn die(&mut self, ctx: &mut ResolveContext<'_>) {
        if self.dead {
            return;
        }
        self.dead = true;
        tracing::info!("{} has been defeated", self.name);
        ctx.emit(CombatEvent::Died { combatant: self.id });
    }

    /// Heals up to max health. `Blight` nullifies, `MortalWound` halves.
    ///
    /// A heal that lands also closes half of any open Wound stacks. Returns
    /// the health actually restored.
    pub fn receive_heal(&mut self, amount: i32, ctx: &mut ResolveContext<'_>) -> i32 {
        let amount = if self.effects.has(StatusEffectKind::Blight) {
            0
        } else if self.effects.has(StatusEffectKind::MortalWound) {
            round_to_int(amount as f32 * ctx.config.mortal_wound_heal_multiplier)
        } else {
            amount
        };
        if amount <= 0 {
            tracing::debug!("healing on {} was nullified", self.name);
            return 0;
        }

        let before = self.health;
        self.health = (self.health + amount).min(self.max_health());
        let restored = self.health - before;
        ctx.emit(CombatEvent::Healed {
            combatant: self.id,
            amount: restored,
        });
        self.notify_health(ctx);

        self.close_wounds(ctx);
        restored
    }

    fn close_wounds(&mut self, ctx: &mut ResolveContext<'_>) {
        let Some(wound) = self.effects.get_mut(StatusEffectKind::Wound) else {
            return;
        };
        let closed = wound.stacks / 2;
        if closed == 0 {
            return;
        }
        wound.stacks -= closed;
        if wound.stacks == 0 {
            self.remove_effect(StatusEffectKind::Wound, ctx);
        } else {
            self.notify_effects(ctx);
        }
    }

    /// Adds `EnergyRegen`, capped at max energy.
    pub fn regenerate_energy(&mut self, ctx: &mut ResolveContext<'_>) {
        let regen = self.stat(StatKind::EnergyRegen) as i32;
        self.energy = (self.energy + regen).min(self.max_energy());
        tracing::debug!("{} regenerates {} energy, now {}", self.name, regen, self.energy);
        self.notify_energy(ctx);
    }

    pub(crate) fn spend_energy(&mut self, cost: i32, ctx: &mut ResolveContext<'_>) {
        if cost == 0 {
            return;
        }
        self.energy -= cost;
        self.notify_energy(ctx);
    }

    /// Advances every cooldown by one turn.
    pub fn tick_cooldowns(&mut self, ctx: &mut ResolveContext<'_>) {
        if self.cooldowns.tick() {
            self.notify_cooldowns(ctx);
        }
    }

    pub(crate) fn notify_health(&self, ctx: &mut ResolveContext<'_>) {
        ctx.emit(CombatEvent::HealthChanged {
            combatant: self.id,
            current: self.health,
            max: self.max_health(),
        });
    }

    pub(crate) fn notify_energy(&self, ctx: &mut ResolveContext<'_>) {
        ctx.emit(CombatEvent::EnergyChanged {
            combatant: self.id,
            current: self.energy,
            max: self.max_energy(),
        });
    }

    pub(crate) fn notify_cooldowns(&self, ctx: &mut ResolveContext<'_>) {
        ctx.emit(CombatEvent::CooldownsChanged {
            combatant: self.id,
            cooldowns: self.cooldowns.iter().collect(),
        });
    }

    pub(crate) fn notify_effects(&self, ctx: &mut ResolveContext<'_>) {
        ctx.emit(CombatEvent::StatusEffectsChanged {
            combatant: self.id,
            active: self.effects.kinds(),
        });
    }
}

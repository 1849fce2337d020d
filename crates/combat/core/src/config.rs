/// Combat balance constants and tunable parameters.
///
/// Every number the rules consult lives here so rebalancing never touches
/// the resolution code. Fields missing from a serialized table fall back to
/// the `DEFAULT_*` constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Armor mitigation: `reduction = armor / (armor + armor_constant)`.
    pub armor_constant: f32,
    /// Damage multiplier while the defender is `Vulnerable`.
    pub vulnerable_multiplier: f32,

    /// Chance that a `Dodge` buff turns an incoming attack into a miss.
    pub dodge_buff_chance: f32,
    /// Passive evasion: `(speed / (speed + evasion_speed_constant)) * evasion_cap`.
    pub evasion_speed_constant: f32,
    pub evasion_cap: f32,

    /// Stun/Freeze resistance: `(grit / (grit + grit_constant)) * grit_resist_cap`.
    pub grit_constant: f32,
    pub grit_resist_cap: f32,

    /// Outgoing damage multiplier consumed from `PowerUp`.
    pub power_up_multiplier: f32,
    /// Outgoing damage multiplier consumed from `Weaken`.
    pub weaken_multiplier: f32,
    /// Incoming healing multiplier while under `MortalWound`.
    pub mortal_wound_heal_multiplier: f32,

    /// Wound stacks consumed when the bleed threshold is reached.
    pub wound_bleed_threshold: u32,
    /// Wound lifetime; long enough that turn decay never clears it in practice.
    pub wound_duration: i32,
    pub bleed_duration: i32,
    pub mortal_wound_duration: i32,
    /// Fraction of max health lost per `Bleed` tick.
    pub bleed_max_health_fraction: f32,

    /// Flat armor granted by `Fortify`.
    pub fortify_armor_bonus: f32,
    /// Duration of the `Vulnerable` rider applied by `Freeze`.
    pub freeze_vulnerable_duration: i32,

    /// Debuffs removed by `Purification` at the start of each turn.
    pub purification_cleanse_count: u32,
    /// Buffs removed by `Unraveling` at the start of each turn.
    pub unraveling_purge_count: u32,
}

impl CombatConfig {
    // ===== defaults =====
    pub const DEFAULT_ARMOR_CONSTANT: f32 = 150.0;
    pub const DEFAULT_VULNERABLE_MULTIPLIER: f32 = 1.5;
    pub const DEFAULT_DODGE_BUFF_CHANCE: f32 = 0.85;
    pub const DEFAULT_EVASION_SPEED_CONSTANT: f32 = 150.0;
    pub const DEFAULT_EVASION_CAP: f32 = 0.30;
    pub const DEFAULT_GRIT_CONSTANT: f32 = 100.0;
    pub const DEFAULT_GRIT_RESIST_CAP: f32 = 0.5;
    pub const DEFAULT_POWER_UP_MULTIPLIER: f32 = 1.5;
    pub const DEFAULT_WEAKEN_MULTIPLIER: f32 = 0.5;
    pub const DEFAULT_MORTAL_WOUND_HEAL_MULTIPLIER: f32 = 0.5;
    pub const DEFAULT_WOUND_BLEED_THRESHOLD: u32 = 10;
    pub const DEFAULT_WOUND_DURATION: i32 = 99;
    pub const DEFAULT_BLEED_DURATION: i32 = 3;
    pub const DEFAULT_MORTAL_WOUND_DURATION: i32 = 3;
    pub const DEFAULT_BLEED_MAX_HEALTH_FRACTION: f32 = 0.16;
    pub const DEFAULT_FORTIFY_ARMOR_BONUS: f32 = 150.0;
    pub const DEFAULT_FREEZE_VULNERABLE_DURATION: i32 = 1;
    pub const DEFAULT_PURIFICATION_CLEANSE_COUNT: u32 = 1;
    pub const DEFAULT_UNRAVELING_PURGE_COUNT: u32 = 1;

    pub fn new() -> Self {
        Self {
            armor_constant: Self::DEFAULT_ARMOR_CONSTANT,
            vulnerable_multiplier: Self::DEFAULT_VULNERABLE_MULTIPLIER,
            dodge_buff_chance: Self::DEFAULT_DODGE_BUFF_CHANCE,
            evasion_speed_constant: Self::DEFAULT_EVASION_SPEED_CONSTANT,
            evasion_cap: Self::DEFAULT_EVASION_CAP,
            grit_constant: Self::DEFAULT_GRIT_CONSTANT,
            grit_resist_cap: Self::DEFAULT_GRIT_RESIST_CAP,
            power_up_multiplier: Self::DEFAULT_POWER_UP_MULTIPLIER,
            weaken_multiplier: Self::DEFAULT_WEAKEN_MULTIPLIER,
            mortal_wound_heal_multiplier: Self::DEFAULT_MORTAL_WOUND_HEAL_MULTIPLIER,
            wound_bleed_threshold: Self::DEFAULT_WOUND_BLEED_THRESHOLD,
            wound_duration: Self::DEFAULT_WOUND_DURATION,
            bleed_duration: Self::DEFAULT_BLEED_DURATION,
            mortal_wound_duration: Self::DEFAULT_MORTAL_WOUND_DURATION,
            bleed_max_health_fraction: Self::DEFAULT_BLEED_MAX_HEALTH_FRACTION,
            fortify_armor_bonus: Self::DEFAULT_FORTIFY_ARMOR_BONUS,
            freeze_vulnerable_duration: Self::DEFAULT_FREEZE_VULNERABLE_DURATION,
            purification_cleanse_count: Self::DEFAULT_PURIFICATION_CLEANSE_COUNT,
            unraveling_purge_count: Self::DEFAULT_UNRAVELING_PURGE_COUNT,
        }
    }

    /// Fraction of incoming mitigable damage absorbed by `armor`.
    pub fn armor_reduction(&self, armor: f32) -> f32 {
        let armor = armor.max(0.0);
        armor / (armor + self.armor_constant)
    }

    /// Passive evasion chance granted by `speed`.
    pub fn evasion_chance(&self, speed: f32) -> f32 {
        let speed = speed.max(0.0);
        (speed / (speed + self.evasion_speed_constant)) * self.evasion_cap
    }

    /// Chance to shrug off a Stun or Freeze.
    pub fn grit_resist_chance(&self, grit: f32) -> f32 {
        let grit = grit.max(0.0);
        (grit / (grit + self.grit_constant)) * self.grit_resist_cap
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

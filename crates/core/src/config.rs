/// Battle engine capacity limits and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Level the first battle starts at. Raising this is mainly useful for
    /// balance experiments against scaled enemies.
    pub starting_level: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of concurrent status effects on one combatant.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== fixed-point scales =====
    /// Rage is tracked in thousandths of a point so the fractional gains
    /// (2.5% / 5% of damage) stay exact without floating point.
    pub const RAGE_UNIT: u32 = 1000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_LEVEL: u32 = 1;

    pub fn new() -> Self {
        Self {
            starting_level: Self::DEFAULT_STARTING_LEVEL,
        }
    }

    pub fn with_starting_level(starting_level: u32) -> Self {
        Self { starting_level }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

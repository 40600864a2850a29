// Enchant session and lock caps. These currently share a value but are
// tuned independently; the lock cap counts locked lines, not sessions.
pub const MAX_ENCHANT_SESSIONS: u32 = 12;
pub const MAX_LOCKED_LINES: usize = 12;

// Resource item identifiers consumed by enchanting tier costs.
pub const MAGIC_ESSENCE_ID: &str = "magic_essence";
pub const ARCANE_RUNE_ID: &str = "arcane_rune";
pub const DRAGON_SCALE_ID: &str = "dragon_scale";

// Lock currency, consumed when locking a rolled line. Never refunded.
pub const ARCANE_DUST_ID: &str = "arcane_dust";

// Raw gems from mining, bottom of the conversion chain.
pub const RAW_GEM_ID: &str = "gems";

// Gem conversion ratio: 4 of tier i make 1 of tier i+1, and back.
pub const GEM_CONVERT_RATIO: u32 = 4;

// Experience and progression constants
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Horizontal radius beyond which projectiles are culled (meters).
pub const WORLD_RADIUS: f64 = 1_000.0;

// --- Collision layers ---

/// Static level geometry.
pub const LAYER_WORLD: u32 = 1 << 0;

/// Actor hit colliders.
pub const LAYER_ACTORS: u32 = 1 << 1;

/// Every layer.
pub const LAYER_ALL: u32 = u32::MAX;

// --- Weapon inventory ---

/// Number of weapon slots per inventory.
pub const WEAPON_SLOT_COUNT: usize = 9;

/// Default duration of each weapon switch transition (seconds).
pub const DEFAULT_WEAPON_SWITCH_DELAY: f64 = 1.0;

// --- Target detection defaults ---

/// Maximum distance at which a detector can see targets (meters).
pub const DEFAULT_DETECTION_RANGE: f64 = 20.0;

/// Maximum distance at which a detector can attack its known target (meters).
pub const DEFAULT_ATTACK_RANGE: f64 = 10.0;

/// Seconds an unseen known target is remembered before being forgotten.
pub const DEFAULT_KNOWN_TARGET_TIMEOUT: f64 = 4.0;

// --- Health defaults ---

/// Health ratio at or below which a pool reports critical.
pub const DEFAULT_CRITICAL_HEALTH_RATIO: f64 = 0.3;

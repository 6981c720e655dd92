//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Aircraft upgrades ---

/// Highest fire-rate level an aircraft can reach.
pub const MAX_FIRE_RATE_LEVEL: u32 = 10;

/// Highest spread level an aircraft can reach.
pub const MAX_SPREAD_LEVEL: u32 = 3;

/// Missiles carried by a freshly built aircraft.
pub const INITIAL_MISSILE_AMMO: u32 = 2;

// --- Pickups ---

/// A destroyed enemy drops a pickup with probability 1 / PICKUP_DROP_ODDS.
pub const PICKUP_DROP_ODDS: u32 = 3;

/// Velocity given to a freshly dropped pickup (screen units per second, y down).
pub const PICKUP_DRIFT_VELOCITY: (f32, f32) = (0.0, 1.0);

// --- Heading convention ---

/// Added to every waypoint heading so that 0° points down the screen.
pub const HEADING_OFFSET_DEG: f32 = 90.0;

// --- Projectile launch offsets (fractions of the shooter's sprite size) ---

/// Vertical launch offset for centred shots and missiles.
pub const CENTER_SHOT_Y_OFFSET: f32 = 0.5;

/// Vertical launch offset for the outer shots of a spread.
pub const SIDE_SHOT_Y_OFFSET: f32 = 0.33;

// --- Guided missiles ---

/// How strongly a guided missile bends toward its target direction.
pub const MISSILE_APPROACH_RATE: f32 = 200.0;

// --- Explosion animation ---

/// Edge length of one explosion frame in the texture (pixels).
pub const EXPLOSION_FRAME_SIZE: i32 = 256;

/// Frames per row in the explosion sheet.
pub const EXPLOSION_SHEET_COLUMNS: u32 = 4;

/// Number of frames in the explosion sheet.
pub const EXPLOSION_FRAME_COUNT: u32 = 16;

/// Full explosion playback time (seconds).
pub const EXPLOSION_DURATION_SECS: f32 = 1.0;

// --- Text displays attached to aircraft ---

/// Local offset of the hit point readout below an aircraft.
pub const HEALTH_DISPLAY_OFFSET: (f32, f32) = (0.0, 50.0);

/// Local offset of the missile ammo readout below the player aircraft.
pub const MISSILE_DISPLAY_OFFSET: (f32, f32) = (0.0, 70.0);

// --- World ---

/// Visible view width (screen units).
pub const VIEW_WIDTH: f32 = 640.0;

/// Visible view height (screen units).
pub const VIEW_HEIGHT: f32 = 480.0;

/// Total level height; the view scrolls from the bottom to the top.
pub const WORLD_HEIGHT: f32 = 3000.0;

/// View scroll speed (screen units per second, negative = upward).
pub const SCROLL_SPEED: f32 = -50.0;

/// Extra room above the view in which enemies are already simulated.
pub const BATTLEFIELD_MARGIN: f32 = 100.0;

/// Minimum distance kept between the player aircraft and the view edges.
pub const VIEW_BORDER_DISTANCE: f32 = 40.0;

/// Rotation given to spawned enemies so they face down the screen (degrees).
pub const ENEMY_SPAWN_ROTATION_DEG: f32 = 180.0;

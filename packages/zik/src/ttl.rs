// Ledgers close roughly every five seconds.
pub const DAY_IN_LEDGERS: u32 = 17280;

// Instance storage (config, counters, admin) is refreshed to a week whenever it
// drops below six days.
pub const INSTANCE_TARGET_TTL: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_RENEWAL_THRESHOLD: u32 = INSTANCE_TARGET_TTL - DAY_IN_LEDGERS;

// Persistent entries (positions, ownership, attributes) are refreshed to thirty
// days whenever they drop below twenty nine.
pub const PERSISTENT_TARGET_TTL: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_RENEWAL_THRESHOLD: u32 = PERSISTENT_TARGET_TTL - DAY_IN_LEDGERS;

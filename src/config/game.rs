/// Match configuration constants.
/// 
/// This module defines the rules around who may sit at the table:
/// how many players a match holds and how their display names are normalized.
pub const MAX_PLAYERS: usize = 2; // A match is strictly head-to-head.

/// Maximum number of characters kept from a submitted player name.
pub const MAX_NAME_LEN: usize = 32;

/// Prefix used to build a display name when a player joins with a blank one.
pub const DEFAULT_NAME_PREFIX: &str = "Player_";

/// Number of connection-id characters appended to the default name.
pub const DEFAULT_NAME_SUFFIX_LEN: usize = 6;

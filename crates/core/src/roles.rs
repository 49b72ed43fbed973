//! Role name constants shared by the API layer and seed data.

/// Platform operators; may trigger gameweek and tournament resolution.
pub const ROLE_ADMIN: &str = "admin";

/// Regular platform users.
pub const ROLE_PLAYER: &str = "player";

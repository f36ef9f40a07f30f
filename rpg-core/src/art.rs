//! Location art.
//!
//! Kept to single-width glyphs so the panels line up in any terminal.

pub const TAVERN: &str = r"
    ╔════════════════════════════╗
    ║          TAVERN            ║
    ╠════════════════════════════╣
    ║  [U]      (~)       [U]    ║
    ║     o              o       ║
    ║        h    h              ║
    ║     h              h       ║
    ║  h         o          h    ║
    ╚════════════════════════════╝";

pub const FOREST: &str = r"
    ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
    ^  ^        ^  ^    ^  ^
    ^    ^  ^    ^  ^    ^
    ^  ^    ^  ^    ^  ^  ^
    ^    ^  ^    ^  ^    ^
    ^  ^    ^  ^    ^  ^  ^
    ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^";

pub const CAVE: &str = r"
        vvvvvvvvvvvvvvvvvvvvvvvv
      v                        v
    v    *          *            v
  v        *      *                v
v             *                      v
  v        *      *                v
    v    *          *            v
      v                        v
        vvvvvvvvvvvvvvvvvvvvvvvv";

/// Crypt-style level, also used for the static dungeon.
pub const DUNGEON_HALL: &str = r"
    ╔════════════════════════════╗
    ║          DUNGEON           ║
    ╠════════════════════════════╣
    ║  ~    x    ~    x          ║
    ║     +            +         ║
    ║  ~    x    ~    x          ║
    ║     +            +         ║
    ║  ~    x    ~    x          ║
    ╚════════════════════════════╝";

pub const DUNGEON_CAVE: &str = r"
    ╔════════════════════════════╗
    ║            CAVE            ║
    ╠════════════════════════════╣
    ║  *    w    *    w          ║
    ║     !            !         ║
    ║  *    w    *    w          ║
    ║     !            !         ║
    ║  *    w    *    w          ║
    ╚════════════════════════════╝";

pub const DUNGEON_RUINS: &str = r"
    ╔════════════════════════════╗
    ║           RUINS            ║
    ╠════════════════════════════╣
    ║  #    @    #    @          ║
    ║     ‡            ‡         ║
    ║  #    @    #    @          ║
    ║     ‡            ‡         ║
    ║  #    @    #    @          ║
    ╚════════════════════════════╝";

/// Patterns a generated level draws from.
pub const DUNGEON_PATTERNS: [&str; 3] = [DUNGEON_HALL, DUNGEON_CAVE, DUNGEON_RUINS];

//! Symbol Codec (component 1 of the pipeline): the bidirectional mapping
//! between user-visible shift glyphs and the four internal shift kinds.

use serde::{Deserialize, Serialize};

/// One of the four shift kinds a decision cell can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    Work,
    Off,
    Early,
    Late,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 4] = [
        ShiftKind::Work,
        ShiftKind::Off,
        ShiftKind::Early,
        ShiftKind::Late,
    ];

    /// Off-equivalent weight doubled to stay in integer arithmetic
    /// (`Off` contributes 2, `Early` contributes 1, everything else 0 — see
    /// spec §9 "Off-equivalent integer scaling").
    pub fn off_equivalent_doubled(self) -> i64 {
        match self {
            ShiftKind::Off => 2,
            ShiftKind::Early => 1,
            ShiftKind::Work | ShiftKind::Late => 0,
        }
    }
}

pub const GLYPH_OFF: &str = "\u{00d7}"; // ×
pub const GLYPH_EARLY: &str = "\u{25b3}"; // △
pub const GLYPH_LATE: &str = "\u{25c7}"; // ◇
pub const GLYPH_WORK: &str = "";
pub const GLYPH_WORK_BACKUP: &str = "\u{25cb}"; // ○, backup-coverage "working" cells only
pub const GLYPH_UNAVAILABLE: &str = "\u{2298}"; // ⊘

/// Canonical output glyph for a kind, ignoring backup-slot specialization.
pub fn default_glyph(kind: ShiftKind) -> &'static str {
    match kind {
        ShiftKind::Work => GLYPH_WORK,
        ShiftKind::Off => GLYPH_OFF,
        ShiftKind::Early => GLYPH_EARLY,
        ShiftKind::Late => GLYPH_LATE,
    }
}

/// Decode a user-supplied glyph into its shift kind, tolerating the full
/// accepted alias set (spec §6 "Glyphs (bit-exact)"). Returns `None` for
/// glyphs with no known mapping — callers coerce unknown glyphs to `Work`
/// while preserving the original text (spec §4.1).
///
/// The alias table is intentionally multivalued-to-one: several glyphs map
/// onto the same kind and are not deduplicated (spec §9 open question 3).
pub fn decode(glyph: &str) -> Option<ShiftKind> {
    match glyph {
        "\u{00d7}" | "x" | "X" => Some(ShiftKind::Off),
        "\u{25b3}" | "s" | "S" => Some(ShiftKind::Early),
        "\u{25c7}" => Some(ShiftKind::Late),
        "" | "\u{25cb}" => Some(ShiftKind::Work),
        g if is_decorative_work_glyph(g) => Some(ShiftKind::Work),
        _ => None,
    }
}

/// Decorative glyphs that count as `Work` for scheduling but are preserved
/// verbatim on output (spec §3 "Shift symbol").
fn is_decorative_work_glyph(glyph: &str) -> bool {
    matches!(
        glyph,
        "\u{2605}" // ★
            | "\u{2606}" // ☆
            | "\u{25cf}" // ●
            | "\u{25ce}" // ◎
            | "\u{25a3}" // ▣
            | "\u{2298}" // ⊘ (never input in practice, but accepted)
    )
}

/// Star-family glyphs specifically: designated-off intent that nominally
/// resolves to `Work` but still contributes to the off-equivalent counter
/// used by monthly quotas (spec §3 "Pre-filled cell", §4.4.2).
pub fn is_star_glyph(glyph: &str) -> bool {
    matches!(glyph, "\u{2605}" | "\u{2606}")
}

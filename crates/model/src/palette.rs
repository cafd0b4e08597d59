/// Fixed color palette for auto-populated SELECT options. Colors are
/// assigned round-robin in the order distinct values are first seen.
pub const SELECT_PALETTE: &[&str] = &[
    "#3b82f6", // blue
    "#10b981", // emerald
    "#f59e0b", // amber
    "#ef4444", // red
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f97316", // orange
    "#6366f1", // indigo
    "#84cc16", // lime
];

/// Color at position `i`, wrapping around the palette.
#[must_use]
pub fn palette_color(i: usize) -> &'static str {
    SELECT_PALETTE[i % SELECT_PALETTE.len()]
}

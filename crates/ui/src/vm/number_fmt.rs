use clicker_core::format::abbreviate;

/// Abbreviated number for display, falling back to scientific notation when
/// the value is outside the unit table.
#[must_use]
pub fn display_number(value: f64) -> String {
    abbreviate(value).unwrap_or_else(|_| format!("{value:.2e}"))
}

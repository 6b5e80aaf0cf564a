//! Analyzer configuration: the per-position base-value table.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Immutable per-position base values used by the local trade heuristic.
///
/// Loaded once at startup and never mutated. The table is intentionally
/// coarse; a performance-weighted scoring backend would replace it entirely
/// rather than adjust it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Base value for quarterbacks
    pub qb_value: Decimal,

    /// Base value for running backs
    pub rb_value: Decimal,

    /// Base value for wide receivers
    pub wr_value: Decimal,

    /// Base value for tight ends
    pub te_value: Decimal,

    /// Base value for team defenses
    pub def_value: Decimal,

    /// Base value for kickers
    pub kicker_value: Decimal,

    /// Value assigned to positions the table doesn't know
    pub fallback_value: Decimal,
}

impl AnalyzerConfig {
    /// Base point value for a position. Pure lookup, invariant to everything
    /// but the position itself.
    pub fn value_of(&self, position: Position) -> Decimal {
        match position {
            Position::Qb => self.qb_value,
            Position::Rb => self.rb_value,
            Position::Wr => self.wr_value,
            Position::Te => self.te_value,
            Position::Def => self.def_value,
            Position::K => self.kicker_value,
            Position::Unknown => self.fallback_value,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            qb_value: dec!(20),
            rb_value: dec!(18),
            wr_value: dec!(16),
            te_value: dec!(14),
            def_value: dec!(10),
            kicker_value: dec!(8),
            fallback_value: dec!(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_values() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.value_of(Position::Qb), dec!(20));
        assert_eq!(config.value_of(Position::Rb), dec!(18));
        assert_eq!(config.value_of(Position::Wr), dec!(16));
        assert_eq!(config.value_of(Position::Te), dec!(14));
        assert_eq!(config.value_of(Position::Def), dec!(10));
        assert_eq!(config.value_of(Position::K), dec!(8));
    }

    #[test]
    fn test_unknown_position_uses_fallback() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.value_of(Position::Unknown), dec!(10));
    }
}

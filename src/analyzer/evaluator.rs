//! Trade evaluator: grades a proposal by comparing aggregate position values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::{Grade, Player, TradeProposal, TradeResult};

use super::AnalyzerConfig;

/// Validation failure surfaced to the user. Evaluation does not proceed and
/// nothing is partially computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluateError {
    #[error("Please select a roster and add players to both sides of the trade")]
    IncompleteTrade,
}

/// Grades trades with the local static heuristic.
///
/// Pure computation over the two player sequences: no I/O, no mutation of
/// the proposal, deterministic for identical inputs.
pub struct TradeEvaluator {
    config: AnalyzerConfig,
}

impl TradeEvaluator {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Evaluate a proposal and map the value delta to a grade.
    ///
    /// Preconditions, checked before any arithmetic: a roster has been
    /// selected and both sides are non-empty. A failed check returns
    /// `EvaluateError::IncompleteTrade`; the caller's previously displayed
    /// result (if any) is its own to keep or discard.
    pub fn evaluate(&self, proposal: &TradeProposal) -> Result<TradeResult, EvaluateError> {
        if proposal.roster_id.is_none()
            || proposal.giving.is_empty()
            || proposal.receiving.is_empty()
        {
            return Err(EvaluateError::IncompleteTrade);
        }

        let giving_value = self.side_value(proposal.giving.players());
        let receiving_value = self.side_value(proposal.receiving.players());

        // giving_value >= the smallest table value once non-empty, so the
        // division cannot hit zero under the checked preconditions
        let difference = receiving_value - giving_value;
        let percent_diff = difference / giving_value * dec!(100);

        let grade = Self::grade_for(percent_diff);

        Ok(TradeResult {
            grade,
            percent_diff,
            giving_value,
            receiving_value,
            analysis: Self::analysis_for(grade).to_string(),
        })
    }

    /// Sum of base values across one side.
    fn side_value(&self, players: &[Player]) -> Decimal {
        players
            .iter()
            .map(|p| self.config.value_of(p.position))
            .sum()
    }

    /// Map a percent difference to a grade. Thresholds are strict
    /// greater-than comparisons, first match wins: exactly 15 grades A,
    /// exactly 5 grades B, and so on down the table.
    fn grade_for(percent_diff: Decimal) -> Grade {
        if percent_diff > dec!(15) {
            Grade::APlus
        } else if percent_diff > dec!(5) {
            Grade::A
        } else if percent_diff > dec!(-5) {
            Grade::B
        } else if percent_diff > dec!(-15) {
            Grade::C
        } else {
            Grade::D
        }
    }

    fn analysis_for(grade: Grade) -> &'static str {
        match grade {
            Grade::APlus => {
                "Excellent trade! You're receiving significantly more value. This should strengthen your roster."
            }
            Grade::A => {
                "Great trade! You're getting good value in return. This move should improve your team's performance."
            }
            Grade::B => {
                "Fair trade. The value is roughly equal on both sides. Consider your positional needs before accepting."
            }
            Grade::C => {
                "Not recommended. You're giving up more value than you're receiving. Try negotiating for more."
            }
            Grade::D => {
                "Poor trade. You would lose significant value. Reject this offer or demand more in return."
            }
        }
    }
}

impl Default for TradeEvaluator {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, SideKind};

    fn player(id: i64, position: Position) -> Player {
        Player {
            id,
            name: format!("Player {}", id),
            team: "Testers".to_string(),
            position,
            rank: None,
            projected_points: None,
            actual_points: None,
            added_at: None,
        }
    }

    fn proposal(giving: &[Position], receiving: &[Position]) -> TradeProposal {
        let mut trade = TradeProposal::new(Some(1));
        let mut id = 0;
        for &pos in giving {
            id += 1;
            trade.add(SideKind::Giving, player(id, pos));
        }
        for &pos in receiving {
            id += 1;
            trade.add(SideKind::Receiving, player(id, pos));
        }
        trade
    }

    #[test]
    fn test_qb_for_rb_grades_c() {
        // giving 20, receiving 18: diff -2, percent -10
        let result = TradeEvaluator::default()
            .evaluate(&proposal(&[Position::Qb], &[Position::Rb]))
            .unwrap();

        assert_eq!(result.giving_value, dec!(20));
        assert_eq!(result.receiving_value, dec!(18));
        assert_eq!(result.percent_diff, dec!(-10));
        assert_eq!(result.grade, Grade::C);
    }

    #[test]
    fn test_wr_and_k_for_qb_grades_d() {
        // giving 24, receiving 20: percent -16.67
        let result = TradeEvaluator::default()
            .evaluate(&proposal(&[Position::Wr, Position::K], &[Position::Qb]))
            .unwrap();

        assert_eq!(result.giving_value, dec!(24));
        assert_eq!(result.receiving_value, dec!(20));
        assert!(result.percent_diff < dec!(-16.6) && result.percent_diff > dec!(-16.7));
        assert_eq!(result.grade, Grade::D);
    }

    #[test]
    fn test_te_for_qb_and_def_grades_a_plus() {
        // giving 14, receiving 30: percent ~114.3
        let result = TradeEvaluator::default()
            .evaluate(&proposal(&[Position::Te], &[Position::Qb, Position::Def]))
            .unwrap();

        assert_eq!(result.giving_value, dec!(14));
        assert_eq!(result.receiving_value, dec!(30));
        assert!(result.percent_diff > dec!(114) && result.percent_diff < dec!(115));
        assert_eq!(result.grade, Grade::APlus);
    }

    #[test]
    fn test_even_trade_grades_b() {
        let result = TradeEvaluator::default()
            .evaluate(&proposal(&[Position::Rb], &[Position::Rb]))
            .unwrap();

        assert_eq!(result.percent_diff, Decimal::ZERO);
        assert_eq!(result.grade, Grade::B);
    }

    #[test]
    fn test_empty_giving_is_rejected() {
        let err = TradeEvaluator::default()
            .evaluate(&proposal(&[], &[Position::Qb]))
            .unwrap_err();
        assert_eq!(err, EvaluateError::IncompleteTrade);
    }

    #[test]
    fn test_empty_receiving_is_rejected() {
        let err = TradeEvaluator::default()
            .evaluate(&proposal(&[Position::Qb], &[]))
            .unwrap_err();
        assert_eq!(err, EvaluateError::IncompleteTrade);
    }

    #[test]
    fn test_no_roster_is_rejected() {
        let mut trade = proposal(&[Position::Qb], &[Position::Rb]);
        trade.roster_id = None;
        let err = TradeEvaluator::default().evaluate(&trade).unwrap_err();
        assert_eq!(err, EvaluateError::IncompleteTrade);
        assert_eq!(
            err.to_string(),
            "Please select a roster and add players to both sides of the trade"
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly the boundary values fall into the lower bucket
        assert_eq!(TradeEvaluator::grade_for(dec!(15)), Grade::A);
        assert_eq!(TradeEvaluator::grade_for(dec!(5)), Grade::B);
        assert_eq!(TradeEvaluator::grade_for(dec!(-5)), Grade::C);
        assert_eq!(TradeEvaluator::grade_for(dec!(-15)), Grade::D);
    }

    #[test]
    fn test_thresholds_partition_the_line() {
        assert_eq!(TradeEvaluator::grade_for(dec!(15.0001)), Grade::APlus);
        assert_eq!(TradeEvaluator::grade_for(dec!(100)), Grade::APlus);
        assert_eq!(TradeEvaluator::grade_for(dec!(5.0001)), Grade::A);
        assert_eq!(TradeEvaluator::grade_for(dec!(0)), Grade::B);
        assert_eq!(TradeEvaluator::grade_for(dec!(-4.9999)), Grade::B);
        assert_eq!(TradeEvaluator::grade_for(dec!(-14.9999)), Grade::C);
        assert_eq!(TradeEvaluator::grade_for(dec!(-15.0001)), Grade::D);
        assert_eq!(TradeEvaluator::grade_for(dec!(-100)), Grade::D);
    }

    #[test]
    fn test_value_ignores_name_team_and_id() {
        let evaluator = TradeEvaluator::default();
        let mut a = player(1, Position::Wr);
        a.name = "Somebody".to_string();
        a.team = "Sharks".to_string();
        let mut b = player(999, Position::Wr);
        b.name = "Somebody Else".to_string();
        b.team = "Jets".to_string();

        assert_eq!(evaluator.side_value(&[a]), evaluator.side_value(&[b]));
    }

    #[test]
    fn test_unknown_position_uses_fallback_in_totals() {
        let result = TradeEvaluator::default()
            .evaluate(&proposal(&[Position::Unknown], &[Position::Def]))
            .unwrap();

        // fallback 10 vs DEF 10: even trade
        assert_eq!(result.percent_diff, Decimal::ZERO);
        assert_eq!(result.grade, Grade::B);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let evaluator = TradeEvaluator::default();
        let trade = proposal(
            &[Position::Qb, Position::Te],
            &[Position::Rb, Position::Wr, Position::K],
        );

        let first = evaluator.evaluate(&trade).unwrap();
        let second = evaluator.evaluate(&trade).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_evaluation_does_not_mutate_proposal() {
        let evaluator = TradeEvaluator::default();
        let trade = proposal(&[Position::Qb], &[Position::Rb]);
        let before: Vec<i64> = trade.giving.players().iter().map(|p| p.id).collect();

        let _ = evaluator.evaluate(&trade).unwrap();

        let after: Vec<i64> = trade.giving.players().iter().map(|p| p.id).collect();
        assert_eq!(before, after);
    }
}

//! Cell strategies and the pairwise Prisoner's Dilemma payoff.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Behavioral type of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Cooperate,
    Defect,
}

impl Strategy {
    /// Parse the single-character form used in field files
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Strategy::Cooperate),
            'D' => Some(Strategy::Defect),
            _ => None,
        }
    }

    /// Single-character form (`C` or `D`)
    pub fn as_char(self) -> char {
        match self {
            Strategy::Cooperate => 'C',
            Strategy::Defect => 'D',
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Reward a defector earns against a cooperator (`b`).
///
/// Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Payoff(f64);

impl Payoff {
    pub fn new(b: f64) -> Result<Self, PayoffError> {
        if b.is_finite() && b > 0.0 {
            Ok(Self(b))
        } else {
            Err(PayoffError::NotPositive(b))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Reward earned by `me` when playing one round against `them`
    #[inline]
    pub fn game_between(self, me: Strategy, them: Strategy) -> f64 {
        match (me, them) {
            (Strategy::Cooperate, Strategy::Cooperate) => 1.0,
            (Strategy::Cooperate, Strategy::Defect) => 0.0,
            (Strategy::Defect, Strategy::Cooperate) => self.0,
            (Strategy::Defect, Strategy::Defect) => 0.0,
        }
    }
}

impl FromStr for Payoff {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b: f64 = s
            .trim()
            .parse()
            .map_err(|_| PayoffError::NotANumber(s.to_string()))?;
        Self::new(b)
    }
}

impl fmt::Display for Payoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected payoff parameter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayoffError {
    #[error("bad b parameter: {0:?} is not a number")]
    NotANumber(String),

    #[error("bad b parameter: {0} must be a finite value greater than 0")]
    NotPositive(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_matrix() {
        let b = Payoff::new(1.8).unwrap();
        assert_eq!(b.game_between(Strategy::Cooperate, Strategy::Cooperate), 1.0);
        assert_eq!(b.game_between(Strategy::Cooperate, Strategy::Defect), 0.0);
        assert_eq!(b.game_between(Strategy::Defect, Strategy::Cooperate), 1.8);
        assert_eq!(b.game_between(Strategy::Defect, Strategy::Defect), 0.0);
    }

    #[test]
    fn test_payoff_rejects_non_positive() {
        assert_eq!(Payoff::new(0.0), Err(PayoffError::NotPositive(0.0)));
        assert!(Payoff::new(-1.5).is_err());
        assert!(Payoff::new(f64::NAN).is_err());
        assert!(Payoff::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_payoff_from_str() {
        assert_eq!("1.65".parse::<Payoff>().unwrap().value(), 1.65);
        assert_eq!("3".parse::<Payoff>().unwrap().value(), 3.0);
        assert!(matches!("abc".parse::<Payoff>(), Err(PayoffError::NotANumber(_))));
        assert!(matches!("-2".parse::<Payoff>(), Err(PayoffError::NotPositive(_))));
    }

    #[test]
    fn test_strategy_chars() {
        assert_eq!(Strategy::from_char('C'), Some(Strategy::Cooperate));
        assert_eq!(Strategy::from_char('D'), Some(Strategy::Defect));
        assert_eq!(Strategy::from_char('X'), None);
        assert_eq!(Strategy::from_char('c'), None);
        assert_eq!(Strategy::Defect.to_string(), "D");
    }
}

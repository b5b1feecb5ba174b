use crate::core::Amount;

/// Tunables for the [`Validator`](super::Validator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// How far a pot amount may drift from the sum of its wins plus rake.
    pub pot_epsilon: Amount,
    /// Require a `showdown` round in addition to `preflop`.
    pub require_showdown: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            pot_epsilon: Amount::from_cents(1),
            require_showdown: false,
        }
    }
}

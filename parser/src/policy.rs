//! Pass-through decisions.
//!
//! The scanner consults the policy for two kinds of token only: the literal
//! `--` and positional candidates. Nothing else reaches it, and it is never
//! consulted while a terminated run is being collected.

use argscan_core::PassThrough;

/// What the scanner does with a token the policy was consulted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// Append the token to leftover and keep scanning.
    Keep,
    /// Drop the token; every later token is leftover.
    PassAfter,
    /// The token and every later token are leftover.
    PassFrom,
}

/// Strategy fixed at parser construction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PolicyEngine {
    policy: PassThrough,
}

impl PolicyEngine {
    pub(crate) fn new(policy: PassThrough) -> Self {
        Self { policy }
    }

    pub(crate) fn policy(&self) -> PassThrough {
        self.policy
    }

    pub(crate) fn on_double_dash(&self) -> Verdict {
        match self.policy {
            PassThrough::PassDoubleDash => Verdict::PassAfter,
            PassThrough::Default | PassThrough::PassAfterNonOption => Verdict::Keep,
        }
    }

    pub(crate) fn on_positional(&self) -> Verdict {
        match self.policy {
            PassThrough::PassAfterNonOption => Verdict::PassFrom,
            PassThrough::Default | PassThrough::PassDoubleDash => Verdict::Keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_everything() {
        let engine = PolicyEngine::new(PassThrough::Default);
        assert_eq!(engine.on_double_dash(), Verdict::Keep);
        assert_eq!(engine.on_positional(), Verdict::Keep);
    }

    #[test]
    fn test_pass_double_dash_only_reacts_to_separator() {
        let engine = PolicyEngine::new(PassThrough::PassDoubleDash);
        assert_eq!(engine.on_double_dash(), Verdict::PassAfter);
        assert_eq!(engine.on_positional(), Verdict::Keep);
    }

    #[test]
    fn test_pass_after_non_option_only_reacts_to_positionals() {
        let engine = PolicyEngine::new(PassThrough::PassAfterNonOption);
        assert_eq!(engine.on_double_dash(), Verdict::Keep);
        assert_eq!(engine.on_positional(), Verdict::PassFrom);
    }
}

//! Terminated-run collection.
//!
//! An option declared with a terminator literal swallows the tokens that
//! follow it verbatim, with no option interpretation, until a token exactly
//! equal to the literal. The literal is consumed and left out of the run.

/// Tokens collected for one occurrence of a terminated option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected {
    /// Raw tokens between the option and its terminator.
    pub tokens: Vec<String>,
    /// Index of the first token after the terminator.
    pub next: usize,
}

impl Collected {
    /// Joins the run with single spaces, as stored for list options.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }

    /// Unwraps a run that must hold exactly one token.
    ///
    /// # Errors
    ///
    /// Returns the actual token count when it is not one.
    pub fn into_single(self) -> Result<String, usize> {
        let found = self.tokens.len();
        match <[String; 1]>::try_from(self.tokens) {
            Ok([only]) => Ok(only),
            Err(_) => Err(found),
        }
    }
}

/// Collects raw tokens from `start` up to the first token equal to
/// `terminator`.
///
/// Returns `None` if input runs out before the terminator is seen.
///
/// # Examples
///
/// ```
/// use argscan_parser::terminator::collect;
///
/// let tokens = ["bin", "-xyz", "--foo=bar", ";", "-v"];
/// let run = collect(&tokens, 0, ";").unwrap();
/// assert_eq!(run.joined(), "bin -xyz --foo=bar");
/// assert_eq!(run.next, 4);
///
/// assert!(collect(&tokens, 4, ";").is_none());
/// ```
pub fn collect<S: AsRef<str>>(tokens: &[S], start: usize, terminator: &str) -> Option<Collected> {
    let rest = tokens.get(start..)?;
    let end = rest.iter().position(|t| t.as_ref() == terminator)?;
    Some(Collected {
        tokens: rest[..end].iter().map(|t| t.as_ref().to_string()).collect(),
        next: start + end + 1,
    })
}

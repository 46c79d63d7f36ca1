//! The token scanner.
//!
//! Walks the token slice once, left to right. Each token is classified as
//! the `--` separator, a long option, a short cluster, or a positional
//! candidate, and handed to the registry, the terminator aggregator or the
//! pass-through policy accordingly. The only lookahead is the single token an
//! option may take as its value.

use argscan_core::{OptionKind, OptionSink, OptionSpec, Registry, coerce};
use tracing::{debug, trace};

use crate::error::{ParseError, ParseFailure, ValueTarget};
use crate::policy::{PolicyEngine, Verdict};
use crate::terminator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Scanning,
    /// Pass-through is permanent; tokens are copied to leftover unread.
    Passing,
}

/// Per-call scan state. Never outlives one parse.
#[derive(Debug)]
struct ParseState {
    cursor: usize,
    mode: Mode,
    leftover: Vec<String>,
    seen: Vec<bool>,
}

pub(crate) struct Scanner<'a, K: OptionSink + ?Sized> {
    registry: &'a Registry,
    policy: PolicyEngine,
    sink: &'a mut K,
    tokens: &'a [&'a str],
    state: ParseState,
}

impl<'a, K: OptionSink + ?Sized> Scanner<'a, K> {
    pub(crate) fn new(
        registry: &'a Registry,
        policy: PolicyEngine,
        sink: &'a mut K,
        tokens: &'a [&'a str],
    ) -> Self {
        Self {
            registry,
            policy,
            sink,
            tokens,
            state: ParseState {
                cursor: 0,
                mode: Mode::Scanning,
                leftover: Vec::new(),
                seen: vec![false; registry.options().len()],
            },
        }
    }

    /// Scans every token and returns the leftover sequence.
    pub(crate) fn run(mut self) -> Result<Vec<String>, ParseFailure> {
        match self.scan() {
            Ok(()) => Ok(self.state.leftover),
            Err(error) => {
                debug!(%error, position = ?error.position(), "Scan failed");
                Err(ParseFailure::new(error, self.state.leftover))
            }
        }
    }

    fn scan(&mut self) -> Result<(), ParseError> {
        while let Some(&token) = self.tokens.get(self.state.cursor) {
            let position = self.state.cursor;
            self.state.cursor += 1;

            if self.state.mode == Mode::Passing {
                self.state.leftover.push(token.to_string());
                continue;
            }

            if token == "--" {
                let verdict = self.policy.on_double_dash();
                self.apply(verdict, token, position);
            } else if let Some(body) = token.strip_prefix("--") {
                self.long_option(body, position)?;
            } else if token.len() > 1 && token.starts_with('-') {
                self.short_cluster(&token[1..], position)?;
            } else {
                let verdict = self.policy.on_positional();
                self.apply(verdict, token, position);
            }
        }

        for spec in self.registry.required_options() {
            if !self.state.seen[spec.id] {
                return Err(ParseError::MissingRequiredOption {
                    option: spec.display.clone(),
                });
            }
        }

        Ok(())
    }

    fn apply(&mut self, verdict: Verdict, token: &str, position: usize) {
        match verdict {
            Verdict::Keep => self.state.leftover.push(token.to_string()),
            Verdict::PassAfter => self.start_passing(position),
            Verdict::PassFrom => {
                self.state.leftover.push(token.to_string());
                self.start_passing(position);
            }
        }
    }

    fn start_passing(&mut self, position: usize) {
        debug!(
            position,
            policy = self.policy.policy().as_str(),
            "Pass-through engaged"
        );
        self.state.mode = Mode::Passing;
    }

    fn long_option(&mut self, body: &str, position: usize) -> Result<(), ParseError> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let registry = self.registry;
        let spec = registry
            .lookup_long(name)
            .ok_or_else(|| ParseError::UnknownOption {
                token: format!("--{name}"),
                position,
            })?;

        self.dispatch(spec, inline, position)
    }

    /// Bool shorts stack; the first value-taking short ends the cluster and
    /// takes the rest of the token, if any, as its value.
    fn short_cluster(&mut self, body: &str, position: usize) -> Result<(), ParseError> {
        let registry = self.registry;
        for (offset, c) in body.char_indices() {
            let spec = registry
                .lookup_short(c)
                .ok_or_else(|| ParseError::UnknownOption {
                    token: format!("-{c}"),
                    position,
                })?;

            if !spec.takes_value() {
                self.dispatch(spec, None, position)?;
                continue;
            }

            let rest = &body[offset + c.len_utf8()..];
            let inline = (!rest.is_empty()).then_some(rest);
            return self.dispatch(spec, inline, position);
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        spec: &OptionSpec,
        inline: Option<&str>,
        position: usize,
    ) -> Result<(), ParseError> {
        trace!(option = %spec.display, position, inline = ?inline, "Matched option");
        self.state.seen[spec.id] = true;

        if spec.kind == OptionKind::Bool {
            if let Some(value) = inline {
                return Err(unexpected_value(spec, value, position));
            }
            self.sink.set_bool(&spec.name, true);
            return Ok(());
        }

        if let Some(terminator) = &spec.terminator {
            // `--opt=` opens the run like `--opt`; any real inline value is refused.
            if let Some(value) = inline.filter(|v| !v.is_empty()) {
                return Err(unexpected_value(spec, value, position));
            }
            return self.collect_run(spec, terminator, position);
        }

        let (raw, value_position) = match inline {
            Some(value) => (value, position),
            None => self.next_value(spec, position)?,
        };
        self.store(spec, raw, value_position)
    }

    fn next_value(
        &mut self,
        spec: &OptionSpec,
        position: usize,
    ) -> Result<(&'a str, usize), ParseError> {
        let Some(&value) = self.tokens.get(self.state.cursor) else {
            return Err(ParseError::MissingValue {
                option: spec.display.clone(),
                position,
            });
        };
        let value_position = self.state.cursor;
        self.state.cursor += 1;
        Ok((value, value_position))
    }

    fn collect_run(
        &mut self,
        spec: &OptionSpec,
        terminator: &str,
        position: usize,
    ) -> Result<(), ParseError> {
        let run = terminator::collect(self.tokens, self.state.cursor, terminator).ok_or_else(|| {
            ParseError::TerminatorNotFound {
                option: spec.display.clone(),
                terminator: terminator.to_string(),
                position,
            }
        })?;
        debug!(
            option = %spec.display,
            position,
            collected = run.tokens.len(),
            next = run.next,
            "Collected terminated run"
        );
        self.state.cursor = run.next;

        let raw = match spec.kind {
            OptionKind::Scalar => run
                .into_single()
                .map_err(|found| ParseError::ArityMismatch {
                    option: spec.display.clone(),
                    terminator: terminator.to_string(),
                    expected: 1,
                    found,
                    position,
                })?,
            _ => run.joined(),
        };
        self.store(spec, &raw, position)
    }

    fn store(&mut self, spec: &OptionSpec, raw: &str, position: usize) -> Result<(), ParseError> {
        let value = coerce(spec.value_type, raw).map_err(|source| ParseError::CoercionFailure {
            target: ValueTarget::Option {
                name: spec.display.clone(),
                position,
            },
            source,
        })?;

        match spec.kind {
            OptionKind::List => self.sink.append_list_element(&spec.name, value),
            _ => self.sink.set_scalar(&spec.name, value),
        }
        Ok(())
    }
}

fn unexpected_value(spec: &OptionSpec, value: &str, position: usize) -> ParseError {
    ParseError::UnexpectedValue {
        option: spec.display.clone(),
        value: value.to_string(),
        position,
    }
}

#[cfg(test)]
mod tests {
    use argscan_core::{OptionSchema, ParserSchema, PassThrough, Value, ValueStore, ValueType};

    use super::*;

    fn registry() -> Registry {
        let schema = ParserSchema::new("tool")
            .with_option(OptionSchema::boolean("verbose", Some('v'), Some("verbose")))
            .with_option(OptionSchema::boolean("all", Some('x'), None))
            .with_option(OptionSchema::scalar("mode", Some('m'), Some("mode"), ValueType::Integer))
            .with_option(OptionSchema::list("name", Some('n'), Some("name"), ValueType::String));
        Registry::build(&schema).unwrap()
    }

    fn scan(tokens: &[&str], store: &mut ValueStore) -> Result<Vec<String>, ParseFailure> {
        let registry = registry();
        Scanner::new(
            &registry,
            PolicyEngine::new(PassThrough::Default),
            store,
            tokens,
        )
        .run()
    }

    #[test]
    fn test_stacked_bools_then_inline_value() {
        let mut store = ValueStore::new();
        let leftover = scan(&["-vxm5"], &mut store).unwrap();

        assert!(leftover.is_empty());
        assert_eq!(store.get_bool("verbose"), Some(true));
        assert_eq!(store.get_bool("all"), Some(true));
        assert_eq!(store.get_scalar("mode"), Some(&Value::Integer(5)));
    }

    #[test]
    fn test_value_from_next_token_is_taken_verbatim() {
        let mut store = ValueStore::new();
        scan(&["-n", "-v", "--name", "--x"], &mut store).unwrap();

        assert_eq!(store.get_bool("verbose"), None);
        assert_eq!(
            store.get_list("name"),
            Some(&[Value::String("-v".into()), Value::String("--x".into())][..])
        );
    }

    #[test]
    fn test_long_inline_value_splits_on_first_equals() {
        let mut store = ValueStore::new();
        scan(&["--name=a=b", "--name="], &mut store).unwrap();

        assert_eq!(
            store.get_list("name"),
            Some(&[Value::String("a=b".into()), Value::String(String::new())][..])
        );
    }

    #[test]
    fn test_unknown_short_in_cluster_names_character() {
        let mut store = ValueStore::new();
        let failure = scan(&["a", "-vg"], &mut store).unwrap_err();

        assert_eq!(
            failure.error,
            ParseError::UnknownOption {
                token: "-g".into(),
                position: 1
            }
        );
        assert_eq!(failure.leftover, vec!["a"]);
        // Shorts before the bad one were already applied.
        assert_eq!(store.get_bool("verbose"), Some(true));
    }

    #[test]
    fn test_unknown_long_strips_inline_value() {
        let mut store = ValueStore::new();
        let failure = scan(&["--nope=1"], &mut store).unwrap_err();
        assert_eq!(
            failure.error,
            ParseError::UnknownOption {
                token: "--nope".into(),
                position: 0
            }
        );
    }

    #[test]
    fn test_missing_value_at_end_of_input() {
        let mut store = ValueStore::new();
        let failure = scan(&["-v", "--mode"], &mut store).unwrap_err();
        assert_eq!(
            failure.error,
            ParseError::MissingValue {
                option: "--mode".into(),
                position: 1
            }
        );
    }

    #[test]
    fn test_bool_rejects_inline_value() {
        let mut store = ValueStore::new();
        let failure = scan(&["--verbose=yes"], &mut store).unwrap_err();
        assert_eq!(
            failure.error,
            ParseError::UnexpectedValue {
                option: "--verbose".into(),
                value: "yes".into(),
                position: 0
            }
        );
    }

    #[test]
    fn test_coercion_failure_points_at_value_token() {
        let mut store = ValueStore::new();
        let failure = scan(&["-m", "five"], &mut store).unwrap_err();

        assert_eq!(failure.error.position(), Some(1));
        assert!(failure.error.to_string().contains("five"));
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let mut store = ValueStore::new();
        let leftover = scan(&["-", "-v"], &mut store).unwrap();
        assert_eq!(leftover, vec!["-"]);
        assert_eq!(store.get_bool("verbose"), Some(true));
    }
}

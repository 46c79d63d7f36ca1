//! Positional binding.
//!
//! Runs once after scanning. Leading leftover tokens bind one-to-one to the
//! declared scalar slots; a trailing repeating slot takes whatever is left.
//! All tokens are coerced before anything is written, so a failed bind
//! leaves the sink without positional values.

use argscan_core::{ArgSchema, OptionSink, Value, coerce};
use tracing::debug;

use crate::error::{ParseError, ParseFailure, ValueTarget};

/// Binds `leftover` to `slots` and returns the tokens no slot absorbed.
///
/// On failure the returned [`ParseFailure`] carries the whole of `leftover`.
pub(crate) fn bind<K: OptionSink + ?Sized>(
    slots: &[ArgSchema],
    leftover: Vec<String>,
    sink: &mut K,
) -> Result<Vec<String>, ParseFailure> {
    if slots.is_empty() {
        return Ok(leftover);
    }

    let (bindings, consumed) = match resolve(slots, &leftover) {
        Ok(resolved) => resolved,
        Err(error) => {
            debug!(%error, leftover = leftover.len(), "Positional binding failed");
            return Err(ParseFailure::new(error, leftover));
        }
    };

    for (slot, values) in bindings {
        if slot.multiple {
            for value in values {
                sink.append_list_element(&slot.name, value);
            }
        } else if let Some(value) = values.into_iter().next() {
            sink.set_scalar(&slot.name, value);
        }
    }

    debug!(consumed, remaining = leftover.len() - consumed, "Bound positionals");
    Ok(leftover[consumed..].to_vec())
}

type Resolved<'s> = (Vec<(&'s ArgSchema, Vec<Value>)>, usize);

fn resolve<'s>(slots: &'s [ArgSchema], leftover: &[String]) -> Result<Resolved<'s>, ParseError> {
    let mut bindings = Vec::with_capacity(slots.len());
    let mut cursor = 0;

    for (index, slot) in slots.iter().enumerate() {
        let take = if slot.multiple {
            leftover.len() - cursor
        } else {
            usize::from(cursor < leftover.len())
        };

        if take == 0 {
            if slot.required {
                return Err(ParseError::MissingRequiredArgument {
                    slot: slot.name.clone(),
                    index,
                });
            }
            continue;
        }

        let values = leftover[cursor..cursor + take]
            .iter()
            .map(|token| {
                coerce(slot.value_type, token).map_err(|source| ParseError::CoercionFailure {
                    target: ValueTarget::Slot {
                        name: slot.name.clone(),
                        index,
                    },
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        cursor += take;
        bindings.push((slot, values));
    }

    Ok((bindings, cursor))
}

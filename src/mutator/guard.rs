//! Invariant-guarded mutations

use crate::backend::GraphBackend;
use crate::error::AfgResult;
use crate::query::PatternQuery;

/// Outcome of a guarded mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The change was applied and the invariant holds
    Applied(T),
    /// The invariant failed; the change was undone
    RolledBack(T),
}

impl<T> Guarded<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Guarded::Applied(_))
    }
}

/// Apply a change, check an invariant and compensate if it no longer holds.
///
/// If the check itself fails the change is still undone before the error is
/// returned. A failure in `apply` leaves nothing to undo.
pub fn guarded<S: ?Sized, T>(
    state: &mut S,
    apply: impl FnOnce(&mut S) -> AfgResult<T>,
    holds: impl FnOnce(&S) -> AfgResult<bool>,
    undo: impl FnOnce(&mut S, &T) -> AfgResult<()>,
) -> AfgResult<Guarded<T>> {
    let value = apply(state)?;
    match holds(state) {
        Ok(true) => Ok(Guarded::Applied(value)),
        Ok(false) => {
            undo(state, &value)?;
            Ok(Guarded::RolledBack(value))
        }
        Err(e) => {
            undo(state, &value)?;
            Err(e)
        }
    }
}

/// True iff no node can reach itself
pub fn is_acyclic<B: GraphBackend + ?Sized>(backend: &B) -> AfgResult<bool> {
    let records = backend.run_query(&PatternQuery::CycleExists)?;
    let cyclic = records.iter().filter_map(|r| r.as_cyclic()).any(|c| c);
    Ok(!cyclic)
}

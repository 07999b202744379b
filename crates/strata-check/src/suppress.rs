//! Persisted-suppression resolution.
//!
//! Suppression is recognized only from annotations that survived into the
//! compiled unit, i.e. those on the class, method, or field enclosing the
//! reference. Source-level annotations on blocks or locals inside a method
//! body never reach the unit format, so they can never suppress anything —
//! the granularity is exactly {class, method, field}.

use strata_core::types::{Reference, SuppressionScope};

/// Whether `reference` is covered by a matching suppression in its unit's
/// scope. The enclosing member's annotation is consulted first, then the
/// enclosing class's; scopes union up the chain, so a member annotation
/// naming only unrelated ids never cancels a class-level one. An annotation
/// naming no check ids suppresses all; otherwise it must name `check_id`.
pub fn is_suppressed(scope: &SuppressionScope, reference: &Reference, check_id: &str) -> bool {
    let Some(enclosing) = &reference.enclosing else {
        // UI-document references carry no enclosing declaration.
        return false;
    };
    scope.covers(enclosing, check_id)
}

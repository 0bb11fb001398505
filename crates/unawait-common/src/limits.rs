//! Centralized limits and thresholds for the analyzer.
//!
//! Recursive algorithms over the syntax tree (parsing, binding, point
//! discovery) consult these constants instead of defining their own.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth the parser accepts for statements and expressions.
///
/// Left-deep chains count too: every binary operator and every member
/// access or call link adds one level. Deeper input reports a "nesting too
/// deep" diagnostic and the excess is left out of the tree, so later phases
/// never recurse past this depth.
///
/// ```csharp
/// var x = ((((((((((((((((((((((((((((1))))))))))))))))))))))))))));
/// var y = 1 + 1 + 1 + /* ... */ 1;
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 256;

/// Maximum number of discard-context wrappers unwrapped from one awaited
/// operation, e.g. `F().ConfigureAwait(false).ConfigureAwait(false)`.
pub const MAX_WRAPPER_UNWRAP_DEPTH: u32 = 64;

/// Maximum depth for generic type argument substitution in the binder.
pub const MAX_TYPE_SUBSTITUTION_DEPTH: u32 = 32;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum pre-allocation for node arenas, to avoid capacity overflow on
/// huge inputs.
pub const MAX_NODE_PREALLOC: usize = 1_000_000;

//! Centralized limits and thresholds for the lowering passes.
//!
//! Well-formed input never comes close to these values. They exist so that a
//! malformed model (a class extending itself through a long chain, an alias
//! pointing back at itself) ends in a diagnostic instead of a stack overflow.

/// Maximum number of alias expansions performed by a single `unalias` call.
///
/// Alias chains are validated for cycles when the model context is built, so
/// reaching this limit means the chain is simply absurdly long.
///
/// ```typescript
/// type A = B;
/// type B = C;
/// type C = number; // A expands twice before reaching a nominal type
/// ```
pub const MAX_ALIAS_CHAIN_DEPTH: u32 = 64;

/// Maximum nesting of heritage references followed by one ancestor walk.
///
/// ```typescript
/// interface A {}
/// interface B extends A {}
/// class C implements B {} // depth 2 from C
/// ```
pub const MAX_HERITAGE_DEPTH: u32 = 100;

/// Maximum depth when resolving a constraint container into a type
/// expression. Call evidence nests containers (`f(g(h(x)))`).
pub const MAX_CONSTRAINT_RESOLUTION_DEPTH: u32 = 50;

/// Maximum nesting of type arguments compared by the override relations.
pub const MAX_TYPE_RELATION_DEPTH: u32 = 50;

/// Default iteration limit for recursion guards.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100_000;

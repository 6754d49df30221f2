//! Constraint-based type inference for untyped function bodies.
//!
//! Each function with a body gets a fresh [`Scope`] and [`ConstraintArena`];
//! its statements deposit evidence into the containers of the bindings they
//! touch, and the containers are resolved back onto the signature afterwards.
//! Nothing is shared between functions, so sources can be processed in any
//! order or in parallel.

pub mod constraint;
pub mod introduce;
pub mod propagate;
pub mod scope;

pub use constraint::{
    Constraint, ConstraintArena, ConstraintContainer, ContainerId, ReturnConstraintContainer,
};
pub use introduce::{
    infer_constructor, infer_function, introduce_types_in_declaration, introduce_types_in_member,
    introduce_types_in_module, introduce_types_in_source, introduce_types_in_source_set,
};
pub use propagate::ConstraintPropagator;
pub use scope::Scope;

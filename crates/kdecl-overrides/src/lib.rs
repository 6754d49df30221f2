//! Cross-hierarchy override resolution.
//!
//! The pass runs in two phases. First every class-like declaration and type
//! alias of the run (standard library first) is registered in a
//! [`ModelContext`]. Once the context is complete and read-only, each
//! class-like's members are compared against the members of its known
//! ancestors and marked with the first ancestor they override.

pub mod context;
pub mod hierarchy;
pub mod relations;
pub mod resolver;

pub use context::{ModelContext, ModelContextBuilder, ResolvedClassLike};
pub use hierarchy::{MethodView, ParentMembers, all_parent_members, known_parents};
pub use relations::{TypeRelations, is_special_case};
pub use resolver::{OverrideResolver, lower_overrides};

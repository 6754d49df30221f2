//! Model Context: the run-scoped registry of class-like declarations and the
//! alias table.
//!
//! Built once with [`ModelContextBuilder`] (standard library first, then the
//! user's sources), validated by [`ModelContextBuilder::finish`], and then only
//! read. The context borrows the registered trees; nothing is copied.

use kdecl_common::limits::MAX_ALIAS_CHAIN_DEPTH;
use kdecl_common::{LoweringError, QualifiedName, RecursionGuard, RecursionProfile};
use kdecl_model::{ClassLikeRef, Declaration, ModuleDecl, SourceSet, TypeAliasDecl, TypeExpr};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// A registered class-like declaration together with its registry key.
#[derive(Clone, Debug)]
pub struct ResolvedClassLike<'a> {
    pub class_like: ClassLikeRef<'a>,
    fq_name: QualifiedName,
}

impl<'a> ResolvedClassLike<'a> {
    pub fn fq_name(&self) -> &QualifiedName {
        &self.fq_name
    }

    /// True when both refer to the same registry entry.
    pub fn is_same(&self, other: &ResolvedClassLike<'_>) -> bool {
        self.fq_name == other.fq_name
    }
}

#[derive(Default)]
pub struct ModelContextBuilder<'a> {
    class_likes: FxHashMap<QualifiedName, ResolvedClassLike<'a>>,
    aliases: FxHashMap<QualifiedName, &'a TypeAliasDecl>,
}

impl<'a> ModelContextBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_source_set(&mut self, sources: &'a SourceSet) -> &mut Self {
        for source in &sources.sources {
            self.register_module(&source.root);
        }
        self
    }

    pub fn register_module(&mut self, module: &'a ModuleDecl) -> &mut Self {
        for declaration in &module.declarations {
            self.register(declaration, &module.name);
        }
        for submodule in &module.submodules {
            self.register_module(submodule);
        }
        self
    }

    /// Records a declaration found in the module named `owner`.
    ///
    /// Class-likes (and their nested class-likes, at any depth) and type
    /// aliases are recorded; other declarations are ignored. A later
    /// registration under an existing name replaces the earlier one.
    pub fn register(&mut self, declaration: &'a Declaration, owner: &QualifiedName) {
        match declaration {
            Declaration::Class(_) | Declaration::Interface(_) => {
                if let Some(class_like) = declaration.as_class_like() {
                    self.register_class_like(class_like, owner);
                }
            }
            Declaration::TypeAlias(alias) => {
                let fq_name = owner.append(&alias.name);
                trace!(%fq_name, "registering alias");
                self.aliases.insert(fq_name, alias);
            }
            Declaration::Module(module) => {
                self.register_module(module);
            }
            _ => {}
        }
    }

    pub fn register_class_like(&mut self, class_like: ClassLikeRef<'a>, owner: &QualifiedName) {
        let fq_name = owner.append(class_like.name());
        for nested in class_like.nested_class_likes() {
            self.register_class_like(nested, &fq_name);
        }
        trace!(%fq_name, "registering class-like");
        let previous = self.class_likes.insert(
            fq_name.clone(),
            ResolvedClassLike {
                class_like,
                fq_name: fq_name.clone(),
            },
        );
        if previous.is_some() {
            debug!(%fq_name, "class-like registered twice, keeping the later one");
        }
    }

    /// Ends the build phase.
    ///
    /// Fails with [`LoweringError::CyclicAlias`] if some alias chain never
    /// reaches a non-alias type.
    pub fn finish(self) -> Result<ModelContext<'a>, LoweringError> {
        let mut names: Vec<&QualifiedName> = self.aliases.keys().collect();
        names.sort();
        for name in names {
            self.check_alias_chain(name)?;
        }
        debug!(
            class_likes = self.class_likes.len(),
            aliases = self.aliases.len(),
            "model context built"
        );
        Ok(ModelContext {
            class_likes: self.class_likes,
            aliases: self.aliases,
        })
    }

    fn check_alias_chain(&self, start: &QualifiedName) -> Result<(), LoweringError> {
        let mut seen: FxHashSet<&QualifiedName> = FxHashSet::default();
        let mut current = start;
        while let Some(alias) = self.aliases.get(current) {
            if !seen.insert(current) || seen.len() > MAX_ALIAS_CHAIN_DEPTH as usize {
                return Err(LoweringError::CyclicAlias {
                    alias: start.clone(),
                });
            }
            match alias.target.as_value() {
                Some(target) => current = &target.name,
                None => break,
            }
        }
        Ok(())
    }
}

/// Read-only view over everything registered for one run.
pub struct ModelContext<'a> {
    class_likes: FxHashMap<QualifiedName, ResolvedClassLike<'a>>,
    aliases: FxHashMap<QualifiedName, &'a TypeAliasDecl>,
}

impl<'a> ModelContext<'a> {
    /// Registers `stdlib` (if any) and then `sources`.
    pub fn build(
        sources: &'a SourceSet,
        stdlib: Option<&'a SourceSet>,
    ) -> Result<Self, LoweringError> {
        let mut builder = ModelContextBuilder::new();
        if let Some(stdlib) = stdlib {
            builder.register_source_set(stdlib);
        }
        builder.register_source_set(sources);
        builder.finish()
    }

    /// `None` for names outside this run (foreign or external types).
    pub fn resolve(&self, fq_name: &QualifiedName) -> Option<&ResolvedClassLike<'a>> {
        self.class_likes.get(fq_name)
    }

    /// Resolves a nominal type, after unaliasing, to its class-like.
    pub fn resolve_type(&self, ty: &TypeExpr) -> Option<&ResolvedClassLike<'a>> {
        match self.unalias(ty) {
            TypeExpr::Value(value) => self.resolve(&value.name),
            _ => None,
        }
    }

    /// Expands aliases until the head of `ty` is not an alias.
    ///
    /// Generic aliases have their parameters replaced by the reference's type
    /// arguments; a nullable reference yields a nullable expansion.
    pub fn unalias(&self, ty: &TypeExpr) -> TypeExpr {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::AliasExpansion);
        let expanded = self.unalias_guarded(ty.clone(), &mut guard);
        if guard.is_exceeded() {
            debug!(?ty, "alias expansion stopped at the depth limit");
        }
        expanded
    }

    fn unalias_guarded<'n>(
        &'n self,
        ty: TypeExpr,
        guard: &mut RecursionGuard<&'n QualifiedName>,
    ) -> TypeExpr {
        let Some((alias, expanded)) = self.expand_alias(&ty) else {
            return ty;
        };
        match guard.scope(alias, |guard| self.unalias_guarded(expanded, guard)) {
            Ok(resolved) => resolved,
            Err(refused) => {
                trace!(%alias, ?refused, "alias expansion cut");
                ty
            }
        }
    }

    fn expand_alias(&self, ty: &TypeExpr) -> Option<(&QualifiedName, TypeExpr)> {
        let value = ty.as_value()?;
        let (alias_name, alias) = self.aliases.get_key_value(&value.name)?;
        let mapping: FxHashMap<&str, &TypeExpr> = alias
            .type_parameters
            .iter()
            .map(|parameter| parameter.name.as_str())
            .zip(value.params.iter())
            .collect();
        let expanded = alias.target.substitute(&mapping);
        let nullable = value.nullable || expanded.is_nullable();
        Some((alias_name, expanded.with_nullable(nullable)))
    }

    pub fn is_alias(&self, fq_name: &QualifiedName) -> bool {
        self.aliases.contains_key(fq_name)
    }

    pub fn class_like_count(&self) -> usize {
        self.class_likes.len()
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;

//! Expression evaluation: turns expressions into constraint evidence.
//!
//! Evaluating an expression yields the container holding the evidence for its
//! value, and deposits evidence into the containers of the bindings it uses
//! (`x * 2` tells us `x` is a number).

use crate::constraint::{Constraint, ConstraintArena, ContainerId};
use crate::scope::Scope;
use kdecl_common::LoweringError;
use kdecl_model::{
    BinaryOperator, Expression, Literal, OperatorClass, TypeExpr, UnaryOperator, VariableDecl,
};
use smallvec::SmallVec;
use tracing::trace;

pub struct ConstraintPropagator<'a> {
    function: &'a str,
    arena: &'a mut ConstraintArena,
    scope: &'a mut Scope,
}

impl<'a> ConstraintPropagator<'a> {
    /// `function` names the function being analyzed, for diagnostics.
    pub fn new(function: &'a str, arena: &'a mut ConstraintArena, scope: &'a mut Scope) -> Self {
        Self {
            function,
            arena,
            scope,
        }
    }

    pub fn evaluate(&mut self, expression: &Expression) -> Result<ContainerId, LoweringError> {
        match expression {
            Expression::Identifier { name } => Ok(self.evaluate_identifier(name)),
            Expression::Literal { value } => Ok(self.evaluate_literal(value)),
            Expression::Binary {
                operator,
                left,
                right,
            } => self.evaluate_binary(*operator, left, right),
            Expression::Unary { operator, operand } => self.evaluate_unary(*operator, operand),
            Expression::Call { callee, arguments } => {
                let callee = self.evaluate(callee)?;
                let arguments = self.evaluate_all(arguments)?;
                let result = self.arena.alloc();
                self.arena
                    .add(callee, Constraint::Call { arguments, result });
                Ok(result)
            }
            Expression::New { callee, arguments } => {
                self.evaluate_all(arguments)?;
                match callee.as_ref() {
                    Expression::Identifier { name } if !self.scope.contains(name) => Ok(self
                        .arena
                        .alloc_with(Constraint::Known(TypeExpr::named(name.as_str())))),
                    other => {
                        self.evaluate(other)?;
                        Ok(self.arena.alloc())
                    }
                }
            }
            Expression::PropertyAccess { object, .. } => {
                let object = self.evaluate(object)?;
                self.arena.add(object, Constraint::PropertyOwner);
                Ok(self.arena.alloc())
            }
            Expression::ElementAccess { object, index } => {
                let object = self.evaluate(object)?;
                self.arena.add(object, Constraint::PropertyOwner);
                self.evaluate(index)?;
                Ok(self.arena.alloc())
            }
            Expression::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.evaluate(condition)?;
                let when_true = self.evaluate(when_true)?;
                let when_false = self.evaluate(when_false)?;
                Ok(self.union_of(when_true, when_false))
            }
            Expression::FunctionExpression { parameters, .. } => Ok(self.arena.alloc_with(
                Constraint::Callable {
                    arity: parameters.len(),
                },
            )),
            Expression::ArrayLiteral { elements } => {
                let element = self.arena.alloc();
                for item in elements {
                    let item = self.evaluate(item)?;
                    self.arena.merge(element, item);
                }
                Ok(self.arena.alloc_with(Constraint::ArrayOf { element }))
            }
            Expression::ObjectLiteral { properties } => {
                for property in properties {
                    self.evaluate(&property.value)?;
                }
                Ok(self.arena.alloc_with(Constraint::PropertyOwner))
            }
            Expression::DefinedExternally => Ok(self.arena.alloc()),
            Expression::Unknown { kind } => Err(LoweringError::UnsupportedExpression {
                function: self.function.to_string(),
                kind: kind.clone(),
            }),
        }
    }

    /// Binds a variable statement's name to its initializer's evidence.
    ///
    /// Without an initializer the binding starts from the declared type,
    /// or unconstrained when that type is dynamic.
    pub fn bind_variable(&mut self, variable: &VariableDecl) -> Result<ContainerId, LoweringError> {
        let container = match &variable.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None if variable.ty.is_dynamic() => self.arena.alloc(),
            None => self
                .arena
                .alloc_with(Constraint::Known(variable.ty.clone())),
        };
        self.scope.set(variable.name.as_str(), container);
        Ok(container)
    }

    /// Evidence of a bare `return;`.
    pub fn unit(&mut self) -> ContainerId {
        self.arena.alloc_with(Constraint::Unit)
    }

    fn evaluate_all(
        &mut self,
        expressions: &[Expression],
    ) -> Result<SmallVec<[ContainerId; 4]>, LoweringError> {
        expressions.iter().map(|e| self.evaluate(e)).collect()
    }

    fn evaluate_identifier(&mut self, name: &str) -> ContainerId {
        if let Some(bound) = self.scope.get(name) {
            return bound;
        }
        match name {
            "undefined" => self.arena.alloc_with(Constraint::Nullable),
            "NaN" | "Infinity" => self.arena.alloc_with(Constraint::Number),
            _ => {
                trace!(name, "free variable is unconstrained");
                self.arena.alloc()
            }
        }
    }

    fn evaluate_literal(&mut self, literal: &Literal) -> ContainerId {
        let constraint = match literal {
            Literal::Number(_) => Constraint::Number,
            Literal::String(_) => Constraint::String,
            Literal::Boolean(_) => Constraint::Boolean,
            Literal::Null | Literal::Undefined => Constraint::Nullable,
        };
        self.arena.alloc_with(constraint)
    }

    fn evaluate_binary(
        &mut self,
        operator: BinaryOperator,
        left: &Expression,
        right: &Expression,
    ) -> Result<ContainerId, LoweringError> {
        match operator.class() {
            OperatorClass::Assignment => {
                let value = self.evaluate(right)?;
                self.assign(left, value)?;
                Ok(value)
            }
            OperatorClass::CompoundAssignment => {
                let value = match operator.compound_base() {
                    Some(base) => self.evaluate_binary(base, left, right)?,
                    None => self.evaluate(right)?,
                };
                self.assign(left, value)?;
                Ok(value)
            }
            class => {
                let lhs = self.evaluate(left)?;
                let rhs = self.evaluate(right)?;
                Ok(match class {
                    OperatorClass::Numeric => {
                        self.arena.add(lhs, Constraint::Number);
                        self.arena.add(rhs, Constraint::Number);
                        self.arena.alloc_with(Constraint::Number)
                    }
                    OperatorClass::Relational => self.arena.alloc_with(Constraint::Boolean),
                    OperatorClass::Logical => self.union_of(lhs, rhs),
                    OperatorClass::Plus => self.evaluate_plus(lhs, rhs),
                    _ => rhs,
                })
            }
        }
    }

    /// `+` concatenates as soon as one side is a string.
    fn evaluate_plus(&mut self, lhs: ContainerId, rhs: ContainerId) -> ContainerId {
        let (left, right) = (self.arena.get(lhs), self.arena.get(rhs));
        let string = left.has(&Constraint::String) || right.has(&Constraint::String);
        let number = left.has(&Constraint::Number) && right.has(&Constraint::Number);

        if string {
            self.arena.alloc_with(Constraint::String)
        } else if number {
            self.arena.alloc_with(Constraint::Number)
        } else {
            let result = self.arena.alloc_with(Constraint::Number);
            self.arena.add(result, Constraint::String);
            result
        }
    }

    fn evaluate_unary(
        &mut self,
        operator: UnaryOperator,
        operand: &Expression,
    ) -> Result<ContainerId, LoweringError> {
        let operand = self.evaluate(operand)?;
        let result = match operator {
            UnaryOperator::Minus
            | UnaryOperator::BitNot
            | UnaryOperator::Increment
            | UnaryOperator::Decrement => {
                self.arena.add(operand, Constraint::Number);
                Constraint::Number
            }
            UnaryOperator::Plus => Constraint::Number,
            UnaryOperator::Not | UnaryOperator::Delete => Constraint::Boolean,
            UnaryOperator::TypeOf => Constraint::String,
            UnaryOperator::Void => Constraint::Unit,
        };
        Ok(self.arena.alloc_with(result))
    }

    /// Deposits `value`'s evidence into the assignment target.
    fn assign(&mut self, target: &Expression, value: ContainerId) -> Result<(), LoweringError> {
        match target {
            Expression::Identifier { name } => {
                // Assignments to names outside this function leave no trace.
                if let Some(bound) = self.scope.get(name) {
                    self.arena.merge(bound, value);
                }
                Ok(())
            }
            other => self.evaluate(other).map(|_| ()),
        }
    }

    fn union_of(&mut self, first: ContainerId, second: ContainerId) -> ContainerId {
        let result = self.arena.alloc();
        self.arena.merge(result, first);
        self.arena.merge(result, second);
        result
    }
}

#[cfg(test)]
#[path = "tests/propagate_tests.rs"]
mod tests;

//! Expressions found inside function bodies and initializers.

use crate::decl::{BlockDecl, ParameterDecl};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reflection", rename_all_fields = "camelCase")]
pub enum Expression {
    Identifier {
        name: String,
    },
    Literal {
        value: Literal,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    New {
        callee: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    PropertyAccess {
        object: Box<Expression>,
        name: String,
    },
    ElementAccess {
        object: Box<Expression>,
        index: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        when_true: Box<Expression>,
        when_false: Box<Expression>,
    },
    FunctionExpression {
        #[serde(default)]
        parameters: Vec<ParameterDecl>,
        #[serde(default)]
        body: Option<BlockDecl>,
    },
    ArrayLiteral {
        #[serde(default)]
        elements: Vec<Expression>,
    },
    ObjectLiteral {
        #[serde(default)]
        properties: Vec<ObjectProperty>,
    },
    /// `definedExternally`: the only initializer a declaration may carry.
    DefinedExternally,
    /// A node kind the upstream deserializer could not map onto this model.
    Unknown {
        kind: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectProperty {
    pub name: String,
    pub value: Expression,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Literal {
    Number(String),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "**")]
    Exponent,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Remainder,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
    #[serde(rename = ">>>")]
    UnsignedShiftRight,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEq,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEq,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNotEq,
    #[serde(rename = "instanceof")]
    InstanceOf,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "&&")]
    LogicalAnd,
    #[serde(rename = "||")]
    LogicalOr,
    #[serde(rename = "??")]
    Coalesce,
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubtractAssign,
    #[serde(rename = "*=")]
    MultiplyAssign,
    #[serde(rename = "**=")]
    ExponentAssign,
    #[serde(rename = "/=")]
    DivideAssign,
    #[serde(rename = "%=")]
    RemainderAssign,
    #[serde(rename = "<<=")]
    ShiftLeftAssign,
    #[serde(rename = ">>=")]
    ShiftRightAssign,
    #[serde(rename = ">>>=")]
    UnsignedShiftRightAssign,
    #[serde(rename = "&=")]
    BitAndAssign,
    #[serde(rename = "|=")]
    BitOrAssign,
    #[serde(rename = "^=")]
    BitXorAssign,
    #[serde(rename = "&&=")]
    LogicalAndAssign,
    #[serde(rename = "||=")]
    LogicalOrAssign,
    #[serde(rename = "??=")]
    CoalesceAssign,
}

impl BinaryOperator {
    /// Maps `x op= y` onto the `op` it applies.
    pub const fn compound_base(self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        match self {
            AddAssign => Some(Add),
            SubtractAssign => Some(Subtract),
            MultiplyAssign => Some(Multiply),
            ExponentAssign => Some(Exponent),
            DivideAssign => Some(Divide),
            RemainderAssign => Some(Remainder),
            ShiftLeftAssign => Some(ShiftLeft),
            ShiftRightAssign => Some(ShiftRight),
            UnsignedShiftRightAssign => Some(UnsignedShiftRight),
            BitAndAssign => Some(BitAnd),
            BitOrAssign => Some(BitOr),
            BitXorAssign => Some(BitXor),
            LogicalAndAssign => Some(LogicalAnd),
            LogicalOrAssign => Some(LogicalOr),
            CoalesceAssign => Some(Coalesce),
            _ => None,
        }
    }

    pub const fn class(self) -> OperatorClass {
        use BinaryOperator::*;
        match self {
            Subtract | Multiply | Exponent | Divide | Remainder | ShiftLeft | ShiftRight
            | UnsignedShiftRight | BitAnd | BitOr | BitXor => OperatorClass::Numeric,
            Less | LessEq | Greater | GreaterEq | Eq | NotEq | StrictEq | StrictNotEq
            | InstanceOf | In => OperatorClass::Relational,
            LogicalAnd | LogicalOr | Coalesce => OperatorClass::Logical,
            Add => OperatorClass::Plus,
            Comma => OperatorClass::Sequence,
            Assign => OperatorClass::Assignment,
            AddAssign | SubtractAssign | MultiplyAssign | ExponentAssign | DivideAssign
            | RemainderAssign | ShiftLeftAssign | ShiftRightAssign | UnsignedShiftRightAssign
            | BitAndAssign | BitOrAssign | BitXorAssign | LogicalAndAssign | LogicalOrAssign
            | CoalesceAssign => OperatorClass::CompoundAssignment,
        }
    }
}

/// How a binary operator relates its operands to its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorClass {
    /// Coerces both operands to numbers.
    Numeric,
    /// Always produces a boolean.
    Relational,
    /// Produces one of its operands.
    Logical,
    /// `+`: numeric addition or string concatenation.
    Plus,
    /// `,`: produces the right operand.
    Sequence,
    Assignment,
    CompoundAssignment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "typeof")]
    TypeOf,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier { name: name.into() }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Expression::Literal {
            value: Literal::Number(text.into()),
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expression::Literal {
            value: Literal::String(text.into()),
        }
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    pub fn property(object: Expression, name: impl Into<String>) -> Self {
        Expression::PropertyAccess {
            object: Box::new(object),
            name: name.into(),
        }
    }

    pub fn kind_name(&self) -> &str {
        match self {
            Expression::Identifier { .. } => "Identifier",
            Expression::Literal { .. } => "Literal",
            Expression::Binary { .. } => "BinaryExpression",
            Expression::Unary { .. } => "UnaryExpression",
            Expression::Call { .. } => "CallExpression",
            Expression::New { .. } => "NewExpression",
            Expression::PropertyAccess { .. } => "PropertyAccessExpression",
            Expression::ElementAccess { .. } => "ElementAccessExpression",
            Expression::Conditional { .. } => "ConditionalExpression",
            Expression::FunctionExpression { .. } => "FunctionExpression",
            Expression::ArrayLiteral { .. } => "ArrayLiteralExpression",
            Expression::ObjectLiteral { .. } => "ObjectLiteralExpression",
            Expression::DefinedExternally => "DefinedExternally",
            Expression::Unknown { kind } => kind,
        }
    }
}

// AST (Abstract Syntax Tree) definitions for the expression interpreter

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Shift
    Shl,
    Shr,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    // Logical (short-circuiting)
    And,
    Or,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Sequencing
    Comma,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Comma => ",",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
    ModAssign, // %=
    ShlAssign, // <<=
    ShrAssign, // >>=
    AndAssign, // &=
    XorAssign, // ^=
    OrAssign,  // |=
}

impl AssignOp {
    /// The binary operator a compound assignment applies against the current
    /// binding, or `None` for plain `=`.
    pub fn binary_op(&self) -> Option<BinOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::AddAssign => Some(BinOp::Add),
            AssignOp::SubAssign => Some(BinOp::Sub),
            AssignOp::MulAssign => Some(BinOp::Mul),
            AssignOp::DivAssign => Some(BinOp::Div),
            AssignOp::ModAssign => Some(BinOp::Mod),
            AssignOp::ShlAssign => Some(BinOp::Shl),
            AssignOp::ShrAssign => Some(BinOp::Shr),
            AssignOp::AndAssign => Some(BinOp::BitAnd),
            AssignOp::XorAssign => Some(BinOp::BitXor),
            AssignOp::OrAssign => Some(BinOp::BitOr),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::ShlAssign => "<<=",
            AssignOp::ShrAssign => ">>=",
            AssignOp::AndAssign => "&=",
            AssignOp::XorAssign => "^=",
            AssignOp::OrAssign => "|=",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
///
/// Prefix and postfix increment/decrement are distinct tags because they
/// return different values (new vs. old).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,     // !x
    BitNot,  // ~x
    Plus,    // +x
    Neg,     // -x
    PreInc,  // ++x
    PreDec,  // --x
    PostInc, // x++
    PostDec, // x--
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Not => "!",
            UnOp::BitNot => "~",
            UnOp::Plus => "+",
            UnOp::Neg => "-",
            UnOp::PreInc => "++",
            UnOp::PreDec => "--",
            UnOp::PostInc => "post++",
            UnOp::PostDec => "post--",
        }
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single declarator in a declaration statement: a name with an optional
/// initializer expression (`int a` vs. `int a = 10`).
#[derive(Debug, Clone)]
pub struct Declarator {
    pub name: String,
    pub init: Option<AstNode>,
    pub location: SourceLocation,
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone)]
pub enum AstNode {
    // Expressions
    Identifier(String, SourceLocation),
    /// Numeric literal as raw source text; resolved to an integer or float
    /// value at evaluation time (hex/binary/octal/decimal/float rules).
    NumberLiteral(String, SourceLocation),
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    Assignment {
        op: AssignOp,
        target: Box<AstNode>,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    Conditional {
        condition: Box<AstNode>,
        true_expr: Box<AstNode>,
        false_expr: Box<AstNode>,
        location: SourceLocation,
    },
    Subscript {
        container: Box<AstNode>,
        index: Box<AstNode>,
        location: SourceLocation,
    },

    // Statements
    Declaration {
        type_name: String,
        declarators: Vec<Declarator>,
        location: SourceLocation,
    },
    ExpressionStatement {
        expr: Box<AstNode>,
        location: SourceLocation,
    },
    EmptyStatement {
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Identifier(_, loc) => *loc,
            AstNode::NumberLiteral(_, loc) => *loc,
            AstNode::BinaryOp { location, .. } => *location,
            AstNode::UnaryOp { location, .. } => *location,
            AstNode::Assignment { location, .. } => *location,
            AstNode::Conditional { location, .. } => *location,
            AstNode::Subscript { location, .. } => *location,
            AstNode::Declaration { location, .. } => *location,
            AstNode::ExpressionStatement { location, .. } => *location,
            AstNode::EmptyStatement { location } => *location,
        }
    }

    /// Whether this expression is free of side effects (no assignment or
    /// increment/decrement anywhere in the subtree). Evaluating such an
    /// expression twice against the same environment yields the same value.
    pub fn is_pure(&self) -> bool {
        match self {
            AstNode::Identifier(..) | AstNode::NumberLiteral(..) => true,
            AstNode::BinaryOp { left, right, .. } => left.is_pure() && right.is_pure(),
            AstNode::UnaryOp { op, operand, .. } => match op {
                UnOp::PreInc | UnOp::PreDec | UnOp::PostInc | UnOp::PostDec => false,
                _ => operand.is_pure(),
            },
            AstNode::Assignment { .. } => false,
            AstNode::Conditional {
                condition,
                true_expr,
                false_expr,
                ..
            } => condition.is_pure() && true_expr.is_pure() && false_expr.is_pure(),
            AstNode::Subscript {
                container, index, ..
            } => container.is_pure() && index.is_pure(),
            AstNode::Declaration { .. } => false,
            AstNode::ExpressionStatement { expr, .. } => expr.is_pure(),
            AstNode::EmptyStatement { .. } => true,
        }
    }
}

/// Top-level program structure: an ordered sequence of statements
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

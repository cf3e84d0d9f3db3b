use crate::interpreter::{evaluator::binary::BinaryOperator, value::primitive::PrimitiveType};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// A name that no scope on the active chain declares.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A second declaration of a name within one scope.
    DuplicateVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that was never registered.
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to register a function name twice.
    DuplicateFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A binary operator applied to a combination of types it does not
    /// support.
    TypeError {
        /// The operator.
        op:   BinaryOperator,
        /// Type of the left operand.
        lhs:  PrimitiveType,
        /// Type of the right operand.
        rhs:  PrimitiveType,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument whose type differs from the parameter's declared type.
    TypeMismatch {
        /// The called function.
        function: String,
        /// One-based position of the argument.
        position: usize,
        /// The parameter's declared type.
        expected: PrimitiveType,
        /// The type of the supplied value.
        actual:   PrimitiveType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A function produced a value of a type other than its declared return
    /// type.
    ReturnTypeMismatch {
        /// The function.
        function: String,
        /// The declared return type.
        expected: PrimitiveType,
        /// The type actually produced.
        actual:   PrimitiveType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An assignment whose value has a different type than its target.
    AssignmentTypeMismatch {
        /// Type of the current value of the target.
        expected: PrimitiveType,
        /// Type of the assigned value.
        actual:   PrimitiveType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A value that cannot be converted to a declared type.
    ConversionError {
        /// Type of the value.
        from: PrimitiveType,
        /// The declared type.
        to:   PrimitiveType,
        /// The source line where the error occurred.
        line: usize,
    },
    /// More arguments than the function has parameters.
    TooManyArguments {
        /// The called function.
        function: String,
        /// Number of declared parameters.
        required: usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Fewer arguments than the function has parameters.
    TooFewArguments {
        /// The called function.
        function: String,
        /// Number of declared parameters.
        required: usize,
        /// Number of arguments supplied.
        provided: usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Member access or append on a value that is not an entity.
    NotAnEntity {
        /// The type found instead.
        found: PrimitiveType,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Access to a member the entity does not have.
    NoSuchMember {
        /// The member name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A second append of the same member name.
    DuplicateMember {
        /// The member name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Use of an entity handle that is null or was passed to `del`.
    DanglingEntity {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `break` reached a function boundary without an enclosing loop.
    BreakOutsideLoop {
        /// The function whose body contained the `break`.
        function: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `continue` reached a function boundary without an enclosing loop.
    ContinueOutsideLoop {
        /// The function whose body contained the `continue`.
        function: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The program defines no `main` function.
    MainNotFound,
    /// An `if` or loop condition that is not an `int`.
    NonIntegerCondition {
        /// The type found instead.
        found: PrimitiveType,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Integer division or remainder by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call nested deeper than the interpreter allows.
    RecursionLimit {
        /// The function whose call exceeded the limit.
        function: String,
        /// The deepest nesting allowed.
        limit:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
}

impl RuntimeError {
    /// The source line the error points at, if it has one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MainNotFound => None,
            Self::UndefinedVariable { line, .. }
            | Self::DuplicateVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::DuplicateFunction { line, .. }
            | Self::TypeError { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::ReturnTypeMismatch { line, .. }
            | Self::AssignmentTypeMismatch { line, .. }
            | Self::ConversionError { line, .. }
            | Self::TooManyArguments { line, .. }
            | Self::TooFewArguments { line, .. }
            | Self::NotAnEntity { line, .. }
            | Self::NoSuchMember { line, .. }
            | Self::DuplicateMember { line, .. }
            | Self::DanglingEntity { line }
            | Self::BreakOutsideLoop { line, .. }
            | Self::ContinueOutsideLoop { line, .. }
            | Self::NonIntegerCondition { line, .. }
            | Self::DivisionByZero { line }
            | Self::RecursionLimit { line, .. } => Some(*line),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: No such variable '{name}'.")
            },
            Self::DuplicateVariable { name, line } => {
                write!(f, "Error on line {line}: Redefinition of variable '{name}'.")
            },
            Self::UndefinedFunction { name, line } => {
                write!(f, "Error on line {line}: No such function '{name}'.")
            },
            Self::DuplicateFunction { name, line } => {
                write!(f, "Error on line {line}: Redefinition of function '{name}'.")
            },
            Self::TypeError { op, lhs, rhs, line } => write!(f,
                                                            "Error on line {line}: Operator '{op}' is not defined between '{lhs}' and '{rhs}'."),
            Self::TypeMismatch { function,
                                 position,
                                 expected,
                                 actual,
                                 line, } => write!(f,
                                                   "Error on line {line}: Wrong type provided to function '{function}' at position {position}: '{expected}' required, but '{actual}' provided."),
            Self::ReturnTypeMismatch { function,
                                       expected,
                                       actual,
                                       line, } => write!(f,
                                                         "Error on line {line}: Function '{function}' returns '{actual}' instead of '{expected}'."),
            Self::AssignmentTypeMismatch { expected,
                                           actual,
                                           line, } => write!(f,
                                                             "Error on line {line}: Cannot assign '{actual}' to '{expected}'."),
            Self::ConversionError { from, to, line } => {
                write!(f, "Error on line {line}: Can't convert from '{from}' to '{to}'.")
            },
            Self::TooManyArguments { function,
                                     required,
                                     line, } => write!(f,
                                                       "Error on line {line}: Too many arguments to function '{function}', {required} required."),
            Self::TooFewArguments { function,
                                    required,
                                    provided,
                                    line, } => write!(f,
                                                      "Error on line {line}: Too few arguments to function '{function}', {required} required, but {provided} provided."),
            Self::NotAnEntity { found, line } => {
                write!(f, "Error on line {line}: Expected an entity, found '{found}'.")
            },
            Self::NoSuchMember { name, line } => {
                write!(f, "Error on line {line}: No such member '{name}'.")
            },
            Self::DuplicateMember { name, line } => {
                write!(f, "Error on line {line}: Member '{name}' already exists.")
            },
            Self::DanglingEntity { line } => {
                write!(f, "Error on line {line}: Entity is null or has been deleted.")
            },
            Self::BreakOutsideLoop { function, line } => write!(f,
                                                                "Error on line {line}: 'break' outside of a loop in function '{function}'."),
            Self::ContinueOutsideLoop { function, line } => write!(f,
                                                                   "Error on line {line}: 'continue' outside of a loop in function '{function}'."),
            Self::MainNotFound => write!(f, "Error: main() not found."),
            Self::NonIntegerCondition { found, line } => {
                write!(f, "Error on line {line}: Condition must be 'int', found '{found}'.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::RecursionLimit { function, limit, line } => write!(f,
                                                                     "Error on line {line}: Call to '{function}' nests deeper than {limit} calls."),
        }
    }
}

impl std::error::Error for RuntimeError {}

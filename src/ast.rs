use std::fmt;

/// Name of the implicit variable that receives the program input and the
/// element under iteration.
pub const IMPLICIT: &str = "_";

/// Reserved name bound to the accumulator of a fold or the left element of a
/// zip. Source text cannot spell it, so user code never collides with it.
pub const TEMPLATE_LEFT: &str = "#left";

/// Reserved name bound to the next element of a fold or the right element of a
/// zip.
pub const TEMPLATE_RIGHT: &str = "#right";

/// A position in the source text, one-based on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column number counted in characters, starting at 1.
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The quote character a string literal was written with.
///
/// Double quotes produce plain text. The other two produce dictionary strings
/// that are decoded through the word list at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// `"text"`
    Double,
    /// `'text'`, every decoded word is capitalised.
    Single,
    /// `` `text` ``, only a word that starts the string is capitalised.
    Backtick,
}

impl QuoteKind {
    #[must_use]
    pub const fn from_char(quote: char) -> Self {
        match quote {
            '\'' => Self::Single,
            '`' => Self::Backtick,
            _ => Self::Double,
        }
    }
}

/// An ordered list of items; the value of the last item is the value of the
/// whole program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Node>,
    pub span:  Span,
}

impl Program {
    #[must_use]
    pub const fn new(items: Vec<Node>, span: Span) -> Self {
        Self { items, span }
    }

    /// Returns the block contained in this program's items, if any.
    #[must_use]
    pub fn block(&self) -> Option<&Block> {
        self.items.iter().find_map(|item| match item {
                              Node::Block(block) => Some(block),
                              _ => None,
                          })
    }
}

/// A named parameter of a function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// A braced body with a single named parameter.
///
/// When evaluated directly, the parameter is bound to the current value of
/// `_`. Filters, folds and sequences bind it to each element instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub param: String,
    pub body:  Program,
    pub span:  Span,
}

/// A two-argument expression captured from a fold or zip combinator.
///
/// The expression reads its operands through [`TEMPLATE_LEFT`] and
/// [`TEMPLATE_RIGHT`].
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub expr: Box<Node>,
    pub span: Span,
}

/// A single step of a base conversion directive, such as the `b` in `;b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseCode {
    /// Format the number in the given radix (`b`, `o`, `h`).
    Format(u32),
    /// Parse text written in the given radix (`B`, `O`, `H`).
    Parse(u32),
    /// Convert to a decimal number (`d`).
    Decimal,
}

impl BaseCode {
    #[must_use]
    pub const fn from_char(code: char) -> Option<Self> {
        Some(match code {
            'b' => Self::Format(2),
            'o' => Self::Format(8),
            'h' => Self::Format(16),
            'B' => Self::Parse(2),
            'O' => Self::Parse(8),
            'H' => Self::Parse(16),
            'd' => Self::Decimal,
            _ => return None,
        })
    }
}

/// Operator-specific data attached to prefix, infix and suffix nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Extra {
    #[default]
    None,
    /// Folds carry an optional per-element map and an optional combinator.
    Fold {
        map:        Option<Block>,
        combinator: Option<Template>,
    },
    /// Filters carry the predicate block.
    Filter(Block),
    /// Zip-with carries the pairwise combinator.
    Zip(Template),
    /// Base conversion carries the pad width and the conversion codes.
    Base {
        width: usize,
        codes: Vec<BaseCode>,
    },
}

/// Declares an operator enum together with its spelling and precedence.
///
/// The first spelling is canonical; additional spellings are accepted as
/// aliases when lexing.
macro_rules! operators {
    ($(#[$meta:meta])* $name:ident {
        $($(#[$vmeta:meta])* $variant:ident => $spelling:literal $(| $alias:literal)* @ $prec:literal,)*
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)*
        }

        impl $name {
            /// Resolves a punctuation spelling to this kind of operator.
            #[must_use]
            pub fn from_spelling(spelling: &str) -> Option<Self> {
                match spelling {
                    $($spelling $(| $alias)* => Some(Self::$variant),)*
                    _ => None,
                }
            }

            #[must_use]
            pub const fn spelling(self) -> &'static str {
                match self {
                    $(Self::$variant => $spelling,)*
                }
            }

            #[must_use]
            pub const fn precedence(self) -> i32 {
                match self {
                    $(Self::$variant => $prec,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.spelling())
            }
        }
    };
}

operators! {
    /// Operators written before their operand.
    PrefixOp {
        Not => "!" @ 4,
        Negate => "-" @ 4,
        Reverse => "!!" @ 4,
        Floor => ":v" @ 4,
        Ceil => ":^" @ 4,
        Increment => "++" @ 4,
        Decrement => "--" @ 4,
        Square => ":*" @ 4,
        Sqrt => ":/" @ 4,
        Double => ":+" @ 4,
        Halve => ":-" @ 4,
        SortAscending => ":>" @ 4,
        SortDescending => ":<" @ 4,
        Palindrome => "|:" @ 4,
        OneRange => "~" @ 5,
        Filter => "$" @ 0,
        Any => "$:" @ 0,
        Fold => "\\" @ 0,
    }
}

operators! {
    /// Operators written between two operands.
    InfixOp {
        Call => "." @ 11,
        Power => "^" @ 10,
        Multiply => "*" @ 9,
        Divide => "/" @ 9,
        Modulo => "%" @ 8,
        Join => ":|" @ 7,
        Split => ":!" @ 7,
        Add => "+" @ 6,
        Subtract => "-" @ 6,
        Range => "->" @ 5,
        ClosedRange => "=>" @ 5,
        Index => "?" @ 4,
        IndexOf => ":i" @ 4,
        Concat => "|" @ 3,
        Equal => "=" @ 2,
        NotEqual => "!=" @ 2,
        Less => "<" @ 2,
        LessEqual => "<=" @ 2,
        Greater => ">" @ 2,
        GreaterEqual => ">=" @ 2,
        And => "&&" @ 1,
        Or => "||" @ 1,
        Assign => ":" @ 0,
        Zip => "@" @ 0,
        Remove => "@:" @ 0,
        Contains => "&" @ 0,
    }
}

operators! {
    /// Operators written after their operand.
    SuffixOp {
        Length => "#" @ 5,
        Base => ";" | ":_" @ 5,
        Abs => ".|" @ 5,
        Lines => ":n" @ 4,
        Words => ":s" @ 4,
        Head => ":{" @ 4,
        Last => ":}" @ 4,
        Tail => ".{" @ 4,
        Init => ".}" @ 4,
        Group => ":@" @ 4,
        IsSquare => "^*" @ 4,
        Flatten => ".." @ 4,
    }
}

impl InfixOp {
    /// Operators that do not absorb a following operator of equal precedence
    /// into their right operand, so `a - b - c` reads as `(a - b) - c`.
    #[must_use]
    pub const fn is_non_chaining(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Add
                 | Self::Subtract
                 | Self::Contains)
    }
}

/// Native operations the host supplies for builtin functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// Writes the serialized argument to the output.
    Print,
    /// Returns the program input.
    Input,
    /// Returns the first `n` elements of an array or sequence.
    Take,
}

/// A node of the syntax tree.
///
/// Every variant records the position of the token that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    StringLiteral {
        text:  String,
        quote: QuoteKind,
        span:  Span,
    },
    /// A numeral, kept as written so precision is applied at evaluation time.
    IntegerLiteral {
        text: String,
        span: Span,
    },
    Variable {
        name: String,
        span: Span,
    },
    Call {
        name: String,
        args: Vec<Node>,
        span: Span,
    },
    FunctionDef {
        name:   String,
        params: Vec<Identifier>,
        body:   Box<Node>,
        span:   Span,
    },
    /// A parenthesized group, evaluated in the enclosing scope.
    Expression {
        inner: Program,
        span:  Span,
    },
    Block(Block),
    Array {
        body: Program,
        span: Span,
    },
    Prefix {
        op:    PrefixOp,
        arg:   Box<Node>,
        extra: Extra,
        span:  Span,
    },
    Infix {
        op:    InfixOp,
        left:  Box<Node>,
        right: Box<Node>,
        extra: Extra,
        span:  Span,
    },
    Suffix {
        op:    SuffixOp,
        arg:   Box<Node>,
        extra: Extra,
        span:  Span,
    },
    NativeHook {
        hook: Hook,
        span: Span,
    },
}

impl Node {
    #[must_use]
    pub fn implicit(span: Span) -> Self {
        Self::Variable { name: IMPLICIT.to_string(),
                         span }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::StringLiteral { span, .. }
            | Self::IntegerLiteral { span, .. }
            | Self::Variable { span, .. }
            | Self::Call { span, .. }
            | Self::FunctionDef { span, .. }
            | Self::Expression { span, .. }
            | Self::Block(Block { span, .. })
            | Self::Array { span, .. }
            | Self::Prefix { span, .. }
            | Self::Infix { span, .. }
            | Self::Suffix { span, .. }
            | Self::NativeHook { span, .. } => *span,
        }
    }

    /// Returns `true` if this node is the variable `_`.
    #[must_use]
    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Variable { name, .. } if name == IMPLICIT)
    }

    /// Blocks and definitions are complete items; an operator that follows
    /// them starts a new item instead of taking them as its left operand.
    #[must_use]
    pub const fn is_valid_left(&self) -> bool {
        !matches!(self, Self::Block(_) | Self::FunctionDef { .. })
    }

    /// Precedence of the outermost operator, if this node is an operator
    /// application.
    #[must_use]
    pub const fn operator_precedence(&self) -> Option<i32> {
        match self {
            Self::Prefix { op, .. } => Some(op.precedence()),
            Self::Infix { op, .. } => Some(op.precedence()),
            Self::Suffix { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }
}

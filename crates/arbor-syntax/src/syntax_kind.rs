#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    SEMICOLON,
    EQ,

    LET_KW,
    FN_KW,
    NAME,

    NUMBER,
    OPERATOR,

    UNKNOWN,
    EOF,

    MODULE,
    LET_STMT,
    EXPR_STMT,
    LITERAL,
    NAME_REF,
    BINARY_EXPR,
    PAREN_EXPR,
    CALL_EXPR,
    ERROR,

    STMT_LIST,
    ARG_LIST,
}

impl SyntaxKind {
    /// Returns `true` for kinds whose nodes hold a homogeneous run of
    /// elements rather than a fixed shape.
    pub fn is_list(self) -> bool {
        matches!(self, Self::STMT_LIST | Self::ARG_LIST)
    }
}

//! logos-based tokenizer for the declarative attribute.
//!
//! Quoted runs are single tokens, so `;` and `:` inside quotes never split a
//! segment. A lone quote that does not close lexes as [`Token::StrayQuote`]
//! and is treated as literal text by the parser.

use logos::Logos;

/// Token produced by the attribute lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Double-quoted run, quotes included.
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// Single-quoted run, quotes included.
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// A quote character with no closing partner.
    #[regex(r#"["']"#)]
    StrayQuote,

    /// `;` segment separator.
    #[token(";")]
    Semicolon,

    /// `:` key/value separator.
    #[token(":")]
    Colon,

    /// Whitespace, kept so literals with inner spaces survive.
    #[regex(r"[ \t\r\n\f]+")]
    Space,

    /// Any other run of characters.
    #[regex(r#"[^;:'" \t\r\n\f]+"#)]
    Text,
}

/// A token with its byte span in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

/// Tokenize an attribute value.
///
/// Every byte of the input belongs to exactly one token; anything logos
/// cannot classify is reported as [`Token::Text`].
pub fn tokenize(input: &str) -> Vec<Spanned> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| Spanned {
            token: result.unwrap_or(Token::Text),
            start: span.start,
            end: span.end,
        })
        .collect()
}

use crate::specification::{is_identifier_character, SpecError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Token<'s> {
    Ident(&'s str),
    LongOpt(&'s str),
    ShortOpt(&'s str),
    Comma,
    Equals,
    LBrack,
    RBrack,
    Whitespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Lexeme<'s> {
    pub(super) token: Token<'s>,
    pub(super) text: &'s str,
    pub(super) offset: usize,
}

impl<'s> Lexeme<'s> {
    fn new(token: Token<'s>, spec: &'s str, offset: usize, end: usize) -> Self {
        Self {
            token,
            text: &spec[offset..end],
            offset,
        }
    }
}

/// Lex an argument specification: `IDENT`, `[` and `]`.
/// Whitespace, or any character outside of these tokens, is a lexical error.
pub(super) fn lex_argument(spec: &str) -> Result<Vec<Lexeme<'_>>, SpecError> {
    let mut lexemes = Vec::default();
    let mut offset = 0;

    while let Some(c) = spec[offset..].chars().next() {
        let lexeme = match c {
            '[' => Lexeme::new(Token::LBrack, spec, offset, offset + 1),
            ']' => Lexeme::new(Token::RBrack, spec, offset, offset + 1),
            c if c.is_whitespace() => {
                return Err(SpecError::UnexpectedWhitespace {
                    spec: spec.to_string(),
                    offset,
                });
            }
            c if is_identifier_character(c) => {
                let end = run_end(spec, offset, is_identifier_character);
                Lexeme::new(Token::Ident(&spec[offset..end]), spec, offset, end)
            }
            character => {
                return Err(SpecError::InvalidCharacter {
                    spec: spec.to_string(),
                    character,
                    offset,
                });
            }
        };

        offset += lexeme.text.len();
        lexemes.push(lexeme);
    }

    Ok(lexemes)
}

/// Lex an option specification.
///
/// Every character belongs to some token, so this never fails; validating names is left to the parser.
/// A `--` or `-` absorbs the run of non-delimiter characters which follows it as the option name.
pub(super) fn lex_option(spec: &str) -> Vec<Lexeme<'_>> {
    let mut lexemes = Vec::default();
    let mut offset = 0;

    while let Some(c) = spec[offset..].chars().next() {
        let lexeme = match c {
            ',' => Lexeme::new(Token::Comma, spec, offset, offset + 1),
            '=' => Lexeme::new(Token::Equals, spec, offset, offset + 1),
            '[' => Lexeme::new(Token::LBrack, spec, offset, offset + 1),
            ']' => Lexeme::new(Token::RBrack, spec, offset, offset + 1),
            c if c.is_whitespace() => {
                let end = run_end(spec, offset, char::is_whitespace);
                Lexeme::new(Token::Whitespace, spec, offset, end)
            }
            '-' => {
                if spec[offset..].starts_with("--") {
                    let end = run_end(spec, offset + 2, is_name_character);
                    Lexeme::new(Token::LongOpt(&spec[offset + 2..end]), spec, offset, end)
                } else {
                    let end = run_end(spec, offset + 1, is_name_character);
                    Lexeme::new(Token::ShortOpt(&spec[offset + 1..end]), spec, offset, end)
                }
            }
            _ => {
                let end = run_end(spec, offset, is_name_character);
                Lexeme::new(Token::Ident(&spec[offset..end]), spec, offset, end)
            }
        };

        offset += lexeme.text.len();
        lexemes.push(lexeme);
    }

    lexemes
}

fn is_name_character(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, ',' | '=' | '[' | ']'))
}

fn run_end(spec: &str, start: usize, predicate: impl Fn(char) -> bool) -> usize {
    spec[start..]
        .char_indices()
        .find(|(_, c)| !predicate(*c))
        .map(|(i, _)| start + i)
        .unwrap_or(spec.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tokens(lexemes: Vec<Lexeme<'_>>) -> Vec<Token<'_>> {
        lexemes.into_iter().map(|l| l.token).collect()
    }

    #[rstest]
    #[case("", vec![])]
    #[case("NAME", vec![Token::Ident("NAME")])]
    #[case("[NAME]", vec![Token::LBrack, Token::Ident("NAME"), Token::RBrack])]
    #[case("[]", vec![Token::LBrack, Token::RBrack])]
    #[case("a-b_c]x", vec![Token::Ident("a-b_c"), Token::RBrack, Token::Ident("x")])]
    fn argument_tokens(#[case] spec: &str, #[case] expected: Vec<Token>) {
        assert_eq!(tokens(lex_argument(spec).unwrap()), expected);
    }

    #[test]
    fn argument_whitespace() {
        assert_eq!(
            lex_argument("GALAXY QUEST").unwrap_err(),
            SpecError::UnexpectedWhitespace {
                spec: "GALAXY QUEST".to_string(),
                offset: 6,
            }
        );
    }

    #[test]
    fn argument_invalid_character() {
        assert_eq!(
            lex_argument("[A$]").unwrap_err(),
            SpecError::InvalidCharacter {
                spec: "[A$]".to_string(),
                character: '$',
                offset: 2,
            }
        );
    }

    #[rstest]
    #[case("--foo", vec![Token::LongOpt("foo")])]
    #[case("-f", vec![Token::ShortOpt("f")])]
    #[case("-", vec![Token::ShortOpt("")])]
    #[case("--", vec![Token::LongOpt("")])]
    #[case("---x", vec![Token::LongOpt("-x")])]
    #[case(
        "-f, --foo",
        vec![Token::ShortOpt("f"), Token::Comma, Token::Whitespace, Token::LongOpt("foo")]
    )]
    #[case("--foo=BAR", vec![Token::LongOpt("foo"), Token::Equals, Token::Ident("BAR")])]
    #[case("--foo=A-B", vec![Token::LongOpt("foo"), Token::Equals, Token::Ident("A-B")])]
    #[case(
        "--foo[=BAR]",
        vec![
            Token::LongOpt("foo"),
            Token::LBrack,
            Token::Equals,
            Token::Ident("BAR"),
            Token::RBrack,
        ]
    )]
    #[case("abc", vec![Token::Ident("abc")])]
    #[case("--$$$", vec![Token::LongOpt("$$$")])]
    fn option_tokens(#[case] spec: &str, #[case] expected: Vec<Token>) {
        assert_eq!(tokens(lex_option(spec)), expected);
    }

    #[test]
    fn option_offsets() {
        let lexemes = lex_option("-g,  --galaxy");
        let offsets: Vec<usize> = lexemes.iter().map(|l| l.offset).collect();
        assert_eq!(offsets, vec![0, 2, 3, 5]);
        assert_eq!(lexemes[2].text, "  ");
        assert_eq!(lexemes[3].text, "--galaxy");
    }
}

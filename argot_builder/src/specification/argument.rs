use crate::specification::lexer::{lex_argument, Lexeme, Token};
use crate::specification::SpecError;

/// The parsed form of an argument specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgumentSpec {
    /// The argument name; non-empty, from `[A-Za-z0-9_-]`.
    pub name: String,
    /// Whether the argument must be given on the command line.
    pub required: bool,
}

/// Parse an argument specification.
///
/// The grammar is `IDENT` for a required argument, or `[IDENT]` for an optional argument.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::parse_argument_spec;
///
/// let argument = parse_argument_spec("[MEMENTO]").unwrap();
/// assert_eq!(argument.name, "MEMENTO");
/// assert!(!argument.required);
///
/// assert!(parse_argument_spec("GALAXY QUEST").is_err());
/// ```
pub fn parse_argument_spec(spec: &str) -> Result<ArgumentSpec, SpecError> {
    let lexemes = lex_argument(spec)?;
    let mut lexemes = lexemes.into_iter();

    match lexemes.next().map(|l| l.token) {
        Some(Token::LBrack) => {
            let name = match lexemes.next().map(|l| l.token) {
                Some(Token::Ident(name)) => name,
                _ => {
                    return Err(SpecError::EmptyIdentifier {
                        spec: spec.to_string(),
                    });
                }
            };

            if !matches!(lexemes.next().map(|l| l.token), Some(Token::RBrack)) {
                return Err(SpecError::UnterminatedBracket {
                    spec: spec.to_string(),
                });
            }

            expect_end(spec, lexemes.next())?;
            Ok(ArgumentSpec {
                name: name.to_string(),
                required: false,
            })
        }
        Some(Token::Ident(name)) => {
            expect_end(spec, lexemes.next())?;
            Ok(ArgumentSpec {
                name: name.to_string(),
                required: true,
            })
        }
        _ => Err(SpecError::MissingIdentifier {
            spec: spec.to_string(),
        }),
    }
}

fn expect_end(spec: &str, next: Option<Lexeme<'_>>) -> Result<(), SpecError> {
    match next {
        None => Ok(()),
        Some(lexeme) => Err(SpecError::UnexpectedTrailingInput {
            spec: spec.to_string(),
            offset: lexeme.offset,
        }),
    }
}

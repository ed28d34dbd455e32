use crate::model::ValueMode;
use crate::specification::lexer::{lex_option, Lexeme, Token};
use crate::specification::{is_identifier, SpecError};

/// The parsed form of an option specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionSpec {
    /// The option names, without dashes, in the order they were written.
    /// The first name is the primary (display) name.
    pub names: Vec<String>,
    /// Whether the option takes a value.
    pub value_mode: ValueMode,
    /// The display name of the value, when the option takes one.
    pub value_name: Option<String>,
}

impl OptionSpec {
    /// The first declared name.
    pub fn primary_name(&self) -> &str {
        &self.names[0]
    }

    /// The names as they are written on the command line, joined by `, ` (ex: `-g, --galaxy`).
    pub fn display_names(&self) -> String {
        self.names
            .iter()
            .map(|name| dashed(name))
            .collect::<Vec<String>>()
            .join(", ")
    }

    /// The value part as written in the specification (ex: `=VALUE` or `[=VALUE]`).
    pub fn display_value(&self) -> String {
        match (&self.value_mode, &self.value_name) {
            (ValueMode::Required, Some(name)) => format!("={name}"),
            (ValueMode::Optional, Some(name)) => format!("[={name}]"),
            _ => "".to_string(),
        }
    }
}

/// Prefix an option name with the dashes it is written with on the command line.
pub(crate) fn dashed(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

/// Parse an option specification.
///
/// The grammar is `NAME (, NAME)* VALUE?`, where each `NAME` is either a long name `--name` or a short name `-n`.
/// The optional `VALUE` part is either `=VALUE` (the option requires a value) or `[=VALUE]` (the option may take a value).
/// Whitespace is only permitted around the commas.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{parse_option_spec, ValueMode};
///
/// let option = parse_option_spec("-g, --galaxy-quest=ALAN_RICKMAN").unwrap();
/// assert_eq!(option.names, vec!["g", "galaxy-quest"]);
/// assert_eq!(option.value_mode, ValueMode::Required);
/// assert_eq!(option.value_name.as_deref(), Some("ALAN_RICKMAN"));
///
/// assert!(parse_option_spec("-abc").is_err());
/// ```
pub fn parse_option_spec(spec: &str) -> Result<OptionSpec, SpecError> {
    OptionParser {
        spec,
        lexemes: lex_option(spec),
        position: 0,
    }
    .parse()
}

struct OptionParser<'s> {
    spec: &'s str,
    lexemes: Vec<Lexeme<'s>>,
    position: usize,
}

impl<'s> OptionParser<'s> {
    fn parse(mut self) -> Result<OptionSpec, SpecError> {
        let mut names = Vec::default();

        loop {
            names.push(self.name()?);

            let checkpoint = self.position;
            self.skip_whitespace();

            if matches!(self.peek().map(|l| l.token), Some(Token::Comma)) {
                self.position += 1;
                self.skip_whitespace();
            } else {
                // Not a separator, so the whitespace is for value_part to reject.
                self.position = checkpoint;
                break;
            }
        }

        let (value_mode, value_name) = self.value_part()?;

        Ok(OptionSpec {
            names,
            value_mode,
            value_name,
        })
    }

    fn name(&mut self) -> Result<String, SpecError> {
        match self.next().map(|l| l.token) {
            Some(Token::LongOpt(name)) => {
                if name.chars().count() >= 2
                    && name.starts_with(|c: char| c.is_ascii_alphanumeric())
                    && is_identifier(name)
                {
                    Ok(name.to_string())
                } else {
                    Err(SpecError::InvalidOptionName {
                        spec: self.spec.to_string(),
                        name: name.to_string(),
                    })
                }
            }
            Some(Token::ShortOpt(name)) => {
                if name.chars().count() > 1 {
                    Err(SpecError::ShortNameTooLong {
                        spec: self.spec.to_string(),
                        name: name.to_string(),
                    })
                } else if name.chars().all(|c| c.is_ascii_alphanumeric()) && !name.is_empty() {
                    Ok(name.to_string())
                } else {
                    Err(SpecError::InvalidOptionName {
                        spec: self.spec.to_string(),
                        name: name.to_string(),
                    })
                }
            }
            _ => Err(SpecError::MissingDashPrefix {
                spec: self.spec.to_string(),
            }),
        }
    }

    fn value_part(&mut self) -> Result<(ValueMode, Option<String>), SpecError> {
        let lexeme = match self.next() {
            Some(lexeme) => lexeme,
            None => return Ok((ValueMode::None, None)),
        };

        match lexeme.token {
            Token::Equals => {
                let value_name = self.value_name()?;
                self.expect_end()?;
                Ok((ValueMode::Required, Some(value_name)))
            }
            Token::LBrack => {
                match self.next() {
                    Some(Lexeme {
                        token: Token::Equals,
                        ..
                    }) => {}
                    other => {
                        return Err(SpecError::ExpectedEquals {
                            spec: self.spec.to_string(),
                            offset: other.map_or(self.spec.len(), |l| l.offset),
                        });
                    }
                };

                let value_name = self.value_name()?;

                if !matches!(self.next().map(|l| l.token), Some(Token::RBrack)) {
                    return Err(SpecError::UnterminatedBracket {
                        spec: self.spec.to_string(),
                    });
                }

                self.expect_end()?;
                Ok((ValueMode::Optional, Some(value_name)))
            }
            Token::Whitespace => Err(SpecError::UnexpectedWhitespace {
                spec: self.spec.to_string(),
                offset: lexeme.offset,
            }),
            _ => Err(SpecError::UnexpectedTrailingInput {
                spec: self.spec.to_string(),
                offset: lexeme.offset,
            }),
        }
    }

    fn value_name(&mut self) -> Result<String, SpecError> {
        match self.peek() {
            Some(Lexeme {
                token: Token::Ident(_) | Token::LongOpt(_) | Token::ShortOpt(_),
                text,
                ..
            }) => {
                let text = *text;
                self.position += 1;

                if is_identifier(text) && !text.starts_with('-') {
                    Ok(text.to_string())
                } else {
                    Err(SpecError::InvalidValueName {
                        spec: self.spec.to_string(),
                        name: text.to_string(),
                    })
                }
            }
            _ => Err(SpecError::EmptyValueName {
                spec: self.spec.to_string(),
            }),
        }
    }

    fn expect_end(&mut self) -> Result<(), SpecError> {
        match self.next() {
            None => Ok(()),
            Some(lexeme) => Err(SpecError::UnexpectedTrailingInput {
                spec: self.spec.to_string(),
                offset: lexeme.offset,
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek().map(|l| l.token), Some(Token::Whitespace)) {
            self.position += 1;
        }
    }

    fn peek(&self) -> Option<&Lexeme<'s>> {
        self.lexemes.get(self.position)
    }

    fn next(&mut self) -> Option<Lexeme<'s>> {
        let lexeme = self.lexemes.get(self.position).copied();

        if lexeme.is_some() {
            self.position += 1;
        }

        lexeme
    }
}

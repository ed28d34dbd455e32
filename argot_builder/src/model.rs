/// Whether an option takes a value, and if so whether that value must be present.
///
/// Decided by the option specification:
/// * `--name` is [`ValueMode::None`].
/// * `--name[=VALUE]` is [`ValueMode::Optional`].
/// * `--name=VALUE` is [`ValueMode::Required`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueMode {
    /// The option does not take a value (ex: a flag).
    #[default]
    None,
    /// The option may be given a value.
    Optional,
    /// The option must be given a value.
    Required,
}

impl std::fmt::Display for ValueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A positional token from the command line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputArgument {
    /// The raw token.
    pub value: String,
}

/// An option token from the command line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOption {
    /// The option name, without any leading dashes.
    pub name: String,
    /// The raw value; empty means no value was given.
    pub value: String,
}

impl InputOption {
    pub(crate) fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether a (non-empty) value was given to this option.
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

/// The tokenized command line input, prior to binding.
///
/// Built by [`tokenize`](crate::tokenize).
/// Both sequences preserve the order in which their tokens appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    /// The positional arguments.
    pub arguments: Vec<InputArgument>,
    /// The options, folded short options expanded left to right.
    pub options: Vec<InputOption>,
}

impl Input {
    /// Find the value given to the named option, if it was present.
    /// When an option is repeated, the last occurrence is returned.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|option| option.name == name)
            .map(|option| option.value.as_str())
    }

    /// Whether the named option was present.
    pub fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|option| option.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_option_lookup() {
        let input = Input {
            arguments: Vec::default(),
            options: vec![
                InputOption::new("v", ""),
                InputOption::new("name", "first"),
                InputOption::new("name", "second"),
            ],
        };

        assert!(input.has_option("v"));
        assert!(!input.has_option("x"));
        assert_eq!(input.option("v"), Some(""));
        assert_eq!(input.option("name"), Some("second"));
        assert_eq!(input.option("x"), None);
    }

    #[test]
    fn value_mode_default() {
        assert_eq!(ValueMode::default(), ValueMode::None);
        assert_eq!(ValueMode::Required.to_string(), "Required");
    }
}

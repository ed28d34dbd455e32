use std::collections::HashMap;

use thiserror::Error;

use crate::model::ValueMode;
use crate::specification::{
    parse_argument_spec, parse_option_spec, ArgumentSpec, OptionSpec, SpecError,
};
use crate::value::Value;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Error for an invalid definition (ex: a malformed specification, or a repeated name).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An argument or option specification could not be parsed.
    #[error("{0}")]
    Specification(#[from] SpecError),

    /// An option name is already in use by another option.
    #[error("Option name '{name}' is defined more than once.")]
    DuplicateOption {
        /// The repeated name, without dashes.
        name: String,
    },

    /// An argument name is already in use by another argument.
    #[error("Argument name '{name}' is defined more than once.")]
    DuplicateArgument {
        /// The repeated name.
        name: String,
    },
}

/// The registration of a positional argument: specification, value and help text.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{ArgumentDefinition, Definition, StringValue};
///
/// let mut name = String::default();
/// let mut definition = Definition::default();
/// definition
///     .add_argument(ArgumentDefinition::new("NAME", StringValue::new(&mut name)).help("Who to greet."))
///     .unwrap();
/// assert_eq!(definition.arguments()[0].name(), "NAME");
/// ```
pub struct ArgumentDefinition<'a> {
    spec: String,
    value: Box<dyn Value + 'a>,
    help: Option<String>,
}

impl<'a> ArgumentDefinition<'a> {
    /// Create an argument from its specification (`NAME` for required, `[NAME]` for optional).
    pub fn new(spec: impl Into<String>, value: impl Value + 'a) -> Self {
        Self {
            spec: spec.into(),
            value: Box::new(value),
            help: None,
        }
    }

    /// Document the argument.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, message: impl Into<String>) -> Self {
        self.help.replace(message.into());
        self
    }
}

/// The registration of an option: specification, value, help text and environment variable.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{Definition, IntValue, OptionDefinition};
///
/// let mut level: i64 = 0;
/// let mut definition = Definition::default();
/// definition
///     .add_option(
///         OptionDefinition::new("-l, --level=LEVEL", IntValue::new(&mut level))
///             .env_var("APP_LEVEL")
///             .help("The level."),
///     )
///     .unwrap();
/// assert_eq!(definition.options()[0].env_var(), Some("APP_LEVEL"));
/// ```
pub struct OptionDefinition<'a> {
    spec: String,
    value: Box<dyn Value + 'a>,
    help: Option<String>,
    env_var: Option<String>,
}

impl<'a> OptionDefinition<'a> {
    /// Create an option from its specification (ex: `-n, --name=NAME`).
    pub fn new(spec: impl Into<String>, value: impl Value + 'a) -> Self {
        Self {
            spec: spec.into(),
            value: Box::new(value),
            help: None,
            env_var: None,
        }
    }

    /// Document the option.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, message: impl Into<String>) -> Self {
        self.help.replace(message.into());
        self
    }

    /// Name an environment variable which also provides this option's value.
    ///
    /// The environment is applied after the command line, so when both are present the environment wins.
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var.replace(name.into());
        self
    }
}

/// A registered positional argument.
pub struct ArgumentParameter<'a> {
    spec: ArgumentSpec,
    pub(crate) value: Box<dyn Value + 'a>,
    help: Option<String>,
}

impl<'a> ArgumentParameter<'a> {
    /// The parsed specification.
    pub fn spec(&self) -> &ArgumentSpec {
        &self.spec
    }

    /// The argument name.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Whether the argument must be given.
    pub fn required(&self) -> bool {
        self.spec.required
    }

    /// The help text, if documented.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Render the current content of the argument's value.
    pub fn render(&self) -> String {
        self.value.render()
    }
}

/// A registered option.
pub struct OptionParameter<'a> {
    spec: OptionSpec,
    pub(crate) value: Box<dyn Value + 'a>,
    help: Option<String>,
    env_var: Option<String>,
}

impl<'a> OptionParameter<'a> {
    /// The parsed specification.
    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    /// All names of this option, without dashes, in declared order.
    pub fn names(&self) -> &[String] {
        &self.spec.names
    }

    /// Whether the option takes a value.
    pub fn value_mode(&self) -> ValueMode {
        self.spec.value_mode
    }

    /// The help text, if documented.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The environment variable, if declared.
    pub fn env_var(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    /// Render the current content of the option's value.
    pub fn render(&self) -> String {
        self.value.render()
    }
}

/// The collection of arguments and options for one command.
///
/// Arguments are kept in positional order; options in registration order.
/// Every option name maps onto exactly one option.
#[derive(Default)]
pub struct Definition<'a> {
    arguments: Vec<ArgumentParameter<'a>>,
    options: Vec<OptionParameter<'a>>,
    option_names: HashMap<String, usize>,
}

impl<'a> Definition<'a> {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a positional argument.
    /// The order of registration is the positional order.
    pub fn add_argument(&mut self, argument: ArgumentDefinition<'a>) -> Result<(), ConfigError> {
        let ArgumentDefinition { spec, value, help } = argument;
        let spec = parse_argument_spec(&spec)?;

        if self.arguments.iter().any(|a| a.spec.name == spec.name) {
            return Err(ConfigError::DuplicateArgument { name: spec.name });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Adding argument {spec:?}.");
        }

        self.arguments.push(ArgumentParameter { spec, value, help });
        Ok(())
    }

    /// Register an option.
    /// None of its names may already be in use.
    pub fn add_option(&mut self, option: OptionDefinition<'a>) -> Result<(), ConfigError> {
        let OptionDefinition {
            spec,
            value,
            help,
            env_var,
        } = option;
        let spec = parse_option_spec(&spec)?;

        for (i, name) in spec.names.iter().enumerate() {
            if self.option_names.contains_key(name) || spec.names[..i].contains(name) {
                return Err(ConfigError::DuplicateOption { name: name.clone() });
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Adding option {spec:?}.");
        }

        let index = self.options.len();
        for name in &spec.names {
            self.option_names.insert(name.clone(), index);
        }

        self.options.push(OptionParameter {
            spec,
            value,
            help,
            env_var,
        });
        Ok(())
    }

    /// The arguments, in positional order.
    pub fn arguments(&self) -> &[ArgumentParameter<'a>] {
        &self.arguments
    }

    /// The options, in registration order.
    pub fn options(&self) -> &[OptionParameter<'a>] {
        &self.options
    }

    /// Find the option registered under `name` (without dashes).
    pub fn option(&self, name: &str) -> Option<&OptionParameter<'a>> {
        self.option_names
            .get(name)
            .map(|index| &self.options[*index])
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut [ArgumentParameter<'a>] {
        &mut self.arguments
    }

    pub(crate) fn options_mut(&mut self) -> &mut [OptionParameter<'a>] {
        &mut self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{BoolValue, IntValue, StringValue};
    use rstest::rstest;

    #[test]
    fn add_argument() {
        let mut a = String::default();
        let mut b = String::default();
        let mut definition = Definition::default();

        definition
            .add_argument(ArgumentDefinition::new("A", StringValue::new(&mut a)).help("first"))
            .unwrap();
        definition
            .add_argument(ArgumentDefinition::new("[B]", StringValue::new(&mut b)))
            .unwrap();

        let names: Vec<&str> = definition.arguments().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(definition.arguments()[0].required());
        assert!(!definition.arguments()[1].required());
        assert_eq!(definition.arguments()[0].help(), Some("first"));
        assert_eq!(definition.arguments()[1].help(), None);
    }

    #[test]
    fn add_option() {
        let mut verbose = false;
        let mut count: i64 = 3;
        let mut definition = Definition::default();

        definition
            .add_option(OptionDefinition::new("-v, --verbose", BoolValue::new(&mut verbose)))
            .unwrap();
        definition
            .add_option(
                OptionDefinition::new("--count=COUNT", IntValue::new(&mut count))
                    .env_var("COUNT")
                    .help("last")
                    .help("How many."),
            )
            .unwrap();

        assert_eq!(definition.options().len(), 2);
        assert_eq!(definition.option("v").unwrap().names(), &["v", "verbose"]);
        assert_eq!(
            definition.option("verbose").unwrap().value_mode(),
            ValueMode::None
        );

        let count_option = definition.option("count").unwrap();
        assert_eq!(count_option.value_mode(), ValueMode::Required);
        assert_eq!(count_option.env_var(), Some("COUNT"));
        assert_eq!(count_option.help(), Some("How many."));
        assert_eq!(count_option.render(), "3");
        assert!(definition.option("c").is_none());
    }

    #[rstest]
    #[case("-v", "v")]
    #[case("--verbose", "verbose")]
    #[case("-x, --verbose", "verbose")]
    #[case("-q, -q", "q")]
    fn duplicate_option(#[case] spec: &str, #[case] expected: &str) {
        let mut first = false;
        let mut second = false;
        let mut definition = Definition::default();
        definition
            .add_option(OptionDefinition::new("-v, --verbose", BoolValue::new(&mut first)))
            .unwrap();

        assert_eq!(
            definition
                .add_option(OptionDefinition::new(spec, BoolValue::new(&mut second)))
                .unwrap_err(),
            ConfigError::DuplicateOption {
                name: expected.to_string()
            }
        );
        assert_eq!(definition.options().len(), 1);
    }

    #[test]
    fn duplicate_argument() {
        let mut a = String::default();
        let mut b = String::default();
        let mut definition = Definition::default();
        definition
            .add_argument(ArgumentDefinition::new("NAME", StringValue::new(&mut a)))
            .unwrap();

        assert_matches!(
            definition.add_argument(ArgumentDefinition::new("[NAME]", StringValue::new(&mut b))),
            Err(ConfigError::DuplicateArgument { name }) if name == "NAME"
        );
    }

    #[test]
    fn invalid_specification() {
        let mut a = String::default();
        let mut b = String::default();
        let mut definition = Definition::default();

        assert_matches!(
            definition.add_argument(ArgumentDefinition::new("A B", StringValue::new(&mut a))),
            Err(ConfigError::Specification(SpecError::UnexpectedWhitespace { .. }))
        );
        let error = definition
            .add_option(OptionDefinition::new("abc", StringValue::new(&mut b)))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Specification 'abc' must prefix option names with '-' or '--'."
        );
        assert!(definition.arguments().is_empty());
        assert!(definition.options().is_empty());
    }
}

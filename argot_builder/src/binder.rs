use std::collections::HashMap;

use thiserror::Error;

use crate::definition::{Definition, OptionParameter};
use crate::model::{Input, ValueMode};
use crate::value::InvalidValue;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Error for input which cannot be bound onto its definition.
///
/// Every variant carries the context `label` (typically the program and command name).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    /// A required argument was not given.
    #[error("{label}: Argument '{name}' is required.")]
    MissingRequiredArgument {
        /// The context label.
        label: String,
        /// The argument name.
        name: String,
    },

    /// An argument value could not be converted.
    #[error("{label}: Invalid value '{value}' for argument '{name}'.")]
    InvalidArgumentValue {
        /// The context label.
        label: String,
        /// The argument name.
        name: String,
        /// The raw value.
        value: String,
        /// The conversion failure.
        #[source]
        cause: InvalidValue,
    },

    /// An option requiring a value was given without one.
    #[error("{label}: Option '{name}' requires a value.")]
    OptionRequiresValue {
        /// The context label.
        label: String,
        /// The name under which the option was given (or its environment variable).
        name: String,
    },

    /// An option value could not be converted.
    #[error("{label}: Invalid value '{value}' for option '{name}'.")]
    InvalidOptionValue {
        /// The context label.
        label: String,
        /// The name under which the option was given (or its environment variable).
        name: String,
        /// The raw value.
        value: String,
        /// The conversion failure.
        #[source]
        cause: InvalidValue,
    },

    /// The value's own flag default could not be set.
    /// This indicates a faulty [`FlagValue`](crate::FlagValue) implementation.
    #[error("{label}: Invalid default value '{value}' for option '{name}'.")]
    InvalidFlagDefault {
        /// The context label.
        label: String,
        /// The name under which the option was given (or its environment variable).
        name: String,
        /// The flag default.
        value: String,
        /// The conversion failure.
        #[source]
        cause: InvalidValue,
    },
}

/// Bind the tokenized `input`, and then the `environment`, onto the values of the `definition`.
///
/// Binding happens in three phases, stopping at the first error:
/// 1. Positional arguments, in order.
///    Extra input arguments are ignored; missing required arguments are an error.
/// 2. Options from the input.
///    The option's names are searched in declared order; when a name is repeated, its last occurrence wins.
/// 3. Options from the environment (`KEY=VALUE` entries), for each option with an environment variable.
///
/// Since the environment is applied last, **an environment variable overrides the same option given on the command line**.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{bind, tokenize, Definition, IntValue, OptionDefinition};
///
/// let mut foo: i64 = 0;
/// let mut definition = Definition::default();
/// definition
///     .add_option(OptionDefinition::new("--foo=FOO", IntValue::new(&mut foo)).env_var("TEST_FOO"))
///     .unwrap();
///
/// let input = tokenize(&definition, &["--foo=1"]);
/// bind("program", &mut definition, &input, &["TEST_FOO=42"]).unwrap();
/// drop(definition);
///
/// assert_eq!(foo, 42);
/// ```
pub fn bind(
    label: &str,
    definition: &mut Definition<'_>,
    input: &Input,
    environment: &[impl AsRef<str>],
) -> Result<(), BindError> {
    bind_arguments(label, definition, input)?;
    bind_options(label, definition, input)?;
    bind_environment(label, definition, environment)?;
    Ok(())
}

fn bind_arguments(
    label: &str,
    definition: &mut Definition<'_>,
    input: &Input,
) -> Result<(), BindError> {
    for (i, parameter) in definition.arguments_mut().iter_mut().enumerate() {
        match input.arguments.get(i) {
            Some(argument) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Binding argument '{}' to '{}'.", parameter.name(), argument.value);
                }

                parameter.value.set(&argument.value).map_err(|cause| {
                    BindError::InvalidArgumentValue {
                        label: label.to_string(),
                        name: parameter.name().to_string(),
                        value: argument.value.clone(),
                        cause,
                    }
                })?;
            }
            None if parameter.required() => {
                return Err(BindError::MissingRequiredArgument {
                    label: label.to_string(),
                    name: parameter.name().to_string(),
                });
            }
            None => {}
        }
    }

    Ok(())
}

fn bind_options(
    label: &str,
    definition: &mut Definition<'_>,
    input: &Input,
) -> Result<(), BindError> {
    let given: HashMap<&str, &str> = input
        .options
        .iter()
        .map(|option| (option.name.as_str(), option.value.as_str()))
        .collect();

    for parameter in definition.options_mut() {
        let found = parameter
            .names()
            .iter()
            .find_map(|name| given.get_key_value(name.as_str()));

        if let Some((name, value)) = found {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Binding option '{name}' to '{value}'.");
            }

            assign(label, parameter, name, value)?;
        }
    }

    Ok(())
}

fn bind_environment(
    label: &str,
    definition: &mut Definition<'_>,
    environment: &[impl AsRef<str>],
) -> Result<(), BindError> {
    let variables: HashMap<&str, &str> = environment
        .iter()
        .filter_map(|entry| entry.as_ref().split_once('='))
        .collect();

    for parameter in definition.options_mut() {
        let found = parameter
            .env_var()
            .and_then(|env_var| variables.get_key_value(env_var))
            .map(|(name, value)| (*name, *value));

        if let Some((name, value)) = found {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Binding environment '{name}' to '{value}'.");
            }

            assign(label, parameter, name, value)?;
        }
    }

    Ok(())
}

fn assign(
    label: &str,
    parameter: &mut OptionParameter<'_>,
    name: &str,
    value: &str,
) -> Result<(), BindError> {
    let value_mode = parameter.value_mode();

    if value.is_empty() {
        if value_mode == ValueMode::Required {
            return Err(BindError::OptionRequiresValue {
                label: label.to_string(),
                name: name.to_string(),
            });
        }

        if let Some(flag_value) = parameter.value.as_flag().map(|flag| flag.flag_value()) {
            return parameter
                .value
                .set(flag_value)
                .map_err(|cause| BindError::InvalidFlagDefault {
                    label: label.to_string(),
                    name: name.to_string(),
                    value: flag_value.to_string(),
                    cause,
                });
        }

        if value_mode == ValueMode::Optional {
            return Ok(());
        }
    }

    parameter
        .value
        .set(value)
        .map_err(|cause| BindError::InvalidOptionValue {
            label: label.to_string(),
            name: name.to_string(),
            value: value.to_string(),
            cause,
        })
}

use std::fmt::Display;

use thiserror::Error;

use crate::application::interface::{ConsoleInterface, UserInterface};
use crate::application::printer::{CommandSummary, HelpContext, Printer};
use crate::binder::{bind, BindError};
use crate::definition::{ConfigError, Definition, OptionDefinition};
use crate::input::{tokenize, tokenize_with_positions};
use crate::model::Input;
use crate::value::{BoolValue, FlagValue, InvalidValue, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Exit code after printing help (requested, or because no command was given).
pub const EXIT_HELP: i32 = 100;
/// Exit code when the command line or environment cannot be bound.
pub const EXIT_INPUT_ERROR: i32 = 101;
/// Exit code when the dispatched command fails.
/// See [`Dispatch::finish`].
pub const EXIT_COMMAND_ERROR: i32 = 102;

const HELP_SPEC: &str = "-h, --help";
const HELP_NAMES: [&str; 2] = ["h", "help"];
const HELP_MESSAGE: &str = "Display contextual help.";

/// Error from configuring and binding a command outside of an [`Application`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    /// The command's definition is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input could not be bound onto the command's definition.
    #[error(transparent)]
    Bind(#[from] BindError),
}

// The help option belongs to the application rather than to any caller variable.
#[derive(Default)]
struct HelpFlag(bool);

impl Value for HelpFlag {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        BoolValue::new(&mut self.0).set(raw)
    }

    fn render(&self) -> String {
        self.0.to_string()
    }

    fn as_flag(&self) -> Option<&dyn FlagValue> {
        Some(self)
    }
}

impl FlagValue for HelpFlag {
    fn flag_value(&self) -> &'static str {
        "true"
    }
}

type Configure<'a> = Box<dyn FnOnce(&mut Definition<'a>) -> Result<(), ConfigError> + 'a>;

/// A named command of an [`Application`].
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{ArgumentDefinition, Command, StringValue};
///
/// let mut name = String::default();
/// let name_value = StringValue::new(&mut name);
/// let command = Command::new("greet")
///     .alias("g")
///     .description("Greets the given user.")
///     .configure(move |definition| {
///         definition.add_argument(ArgumentDefinition::new("NAME", name_value))
///     });
/// # drop(command);
/// ```
pub struct Command<'a> {
    name: String,
    alias: Option<String>,
    description: Option<String>,
    help: Option<String>,
    configure: Option<Configure<'a>>,
}

impl<'a> Command<'a> {
    /// Create a command.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            description: None,
            help: None,
            configure: None,
        }
    }

    /// An alternative name which also selects this command.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias.replace(alias.into());
        self
    }

    /// A one line description, shown in the `COMMANDS:` listing and at the top of the command's help.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// A longer paragraph, shown in the `HELP:` section of the command's help.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help.replace(help.into());
        self
    }

    /// Declare the command's arguments and options.
    /// If repeated, only the final configure function will apply.
    ///
    /// The function runs only when this command is selected.
    pub fn configure(
        mut self,
        configure_fn: impl FnOnce(&mut Definition<'a>) -> Result<(), ConfigError> + 'a,
    ) -> Self {
        self.configure.replace(Box::new(configure_fn));
        self
    }

    fn matches(&self, token: &str) -> bool {
        self.name == token || self.alias.as_deref() == Some(token)
    }

    fn configure_into(&mut self, definition: &mut Definition<'a>) -> Result<(), ConfigError> {
        match self.configure.take() {
            Some(configure_fn) => configure_fn(definition),
            None => Ok(()),
        }
    }

    fn summary(&self) -> CommandSummary<'_> {
        CommandSummary {
            name: &self.name,
            alias: self.alias.as_deref(),
            description: self.description.as_deref(),
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Configure, tokenize and bind this command alone, without an [`Application`] around it.
    /// The command name is used as the error label.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{Command, IntValue, OptionDefinition};
    ///
    /// // Function under test.
    /// fn count_command<'a>(count: &'a mut i64) -> Command<'a> {
    ///     Command::new("count").configure(move |definition| {
    ///         definition.add_option(OptionDefinition::new("-c, --count=COUNT", IntValue::new(count)))
    ///     })
    /// }
    ///
    /// let mut count: i64 = 0;
    /// let no_environment: [&str; 0] = [];
    /// count_command(&mut count).test_bind(&["-c", "3"], &no_environment).unwrap();
    /// assert_eq!(count, 3);
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn test_bind(
        mut self,
        args: &[impl AsRef<str>],
        environment: &[impl AsRef<str>],
    ) -> Result<Input, RunError> {
        let mut definition = Definition::default();
        self.configure_into(&mut definition)?;
        let input = tokenize(&definition, args);
        bind(&self.name, &mut definition, &input, environment)?;
        Ok(input)
    }
}

/// The result of a successful [`Application::run`]: which command was selected, and its input.
///
/// By the time a `Dispatch` exists the command's variables have been bound, so the caller executes the command itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    command: Option<String>,
    input: Input,
}

impl Dispatch {
    /// The selected command's name, or `None` when the root command was used.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// The tokenized input of the selected command.
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Map the result of executing the command onto the process exit code.
    /// An error is printed, and mapped to [`EXIT_COMMAND_ERROR`].
    pub fn finish<E: Display>(self, result: Result<(), E>) -> i32 {
        self.finish_with(result, &ConsoleInterface::default())
    }

    fn finish_with<E: Display>(
        self,
        result: Result<(), E>,
        user_interface: &(impl UserInterface + ?Sized),
    ) -> i32 {
        match result {
            Ok(()) => 0,
            Err(error) => {
                user_interface.print_error(error.to_string());
                EXIT_COMMAND_ERROR
            }
        }
    }
}

/// A command line application made up of commands.
///
/// Every command accepts `-h, --help` and the application's global options.
/// The first positional token selects the command (by name or alias).
/// When it doesn't name a command, the root command (if any) is used instead.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{Application, ArgumentDefinition, BoolValue, Command, OptionDefinition, StringValue};
///
/// let mut verbose = false;
/// let mut name = String::default();
/// let name_value = StringValue::new(&mut name);
/// let no_environment: [&str; 0] = [];
///
/// let dispatch = Application::new("program", "1.0.0")
///     .global_option(OptionDefinition::new("-v, --verbose", BoolValue::new(&mut verbose)))
///     .command(Command::new("greet").configure(move |definition| {
///         definition.add_argument(ArgumentDefinition::new("NAME", name_value))
///     }))
///     .run_tokens(&["greet", "-v", "world"], &no_environment)
///     .unwrap();
///
/// assert_eq!(dispatch.command(), Some("greet"));
/// assert!(verbose);
/// assert_eq!(name, "world");
/// ```
pub struct Application<'a> {
    name: String,
    version: String,
    logo: Option<String>,
    global_options: Vec<OptionDefinition<'a>>,
    commands: Vec<Command<'a>>,
    root: Option<Command<'a>>,
}

impl<'a> Application<'a> {
    /// Create an application.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            logo: None,
            global_options: Vec::default(),
            commands: Vec::default(),
            root: None,
        }
    }

    /// Text art shown at the top of the application help.
    pub fn logo(mut self, logo: impl Into<String>) -> Self {
        self.logo.replace(logo.into());
        self
    }

    /// Add an option accepted by every command.
    pub fn global_option(mut self, option: OptionDefinition<'a>) -> Self {
        self.global_options.push(option);
        self
    }

    /// Add a command.
    /// When two commands share a name or alias, the first added wins.
    pub fn command(mut self, command: Command<'a>) -> Self {
        self.commands.push(command);
        self
    }

    /// Set the command used when the input doesn't name a command.
    /// If repeated, only the final root command will apply.
    pub fn root(mut self, command: Command<'a>) -> Self {
        self.root.replace(command);
        self
    }

    /// Run the application against the given command line `args` (without the program name) and `environment` (`KEY=VALUE` entries).
    ///
    /// On success the selected command's variables are bound.
    /// Otherwise, returns the exit code:
    /// * [`EXIT_HELP`] when help was printed (requested, no command given, or an unknown command).
    /// * [`EXIT_INPUT_ERROR`] when the definition is invalid, or the input cannot be bound.
    pub fn run_tokens(
        self,
        args: &[impl AsRef<str>],
        environment: &[impl AsRef<str>],
    ) -> Result<Dispatch, i32> {
        self.run_with(
            args,
            environment,
            &Printer::terminal(),
            &ConsoleInterface::default(),
        )
    }

    /// Run the application against the process [`std::env::args`] and [`std::env::vars`].
    ///
    /// Exits the process (via [`std::process::exit`]) with the code of [`Application::run_tokens`] when it fails.
    pub fn run(self) -> Dispatch {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let environment: Vec<String> = std::env::vars()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();

        match self.run_tokens(&args, &environment) {
            Ok(dispatch) => dispatch,
            Err(code) => std::process::exit(code),
        }
    }

    pub(crate) fn run_with(
        self,
        args: &[impl AsRef<str>],
        environment: &[impl AsRef<str>],
        printer: &Printer,
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<Dispatch, i32> {
        let Application {
            name,
            version,
            logo,
            global_options,
            mut commands,
            root,
        } = self;
        let mut definition = Definition::default();

        if let Err(error) = add_global_options(&mut definition, global_options) {
            user_interface.print_error(error.to_string());
            return Err(EXIT_INPUT_ERROR);
        }

        let (input, positions) = tokenize_with_positions(&definition, args);
        let selected = input
            .arguments
            .first()
            .zip(positions.first())
            .and_then(|(argument, position)| {
                commands
                    .iter()
                    .position(|command| command.matches(&argument.value))
                    .map(|index| (index, *position))
            });

        let (mut command, remaining, is_root) = match (selected, root) {
            (Some((index, position)), _) => {
                let remaining: Vec<&str> = args
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != position)
                    .map(|(_, arg)| arg.as_ref())
                    .collect();
                (commands.remove(index), remaining, false)
            }
            (None, Some(root)) => {
                let remaining: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
                (root, remaining, true)
            }
            (None, None) => {
                if let Some(argument) = input.arguments.first() {
                    user_interface.print_error(format!("Unknown command '{}'.", argument.value));
                }

                let mut header: Vec<String> = Vec::default();
                if let Some(logo) = &logo {
                    header.extend(logo.trim_matches('\n').lines().map(String::from));
                    header.push("".to_string());
                }
                header.push(format!("{name} version {version}"));
                header.push("".to_string());

                let context = HelpContext {
                    usage_name: name.clone(),
                    usage_command: Some("COMMAND"),
                    header,
                    description: None,
                    help: None,
                    commands: commands.iter().map(Command::summary).collect(),
                };
                printer.print_help(context, &definition, user_interface);
                return Err(EXIT_HELP);
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Selected command '{}' (root: {is_root}).", command.name);
        }

        if let Err(error) = command.configure_into(&mut definition) {
            user_interface.print_error(error.to_string());
            return Err(EXIT_INPUT_ERROR);
        }

        let input = tokenize(&definition, &remaining);

        if HELP_NAMES.iter().any(|help| input.has_option(help)) {
            let context = HelpContext {
                usage_name: name.clone(),
                usage_command: if is_root { None } else { Some(command.name.as_str()) },
                header: Vec::default(),
                description: command.description.as_deref(),
                help: command.help.as_deref(),
                commands: if is_root {
                    commands.iter().map(Command::summary).collect()
                } else {
                    Vec::default()
                },
            };
            printer.print_help(context, &definition, user_interface);
            return Err(EXIT_HELP);
        }

        let label = if is_root {
            name
        } else {
            format!("{name} {}", command.name)
        };

        if let Err(error) = bind(&label, &mut definition, &input, environment) {
            user_interface.print_error(error.to_string());
            return Err(EXIT_INPUT_ERROR);
        }

        Ok(Dispatch {
            command: if is_root { None } else { Some(command.name) },
            input,
        })
    }
}

fn add_global_options<'a>(
    definition: &mut Definition<'a>,
    global_options: Vec<OptionDefinition<'a>>,
) -> Result<(), ConfigError> {
    definition.add_option(OptionDefinition::new(HELP_SPEC, HelpFlag::default()).help(HELP_MESSAGE))?;

    for option in global_options {
        definition.add_option(option)?;
    }

    Ok(())
}

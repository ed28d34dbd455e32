//! `argot` is a command line toolkit for Rust, driven by compact specification strings.
//!
//! Arguments and options are declared with the same strings that appear in a program's usage text:
//! * `"NAME"` is a required argument, and `"[NAME]"` an optional one.
//! * `"-v, --verbose"` is a flag which takes no value.
//! * `"-n, --name=NAME"` is an option which requires a value, and `"--level[=LEVEL]"` one whose value may be omitted.
//!
//! Each declaration is paired with a *value*: a typed slot over a variable you own.
//! Binding converts the raw command line text and assigns it onto those variables.
//! `argot` is built around the following concerns:
//! * *Type safe binding*:
//! The user should not call any `&str -> T` conversion functions directly.
//! Values exist for `bool`, `String`, `i64`, `f32`, `f64`, `IpAddr`, `Url`, dates and durations.
//! Implement [`Value`] to bind any other type.
//! * *Environment fallback*:
//! Any option may name an environment variable.
//! When that variable is set it takes precedence over the command line.
//! * *Application paradigm*:
//! An [`Application`] collects named commands into a single Cli, with contextual help for the application and each command.
//! * *Separate phases*:
//! Tokenizing, binding and dispatch are plain functions which may be used on their own.
//!
//! # Usage
//! The following application exposes a `greet` command (aliased as `g`) and a root command:
//! ```no_run
#![doc = include_str!("../demos/greeter.rs")]
//! ```
//!
//! ```console
//! $ greeter --help
//! <logo>
//! greeter version 0.1.0
//!
//! USAGE:
//!   greeter COMMAND [OPTIONS...]
//!
//! OPTIONS:
//!   -h, --help      Display contextual help.
//!   -m, --marmite   Is marmite nice? (env: MARMITE_NICE)
//!
//! COMMANDS:
//!   greet           Greets the given user, or the world. (Alias: g)
//!
//! $ greeter g 7 -v --name=Ferris
//! Hello, Ferris!
//! Your favourite number is 7.
//! Is verbose mode enabled? true
//! Oh, by the way. Is marmite nice? false
//!
//! $ greeter greet seven
//! greeter greet: Invalid value 'seven' for argument 'FAVOURITE_NUMBER'.
//! ```
//!
//! # Specifications
//! Argument specifications are an identifier (`[A-Za-z0-9_-]+`), optionally wrapped in brackets: `"FILE"` or `"[FILE]"`.
//!
//! Option specifications are a comma separated list of names followed by an optional value part.
//! Short names are a single dash and a single character (`-v`), long names are two dashes and an identifier (`--verbose`).
//! The value part is `=NAME` (the value is required) or `[=NAME]` (the value is optional).
//! Malformed specifications are rejected when added to a [`Definition`], with a [`SpecError`] pointing at the problem.
//!
//! # Tokenizing
//! [`tokenize`] splits the raw command line into an [`Input`] of arguments and options:
//! * `--name`, `--name=value` are long options.
//! * `-n`, `-n=value` are short options, which may be folded (`-abc` is `-a -b -c`).
//! * `--` ends option processing.
//! * An option whose value is required takes the following token as its value (ex: `--name value`).
//!
//! # Binding
//! [`bind`] assigns an [`Input`] (and the environment) onto a [`Definition`]'s values.
//! * Arguments are bound in declaration order; a missing required argument is an error.
//! * Options are bound by the first of their names given on the command line; when repeated, the last occurrence wins.
//! * Flags (ex: [`BoolValue`]) given without a value are set to their [flag value](FlagValue::flag_value).
//! * Environment variables are bound last, overriding the command line.
//!
//! ```no_run
#![doc = include_str!("../demos/binding.rs")]
//! ```
//!
//! ### Defaults
//! `argot` does not specify default values.
//! Instead, the defaults come from the variable initializations; binding only overwrites what the input provides.
//!
//! ```
//! // The default for the 'verbose' option is 'false'.
//! let mut verbose: bool = false;
//! // The default for the 'name' option is 'World'.
//! let mut name: String = "World".to_string();
//!
//! // Use `verbose` and `name` in the Definition.
//! // `bind` will assign onto these variables.
//! ```
//!
//! # Exit codes
//! [`Application::run`] exits the process when no command runs:
//! * [`EXIT_HELP`] after printing help.
//! * [`EXIT_INPUT_ERROR`] when the input cannot be bound.
//!
//! [`Dispatch::finish`] maps the command's own result onto `0` or [`EXIT_COMMAND_ERROR`].
//!
//! # Features
//! * `unit_test`: enables [`Command::test_bind`], to bind a command in isolation.
//! * `tracing_debug`: emits `tracing` debug events while tokenizing, binding and dispatching.
pub use argot_builder::*;

use terminal_size::{terminal_size, Width};

use crate::application::interface::{
    chunk, ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TotalWidth, UserInterface,
    TARGET_TOTAL_FACTOR,
};
use crate::definition::Definition;

// The width used when there is no terminal (ex: output is piped).
const FALLBACK_TOTAL_WIDTH: usize = 80;
const PADDING_WIDTH: usize = 3;
const INDENT: usize = 2;

/// A command as it is listed in the `COMMANDS:` section.
pub(crate) struct CommandSummary<'c> {
    pub(crate) name: &'c str,
    pub(crate) alias: Option<&'c str>,
    pub(crate) description: Option<&'c str>,
}

/// What to say about the program or command whose help is printed.
pub(crate) struct HelpContext<'c> {
    /// Ex: `program` or `program command`.
    pub(crate) usage_name: String,
    /// Follows the usage name (ex: `COMMAND` for the application help).
    pub(crate) usage_command: Option<&'c str>,
    pub(crate) header: Vec<String>,
    pub(crate) description: Option<&'c str>,
    pub(crate) help: Option<&'c str>,
    pub(crate) commands: Vec<CommandSummary<'c>>,
}

pub(crate) struct Printer {
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal() -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(terminal_width)
    }

    pub(crate) fn new(terminal_width: Option<usize>) -> Self {
        Self { terminal_width }
    }

    fn total_width(&self) -> usize {
        self.terminal_width.unwrap_or(FALLBACK_TOTAL_WIDTH)
    }

    pub(crate) fn print_help(
        &self,
        context: HelpContext<'_>,
        definition: &Definition<'_>,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let HelpContext {
            usage_name,
            usage_command,
            header,
            description,
            help,
            mut commands,
        } = context;
        commands.sort_by(|a, b| a.name.cmp(b.name));

        let arguments: Vec<(String, String)> = definition
            .arguments()
            .iter()
            .map(|argument| {
                (
                    argument.name().to_string(),
                    argument.help().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let options: Vec<(String, String)> = definition
            .options()
            .iter()
            .map(|option| {
                let left = format!(
                    "{}{}",
                    option.spec().display_names(),
                    option.spec().display_value()
                );
                let middle = match (option.help(), option.env_var()) {
                    (Some(help), Some(env_var)) => format!("{help} (env: {env_var})"),
                    (None, Some(env_var)) => format!("(env: {env_var})"),
                    (Some(help), None) => help.to_string(),
                    (None, None) => "".to_string(),
                };
                (left, middle)
            })
            .collect();
        let commands: Vec<(String, String)> = commands
            .iter()
            .map(|command| {
                let middle = match (command.description, command.alias) {
                    (Some(description), Some(alias)) => format!("{description} (Alias: {alias})"),
                    (None, Some(alias)) => format!("(Alias: {alias})"),
                    (Some(description), None) => description.to_string(),
                    (None, None) => "".to_string(),
                };
                (command.name.to_string(), middle)
            })
            .collect();

        let all_rows = || arguments.iter().chain(options.iter()).chain(commands.iter());
        let left_column_width = all_rows()
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or(0);
        let middle_column_width = all_rows()
            .map(|(_, middle)| middle.chars().count())
            .max()
            .unwrap_or(0);
        let column_renderer = ColumnRenderer::guided(
            PaddingWidth::new(PADDING_WIDTH).unwrap(),
            LeftWidth::new(std::cmp::max(left_column_width, 1)).unwrap(),
            MiddleWidth::new(std::cmp::max(middle_column_width, 2)).unwrap(),
            INDENT,
            TotalWidth(self.total_width()),
        );
        let paragraph_width =
            ((self.total_width() as f64 * TARGET_TOTAL_FACTOR) as usize).saturating_sub(INDENT);

        for line in header {
            user_interface.print(line);
        }

        let mut usage = format!("{:INDENT$}{usage_name}", "");
        if let Some(command) = usage_command {
            usage.push_str(&format!(" {command}"));
        }
        if !options.is_empty() {
            usage.push_str(" [OPTIONS...]");
        }
        for argument in definition.arguments() {
            if argument.required() {
                usage.push_str(&format!(" {}", argument.name()));
            } else {
                usage.push_str(&format!(" [{}]", argument.name()));
            }
        }
        user_interface.print("USAGE:".to_string());
        user_interface.print(usage);

        if let Some(description) = description {
            user_interface.print("".to_string());
            for line in chunk(description, paragraph_width) {
                user_interface.print(format!("{:INDENT$}{line}", ""));
            }
        }

        for (title, rows) in [
            ("ARGUMENTS:", &arguments),
            ("OPTIONS:", &options),
            ("COMMANDS:", &commands),
        ] {
            if rows.is_empty() {
                continue;
            }

            user_interface.print("".to_string());
            user_interface.print(title.to_string());

            for (left, middle) in rows {
                for line in column_renderer.render(INDENT, left, middle) {
                    user_interface.print(line);
                }
            }
        }

        if let Some(help) = help {
            user_interface.print("".to_string());
            user_interface.print("HELP:".to_string());
            for line in chunk(help, paragraph_width) {
                user_interface.print(format!("{:INDENT$}{line}", ""));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::interface::util::InMemoryInterface;
    use crate::definition::{ArgumentDefinition, OptionDefinition};
    use crate::value::{BoolValue, IntValue, StringValue};

    fn context<'c>(commands: Vec<CommandSummary<'c>>) -> HelpContext<'c> {
        HelpContext {
            usage_name: "program".to_string(),
            usage_command: None,
            header: Vec::default(),
            description: None,
            help: None,
            commands,
        }
    }

    #[test]
    fn print_help_empty() {
        // Setup
        let printer = Printer::new(None);
        let interface = InMemoryInterface::default();
        let definition = Definition::default();

        // Execute
        printer.print_help(context(Vec::default()), &definition, &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"USAGE:
  program"#
        );
    }

    #[test]
    fn print_help_command() {
        // Setup
        let mut verbose = false;
        let mut name = String::default();
        let mut number: i64 = 0;
        let mut extra = String::default();
        let mut definition = Definition::default();
        definition
            .add_option(
                OptionDefinition::new("-v, --verbose", BoolValue::new(&mut verbose))
                    .help("Is verbose mode enabled?")
                    .env_var("VERBOSE"),
            )
            .unwrap();
        definition
            .add_option(
                OptionDefinition::new("-n, --name=NAME", StringValue::new(&mut name))
                    .help("Provide a name."),
            )
            .unwrap();
        definition
            .add_argument(
                ArgumentDefinition::new("NUMBER", IntValue::new(&mut number))
                    .help("Your favourite number."),
            )
            .unwrap();
        definition
            .add_argument(ArgumentDefinition::new("[EXTRA]", StringValue::new(&mut extra)))
            .unwrap();
        let printer = Printer::new(Some(80));
        let interface = InMemoryInterface::default();
        let help_context = HelpContext {
            usage_name: "program".to_string(),
            usage_command: Some("greet"),
            header: Vec::default(),
            description: Some("Greets the given user."),
            help: Some("You don't have to specify a name."),
            commands: Vec::default(),
        };

        // Execute
        printer.print_help(help_context, &definition, &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"USAGE:
  program greet [OPTIONS...] NUMBER [EXTRA]

  Greets the given user.

ARGUMENTS:
  NUMBER            Your favourite number.
  EXTRA

OPTIONS:
  -v, --verbose     Is verbose mode enabled? (env: VERBOSE)
  -n, --name=NAME   Provide a name.

HELP:
  You don't have to specify a name."#
        );
    }

    #[test]
    fn print_help_commands() {
        // Setup
        let printer = Printer::new(Some(80));
        let interface = InMemoryInterface::default();
        let definition = Definition::default();
        let mut help_context = context(vec![
            CommandSummary {
                name: "zebra",
                alias: None,
                description: None,
            },
            CommandSummary {
                name: "greet",
                alias: Some("g"),
                description: Some("Greets the given user."),
            },
            CommandSummary {
                name: "count",
                alias: Some("c"),
                description: None,
            },
        ]);
        help_context.header = vec!["program version 1.2.3".to_string(), "".to_string()];
        help_context.usage_command = Some("COMMAND");

        // Execute
        printer.print_help(help_context, &definition, &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"program version 1.2.3

USAGE:
  program COMMAND

COMMANDS:
  count   (Alias: c)
  greet   Greets the given user. (Alias: g)
  zebra"#
        );
    }

    #[test]
    fn print_help_wraps() {
        // Setup
        let mut value = String::default();
        let mut definition = Definition::default();
        definition
            .add_option(
                OptionDefinition::new("--value=VALUE", StringValue::new(&mut value)).help(
                    "A rather long description which will certainly not fit on a single narrow line.",
                ),
            )
            .unwrap();
        let printer = Printer::new(Some(40));
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help(context(Vec::default()), &definition, &interface);

        // Verify
        let message = interface.consume_message();
        for line in message.lines() {
            assert!(line.chars().count() <= 40, "'{line}' is too long");
        }
        assert!(message.contains("  --value=VALUE   A rather long"));
    }
}

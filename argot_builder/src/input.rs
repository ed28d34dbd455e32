use crate::definition::Definition;
use crate::model::{Input, InputArgument, InputOption, ValueMode};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Tokenize the raw command line `args` (without the program name) into arguments and options.
///
/// The scan does not validate the input against the `definition`.
/// The definition is only consulted to decide whether an option consumes the token which follows it as its value.
///
/// * `--` ends option processing; every later token is positional.
/// * `--name` and `--name=value` are long options.
/// * `-n`, `-n=value` and folded short options `-abc` (`-a -b -c`) are short options.
///   When folded, only the final option carries the `=value`.
/// * Everything else is a positional argument.
///
/// The final option of a token takes the next token as its value when it is registered with [`ValueMode::Required`]
/// and does not yet have a value (ex: `--name value`).
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{tokenize, Definition, OptionDefinition, StringValue};
///
/// let mut name = String::default();
/// let mut definition = Definition::default();
/// definition
///     .add_option(OptionDefinition::new("-n, --name=NAME", StringValue::new(&mut name)))
///     .unwrap();
///
/// let input = tokenize(&definition, &["--name", "world", "-vq", "--", "-x"]);
/// let options: Vec<(&str, &str)> = input
///     .options
///     .iter()
///     .map(|o| (o.name.as_str(), o.value.as_str()))
///     .collect();
/// assert_eq!(options, vec![("name", "world"), ("v", ""), ("q", "")]);
/// assert_eq!(input.arguments[0].value, "-x");
/// ```
pub fn tokenize(definition: &Definition<'_>, args: &[impl AsRef<str>]) -> Input {
    tokenize_with_positions(definition, args).0
}

/// Tokenize as [`tokenize`], also reporting the index into `args` of each positional argument.
pub(crate) fn tokenize_with_positions(
    definition: &Definition<'_>,
    args: &[impl AsRef<str>],
) -> (Input, Vec<usize>) {
    let mut input = Input::default();
    let mut positions = Vec::default();
    let mut options_ended = false;
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_ref();

        if arg == "--" {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Options ended at token {i}.");
            }

            options_ended = true;
            i += 1;
            continue;
        }

        let is_long = arg.len() > 2 && arg.starts_with("--");
        let is_short = arg.len() > 1 && arg.starts_with('-');

        if options_ended || !(is_long || is_short) {
            input.arguments.push(InputArgument {
                value: arg.to_string(),
            });
            positions.push(i);
            i += 1;
            continue;
        }

        let mut options = if is_long {
            long_option(&arg[2..])
        } else {
            short_options(&arg[1..])
        };

        if let Some(last) = options.last_mut() {
            match definition.option(&last.name) {
                Some(parameter)
                    if parameter.value_mode() == ValueMode::Required
                        && !last.has_value()
                        && i + 1 < args.len() =>
                {
                    i += 1;
                    last.value = args[i].as_ref().to_string();

                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Option '{}' consumed token {i} as its value.", last.name);
                    }
                }
                Some(_) => {}
                None => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Option '{}' is not defined; not consuming a value.", last.name);
                    }
                }
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token '{arg}' produced options {options:?}.");
        }

        input.options.extend(options);
        i += 1;
    }

    (input, positions)
}

fn split_value(token: &str) -> (&str, &str) {
    token.split_once('=').unwrap_or((token, ""))
}

fn long_option(token: &str) -> Vec<InputOption> {
    let (key, value) = split_value(token);
    vec![InputOption::new(key, value)]
}

fn short_options(token: &str) -> Vec<InputOption> {
    let (key, value) = split_value(token);
    let characters: Vec<char> = key.chars().collect();

    match characters.split_last() {
        Some((last, folded)) => folded
            .iter()
            .map(|c| InputOption::new(c.to_string(), ""))
            .chain(std::iter::once(InputOption::new(last.to_string(), value)))
            .collect(),
        // Only reachable for `-=value`.
        None => vec![InputOption::new(key, value)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::OptionDefinition;
    use crate::value::{BoolValue, StringValue};
    use rstest::rstest;

    fn options(input: &Input) -> Vec<(&str, &str)> {
        input
            .options
            .iter()
            .map(|o| (o.name.as_str(), o.value.as_str()))
            .collect()
    }

    fn arguments(input: &Input) -> Vec<&str> {
        input.arguments.iter().map(|a| a.value.as_str()).collect()
    }

    #[test]
    fn empty() {
        let definition = Definition::default();
        let args: &[&str] = &[];
        let input = tokenize(&definition, args);
        assert_eq!(input, Input::default());
    }

    #[test]
    fn arguments_only() {
        let definition = Definition::default();
        let input = tokenize(&definition, &["lorem", "ipsum"]);
        assert_eq!(arguments(&input), vec!["lorem", "ipsum"]);
        assert!(input.options.is_empty());
    }

    #[rstest]
    #[case(vec!["--"], vec![], vec![])]
    #[case(vec!["--", "--"], vec![], vec![])]
    #[case(vec!["--", "-a", "--b=c"], vec!["-a", "--b=c"], vec![])]
    #[case(vec!["-a", "--", "x"], vec!["x"], vec![("a", "")])]
    #[case(vec!["-"], vec!["-"], vec![])]
    #[case(vec!["--x"], vec![], vec![("x", "")])]
    #[case(vec!["-x"], vec![], vec![("x", "")])]
    #[case(vec!["--foo=bar"], vec![], vec![("foo", "bar")])]
    #[case(vec!["--foo=bar=baz"], vec![], vec![("foo", "bar=baz")])]
    #[case(vec!["--foo="], vec![], vec![("foo", "")])]
    #[case(vec!["-f=bar"], vec![], vec![("f", "bar")])]
    #[case(vec!["-abc=d"], vec![], vec![("a", ""), ("b", ""), ("c", "d")])]
    #[case(vec!["-ab", "x", "--y"], vec!["x"], vec![("a", ""), ("b", ""), ("y", "")])]
    #[case(vec!["-µ"], vec![], vec![("µ", "")])]
    fn undefined(
        #[case] args: Vec<&str>,
        #[case] expected_arguments: Vec<&str>,
        #[case] expected_options: Vec<(&str, &str)>,
    ) {
        let definition = Definition::default();
        let input = tokenize(&definition, &args);
        assert_eq!(arguments(&input), expected_arguments);
        assert_eq!(options(&input), expected_options);
    }

    #[test]
    fn folded_flags() {
        let mut a = false;
        let mut b = false;
        let mut definition = Definition::default();
        definition
            .add_option(OptionDefinition::new("-a", BoolValue::new(&mut a)))
            .unwrap();
        definition
            .add_option(OptionDefinition::new("-b", BoolValue::new(&mut b)))
            .unwrap();

        let input = tokenize(&definition, &["-ab"]);
        assert_eq!(options(&input), vec![("a", ""), ("b", "")]);
        assert!(input.arguments.is_empty());
    }

    #[rstest]
    #[case(vec!["--foo", "bar"], vec![], vec![("foo", "bar")])]
    #[case(vec!["-f", "bar"], vec![], vec![("f", "bar")])]
    #[case(vec!["--foo=bar", "baz"], vec!["baz"], vec![("foo", "bar")])]
    #[case(vec!["--foo"], vec![], vec![("foo", "")])]
    #[case(vec!["--foo", "--bar"], vec![], vec![("foo", "--bar")])]
    #[case(vec!["--foo", "--"], vec![], vec![("foo", "--")])]
    #[case(vec!["-xf", "bar"], vec![], vec![("x", ""), ("f", "bar")])]
    #[case(vec!["-fx", "bar"], vec!["bar"], vec![("f", ""), ("x", "")])]
    #[case(vec!["--", "--foo", "bar"], vec!["--foo", "bar"], vec![])]
    #[case(vec!["--foo", "a", "--foo", "b"], vec![], vec![("foo", "a"), ("foo", "b")])]
    fn required_value(
        #[case] args: Vec<&str>,
        #[case] expected_arguments: Vec<&str>,
        #[case] expected_options: Vec<(&str, &str)>,
    ) {
        let mut foo = String::default();
        let mut definition = Definition::default();
        definition
            .add_option(OptionDefinition::new("-f, --foo=FOO", StringValue::new(&mut foo)))
            .unwrap();

        let input = tokenize(&definition, &args);
        assert_eq!(arguments(&input), expected_arguments);
        assert_eq!(options(&input), expected_options);
    }

    #[rstest]
    #[case(vec!["--level", "3"], vec!["3"], vec![("level", "")])]
    #[case(vec!["--level=3"], vec![], vec![("level", "3")])]
    fn optional_value(
        #[case] args: Vec<&str>,
        #[case] expected_arguments: Vec<&str>,
        #[case] expected_options: Vec<(&str, &str)>,
    ) {
        let mut level = String::default();
        let mut definition = Definition::default();
        definition
            .add_option(OptionDefinition::new("--level[=LEVEL]", StringValue::new(&mut level)))
            .unwrap();

        let input = tokenize(&definition, &args);
        assert_eq!(arguments(&input), expected_arguments);
        assert_eq!(options(&input), expected_options);
    }

    #[test]
    fn unregistered_trailing_option() {
        let mut a = String::default();
        let mut definition = Definition::default();
        definition
            .add_option(OptionDefinition::new("-a=A", StringValue::new(&mut a)))
            .unwrap();

        // The cluster ends with an unknown option, so nothing consumes "next".
        let input = tokenize(&definition, &["-ax", "next", "-b", "last"]);
        assert_eq!(options(&input), vec![("a", ""), ("x", ""), ("b", "")]);
        assert_eq!(arguments(&input), vec!["next", "last"]);
    }

    #[test]
    fn positions() {
        let mut foo = String::default();
        let mut definition = Definition::default();
        definition
            .add_option(OptionDefinition::new("--foo=FOO", StringValue::new(&mut foo)))
            .unwrap();

        let (input, positions) =
            tokenize_with_positions(&definition, &["--foo", "a", "b", "-x", "--", "c"]);
        assert_eq!(arguments(&input), vec!["b", "c"]);
        assert_eq!(positions, vec![2, 5]);
    }

    #[test]
    fn owned_arguments() {
        let definition = Definition::default();
        let args: Vec<String> = vec!["a".to_string(), "--b".to_string()];
        let input = tokenize(&definition, &args);
        assert_eq!(arguments(&input), vec!["a"]);
        assert_eq!(options(&input), vec![("b", "")]);
    }
}

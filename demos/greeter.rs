use argot::{
    Application, ArgumentDefinition, BoolValue, Command, IntValue, OptionDefinition, StringValue,
};

const LOGO: &str = r#"
                                  #
                   ###            ##
 ####### #######  ###   #######  ###  ##
      ##      ## ###         ## #### ##
 ###  ## ##   ## ###    ##   ## #######
 ###  ## ##   ## ###    ##   ## ### ###
 ######   #####  ####### #####  ###  ##
                                      #
"#;

fn main() {
    let mut is_marmite_nice = false;
    let mut is_verbose = false;
    let mut name = "World".to_string();
    let mut favourite_number: i64 = 0;
    let mut test = String::default();
    let mut test2 = String::default();

    let verbose_value = BoolValue::new(&mut is_verbose);
    let name_value = StringValue::new(&mut name);
    let favourite_number_value = IntValue::new(&mut favourite_number);
    let test_value = StringValue::new(&mut test);
    let test2_value = StringValue::new(&mut test2);

    let dispatch = Application::new("greeter", "0.1.0")
        .logo(LOGO)
        .global_option(
            OptionDefinition::new("-m, --marmite", BoolValue::new(&mut is_marmite_nice))
                .help("Is marmite nice?")
                .env_var("MARMITE_NICE"),
        )
        .command(
            Command::new("greet")
                .alias("g")
                .description("Greets the given user, or the world.")
                .help("You don't have to specify a name.")
                .configure(move |definition| {
                    definition.add_option(
                        OptionDefinition::new("-v, --verbose", verbose_value)
                            .help("Is verbose mode enabled?")
                            .env_var("EXAMPLE_VERBOSE"),
                    )?;
                    definition.add_option(
                        OptionDefinition::new("-n, --name=NAME", name_value)
                            .help("Provide a name for the greeting.")
                            .env_var("EXAMPLE_NAME"),
                    )?;
                    definition.add_argument(
                        ArgumentDefinition::new("FAVOURITE_NUMBER", favourite_number_value)
                            .help("Provide your favourite number."),
                    )
                }),
        )
        .root(Command::new("hello").configure(move |definition| {
            definition.add_option(
                OptionDefinition::new("--test=TEST", test_value)
                    .help("Test option for the root command."),
            )?;
            definition.add_argument(
                ArgumentDefinition::new("TEST2", test2_value)
                    .help("Test argument for the root command."),
            )
        }))
        .run();

    let result: Result<(), String> = match dispatch.command() {
        Some("greet") => {
            println!("Hello, {name}!");
            println!("Your favourite number is {favourite_number}.");
            println!("Is verbose mode enabled? {is_verbose}");
            println!("Oh, by the way. Is marmite nice? {is_marmite_nice}");
            Ok(())
        }
        Some(other) => Err(format!("Command '{other}' is not implemented.")),
        None => {
            println!("Hello, World!");
            println!("test: {test:?}, TEST2: {test2:?}");
            Ok(())
        }
    };

    std::process::exit(dispatch.finish(result));
}

use argot::{
    bind, tokenize, ArgumentDefinition, ConfigError, Definition, DurationValue, Float64Value,
    OptionDefinition, StringValue, UrlValue,
};
use chrono::TimeDelta;
use url::Url;

struct Probe {
    target: Url,
    timeout: TimeDelta,
    ratio: f64,
    label: String,
}

fn configure<'a>(definition: &mut Definition<'a>, probe: &'a mut Probe) -> Result<(), ConfigError> {
    definition.add_argument(
        ArgumentDefinition::new("[TARGET]", UrlValue::new(&mut probe.target))
            .help("The url to probe."),
    )?;
    definition.add_option(
        OptionDefinition::new("-t, --timeout=DURATION", DurationValue::new(&mut probe.timeout))
            .help("How long to wait (ex: 1m30s).")
            .env_var("BINDING_TIMEOUT"),
    )?;
    definition.add_option(
        OptionDefinition::new("-r, --ratio[=RATIO]", Float64Value::new(&mut probe.ratio))
            .help("The sampling ratio."),
    )?;
    definition.add_option(
        OptionDefinition::new("-l, --label=LABEL", StringValue::new(&mut probe.label))
            .help("A label for the probe."),
    )
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let environment: Vec<String> = std::env::vars()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();

    let mut probe = Probe {
        target: Url::parse("http://localhost:8080/").expect("static url must parse"),
        timeout: TimeDelta::seconds(30),
        ratio: 1.0,
        label: String::default(),
    };

    let mut definition = Definition::new();
    configure(&mut definition, &mut probe).expect("Invalid definition");

    let input = tokenize(&definition, &args);
    if let Err(error) = bind("binding", &mut definition, &input, &environment) {
        eprintln!("{error}");
        std::process::exit(1);
    }
    drop(definition);

    println!("target:  {}", probe.target);
    println!("timeout: {}ms", probe.timeout.num_milliseconds());
    println!("ratio:   {}", probe.ratio);
    println!("label:   {:?}", probe.label);
}

//! subcmd demo - a small program wired through the dispatcher.
//!
//! Shows the intended embedding: load configuration, set up tracing,
//! register commands and flags, dispatch, and turn errors into a non-zero
//! exit status.

use std::{
    env,
    error::Error,
    io::{self, Write},
    path::PathBuf,
    process,
};

use subcmd::{
    cli::{
        CliError, Command, CommandEntry, CommandRegistry, CommandResult, Context, Dispatcher,
        FlagSet, formatting::format_error,
    },
    config::{Config, ConfigPaths, ProgramInfo},
    tracing_config,
};

const APP_NAME: &str = "subcmd";

/// Overrides the configuration file location.
const CONFIG_ENV: &str = "SUBCMD_CONFIG";

fn main() {
    if let Err(e) = real_main() {
        eprintln!("{}", format_error(&e.to_string()));
        process::exit(1);
    }
}

fn real_main() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;
    tracing_config::init(config.general.log_level)?;

    let dispatcher = build_dispatcher(config.program);

    let mut stdout = io::stdout().lock();
    if env::args_os().len() <= 1 {
        dispatcher.banner(&mut stdout)?;
    }
    dispatcher.dispatch_env(&mut stdout)?;
    stdout.flush()?;

    Ok(())
}

fn load_config() -> Result<Config, Box<dyn Error>> {
    let path = match env::var_os(CONFIG_ENV) {
        Some(path) => PathBuf::from(path),
        None => match ConfigPaths::config_file(APP_NAME) {
            Ok(path) => path,
            Err(_) => return Ok(Config::default()),
        },
    };

    Ok(Config::load_or_default(&path)?)
}

fn build_dispatcher(mut program: ProgramInfo) -> Dispatcher {
    program.name.get_or_insert_with(|| APP_NAME.to_string());
    program
        .version
        .get_or_insert_with(|| env!("CARGO_PKG_VERSION").to_string());

    let mut flags = FlagSet::new();
    flags
        .define("age", "0", "Your age.")
        .define("city", "", "Your city of residence.")
        .define("greeting", "Hello", "Word used to greet.")
        .switch("loud", "Shout the greeting.");

    let mut registry = CommandRegistry::new();
    registry.register(
        "greet",
        CommandEntry::new(GreetCommand)
            .description("Says hello")
            .usage("[--greeting WORD] [--loud] greet [name]")
            .arguments(["greeting", "loud"]),
    );
    registry.register(
        "profile",
        CommandEntry::new(ProfileCommand)
            .description("Tells what it knows about your age and city")
            .usage("[--age N] [--city NAME] profile")
            .arguments(["age", "city"]),
    );
    registry.register(
        "fail",
        CommandEntry::new(FailCommand)
            .description("Always fails, then shows its usage")
            .usage("fail"),
    );

    Dispatcher::new(registry, flags).with_program(program)
}

struct GreetCommand;

impl Command for GreetCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult {
        let greeting = ctx.flag("greeting").unwrap_or("Hello");
        let name = ctx.args().first().map_or("world", String::as_str);

        let mut line = format!("{greeting}, {name}!");
        if ctx.is_set("loud") {
            line = line.to_uppercase();
        }

        writeln!(ctx.out(), "{line}")?;
        Ok(())
    }
}

struct ProfileCommand;

impl Command for ProfileCommand {
    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult {
        let age = ctx.parse_flag::<u32>("age")?.unwrap_or(0);
        let city = ctx.flag("city").unwrap_or_default().to_string();

        let out = ctx.out();
        if age == 0 {
            writeln!(out, "You didn't tell me your age.")?;
        } else {
            writeln!(out, "I see, you're {age} years old.")?;
        }

        if city.is_empty() {
            writeln!(out, "You didn't tell me the name of your city.")?;
        } else {
            writeln!(out, "So, you live in {city}")?;
        }

        Ok(())
    }
}

struct FailCommand;

impl Command for FailCommand {
    fn execute(&self, _ctx: &mut Context<'_>) -> CommandResult {
        Err(CliError::ExecutionFailed(
            "this command always fails".to_string(),
        ))
    }
}

//! Unit tests for CLI module
//!
//! Tests registration, usage and help rendering, execution and dispatch
//! against in-memory output buffers.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::io::Write;

use crate::{
    cli::{
        CliError, Command, CommandEntry, CommandRegistry, CommandResult, Context, Dispatcher,
        FlagKind, FlagSet, HelpCommand,
        formatting::{command_lines, flag_line, format_error},
    },
    config::ProgramInfo,
};

struct Echo;

impl Command for Echo {
    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult {
        let line = ctx.args().join(" ");
        writeln!(ctx.out(), "{line}")?;
        Ok(())
    }
}

struct ShowFlags;

impl Command for ShowFlags {
    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult {
        let city = ctx.flag("city").unwrap_or("-").to_string();
        let age = ctx.parse_flag::<u32>("age")?;
        let loud = ctx.is_set("loud");
        writeln!(ctx.out(), "city={city} age={age:?} loud={loud}")?;
        Ok(())
    }
}

struct Quiet;

impl Command for Quiet {
    fn execute(&self, _ctx: &mut Context<'_>) -> CommandResult {
        Err(CliError::ExecutionFailed("quiet failure".to_string()))
    }
}

/// Sink that rejects every write.
struct ClosedSink;

impl Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("sink closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Broken;

impl Command for Broken {
    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult {
        writeln!(ctx.out(), "about to fail")?;
        Err(CliError::ExecutionFailed("broken on purpose".to_string()))
    }
}

fn flags() -> FlagSet {
    let mut flags = FlagSet::new();
    flags
        .define("age", "0", "Your age.")
        .define("city", "", "Your city of residence.")
        .switch("loud", "Shout.");
    flags
}

fn dispatcher_with(registry: CommandRegistry) -> Dispatcher {
    Dispatcher::new(registry, flags()).with_bin_name("demo")
}

fn sample_dispatcher() -> Dispatcher {
    let mut registry = CommandRegistry::new();
    registry.register(
        "echo",
        CommandEntry::new(Echo)
            .description("Prints its arguments")
            .usage("echo [words...]"),
    );
    registry.register(
        "show",
        CommandEntry::new(ShowFlags)
            .description("Shows flag values")
            .usage("[--age N] [--city NAME] [--loud] show")
            .arguments(["age", "city", "loud"]),
    );
    registry.register(
        "broken",
        CommandEntry::new(Broken)
            .description("Always fails")
            .usage("broken"),
    );
    dispatcher_with(registry)
}

fn output_of(run: impl FnOnce(&mut Vec<u8>) -> CommandResult) -> (CommandResult, String) {
    let mut out = Vec::new();
    let result = run(&mut out);
    (result, String::from_utf8(out).unwrap())
}

mod registry {
    use super::*;

    #[test]
    fn new_registry_contains_help() {
        let registry = CommandRegistry::new();

        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        let help = registry.get("help").unwrap();
        assert_eq!(help.name(), "help");
        assert_eq!(
            help.description_text(),
            Some("Shows information about the given command.")
        );
        assert_eq!(help.usage_text(), Some("help <command>"));
    }

    #[test]
    fn register_sets_entry_name_from_key() {
        let mut registry = CommandRegistry::new();
        registry.register("echo", CommandEntry::new(Echo));

        assert!(registry.contains("echo"));
        assert_eq!(registry.get("echo").unwrap().name(), "echo");
    }

    #[test]
    fn names_are_sorted_regardless_of_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register("zeta", CommandEntry::new(Echo));
        registry.register("alpha", CommandEntry::new(Echo));
        registry.register("mid", CommandEntry::new(Echo));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["alpha", "help", "mid", "zeta"]);

        let entry_names: Vec<&str> = registry.entries().map(|entry| entry.name()).collect();
        assert_eq!(entry_names, names);
    }

    #[test]
    #[should_panic(expected = "Command \"echo\" was already registered.")]
    fn duplicate_registration_panics() {
        let mut registry = CommandRegistry::new();
        registry.register("echo", CommandEntry::new(Echo));
        registry.register("echo", CommandEntry::new(Broken));
    }

    #[test]
    #[should_panic(expected = "Command \"help\" was already registered.")]
    fn builtin_help_cannot_be_replaced() {
        let mut registry = CommandRegistry::new();
        registry.register("help", CommandEntry::new(Echo));
    }

    #[test]
    #[should_panic(expected = "Command names must not be empty.")]
    fn empty_name_panics() {
        let mut registry = CommandRegistry::new();
        registry.register("", CommandEntry::new(Echo));
    }

    #[test]
    fn empty_metadata_strings_count_as_unset() {
        let entry = CommandEntry::new(Echo).description("").usage("");

        assert_eq!(entry.description_text(), None);
        assert_eq!(entry.usage_text(), None);
    }
}

mod flags {
    use super::*;

    #[test]
    fn lookup_returns_definitions() {
        let flags = flags();

        let age = flags.lookup("age").unwrap();
        assert_eq!(age.default, "0");
        assert_eq!(age.description, "Your age.");
        assert_eq!(age.kind, FlagKind::Value);

        let loud = flags.lookup("loud").unwrap();
        assert_eq!(loud.default, "false");
        assert_eq!(loud.kind, FlagKind::Switch);

        assert!(flags.lookup("missing").is_none());
        assert_eq!(flags.len(), 3);
    }

    #[test]
    #[should_panic(expected = "Flag \"--age\" was already defined.")]
    fn duplicate_flag_panics() {
        let mut flags = flags();
        flags.define("age", "1", "Again.");
    }

    #[test]
    #[should_panic(expected = "Flag names must not be empty.")]
    fn empty_flag_name_panics() {
        FlagSet::new().define("", "x", "Nameless.");
    }

    #[test]
    #[should_panic(expected = "Flag names must not be empty.")]
    fn empty_switch_name_panics() {
        FlagSet::new().switch("", "Nameless.");
    }

    #[test]
    fn repeated_flag_keeps_last_value() {
        let invocation = flags()
            .parse("demo", ["--age", "1", "--age", "2", "--loud", "--loud", "show"])
            .unwrap();

        assert_eq!(invocation.positionals, ["show"]);
        assert_eq!(invocation.values.get("age").map(String::as_str), Some("2"));
        assert_eq!(
            invocation.values.get("loud").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn parse_stops_at_first_positional() {
        let invocation = flags()
            .parse("demo", ["--age", "30", "show", "--city", "Paris", "x"])
            .unwrap();

        assert_eq!(invocation.positionals, ["show", "--city", "Paris", "x"]);
        assert_eq!(invocation.values.get("age").map(String::as_str), Some("30"));
        assert_eq!(invocation.values.get("city"), None);
        assert_eq!(
            invocation.values.get("loud").map(String::as_str),
            Some("false")
        );
    }

    #[test]
    fn parse_empty_args_yields_defaults() {
        let invocation = flags().parse("demo", Vec::<String>::new()).unwrap();

        assert!(invocation.positionals.is_empty());
        assert_eq!(invocation.values.get("age").map(String::as_str), Some("0"));
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        let result = flags().parse("demo", ["--nope", "show"]);

        match result {
            Err(CliError::InvalidArguments(message)) => assert!(message.contains("--nope")),
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }
}

mod usage {
    use super::*;

    #[test]
    fn usage_renders_description_usage_and_arguments() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.usage("show", out));

        result.unwrap();
        assert_eq!(
            text,
            "Command \"show\": Shows flag values\n\
             \n\
             Usage: demo [--age N] [--city NAME] [--loud] show\n\
             \n\
             Arguments for command \"show\":\n\
             \n\
             \t--age [0]: Your age.\n\
             \t--city []: Your city of residence.\n\
             \t--loud [false]: Shout.\n\
             \n"
        );
    }

    #[test]
    fn usage_description_line_matches_every_entry() {
        let dispatcher = sample_dispatcher();

        for entry in dispatcher.registry().entries() {
            let text = dispatcher.render_usage(entry.name()).unwrap();
            let first_line = text.lines().next().unwrap();
            let expected = format!(
                "Command \"{}\": {}",
                entry.name(),
                entry.description_text().unwrap()
            );
            assert_eq!(first_line, expected);
        }
    }

    #[test]
    fn usage_omits_missing_parts() {
        let mut registry = CommandRegistry::new();
        registry.register("bare", CommandEntry::new(Echo));
        registry.register("described", CommandEntry::new(Echo).description("Only a description"));
        let dispatcher = dispatcher_with(registry);

        assert_eq!(dispatcher.render_usage("bare").unwrap(), "");
        assert_eq!(
            dispatcher.render_usage("described").unwrap(),
            "Command \"described\": Only a description\n"
        );
    }

    #[test]
    fn usage_of_unknown_command_fails() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.usage("nonexistent", out));

        let err = result.unwrap_err();
        assert!(matches!(&err, CliError::CommandNotFound(name) if name == "nonexistent"));
        assert!(err.to_string().contains("nonexistent"));
        assert!(text.is_empty());
    }

    #[test]
    #[should_panic(expected = "Flag \"--height\" is expected for command \"tall\" but it's not defined.")]
    fn usage_with_undefined_flag_panics() {
        let mut registry = CommandRegistry::new();
        registry.register(
            "tall",
            CommandEntry::new(Echo).arguments(["age", "height"]),
        );
        let dispatcher = dispatcher_with(registry);

        let _ = dispatcher.render_usage("tall");
    }
}

mod help {
    use super::*;

    #[test]
    fn help_listing_is_sorted_and_complete() {
        let mut registry = CommandRegistry::new();
        registry.register("zeta", CommandEntry::new(Echo).description("last"));
        registry.register("alpha", CommandEntry::new(Echo).description("first"));
        let dispatcher = dispatcher_with(registry);

        let (result, text) = output_of(|out| dispatcher.help("", out));

        result.unwrap();
        assert_eq!(
            text,
            "Usage: demo <arguments> <command>\n\
             \n\
             Available commands for demo:\n\
             \n\
             \talpha  first\n\
             \thelp   Shows information about the given command.\n\
             \tzeta   last\n\
             \n\
             Use \"demo help <command>\" to view more information about a command.\n"
        );
    }

    #[test]
    fn help_lists_each_name_once() {
        let dispatcher = sample_dispatcher();
        let text = dispatcher.render_help("").unwrap();

        for name in dispatcher.registry().names() {
            let needle = format!("\t{name} ");
            assert_eq!(text.matches(&needle).count(), 1, "{name} in {text}");
        }
    }

    #[test]
    fn help_with_selector_renders_usage() {
        let dispatcher = sample_dispatcher();

        assert_eq!(
            dispatcher.render_help("echo").unwrap(),
            dispatcher.render_usage("echo").unwrap()
        );
    }

    #[test]
    fn help_with_unknown_selector_fails() {
        let dispatcher = sample_dispatcher();

        assert!(matches!(
            dispatcher.render_help("nonexistent"),
            Err(CliError::CommandNotFound(name)) if name == "nonexistent"
        ));
    }

    #[test]
    fn help_command_without_target_shows_own_usage() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.execute("help", out));

        result.unwrap();
        assert_eq!(text, dispatcher.render_usage("help").unwrap());
        assert_eq!(
            text,
            "Command \"help\": Shows information about the given command.\n\
             \n\
             Usage: demo help <command>\n"
        );
    }

    #[test]
    fn help_command_with_target_renders_usage() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.dispatch(["help", "echo"], out));

        result.unwrap();
        assert_eq!(text, dispatcher.render_usage("echo").unwrap());
    }

    #[test]
    fn help_command_with_unknown_target_shows_own_usage() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.dispatch(["help", "nope"], out));

        assert!(matches!(result, Err(CliError::CommandNotFound(name)) if name == "nope"));
        assert!(text.starts_with("Command \"help\": Shows information about the given command.\n"));
        assert!(text.contains("Usage: demo help <command>\n"));
    }

    #[test]
    fn help_command_registers_under_other_names() {
        let mut registry = CommandRegistry::new();
        registry.register("assist", CommandEntry::new(HelpCommand));
        let dispatcher = dispatcher_with(registry);

        let (result, text) = output_of(|out| dispatcher.dispatch(["assist"], out));
        result.unwrap();
        assert_eq!(text, dispatcher.render_usage("help").unwrap());

        let (result, text) = output_of(|out| dispatcher.dispatch(["assist", "help"], out));
        result.unwrap();
        assert!(text.starts_with("Command \"help\": "));
    }
}

mod execute {
    use super::*;

    #[test]
    fn execute_runs_command_with_defaults() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.execute("show", out));

        result.unwrap();
        assert_eq!(text, "city=- age=Some(0) loud=false\n");
    }

    #[test]
    fn execute_unknown_command_fails() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.execute("nonexistent", out));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
        assert!(matches!(err, CliError::CommandNotFound(_)));
        assert!(text.is_empty());
    }

    #[test]
    fn failing_command_prints_usage_before_returning_error() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.execute("broken", out));

        match result {
            Err(CliError::ExecutionFailed(message)) => assert_eq!(message, "broken on purpose"),
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
        assert_eq!(
            text,
            "about to fail\n\
             Command \"broken\": Always fails\n\
             \n\
             Usage: demo broken\n\
             \n"
        );
    }

    #[test]
    fn failing_command_error_survives_unwritable_output() {
        let mut registry = CommandRegistry::new();
        registry.register(
            "quiet",
            CommandEntry::new(Quiet)
                .description("Fails without output")
                .usage("quiet"),
        );
        let dispatcher = dispatcher_with(registry);

        let result = dispatcher.execute("quiet", &mut ClosedSink);

        match result {
            Err(CliError::ExecutionFailed(message)) => assert_eq!(message, "quiet failure"),
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn dispatch_without_command_shows_listing() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.dispatch(Vec::<String>::new(), out));

        result.unwrap();
        assert_eq!(text, dispatcher.render_help("").unwrap());
    }

    #[test]
    fn dispatch_with_only_flags_shows_listing() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.dispatch(["--loud"], out));

        result.unwrap();
        assert!(text.starts_with("Usage: demo <arguments> <command>"));
    }

    #[test]
    fn dispatch_passes_flags_and_remaining_args() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| {
            dispatcher.dispatch(["--city", "Lisbon", "--age", "41", "--loud", "show"], out)
        });

        result.unwrap();
        assert_eq!(text, "city=Lisbon age=Some(41) loud=true\n");

        let (result, text) = output_of(|out| dispatcher.dispatch(["echo", "a", "--b", "c"], out));

        result.unwrap();
        assert_eq!(text, "a --b c\n");
    }

    #[test]
    fn dispatch_unknown_command_fails() {
        let dispatcher = sample_dispatcher();

        let (result, _) = output_of(|out| dispatcher.dispatch(["missing"], out));

        let err = result.unwrap_err();
        assert!(matches!(&err, CliError::CommandNotFound(name) if name == "missing"));
        assert_eq!(err.to_string(), "No such command \"missing\".");
    }

    #[test]
    fn dispatch_bad_flag_value_reports_usage() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.dispatch(["--age", "old", "show"], out));

        match result {
            Err(CliError::InvalidArguments(message)) => {
                assert!(message.contains("'old'"));
                assert!(message.contains("--age"));
            }
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
        assert!(text.starts_with("Command \"show\": Shows flag values\n"));
    }

    #[test]
    fn dispatch_unknown_flag_fails_before_lookup() {
        let dispatcher = sample_dispatcher();

        let (result, text) = output_of(|out| dispatcher.dispatch(["--verbose", "echo"], out));

        assert!(matches!(result, Err(CliError::InvalidArguments(_))));
        assert!(text.is_empty());
    }

    #[test]
    fn banner_uses_program_info() {
        let dispatcher = sample_dispatcher().with_program(ProgramInfo {
            version: Some("1.0".to_string()),
            ..ProgramInfo::new("demo")
        });

        let mut out = Vec::new();
        dispatcher.banner(&mut out).unwrap();

        assert_eq!(out, b"demo (1.0)\n\n");
    }
}

mod formatting {
    use super::*;

    #[test]
    fn command_lines_pad_to_longest_name() {
        let lines = command_lines(&[("a", "one"), ("long-name", "two"), ("mid", "")]);

        assert_eq!(lines, ["\ta          one", "\tlong-name  two", "\tmid"]);
    }

    #[test]
    fn command_lines_empty() {
        assert!(command_lines(&[]).is_empty());
    }

    #[test]
    fn flag_line_shows_default_in_brackets() {
        let flags = flags();

        assert_eq!(flag_line(flags.lookup("age").unwrap()), "\t--age [0]: Your age.");
    }

    #[test]
    fn format_error_prefixes_message() {
        assert_eq!(format_error("boom"), "Error: boom");
    }
}

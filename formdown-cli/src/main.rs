// Command-line interface for FormDown
//
// This binary turns FormDown documents (markdown with embedded form fields) into HTML,
// and exposes the parsed structure as JSON for tooling.
//
// Usage:
//  formdown <input> [--output <file>]          - Render to HTML (default)
//  formdown render <input> [--output <file>]   - Same as above (explicit)
//  formdown parse <input> [--legacy]           - Parsed document as JSON
//  formdown schema <input>                     - Field schema as JSON
//
// Use `-` as the input to read from stdin.
//
// Extra Parameters:
//
// Configuration values can be overridden with --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and applies the value over the loaded config.
// Example:
//  formdown signup.md --extra-default-method POST --extra-document page

use clap::{Arg, ArgAction, Command, ValueHint};
use formdown_config::{DocumentMode, FormdownConfig, Loader};
use formdown_core::{wrap_document, Formdown, FormdownOptions};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const SUBCOMMANDS: &[&str] = &["render", "parse", "schema", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("formdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render FormDown documents to HTML forms")
        .long_about(
            "formdown renders markdown documents with embedded form fields to HTML.\n\n\
            Commands:\n  \
            - render: Generate HTML (default command)\n  \
            - parse:  Print the parsed document as JSON\n  \
            - schema: Print the field schema as JSON\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration values:\n  \
            default-action, default-method, document (fragment|page), title.\n\n\
            Examples:\n  \
            formdown signup.md                          # HTML fragment to stdout\n  \
            formdown signup.md -o signup.html --extra-document page\n  \
            cat signup.md | formdown parse -            # Parsed JSON from stdin",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a formdown.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser and generator decisions to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render a document to HTML (default command)")
                .arg(input_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the parsed document as JSON")
                .arg(input_arg())
                .arg(
                    Arg::new("legacy")
                        .long("legacy")
                        .help("Fields and errors only; fail on invalid field names")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("schema")
                .about("Print the name-keyed field schema as JSON")
                .arg(input_arg()),
        )
}

/// Prepend `render` when the first argument is an input rather than a subcommand.
fn inject_default_command(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    let is_input = first == "-" || !first.starts_with('-');
    if !is_input || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut injected = vec![args[0].clone(), "render".to_string()];
    injected.extend_from_slice(&args[1..]);
    Some(injected)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => match inject_default_command(&cleaned_args) {
            Some(new_args) => match cli.try_get_matches_from(&new_args) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    init_tracing(matches.get_flag("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        tracing::warn!(parameter = %key, "ignoring unknown --extra parameter");
    }

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            let input = required(sub_matches, "input");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_render_command(input, output, &config);
        }
        Some(("parse", sub_matches)) => {
            let input = required(sub_matches, "input");
            handle_parse_command(input, sub_matches.get_flag("legacy"), &config);
        }
        Some(("schema", sub_matches)) => {
            handle_schema_command(required(sub_matches, "input"), &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a clap::ArgMatches, id: &str) -> &'a str {
    match matches.get_one::<String>(id) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Missing required argument <{id}>");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> String {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
        source
    } else {
        fs::read_to_string(input).unwrap_or_else(|e| {
            eprintln!("Error reading file '{input}': {e}");
            std::process::exit(1);
        })
    }
}

fn formdown_from_config(config: &FormdownConfig) -> Formdown {
    Formdown::with_options(FormdownOptions::from(config))
}

fn handle_render_command(input: &str, output: Option<&str>, config: &FormdownConfig) {
    let source = read_input(input);
    let body = formdown_from_config(config).render(&source);

    let html = match config.output.document {
        DocumentMode::Fragment => body,
        DocumentMode::Page => wrap_document(&body, &config.output.title),
    };

    match output {
        Some(path) => fs::write(path, html).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{html}"),
    }
}

fn handle_parse_command(input: &str, legacy: bool, config: &FormdownConfig) {
    let source = read_input(input);

    let formdown = formdown_from_config(config);
    let json = if legacy {
        let result = formdown.parse_legacy(&source).unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        });
        serde_json::to_string_pretty(&result)
    } else {
        let report = formdown.parse(&source);
        for error in &report.errors {
            eprintln!("warning: {error}");
        }
        serde_json::to_string_pretty(&report.document)
    };

    print_json(json);
}

fn handle_schema_command(input: &str, config: &FormdownConfig) {
    let source = read_input(input);
    let schema = formdown_from_config(config).schema(&source);
    print_json(serde_json::to_string_pretty(&schema));
}

fn print_json(json: serde_json::Result<String>) {
    match json {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> FormdownConfig {
    let loader = Loader::new().with_optional_file("formdown.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut FormdownConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(action) = take_override(extra_params, &["default-action", "action"]) {
        config.forms.default_action = action;
    }
    if let Some(method) = take_override(extra_params, &["default-method", "method"]) {
        config.forms.default_method = method.to_uppercase();
    }
    if let Some(raw) = extra_params.remove("document") {
        config.output.document = parse_document_mode(&raw);
    }
    if let Some(raw) = extra_params.remove("page") {
        if parse_bool_arg("page", &raw) {
            config.output.document = DocumentMode::Page;
        }
    }
    if let Some(title) = extra_params.remove("title") {
        config.output.title = title;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_document_mode(raw: &str) -> DocumentMode {
    match raw.to_lowercase().as_str() {
        "fragment" => DocumentMode::Fragment,
        "page" => DocumentMode::Page,
        other => {
            eprintln!("Invalid document mode '{other}' for --extra-document (expected fragment or page)");
            std::process::exit(1);
        }
    }
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

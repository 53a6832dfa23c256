use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs
// Build scripts can't access src/ modules
fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("formdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render FormDown documents to HTML forms")
        .arg_required_else_help(true)
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
        );

    generate_to(Bash, &mut cmd, "formdown", &outdir)?;
    generate_to(Zsh, &mut cmd, "formdown", &outdir)?;
    generate_to(Fish, &mut cmd, "formdown", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}

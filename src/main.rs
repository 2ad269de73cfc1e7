use std::{fs, path::PathBuf, process};

use arn::{Options, interpreter::evaluator::core::DEFAULT_PRECISION, run, util::codec::{Dictionary, pack}};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// arn runs programs written in Arn, a terse language for code golf.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells arn to read the program from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// Significant digits kept by arithmetic.
    #[arg(short,
          long,
          default_value_t = DEFAULT_PRECISION,
          value_parser = clap::value_parser!(u64).range(1..))]
    precision: u64,

    /// An input line. Repeat for several lines. Without any, input is read
    /// from standard input.
    #[arg(short, long = "input")]
    input: Vec<String>,

    /// Wraps the program in a block and maps it over the input.
    #[arg(short, long)]
    wrap: bool,

    /// Word list file used to decode dictionary strings, one word per line.
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Prints the token stream before running.
    #[arg(long)]
    tokens: bool,

    /// Prints the syntax tree before running.
    #[arg(long)]
    ast: bool,

    /// Prints the packed form of the program instead of running it.
    #[arg(long)]
    pack: bool,

    contents: String,
}

fn read_or_exit(path: &str, what: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| {
                                eprintln!("Failed to read the {what} '{path}'. Perhaps this file does not exist?");
                                process::exit(1);
                            })
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    let source = if args.file { read_or_exit(&args.contents, "program file") } else { args.contents.clone() };

    if args.pack {
        match pack(&source) {
            Some(packed) => println!("{packed}"),
            None => {
                eprintln!("Only printable ASCII programs can be packed.");
                process::exit(1);
            },
        }
        return;
    }

    let dictionary = args.dictionary
                         .as_ref()
                         .map(|path| Dictionary::from_words(&read_or_exit(&path.to_string_lossy(), "dictionary")))
                         .unwrap_or_default();

    let options = Options { precision: args.precision,
                            stdin: (!args.input.is_empty()).then_some(args.input),
                            wrap_in_braces: args.wrap,
                            dump_tokens: args.tokens,
                            dump_ast: args.ast,
                            dictionary };

    if let Err(e) = run(&source, &options) {
        eprintln!("{}", e.render(&source));
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn precision_must_be_positive() {
        assert!(Args::try_parse_from(["arn", "-p", "0", "1"]).is_err());
        assert!(Args::try_parse_from(["arn", "-p", "_3", "1"]).is_err());

        let args = Args::try_parse_from(["arn", "-p", "5", "1"]).unwrap();
        assert_eq!(args.precision, 5);
    }
}

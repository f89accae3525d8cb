use clap::{App, Arg};
use log::{debug, LevelFilter, Log, Metadata, Record};
use plisp::ast::AstPrinter;
use plisp::prelude::Stdout;
use plisp::{parser, scanner, Environment, Error, Interpreter, SourceError};
use std::fs;
use std::io::{self, Write};
use std::process;
use std::rc::Rc;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }
    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let matches = App::new("plisp")
        .about("Runs a script, or starts a prompt when no script is given")
        .arg(Arg::with_name("SCRIPT").help("Script file to run").index(1))
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Maximum depth of nested function calls")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ast")
                .long("ast")
                .help("Prints the parsed program instead of running it"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Logs to stderr; repeat for more detail"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    let interpreter = match matches.value_of("max-depth") {
        None => Interpreter::new(),
        Some(n) => match n.parse() {
            Ok(n) => Interpreter::with_max_depth(n),
            Err(_) => {
                eprintln!("--max-depth expects a number, got '{}'", n);
                process::exit(64);
            }
        },
    };
    let print_ast = matches.is_present("ast");

    match matches.value_of("SCRIPT") {
        Some(file) => run_file(file, &interpreter, print_ast),
        None => run_prompt(&interpreter, print_ast),
    }
}

fn run_file(file: &str, interpreter: &Interpreter, print_ast: bool) {
    let contents = match fs::read_to_string(file) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Could not read {}: {}", file, e);
            process::exit(66);
        }
    };
    let env = Environment::prelude(Rc::new(Stdout));
    if let Err(e) = run(&contents, interpreter, &env, print_ast) {
        eprintln!("{}", e.with_source(&contents));
        match e {
            Error::Runtime(_) => process::exit(70),
            _ => process::exit(65),
        }
    }
}

fn run_prompt(interpreter: &Interpreter, print_ast: bool) {
    let env = Environment::prelude(Rc::new(Stdout));
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => (),
        }
        let line = line.trim_end();
        if line == ".exit" {
            return;
        }
        match run(line, interpreter, &env, print_ast) {
            Ok(Some(repr)) => println!("{}", repr),
            Ok(None) => (),
            Err(e) => eprintln!("{}", e.with_source(line)),
        }
    }
}

fn run(
    source: &str,
    interpreter: &Interpreter,
    env: &Environment,
    print_ast: bool,
) -> Result<Option<String>, Error> {
    if print_ast {
        let tokens = scanner::scan_tokens(source)?;
        let program = parser::parse(&tokens)?;
        let mut printer = AstPrinter {};
        println!("{}", printer.print(&program));
        return Ok(None);
    }
    let value = interpreter.evaluate(source, env)?;
    debug!("Evaluated to a value of kind {}", value.kind());
    Ok(Some(value.repr()))
}

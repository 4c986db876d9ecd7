//! `dbginfo65` CLI: load a debug-info file, print its diagnostics, and
//! optionally dump a summary or run one of the feature-gated exports
//! (SPEC_FULL.md §E). Ambient tooling around the library, in the same
//! spirit as the teacher shipping its own `[[bin]]` alongside the library.

use std::process;

use clap::{App, Arg};

use dbginfo65::{Database, LoadOptions, Severity};

fn main() {
    simple_logger::SimpleLogger::new()
        .init()
        .expect("logger should only be initialized once");

    let matches = App::new("dbginfo65")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Loads and queries 6502-family toolchain debug-info files")
        .arg(
            Arg::with_name("input")
                .help("debug-info file to load")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("summary")
                .long("summary")
                .help("print entity counts after a successful load"),
        )
        .arg(
            Arg::with_name("dot")
                .long("dot")
                .takes_value(true)
                .value_name("PATH")
                .help("write a graphviz rendering of modules/segments/spans to PATH"),
        )
        .arg(
            Arg::with_name("xml")
                .long("xml")
                .takes_value(true)
                .value_name("PATH")
                .help("write a flat XML report of every entity to PATH"),
        )
        .get_matches();

    let input = matches.value_of("input").unwrap();

    let mut had_error = false;
    let mut sink = |diag: &dbginfo65::Diagnostic| {
        eprintln!("{}", diag.render());
        if diag.severity == Severity::Error {
            had_error = true;
        }
    };

    let db = match Database::load(input, LoadOptions::default(), &mut sink) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if matches.is_present("summary") {
        print_summary(&db);
    }

    if let Some(path) = matches.value_of("dot") {
        run_dot_export(&db, path);
    }

    if let Some(path) = matches.value_of("xml") {
        run_xml_export(&db, path);
    }

    if had_error {
        process::exit(1);
    }
}

fn print_summary(db: &Database) {
    let q = db.query();
    println!("{}:", db.file_name());
    println!("  files:    {}", q.list_files().len());
    println!("  modules:  {}", q.list_modules().len());
    println!("  segments: {}", q.list_segments().len());
    println!("  spans:    {}", q.list_spans().len());
    println!("  lines:    {}", q.list_lines().len());
    println!("  symbols:  {}", q.list_symbols().len());
}

#[cfg(feature = "dot")]
fn run_dot_export(db: &Database, path: &str) {
    let mut file = std::fs::File::create(path).expect("could not create dot output file");
    dbginfo65::export::export_dot(db, &mut file).expect("dot export failed");
}

#[cfg(not(feature = "dot"))]
fn run_dot_export(_db: &Database, _path: &str) {
    eprintln!("this build was compiled without the `dot` feature");
}

#[cfg(feature = "xml")]
fn run_xml_export(db: &Database, path: &str) {
    let mut file = std::fs::File::create(path).expect("could not create xml output file");
    dbginfo65::export::export_xml(db, &mut file).expect("xml export failed");
}

#[cfg(not(feature = "xml"))]
fn run_xml_export(_db: &Database, _path: &str) {
    eprintln!("this build was compiled without the `xml` feature");
}

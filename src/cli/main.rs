#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use std::io::Write;

use prover_sat::{context::Context, reports::Report};

mod misc;
mod parse;

use parse::config::ConfigIO;

use crate::misc::{literal_string, load_dimacs};

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = parse::cli::cli().get_matches();

    let config_io = ConfigIO::from_args(&matches);
    let config = parse::config::config_from_args(&matches, &config_io);

    let mut the_context = Context::from_config(config);

    for path in &config_io.files {
        match load_dimacs(&mut the_context, path) {
            Ok(info) => println!("c Parsed {}\n{info}", path.display()),
            Err(e) => {
                println!("c Error loading DIMACS from {}: {e:?}", path.display());
                std::process::exit(1);
            }
        }
    }

    let report = match the_context.solve() {
        Ok(report) => report,
        Err(e) => {
            println!("c Solve ended with {e:?}");
            Report::Unknown
        }
    };

    println!("c Solving took {:.2?}", the_context.counters.time);

    if config_io.show_stats {
        println!("{}", the_context.counters);
    }

    let mut stdout = std::io::stdout().lock();

    match report {
        Report::Satisfiable => {
            if config_io.show_model {
                match the_context.model() {
                    Ok(model) => {
                        let _ = writeln!(stdout, "v {model} 0");
                    }
                    Err(e) => {
                        let _ = writeln!(stdout, "c No model: {e:?}");
                    }
                }
            }
        }

        Report::Unsatisfiable => {
            if config_io.show_core {
                match the_context.core_clauses() {
                    Ok(clauses) => {
                        let _ = writeln!(stdout, "c Core of {} clauses", clauses.len());
                        for clause in clauses {
                            let literals = clause
                                .iter()
                                .map(|literal| literal_string(&the_context, literal))
                                .collect::<Vec<_>>()
                                .join(" ");
                            let _ = writeln!(stdout, "c {literals} 0");
                        }
                    }
                    Err(e) => {
                        let _ = writeln!(stdout, "c No core: {e:?}");
                    }
                }
            }

            if config_io.trace {
                if let Err(e) = the_context.write_tracecheck(&mut stdout) {
                    let _ = writeln!(stdout, "c No refutation: {e:?}");
                }
            }
        }

        Report::Unknown => {}
    }

    let _ = writeln!(stdout, "{}", report.status_line());

    match report {
        Report::Satisfiable => std::process::exit(10),
        Report::Unsatisfiable => std::process::exit(20),
        Report::Unknown => std::process::exit(30),
    }
}

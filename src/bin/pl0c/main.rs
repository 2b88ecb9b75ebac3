//! # pl0c
//!
//! This binary is the compiler of PL/0. It combines lexer, parser, and
//! virtual machine into a single application: the source file is compiled
//! once, the requested reports are written to the output file, and with
//! `-v` the compiled program is executed against standard input.

mod cli;

use cli::*;

use std::{
    error::Error,
    fs,
    fs::File,
    io::{self, BufWriter, Write},
};

use log::{debug, error, info};
use pl0_lang::{compile, report, vm::Vm};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::init();

    simple_logger::init_with_level(args.verbosity.into()).unwrap();

    info!("compiling {}", args.input.display());

    let source = fs::read_to_string(&args.input)?;
    let mut out = BufWriter::new(File::create(&args.output)?);

    let compilation = match compile(&source) {
        Err(limit) => {
            error!("{limit}");
            report::write_errors(&mut out, &[])?;
            out.flush()?;
            std::process::exit(-1);
        }
        Ok(compilation) => compilation,
    };

    debug!(
        "{} tokens, {} instructions, {} error(s)",
        compilation.tokens.len(),
        compilation.code.len(),
        compilation.errors.len()
    );

    if !compilation.is_clean() {
        error!("{} error(s), not running", compilation.errors.len());
        report::write_errors(&mut out, &compilation.errors)?;
        out.flush()?;
        std::process::exit(-1);
    }

    if args.lexemes {
        report::write_lexemes(&mut out, &compilation.tokens)?;
    }

    if args.assembly {
        report::write_assembly(&mut out, &compilation.code)?;
    }

    if args.trace {
        info!("executing {} instructions", compilation.code.len());

        let stdin = io::stdin();
        let mut input = stdin.lock();

        let result = Vm::new(&compilation.code, &mut input, &mut out)
            .with_trace()
            .run();

        if let Err(fault) = result {
            error!("{fault}");
            writeln!(out, "{fault}")?;
            out.flush()?;
            std::process::exit(-1);
        }
    }

    out.flush()?;
    Ok(())
}

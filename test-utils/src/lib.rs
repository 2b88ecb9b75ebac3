//! Helpers shared by the integration tests: compile a source snippet and
//! run it in-process, with the machine's I/O captured in memory.

use std::{error::Error, io::Cursor};

use pl0_lang::{compile, vm::Vm, Compilation};

/// Compiles `source`; the fixed capacity limits are not something a test
/// program should ever hit.
pub fn compile_source(source: &str) -> Compilation {
    compile(source).expect("program blew a compiler capacity limit")
}

/// The numbered diagnostics recorded for `source`, in order.
pub fn error_codes(source: &str) -> Vec<u32> {
    compile_source(source).errors.iter().map(|e| e.code()).collect()
}

/// Compiles and runs `source` with nothing on its input, returning whatever
/// it wrote.
pub fn run_source(source: &str) -> Result<String, Box<dyn Error>> {
    run_source_with_input(source, "")
}

/// Compiles and runs `source`, feeding `input` to its `read` statements.
pub fn run_source_with_input(source: &str, input: &str) -> Result<String, Box<dyn Error>> {
    let compilation = compile_source(source);
    assert!(
        compilation.is_clean(),
        "unexpected compile errors: {:?}",
        compilation.errors
    );

    let mut input = Cursor::new(input.as_bytes().to_vec());
    let mut output = Vec::new();
    Vm::new(&compilation.code, &mut input, &mut output).run()?;

    Ok(String::from_utf8(output)?)
}

/// Like [`run_source`], but with the per-instruction trace enabled; returns
/// the combined trace + program output.
pub fn trace_source(source: &str) -> Result<String, Box<dyn Error>> {
    let compilation = compile_source(source);
    assert!(
        compilation.is_clean(),
        "unexpected compile errors: {:?}",
        compilation.errors
    );

    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();
    Vm::new(&compilation.code, &mut input, &mut output)
        .with_trace()
        .run()?;

    Ok(String::from_utf8(output)?)
}

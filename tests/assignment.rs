use std::error::Error;

use test_utils::{run_source, trace_source};

const SRC: &str = "var x; begin x := 7; write x end.";

#[test]
fn assign_and_write() -> Result<(), Box<dyn Error>> {
    assert_eq!(run_source(SRC)?, "7\n");
    Ok(())
}

#[test]
fn trace_shows_the_frame_and_the_store() -> Result<(), Box<dyn Error>> {
    let trace = trace_source(SRC)?;

    assert!(trace.contains("inc 0 0 5"));
    assert!(trace.contains("lit 0 0 7"));
    assert!(trace.contains("sto 0 0 4"));
    assert!(trace.contains("sio 0 0 1"));
    Ok(())
}

use std::error::Error;

use test_utils::run_source;

const SRC: &str = "var x;\
                   procedure p; begin x := x + 1 end;\
                   begin x := 0; call p; call p; write x end.";

#[test]
fn calls_mutate_the_outer_variable_through_the_static_link() -> Result<(), Box<dyn Error>> {
    assert_eq!(run_source(SRC)?, "2\n");
    Ok(())
}

#[test]
fn three_levels_of_nesting_resolve_the_program_variable() -> Result<(), Box<dyn Error>> {
    let source = "var x;\
                  procedure a;\
                    procedure b;\
                      procedure c;\
                      begin x := x + 5 end;\
                    begin call c end;\
                  begin call b end;\
                  begin x := 2; call a; write x end.";

    assert_eq!(run_source(source)?, "7\n");
    Ok(())
}

#[test]
fn local_shadows_outer_and_leaves_it_alone() -> Result<(), Box<dyn Error>> {
    let source = "var x;\
                  procedure p; var x; begin x := 9; write x end;\
                  begin x := 1; call p; write x end.";

    assert_eq!(run_source(source)?, "9\n1\n");
    Ok(())
}

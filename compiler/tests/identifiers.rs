//! Variable, constant, and bare-identifier resolution.

use std::f64::consts;

use mathfn_compiler::{compile, compile_function, CompileError, ErrorKind};

fn first_error(source: &str) -> CompileError {
    let result = compile(&[source]);
    assert!(!result.is_success(), "{source:?} compiled");
    result.errors()[0].clone()
}

#[test]
fn x_is_the_variable() {
    let f = compile_function("x").unwrap();
    assert_eq!(f(3.5), 3.5);
    assert_eq!(f(-1.0), -1.0);
}

#[test]
fn variable_is_case_insensitive() {
    let f = compile_function("X + x").unwrap();
    assert_eq!(f(3.0), 6.0);
}

#[test]
fn pi_constant() {
    for source in ["pi", "PI", "Pi", "π"] {
        let f = compile_function(source).unwrap();
        assert_eq!(f(0.0), consts::PI, "{source}");
    }
}

#[test]
fn e_constant() {
    assert_eq!(compile_function("e").unwrap()(0.0), consts::E);
    assert_eq!(compile_function("E").unwrap()(0.0), consts::E);
}

#[test]
fn constants_combine_with_the_variable() {
    let f = compile_function("2 pi x").unwrap();
    assert_eq!(f(1.0), 2.0 * consts::PI);
}

#[test]
fn unknown_identifier() {
    let error = first_error("a");
    assert_eq!(error.kind(), ErrorKind::UnknownIdentifier);
    assert_eq!(error.position(), Some(0));
    assert_eq!(error.text(), "unknown identifier 'a'");
}

#[test]
fn builtin_name_without_call_requires_parentheses() {
    let error = first_error("2 + sin");
    assert_eq!(error.kind(), ErrorKind::ParenthesesRequired);
    assert_eq!(error.position(), Some(4));
}

#[test]
fn custom_name_without_call_requires_parentheses() {
    let result = compile(&["f=x", "g=f"]);
    assert!(!result.is_success());
    assert_eq!(result.errors()[0].kind(), ErrorKind::ParenthesesRequired);
}

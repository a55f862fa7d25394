pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use std::io::Write;

use crate::error::RoseError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::stmt::Stmt;

/// Scan and parse `src`.  Yields either the program or every diagnostic,
/// never both.  A scan error is reported alone, since parsing never starts.
pub fn scan_and_parse(src: &[u8]) -> Result<Vec<Stmt>, Vec<RoseError>> {
    let tokens = crate::scanner::tokenize(src).map_err(|e| vec![e])?;

    Parser::new(&tokens).parse()
}

/// Full pipeline over `src`, printing to `out`.  Diagnostics abort before
/// evaluation; a fatal evaluation error is returned as a single-element list.
pub fn run_source<W: Write>(src: &[u8], out: W) -> Result<W, Vec<RoseError>> {
    let statements: Vec<Stmt> = scan_and_parse(src)?;

    let mut interpreter: Interpreter<W> = Interpreter::with_output(out);
    interpreter.interpret(&statements).map_err(|e| vec![e])?;

    Ok(interpreter.into_output())
}

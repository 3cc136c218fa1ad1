//! # Program Lexer
//!
//! Turns opcode text into [`Instruction`]s, one instruction per line:
//!
//! ```text
//! # increment the counter by the argument
//! LOAD counter
//! ADD
//! STORE counter
//! LOAD counter
//! RETURN
//! ```
//!
//! Tokens are separated by whitespace and mnemonics are case-insensitive.
//! Blank lines and everything after `#` are ignored.

use crate::errors::ProgramError;
use crate::evm::opcodes::{Instruction, Opcode};
use std::str::FromStr;

/// Comment marker.
pub const COMMENT: char = '#';

/// Parses a whole program, one instruction per line.
///
/// # Errors
///
/// Returns the first [`ProgramError`] found, with its 1-based line number.
pub fn parse_program(source: &str) -> Result<Vec<Instruction>, ProgramError> {
    parse_lines(source.lines())
}

/// Parses a sequence of instruction lines.
///
/// # Errors
///
/// Returns the first [`ProgramError`] found, with its 1-based line number.
pub fn parse_lines<'a, I>(lines: I) -> Result<Vec<Instruction>, ProgramError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut program = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        if let Some(instruction) = parse_line(index + 1, line)? {
            program.push(instruction);
        }
    }
    Ok(program)
}

/// Parses one line. Returns `None` for blank and comment-only lines.
///
/// # Errors
///
/// Returns a [`ProgramError`] tagged with `line`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Instruction>, ProgramError> {
    let code = text.split(COMMENT).next().unwrap_or_default();
    let mut tokens = code.split_whitespace();
    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| ProgramError::UnknownOpcode {
        line,
        opcode: mnemonic.to_string(),
    })?;
    let operands: Vec<&str> = tokens.collect();
    if operands.len() > opcode.operand_count() {
        return Err(ProgramError::TrailingOperands {
            line,
            opcode: opcode.name(),
            expected: opcode.operand_count(),
            actual: operands.len(),
        });
    }

    let mut operands = Operands {
        line,
        opcode,
        tokens: operands.into_iter(),
    };
    let instruction = match opcode {
        Opcode::Push => Instruction::Push(operands.number("value")?),
        Opcode::Pop => Instruction::Pop,
        Opcode::Add => Instruction::Add,
        Opcode::Sub => Instruction::Sub,
        Opcode::Mul => Instruction::Mul,
        Opcode::Div => Instruction::Div,
        Opcode::Load => Instruction::load(operands.text("key")?),
        Opcode::Store => Instruction::store(operands.text("key")?),
        Opcode::Call => Instruction::call(
            operands.text("address")?,
            operands.number("gas")?,
            operands.number("args")?,
        ),
        Opcode::Return => Instruction::Return,
        Opcode::Log => Instruction::Log,
    };
    Ok(Some(instruction))
}

/// Operand cursor for a single line.
struct Operands<'a> {
    line: usize,
    opcode: Opcode,
    tokens: std::vec::IntoIter<&'a str>,
}

impl<'a> Operands<'a> {
    fn text(&mut self, operand: &'static str) -> Result<&'a str, ProgramError> {
        self.tokens.next().ok_or(ProgramError::MissingOperand {
            line: self.line,
            opcode: self.opcode.name(),
            operand,
        })
    }

    fn number<T: FromStr>(&mut self, operand: &'static str) -> Result<T, ProgramError> {
        let token = self.text(operand)?;
        token.parse().map_err(|_| ProgramError::InvalidOperand {
            line: self.line,
            opcode: self.opcode.name(),
            value: token.to_string(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

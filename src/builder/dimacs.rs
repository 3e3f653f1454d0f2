/*!
Reading formulas in the DIMACS CNF format.

The reader is best-effort:
- Lines beginning with `c` are comments, and a line beginning with `%` ends the formula.
- The first well-formed `p cnf <variables> <clauses>` line sets the expected counts.
  A malformed problem line before it is skipped and noted, and any problem line after it is ignored with a warning.
- Each integer is a literal, of the variable named by the absolute value of the integer, and `0` ends a clause.
  A clause may span many lines.
- A token which is not an integer skips the remainder of its line, and the line is noted.

Once the formula is read, a warning is logged if the counts differ from the expected counts.

Only a failure to read from the source is an error.
*/

use std::io::BufRead;

use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self},
};

/// Details of a read formula.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DimacsInfo {
    /// The count of variables given on the problem line, if any.
    pub expected_variables: Option<usize>,

    /// The count of clauses given on the problem line, if any.
    pub expected_clauses: Option<usize>,

    /// The count of fresh variables added while reading.
    pub variables: usize,

    /// The count of clauses read.
    pub clauses: usize,

    /// The lines on which some token was skipped.
    pub skipped_lines: Vec<usize>,
}

impl std::fmt::Display for DimacsInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let (Some(variables), Some(clauses)) = (self.expected_variables, self.expected_clauses) {
            writeln!(f, "c Expected {variables} variables and {clauses} clauses")?;
        }
        write!(f, "c Read {} variables and {} clauses", self.variables, self.clauses)?;
        if !self.skipped_lines.is_empty() {
            write!(f, "\nc Skipped tokens on lines {:?}", self.skipped_lines)?;
        }
        Ok(())
    }
}

/// Parses the counts of a problem line, `p cnf <variables> <clauses>`.
fn problem_counts(line: &str) -> Result<(usize, usize), err::ParseError> {
    let mut details = line.split_whitespace();
    if details.next() != Some("p") || details.next() != Some("cnf") {
        return Err(err::ParseError::ProblemSpecification);
    }

    let mut count = || -> Result<usize, err::ParseError> {
        details
            .next()
            .and_then(|detail| detail.parse().ok())
            .ok_or(err::ParseError::ProblemSpecification)
    };

    let variables = count()?;
    let clauses = count()?;
    Ok((variables, clauses))
}

impl Context {
    /// Reads a DIMACS formula into the context.
    ///
    /// ```rust,ignore
    /// context.read_dimacs(BufReader::new(&file))?;
    /// ```
    ///
    /// ```rust
    /// # use prover_sat::context::Context;
    /// # use prover_sat::config::Config;
    /// # use prover_sat::reports::Report;
    /// # use std::io::Write;
    /// let mut the_context = Context::from_config(Config::default());
    ///
    /// let mut dimacs = vec![];
    /// let _ = dimacs.write(b"
    /// p cnf 4 7
    ///  1  2       0
    ///  1 -2       0
    /// -1  2       0
    /// -1 -2       0
    ///  1  2  3    0
    /// -1  2 -3    0
    ///        3 -4 0
    /// ");
    ///
    /// let info = the_context.read_dimacs(dimacs.as_slice()).unwrap();
    /// assert_eq!(info.clauses, 7);
    /// assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    /// ```
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<DimacsInfo, err::ErrorKind> {
        let mut info = DimacsInfo::default();
        let mut buffer = String::with_capacity(1024);
        let mut clause_buffer: Vec<Literal> = Vec::default();

        let mut line_counter = 0;
        let variables_before = self.variable_db.count();

        // First phase, read until the formula begins.
        'preamble_loop: loop {
            match reader.read_line(&mut buffer) {
                Ok(0) => break 'preamble_loop,
                Ok(_) => line_counter += 1,
                Err(_) => return Err(err::ParseError::Io(line_counter).into()),
            }

            match buffer.trim_start().chars().next() {
                None | Some('c') => buffer.clear(),

                Some('p') => {
                    let counts = problem_counts(&buffer);
                    buffer.clear();
                    match counts {
                        Ok((variables, clauses)) => {
                            info.expected_variables = Some(variables);
                            info.expected_clauses = Some(clauses);
                            break 'preamble_loop;
                        }

                        // A later problem line may still be well-formed.
                        Err(e) => {
                            log::warn!(target: targets::PARSE, "{e:?} on line {line_counter}, skipped");
                            info.skipped_lines.push(line_counter);
                        }
                    }
                }

                // The line is kept in the buffer, to be read as part of the formula.
                _ => break 'preamble_loop,
            }
        }

        // Second phase, read until the formula ends.
        'formula_loop: loop {
            if buffer.is_empty() {
                match reader.read_line(&mut buffer) {
                    Ok(0) => break 'formula_loop,
                    Ok(_) => line_counter += 1,
                    Err(_) => return Err(err::ParseError::Io(line_counter).into()),
                }
            }

            match buffer.trim_start().chars().next() {
                Some('%') => break 'formula_loop,

                Some('c') => {}

                Some('p') => {
                    log::warn!(target: targets::PARSE, "Problem line {line_counter} ignored");
                }

                _ => {
                    for item in buffer.split_whitespace() {
                        let Ok(int) = item.parse::<i64>() else {
                            log::warn!(target: targets::PARSE, "Skipped '{item}' and the rest of line {line_counter}");
                            info.skipped_lines.push(line_counter);
                            break;
                        };

                        match int {
                            0 => {
                                let clause = std::mem::take(&mut clause_buffer);
                                self.add_clause(clause)?;
                                info.clauses += 1;
                            }

                            _ => {
                                let name = int.unsigned_abs().to_string();
                                let variable = match self.variable_db.index_of(&name) {
                                    Some(variable) => variable,
                                    None => self.fresh_variable(Some(&name))?,
                                };
                                clause_buffer.push(Literal::new(variable, int > 0));
                            }
                        }
                    }
                }
            }

            buffer.clear();
        }

        if !clause_buffer.is_empty() {
            log::warn!(target: targets::PARSE, "Final clause without a terminating 0");
            self.add_clause(clause_buffer)?;
            info.clauses += 1;
        }

        info.variables = self.variable_db.count() - variables_before;

        if let Some(expected) = info.expected_variables {
            if expected != info.variables {
                log::warn!(target: targets::PARSE, "Expected {expected} variables, read {}", info.variables);
            }
        }
        if let Some(expected) = info.expected_clauses {
            if expected != info.clauses {
                log::warn!(target: targets::PARSE, "Expected {expected} clauses, read {}", info.clauses);
            }
        }

        log::info!(target: targets::PARSE, "Read {} clauses over {} lines", info.clauses, line_counter);
        Ok(info)
    }
}

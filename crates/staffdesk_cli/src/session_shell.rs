//! Line-oriented shell over an in-memory `Session`.
//!
//! Each line is one command, e.g.
//! `employee Empno=1 Empname="Ada Lovelace" Job=HR Deptno=10`.

use crate::render::{no_data_message, render_json, render_table};
use staffdesk_core::{JoinView, RawRecord, Session};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  employee Empno=<n> Empname=<text> Job=<text> Deptno=<n>
  department Deptno=<n> Dname=<text> Loc=<text>
  view [json]
  import <csv path>
  help
  quit";

/// Runs commands from `input` against `session` until EOF or `quit`.
pub fn run_shell<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    session: &mut Session,
) -> io::Result<()> {
    writeln!(output, "staffdesk session (in-memory). Type `help` for commands.")?;
    for line in input.lines() {
        let line = line?;
        let tokens = match tokenize(&line) {
            Ok(tokens) => tokens,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        let Some((command, args)) = tokens.split_first() else {
            continue;
        };

        match command.as_str() {
            "employee" => match parse_fields(args) {
                Ok(raw) => writeln!(output, "{}", session.submit_employee(&raw).message())?,
                Err(message) => writeln!(output, "{message}")?,
            },
            "department" => match parse_fields(args) {
                Ok(raw) => writeln!(output, "{}", session.submit_department(&raw).message())?,
                Err(message) => writeln!(output, "{message}")?,
            },
            "view" => {
                let view = session.join_view();
                if args.first().map(String::as_str) == Some("json") {
                    match &view {
                        JoinView::NoData(side) => writeln!(output, "{}", no_data_message(*side))?,
                        JoinView::Rows(rows) => match render_json(rows) {
                            Ok(json) => writeln!(output, "{json}")?,
                            Err(err) => writeln!(output, "An error occurred: {err}")?,
                        },
                    }
                } else {
                    write!(output, "{}", render_table(&view))?;
                    if view.rows().is_empty() {
                        writeln!(output)?;
                    }
                }
            }
            "import" => match args {
                [path] => match session.import_employees_file(path) {
                    Ok(report) => writeln!(
                        output,
                        "Data uploaded successfully! ({} added, {} updated)",
                        report.inserted, report.updated
                    )?,
                    Err(err) => writeln!(output, "Failed to upload data: {err}")?,
                },
                _ => writeln!(output, "usage: import <csv path>")?,
            },
            "help" => writeln!(output, "{HELP}")?,
            "quit" | "exit" => break,
            other => writeln!(output, "unknown command `{other}`; type `help`")?,
        }
    }
    output.flush()
}

/// Splits a line on whitespace, keeping double-quoted spans together.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_fields(args: &[String]) -> Result<RawRecord, String> {
    let mut raw = RawRecord::new();
    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected Field=value, got `{arg}`"))?;
        raw.insert(name, value);
    }
    Ok(raw)
}

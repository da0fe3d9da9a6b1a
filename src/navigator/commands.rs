//! The navigator's interactive command loop: parses one line at a time
//! into an operation on [`Navigator`] and prints its result.

use std::io::BufRead;

use crate::repl;

use super::{ContinueResult, NavigatorError, Navigator, MAX_BREAKPOINTS};

impl Navigator {
    /// Runs the command loop against `input` until `q`/`quit` or
    /// end-of-input. Returns the process exit code.
    pub fn run(&mut self, input: &mut dyn BufRead) -> i32 {
        self.print_current();
        loop {
            let prompt = format!(
                "\n[exec #{} | {}/{}] > ",
                self.current().exec_order,
                self.cursor + 1,
                self.events.len()
            );
            let cmd = match repl::read_command(input, &prompt) {
                Some(cmd) => cmd,
                None => return 0,
            };
            if cmd.is_empty() {
                continue;
            }

            if cmd == "n" {
                if self.step_next() {
                    self.print_current();
                } else {
                    println!("already at the last execution step");
                }
            } else if cmd == "back" {
                if self.step_back() {
                    self.print_current();
                } else {
                    println!("already at the first execution step");
                }
            } else if cmd == "summary" {
                self.print_summary();
            } else if cmd == "view" {
                self.print_view();
            } else if cmd == "help" {
                print_help();
            } else if let Some(rest) = cmd.strip_prefix(':') {
                self.handle_jump_exec(rest);
            } else if let Some(rest) = cmd.strip_prefix("find ") {
                self.handle_find(rest.trim());
            } else if let Some(rest) = cmd.strip_prefix("jump ") {
                self.handle_jump_line(rest.trim());
            } else if cmd == "b" || cmd == "list" {
                self.print_breakpoints();
            } else if let Some(rest) = cmd.strip_prefix("b ") {
                self.handle_set_breakpoint(rest);
            } else if cmd == "c" {
                self.handle_continue();
            } else if cmd == "rc" {
                self.handle_reverse_continue();
            } else if cmd == "q" || cmd == "quit" {
                return 0;
            } else {
                println!("unknown command. type 'help' for available commands");
            }
        }
    }

    fn handle_jump_exec(&mut self, rest: &str) {
        match rest.parse::<i64>() {
            Ok(n) => match self.jump_to_exec(n) {
                None => println!("execution #{n} out of range. valid range: 1-{}", self.events.len()),
                Some(true) => self.print_current(),
                Some(false) => println!("execution #{n} not found in trace"),
            },
            Err(_) => println!("usage: :<number>"),
        }
    }

    fn handle_find(&self, name: &str) {
        if name.is_empty() {
            println!("usage: find <variable_name>");
            return;
        }
        let hits = self.find(name);
        if hits.is_empty() {
            println!("variable '{name}' not found in trace");
            return;
        }
        for (event, fragments) in hits.iter().take(10) {
            println!("[{}] {}:{}", event.exec_order, event.filename, event.line_number);
            for fragment in fragments {
                println!("  -> {fragment}");
            }
        }
        if hits.len() > 10 {
            println!("... showing first 10 of {} results", hits.len());
        } else {
            println!("found {} occurrence(s)", hits.len());
        }
    }

    fn handle_jump_line(&mut self, rest: &str) {
        match rest.parse::<u32>() {
            Ok(line_number) => {
                if self.jump_to_line(line_number) {
                    self.print_current();
                } else {
                    println!("line {line_number} not found in trace");
                }
            }
            Err(_) => println!("usage: jump <line>"),
        }
    }

    fn handle_set_breakpoint(&mut self, rest: &str) {
        let mut tokens = rest.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(file), Some(line)) => match line.parse::<u32>() {
                Ok(line_number) => match self.add_breakpoint(file, line_number) {
                    Ok(true) => println!("breakpoint set at {file}:{line_number}"),
                    Ok(false) => println!("breakpoint already set at {file}:{line_number}"),
                    Err(NavigatorError::CapacityReached) => {
                        println!("maximum breakpoints ({MAX_BREAKPOINTS}) reached")
                    }
                },
                Err(_) => println!("usage: b <file> <line>"),
            },
            _ => println!("usage: b <file> <line>"),
        }
    }

    fn handle_continue(&mut self) {
        match self.continue_forward() {
            ContinueResult::NoBreakpoints => {
                println!("no breakpoints set. use 'b <file> <line>' to set one")
            }
            ContinueResult::NoneAhead => {
                println!("no more breakpoints ahead. jumping to end of trace");
                self.print_current();
            }
            ContinueResult::Hit => self.print_current(),
            ContinueResult::NoneBehind => unreachable!("continue_forward never returns NoneBehind"),
        }
    }

    fn handle_reverse_continue(&mut self) {
        match self.reverse_continue() {
            ContinueResult::NoBreakpoints => {
                println!("no breakpoints set. use 'b <file> <line>' to set one")
            }
            ContinueResult::NoneBehind => {
                println!("no more breakpoints behind. jumping to start of trace");
                self.print_current();
            }
            ContinueResult::Hit => self.print_current(),
            ContinueResult::NoneAhead => unreachable!("reverse_continue never returns NoneAhead"),
        }
    }

    fn print_current(&self) {
        let event = self.current();
        println!("\n[execution #{}]", event.exec_order);
        println!("{}:{}  {}", event.filename, event.line_number, event.code);
        let fragments: Vec<&str> = event.variables.split(';').map(str::trim).filter(|f| !f.is_empty()).collect();
        if fragments.is_empty() {
            println!("variables: (none)");
        } else {
            println!("variables:");
            for fragment in fragments {
                println!("  - {fragment}");
            }
        }
    }

    fn print_summary(&self) {
        let first = &self.events[0];
        let last = &self.events[self.events.len() - 1];
        let current = self.current();
        println!("total executions: {}", self.events.len());
        println!("first: [{}] {}:{}", first.exec_order, first.filename, first.line_number);
        println!("last:  [{}] {}:{}", last.exec_order, last.filename, last.line_number);
        println!(
            "current: [{}] (entry {} of {})",
            current.exec_order,
            self.cursor + 1,
            self.events.len()
        );
    }

    fn print_view(&self) {
        let event = self.current();
        match std::fs::read_to_string(&event.filename) {
            Ok(contents) => {
                for (i, line) in contents.lines().enumerate() {
                    let n = i + 1;
                    let marker = if n as u32 == event.line_number { ">>>" } else { "   " };
                    println!("{marker} [{n:4}] {line}");
                }
            }
            Err(_) => println!("cannot open file: {}", event.filename),
        }
    }

    fn print_breakpoints(&self) {
        if self.breakpoints.is_empty() {
            println!("no breakpoints set");
            return;
        }
        println!("breakpoints:");
        for (i, (file, line)) in self.breakpoints.iter().enumerate() {
            println!("  {}. {file}:{line}", i + 1);
        }
        println!("total: {} breakpoint(s)", self.breakpoints.len());
    }
}

fn print_help() {
    println!("navigation:");
    println!("  n              next execution step");
    println!("  back           previous execution step");
    println!("  :<number>      jump to execution number");
    println!("breakpoints:");
    println!("  b <file> <line>  set breakpoint");
    println!("  list           list breakpoints");
    println!("  c              continue to next breakpoint");
    println!("  rc             reverse continue");
    println!("analysis:");
    println!("  view           view source file with current line highlighted");
    println!("  summary        show trace summary");
    println!("  find <var>     search for variable usage");
    println!("  jump <line>    jump to first occurrence of source line");
    println!("other:");
    println!("  help           show this help");
    println!("  q / quit       exit");
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::record::TraceEvent;
    use std::io::Cursor;

    fn event(exec_order: u64, filename: &str, line_number: u32, code: &str, variables: &str) -> TraceEvent {
        TraceEvent {
            exec_order,
            filename: filename.to_string(),
            line_number,
            code: code.to_string(),
            variables: variables.to_string(),
        }
    }

    fn sample() -> Navigator {
        Navigator::new(vec![
            event(0, "t.py", 1, "x=1", ""),
            event(1, "t.py", 2, "y=x+1", "x=1"),
            event(2, "t.py", 3, "print(y)", "x=1;y=2"),
        ])
        .unwrap()
    }

    #[test]
    fn run_processes_navigation_commands_and_exits_on_quit() {
        let mut nav = sample();
        let mut input = Cursor::new(b"n\nback\n:3\nq\n".to_vec());
        let code = nav.run(&mut input);
        assert_eq!(code, 0);
        assert_eq!(nav.cursor(), 2);
    }

    #[test]
    fn run_exits_cleanly_on_eof() {
        let mut nav = sample();
        let mut input = Cursor::new(Vec::new());
        assert_eq!(nav.run(&mut input), 0);
    }

    #[test]
    fn run_handles_breakpoints_and_continue() {
        let mut nav = sample();
        let mut input = Cursor::new(b"b t.py 3\nc\nrc\nq\n".to_vec());
        nav.run(&mut input);
        assert_eq!(nav.cursor(), 0);
    }
}

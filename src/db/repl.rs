//! Interactive REPL (Read-Eval-Print Loop) for nestkv.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use super::api::{Database, DatabaseResult};

/// REPL configuration.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string.
    pub prompt: String,
    /// Print the banner, prompts and farewell.
    pub interactive: bool,
    /// Show timing information.
    pub timing: bool,
    /// Max commands kept in history.
    pub history_limit: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            interactive: true,
            timing: false,
            history_limit: 1000,
        }
    }
}

/// How a REPL session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The `END` protocol command.
    EndCommand,
    /// A `.quit` meta-command.
    Quit,
    /// Input ran out.
    Eof,
}

/// The interactive REPL.
pub struct Repl {
    db: Database,
    config: ReplConfig,
    history: Vec<String>,
}

impl Repl {
    /// Create a new REPL with the given database.
    pub fn new(db: Database) -> Self {
        Self::with_config(db, ReplConfig::default())
    }

    /// Create a REPL with custom configuration.
    pub fn with_config(db: Database, config: ReplConfig) -> Self {
        Self {
            db,
            config,
            history: Vec::new(),
        }
    }

    /// Get the database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Run the REPL on stdin/stdout.
    pub fn run(&mut self) -> DatabaseResult<SessionEnd> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout)
    }

    /// Run the REPL over arbitrary input and output.
    pub fn run_with<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        output: &mut W,
    ) -> DatabaseResult<SessionEnd> {
        if self.config.interactive {
            self.print_banner(output)?;
        }

        loop {
            if self.config.interactive {
                write!(output, "{}", self.config.prompt)?;
                output.flush()?;
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                if self.config.interactive {
                    writeln!(output, "\nGoodbye!")?;
                }
                return Ok(SessionEnd::Eof);
            }

            let cmd = line.trim();
            if cmd.is_empty() {
                continue;
            }
            self.remember(cmd);

            if cmd.starts_with('.') {
                if self.handle_meta(cmd, output)? {
                    return Ok(SessionEnd::Quit);
                }
                continue;
            }

            let start = Instant::now();
            let result = self.db.execute(cmd);
            if result.is_end() {
                return Ok(SessionEnd::EndCommand);
            }
            if let Some(text) = result.render() {
                writeln!(output, "{}", text)?;
            }
            if self.config.timing {
                writeln!(output, "Time: {:.3}ms", start.elapsed().as_secs_f64() * 1000.0)?;
            }
        }
    }

    fn remember(&mut self, cmd: &str) {
        if self.config.history_limit == 0 {
            return;
        }
        if self.history.len() >= self.config.history_limit {
            self.history.remove(0);
        }
        self.history.push(cmd.to_string());
    }

    fn print_banner<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "nestkv v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(output, "Type .help for meta-commands, END to leave.")?;
        writeln!(output)
    }

    /// Handle a meta-command. Returns `true` if the session should stop.
    fn handle_meta<W: Write>(&mut self, cmd: &str, output: &mut W) -> DatabaseResult<bool> {
        let cmd = cmd.trim_start_matches('.');
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let command = parts.first().map(|s| s.to_lowercase());
        let json = parts.get(1).is_some_and(|arg| arg.eq_ignore_ascii_case("json"));

        match command.as_deref() {
            Some("help") | Some("h") | Some("?") => self.print_help(output)?,
            Some("quit") | Some("exit") | Some("q") => return Ok(true),
            Some("stats") if json => writeln!(output, "{}", self.db.stats_json()?)?,
            Some("stats") => self.print_stats(output)?,
            Some("dump") => writeln!(output, "{}", self.db.dump_json()?)?,
            Some("levels") if json => writeln!(output, "{}", self.db.levels_json()?)?,
            Some("levels") => self.print_levels(output)?,
            Some("history") => self.print_history(output)?,
            Some("timing") => {
                self.config.timing = !self.config.timing;
                writeln!(output, "Timing: {}", if self.config.timing { "on" } else { "off" })?;
            }
            Some(other) => {
                writeln!(output, "Unknown meta-command: .{}", other)?;
                writeln!(output, "Type .help for available commands")?;
            }
            None => {}
        }

        Ok(false)
    }

    fn print_help<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "Meta-commands:")?;
        writeln!(output, "  .help, .h, .?           Show this help message")?;
        writeln!(output, "  .quit, .exit, .q        Exit the REPL")?;
        writeln!(output, "  .stats [json]           Show store statistics")?;
        writeln!(output, "  .dump                   Print all keys as JSON")?;
        writeln!(output, "  .levels [json]          List open transaction levels")?;
        writeln!(output, "  .history                Show command history")?;
        writeln!(output, "  .timing                 Toggle timing display")?;
        writeln!(output)?;
        writeln!(output, "Commands:")?;
        writeln!(output, "  SET key value           Set key to value")?;
        writeln!(output, "  GET key                 Print the value of key, or NULL")?;
        writeln!(output, "  UNSET key               Remove key")?;
        writeln!(output, "  COUNTS value            Print how many keys hold value")?;
        writeln!(output, "  FIND value              Print the keys holding value, or NULL")?;
        writeln!(output, "  BEGIN                   Open a nested transaction")?;
        writeln!(output, "  ROLLBACK                Undo the innermost transaction")?;
        writeln!(output, "  COMMIT                  Make all open transactions permanent")?;
        writeln!(output, "  END                     End the session")?;
        writeln!(output)
    }

    fn print_stats<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let stats = self.db.stats();
        writeln!(output, "Store Statistics:")?;
        writeln!(output, "  Keys: {}", stats.keys)?;
        writeln!(output, "  Distinct Values: {}", stats.distinct_values)?;
        writeln!(output, "  Open Transactions: {}", stats.depth)?;
        writeln!(output, "  Undo Mode: {}", stats.undo_mode)
    }

    fn print_levels<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let levels = self.db.levels();
        if levels.is_empty() {
            return writeln!(output, "No open transactions.");
        }
        for level in levels {
            writeln!(output, "  {}", level)?;
        }
        Ok(())
    }

    fn print_history<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "Command History:")?;
        for (i, cmd) in self.history.iter().enumerate() {
            writeln!(output, "  {}: {}", i + 1, cmd)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> ReplConfig {
        ReplConfig {
            interactive: false,
            ..Default::default()
        }
    }

    fn run(repl: &mut Repl, input: &str) -> (SessionEnd, String) {
        let mut out = Vec::new();
        let end = repl.run_with(input.as_bytes(), &mut out).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut repl = Repl::with_config(Database::new(), quiet());
        let script = "SET a 10\nGET a\nSET b 20\nCOUNTS 10\nBEGIN\nSET a 20\n\
                      COUNTS 20\nFIND 20\nROLLBACK\nCOUNTS 20\nGET a\nEND\nGET a\n";
        let (end, out) = run(&mut repl, script);
        assert_eq!(end, SessionEnd::EndCommand);
        assert_eq!(out, "10\n1\n2\na b\n1\n10\n");
    }

    #[test]
    fn test_eof_in_interactive_mode() {
        let mut repl = Repl::new(Database::new());
        let (end, out) = run(&mut repl, "SET a 1\nGET a\n");
        assert_eq!(end, SessionEnd::Eof);
        assert!(out.contains("> 1\n"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_quit_meta_command() {
        let mut repl = Repl::with_config(Database::new(), quiet());
        let (end, out) = run(&mut repl, "SET a 1\n.quit\nGET a\n");
        assert_eq!(end, SessionEnd::Quit);
        assert!(out.is_empty());
    }

    #[test]
    fn test_stats_and_levels_meta_commands() {
        let mut repl = Repl::with_config(Database::new(), quiet());
        let (_, out) = run(&mut repl, ".levels\nSET a 1\nBEGIN\n.stats\n.levels\n");
        assert!(out.starts_with("No open transactions.\n"));
        assert!(out.contains("  Keys: 1\n"));
        assert!(out.contains("  Open Transactions: 1\n"));
        assert!(out.contains("  Undo Mode: transaction\n"));
        assert!(out.contains("#1 "));
    }

    #[test]
    fn test_json_meta_commands() {
        let mut repl = Repl::with_config(Database::new(), quiet());
        let (_, out) = run(&mut repl, "SET a 1\n.stats json\n");
        let stats: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(stats["keys"], 1);
        assert_eq!(stats["undo_mode"], "transaction");

        let (_, out) = run(&mut repl, "BEGIN\n.levels JSON\n");
        let levels: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(levels.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_dump_meta_command() {
        let mut repl = Repl::with_config(Database::new(), quiet());
        let (_, out) = run(&mut repl, "SET b 2\nSET a 1\n.dump\n");
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json, serde_json::json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn test_history_is_capped() {
        let config = ReplConfig {
            history_limit: 2,
            ..quiet()
        };
        let mut repl = Repl::with_config(Database::new(), config);
        let (_, out) = run(&mut repl, "SET a 1\nGET a\n.history\n");
        assert!(out.contains("  1: GET a\n"));
        assert!(out.contains("  2: .history\n"));
        assert!(!out.contains("SET a 1"));
    }

    #[test]
    fn test_unknown_commands() {
        let mut repl = Repl::with_config(Database::new(), quiet());
        let (_, out) = run(&mut repl, "FLY away\n.fly\nSET a\n");
        assert_eq!(
            out,
            "UNKNOWN COMMAND\nUnknown meta-command: .fly\nType .help for available commands\nUNKNOWN COMMAND\n"
        );
    }

    #[test]
    fn test_timing_toggle() {
        let mut repl = Repl::with_config(Database::new(), quiet());
        let (_, out) = run(&mut repl, ".timing\nGET a\n");
        assert!(out.starts_with("Timing: on\nNULL\nTime: "));
    }
}

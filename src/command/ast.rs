//! Parsed commands.

use std::fmt;

/// A parsed protocol command, carrying its validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// SET key value.
    Set { key: String, value: String },
    /// GET key.
    Get { key: String },
    /// UNSET key.
    Unset { key: String },
    /// COUNTS value.
    Counts { value: String },
    /// FIND value.
    Find { value: String },
    /// BEGIN.
    Begin,
    /// ROLLBACK.
    Rollback,
    /// COMMIT.
    Commit,
    /// END - terminates the session.
    End,
}

impl Command {
    /// The protocol verb for this command.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::Unset { .. } => "UNSET",
            Command::Counts { .. } => "COUNTS",
            Command::Find { .. } => "FIND",
            Command::Begin => "BEGIN",
            Command::Rollback => "ROLLBACK",
            Command::Commit => "COMMIT",
            Command::End => "END",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Set { key, value } => write!(f, "SET {} {}", key, value),
            Command::Get { key } | Command::Unset { key } => write!(f, "{} {}", self.verb(), key),
            Command::Counts { value } | Command::Find { value } => {
                write!(f, "{} {}", self.verb(), value)
            }
            _ => write!(f, "{}", self.verb()),
        }
    }
}

//! Battle log
//!
//! Every line belongs to a `LogCategory`, which fixes the verbosity it
//! appears at and how it is indented on stdout. Lines can also be captured
//! in memory for tests and replays. Formatting goes through a bump arena
//! that is reset after each line.

use bumpalo::Bump;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt::{self, Write as FmtWrite};

/// Verbosity level for battle output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    Silent = 0,
    /// Only the battle outcome
    Minimal = 1,
    /// Turns, played cards, enemy moves, controller choices
    #[default]
    Normal = 2,
    /// Every damage, block, and effect change
    Verbose = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Capture only, nothing printed
    Memory,
    Both,
}

/// What a log line is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogCategory {
    /// Victory, defeat, flight, turn limit
    Outcome,
    /// Turn header with both health totals
    Turn,
    /// A card played or an enemy move
    Action,
    /// Damage, block, and status bookkeeping
    Detail,
    /// A controller's pick
    Choice,
    /// An action the state machine refused
    Rejected,
}

impl LogCategory {
    pub fn level(self) -> VerbosityLevel {
        match self {
            LogCategory::Outcome => VerbosityLevel::Minimal,
            LogCategory::Turn | LogCategory::Action | LogCategory::Choice => VerbosityLevel::Normal,
            LogCategory::Detail | LogCategory::Rejected => VerbosityLevel::Verbose,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            LogCategory::Outcome | LogCategory::Turn => "",
            LogCategory::Action => "  ",
            LogCategory::Detail => "    ",
            LogCategory::Choice => "  > ",
            LogCategory::Rejected => "  ! ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub category: LogCategory,
    pub message: String,
}

/// Borrowed view of the captured lines
pub struct CapturedLog<'a> {
    lines: Ref<'a, Vec<LogLine>>,
}

impl<'a> CapturedLog<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Messages in `category`, oldest first
    pub fn messages(&self, category: LogCategory) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.category == category)
            .map(|l| l.message.as_str())
            .collect()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.lines.iter().any(|l| l.message == message)
    }
}

pub struct BattleLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    scratch: RefCell<Bump>,
    captured: RefCell<Vec<LogLine>>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        BattleLogger {
            verbosity,
            output_mode: OutputMode::default(),
            scratch: RefCell::new(Bump::new()),
            captured: RefCell::new(Vec::new()),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Capture to memory and stop printing
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    fn prints(&self) -> bool {
        matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
    }

    /// Whether a line in `category` would be kept or printed. Capture keeps
    /// every category regardless of verbosity.
    #[inline]
    pub fn enabled(&self, category: LogCategory) -> bool {
        self.is_capturing() || (self.verbosity != VerbosityLevel::Silent && category.level() <= self.verbosity)
    }

    pub fn captured(&self) -> CapturedLog<'_> {
        CapturedLog {
            lines: self.captured.borrow(),
        }
    }

    pub fn clear(&mut self) {
        self.captured.get_mut().clear();
        self.scratch.get_mut().reset();
    }

    /// Print the captured lines the current verbosity allows, then drop them
    pub fn flush(&mut self) {
        for line in self.captured.get_mut().drain(..) {
            if line.category.level() <= self.verbosity {
                println!("{}{}", line.category.prefix(), line.message);
            }
        }
        self.scratch.get_mut().reset();
    }

    /// Log a plain message
    pub fn line(&self, category: LogCategory, message: &str) {
        if self.enabled(category) {
            self.emit(category, message);
        }
    }

    /// Format into the scratch arena and log
    pub fn event(&self, category: LogCategory, args: fmt::Arguments<'_>) {
        if !self.enabled(category) {
            return;
        }
        {
            let bump = self.scratch.borrow();
            let mut text = bumpalo::collections::String::new_in(&bump);
            if text.write_fmt(args).is_err() {
                return;
            }
            self.emit(category, text.as_str());
        }
        self.scratch.borrow_mut().reset();
    }

    fn emit(&self, category: LogCategory, message: &str) {
        if self.is_capturing() {
            self.captured.borrow_mut().push(LogLine {
                category,
                message: message.to_string(),
            });
        }
        if self.prints() && self.verbosity != VerbosityLevel::Silent && category.level() <= self.verbosity {
            println!("{}{message}", category.prefix());
        }
    }
}

impl Default for BattleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BattleLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("captured", &self.captured.borrow().len())
            .finish()
    }
}

/// Clones carry settings only; captured lines stay with the original
impl Clone for BattleLogger {
    fn clone(&self) -> Self {
        BattleLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            scratch: RefCell::new(Bump::new()),
            captured: RefCell::new(Vec::new()),
        }
    }
}

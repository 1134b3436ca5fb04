use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::application::{AppError, Config, SplitService};
use crate::domain::{
    AddFriendForm, DEFAULT_CURRENCY, DEFAULT_IMAGE, SettlementMode, SplitBillForm, format_money,
    parse_payer,
};
use crate::io::{Exporter, default_roster, load_roster};

/// Splitbill - split bills with friends and keep track of who owes whom
#[derive(Parser)]
#[command(name = "splitbill")]
#[command(about = "Split bills with friends and track running balances for one session")]
#[command(version)]
pub struct Cli {
    /// JSON roster to start from (defaults to the built-in friends)
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Currency symbol shown after amounts
    #[arg(short, long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Add each split to the previous balance instead of replacing it
    #[arg(long)]
    pub accumulate: bool,

    /// Read session commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// One line of session input.
#[derive(Parser)]
#[command(name = "splitbill>", no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show all friends and their balances
    List,

    /// Open or close the add-friend form
    AddForm,

    /// Add a friend
    Add {
        /// Friend's name
        name: String,

        /// Image URL
        #[arg(short, long, default_value = DEFAULT_IMAGE)]
        image: String,
    },

    /// Select a friend to split a bill with (again to deselect)
    Select {
        /// Friend's name
        name: String,
    },

    /// Split a bill with the selected friend
    Split {
        /// Bill value (e.g., "50.00" or "50")
        bill: String,

        /// Your share of the bill
        #[arg(short, long)]
        expense: Option<String>,

        /// Who is paying the bill: "user" or the friend's name
        #[arg(short, long, default_value = "user")]
        paid_by: String,
    },

    /// Show totals across all friends
    Summary,

    /// Print the ledger as CSV or JSON
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Cli {
    pub fn config(&self) -> Config {
        let mode = if self.accumulate {
            SettlementMode::Accumulate
        } else {
            SettlementMode::Replace
        };
        Config::default()
            .with_currency(self.currency.clone())
            .with_mode(mode)
    }

    pub fn run(self) -> Result<()> {
        let ledger = match &self.roster {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open roster file: {}", path.display()))?;
                load_roster(BufReader::new(file))?
            }
            None => default_roster(),
        };
        debug!("Starting session with {} friends", ledger.len());

        let service = SplitService::new(ledger, self.config());
        let mut session = Session::new(service, std::io::stdout());

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script file: {}", path.display()))?;
                session.run(BufReader::new(file))
            }
            None => session.run(std::io::stdin().lock()),
        }
    }
}

/// A line-oriented session over one `SplitService`.
pub struct Session<W: Write> {
    service: SplitService,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(service: SplitService, out: W) -> Self {
        Self { service, out }
    }

    pub fn service(&self) -> &SplitService {
        &self.service
    }

    pub fn into_parts(self) -> (SplitService, W) {
        (self.service, self.out)
    }

    /// Process input until it ends or a `quit` command is read.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.render_friends()?;
        for line in input.lines() {
            let line = line.context("Failed to read session input")?;
            if self.execute_line(&line)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Execute one input line. Command errors are reported to the output
    /// and do not end the session.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(self.out, "error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        if words.is_empty() || words[0].starts_with('#') {
            return Ok(Flow::Continue);
        }

        let command = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(self.out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        match self.execute(command) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                writeln!(self.out, "error: {:#}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::List => self.render_friends()?,

            SessionCommand::AddForm => {
                let open = self.service.toggle_add_friend();
                writeln!(
                    self.out,
                    "Add-friend form {}",
                    if open { "opened" } else { "closed" }
                )?;
                self.render_friends()?;
            }

            SessionCommand::Add { name, image } => {
                let form = AddFriendForm::new(&name, &image)?;
                let friend = self.service.add_friend(form);
                writeln!(self.out, "Added friend: {}", friend.name)?;
                self.render_friends()?;
            }

            SessionCommand::Select { name } => {
                let selection = self.service.select_by_name(&name)?;
                match selection.selected() {
                    Some(id) => {
                        let friend = self.service.get_friend(id)?;
                        writeln!(self.out, "Selected: {}", friend.name)?;
                    }
                    None => writeln!(self.out, "Selection cleared")?,
                }
                self.render_friends()?;
            }

            SessionCommand::Split {
                bill,
                expense,
                paid_by,
            } => {
                let friend_name = self
                    .service
                    .selected_friend()
                    .map(|f| f.name.clone())
                    .ok_or(AppError::NoFriendSelected)?;
                let payer = parse_payer(&paid_by, &friend_name)?;
                let form = SplitBillForm::from_input(&bill, expense.as_deref(), payer)?;
                if let Some(rejected) = form.rejected_expense() {
                    writeln!(
                        self.out,
                        "Your expense {} cannot exceed the bill; using {}",
                        format_money(rejected, self.service.currency()),
                        format_money(form.my_expense(), self.service.currency())
                    )?;
                }

                let result = self.service.split_bill(form)?;
                writeln!(
                    self.out,
                    "Split {} with {}: you {}, {} {}",
                    format_money(form.bill(), self.service.currency()),
                    result.friend.name,
                    format_money(form.my_expense(), self.service.currency()),
                    result.friend.name,
                    format_money(form.friend_expense(), self.service.currency()),
                )?;
                self.render_friends()?;
            }

            SessionCommand::Summary => {
                let summary = self.service.summary();
                let currency = self.service.currency();
                writeln!(self.out, "Friends:      {}", summary.friends)?;
                writeln!(self.out, "Settled:      {}", summary.settled)?;
                writeln!(
                    self.out,
                    "Owed to you:  {}",
                    format_money(summary.owed_to_you, currency)
                )?;
                writeln!(
                    self.out,
                    "You owe:      {}",
                    format_money(summary.you_owe, currency)
                )?;
                writeln!(self.out, "Net:          {}", format_money(summary.net, currency))?;
            }

            SessionCommand::Export { format } => {
                let exporter = Exporter::new(&self.service);
                match format {
                    ExportFormat::Csv => {
                        exporter.export_balances_csv(&mut self.out)?;
                    }
                    ExportFormat::Json => {
                        exporter.export_json(&mut self.out)?;
                    }
                }
            }

            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Print every friend with their balance line, marking the selected one.
    fn render_friends(&mut self) -> Result<()> {
        let currency = self.service.currency().to_string();
        let selection = self.service.selection();

        if self.service.friends().is_empty() {
            writeln!(self.out, "No friends yet.")?;
        }
        for friend in self.service.friends() {
            let marker = if selection.is_selected(friend.id) { ">" } else { " " };
            writeln!(
                self.out,
                "{} {:<16} {}",
                marker,
                friend.name,
                friend.balance_message(&currency)
            )?;
        }

        if self.service.show_add_friend() {
            writeln!(self.out, "[add-friend form] add <name> [--image <url>]")?;
        }
        if let Some(friend) = self.service.selected_friend() {
            writeln!(
                self.out,
                "[split a bill with {}] split <bill> [--expense <amount>] [--paid-by user|{}]",
                friend.name, friend.name
            )?;
        }
        Ok(())
    }
}

/// Split a command line into words with shell quoting rules.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    shlex::split(line).ok_or_else(|| anyhow::anyhow!("unterminated quote or trailing escape"))
}

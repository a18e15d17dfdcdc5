//! CLI definition, interactive menu and one-shot commands.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console::Console;
use crate::adapters::csv_adapter::CsvLedger;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_plot::SvgPlotAdapter;
use crate::domain::config::LedgerConfig;
use crate::domain::error::LedgerError;
use crate::domain::summary::{DailySeries, Summary};
use crate::domain::transaction::{Transaction, format_money};
use crate::domain::validation::{
    check_range, describe_format, parse_amount, parse_category, parse_date, parse_description,
};
use crate::ports::config_port::EmptyConfig;
use crate::ports::ledger_port::LedgerPort;
use crate::ports::plot_port::PlotPort;

pub const PLOT_TITLE: &str = "Income and Expenses Over Time";
pub const NO_RESULTS: &str = "No transactions found in the given date range";

#[derive(Parser, Debug)]
#[command(name = "ledgerline", about = "Personal income and expense ledger")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Ledger CSV file (overrides the configured path)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a transaction without prompting
    Add {
        /// Transaction date; defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        /// I for Income, E for Expense
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Print transactions and a summary for a date range
    Report {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// Also write the income/expense chart
        #[arg(long)]
        plot: bool,
    },
}

/// Everything a menu action needs, wired once at startup.
pub struct App<'a> {
    pub ledger: &'a dyn LedgerPort,
    pub plotter: &'a dyn PlotPort,
    pub config: &'a LedgerConfig,
    pub today: NaiveDate,
}

impl App<'_> {
    fn default_date(&self) -> Option<NaiveDate> {
        self.config.default_today.then_some(self.today)
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match load_ledger_config(cli.config.as_ref(), cli.file.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    log::debug!("using ledger file {}", config.csv_file.display());

    let ledger = CsvLedger::from_config(&config);
    if let Err(e) = ledger.initialize() {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let plotter = SvgPlotAdapter::new(&config.plot, config.date_format.clone());
    let app = App {
        ledger: &ledger,
        plotter: &plotter,
        config: &config,
        today: Local::now().date_naive(),
    };

    let result = match cli.command {
        None => {
            let stdin = io::stdin();
            let mut console = Console::new(
                stdin.lock(),
                io::stdout(),
                config.max_attempts,
                config.date_format.clone(),
            );
            run_menu(&mut console, &app)
        }
        Some(Command::Add {
            date,
            amount,
            category,
            description,
        }) => run_add(&app, date.as_deref(), &amount, &category, &description),
        Some(Command::Report { start, end, plot }) => run_report(&app, &start, &end, plot),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Resolve configuration: INI file if given, defaults otherwise, then the
/// `--file` override.
pub fn load_ledger_config(
    config_path: Option<&PathBuf>,
    file_override: Option<&PathBuf>,
) -> Result<LedgerConfig, LedgerError> {
    let mut config = match config_path {
        Some(path) => LedgerConfig::from_config(&FileConfigAdapter::from_file(path)?)?,
        None => LedgerConfig::from_config(&EmptyConfig)?,
    };
    if let Some(file) = file_override {
        config.csv_file = file.clone();
    }
    Ok(config)
}

/// Interactive menu loop. Returns when the user exits or input ends.
pub fn run_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &App<'_>,
) -> Result<(), LedgerError> {
    loop {
        console.say("")?;
        console.say("1. Add a new transaction")?;
        console.say("2. View transactions and summary within a date range")?;
        console.say("3. Exit")?;
        let choice = match console.prompt_line("Enter your choice (1-3): ") {
            Ok(c) => c,
            Err(LedgerError::InputClosed) => return Ok(()),
            Err(e) => return Err(e),
        };

        let outcome = match choice.trim() {
            "1" => add_interactive(console, app).map(|_| ()),
            "2" => report_interactive(console, app),
            "3" => {
                console.say("Exiting...")?;
                return Ok(());
            }
            _ => {
                console.say("Invalid choice. Enter 1, 2, or 3.")?;
                continue;
            }
        };

        match outcome {
            Ok(()) => {}
            Err(LedgerError::InputClosed) => return Ok(()),
            Err(e @ LedgerError::RetriesExhausted { .. }) => console.say(&format!("error: {e}"))?,
            Err(e) => return Err(e),
        }
    }
}

/// Prompt for every field of a transaction and store it.
pub fn add_interactive<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &App<'_>,
) -> Result<Transaction, LedgerError> {
    let date = console.prompt_date(
        &date_prompt(app, "the date of the transaction"),
        app.default_date(),
    )?;
    let amount = console.prompt_amount()?;
    let category = console.prompt_category()?;
    let description = console.prompt_description()?;

    let transaction = Transaction {
        date,
        amount,
        category,
        description,
    };
    store(app.ledger, &transaction)?;
    console.say("Entry added successfully")?;
    Ok(transaction)
}

/// `Enter <what> (dd-mm-yyyy): `, mentioning the today shortcut when enabled.
fn date_prompt(app: &App<'_>, what: &str) -> String {
    let hint = describe_format(&app.config.date_format);
    if app.config.default_today {
        format!("Enter {what} ({hint}) or enter for today's date: ")
    } else {
        format!("Enter {what} ({hint}): ")
    }
}

/// Prompt for a date range, print the report and optionally plot it.
pub fn report_interactive<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    app: &App<'_>,
) -> Result<(), LedgerError> {
    let default = app.default_date();
    let start = console.prompt_date(&date_prompt(app, "the start date"), default)?;
    let format = app.config.date_format.clone();
    let end = console.prompt_until_valid(&date_prompt(app, "the end date"), "date", |s| {
        let end = parse_date(s, &format, default)?;
        check_range(start, end)?;
        Ok(end)
    })?;

    let transactions = app.ledger.fetch_range(start, end)?;
    write_report(console.output(), &transactions, start, end, &app.config.date_format)?;

    if !transactions.is_empty() && console.confirm("Do you want to see a plot? (y/n): ")? {
        let path = app
            .plotter
            .plot(&DailySeries::from_transactions(&transactions), PLOT_TITLE)?;
        console.say(&format!("Plot saved to {}", path.display()))?;
    }
    Ok(())
}

pub fn run_add(
    app: &App<'_>,
    date: Option<&str>,
    amount: &str,
    category: &str,
    description: &str,
) -> Result<(), LedgerError> {
    let transaction = Transaction {
        date: parse_date(
            date.unwrap_or_default(),
            &app.config.date_format,
            app.default_date(),
        )?,
        amount: parse_amount(amount)?,
        category: parse_category(category)?,
        description: parse_description(description),
    };
    store(app.ledger, &transaction)?;
    println!("Entry added successfully");
    Ok(())
}

pub fn run_report(app: &App<'_>, start: &str, end: &str, plot: bool) -> Result<(), LedgerError> {
    let format = &app.config.date_format;
    let start = parse_date(start, format, None)?;
    let end = parse_date(end, format, None)?;
    check_range(start, end)?;

    let transactions = app.ledger.fetch_range(start, end)?;
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &transactions, start, end, format)?;

    if plot {
        if transactions.is_empty() {
            eprintln!("Nothing to plot");
        } else {
            let path = app
                .plotter
                .plot(&DailySeries::from_transactions(&transactions), PLOT_TITLE)?;
            println!("Plot saved to {}", path.display());
        }
    }
    Ok(())
}

fn store(ledger: &dyn LedgerPort, transaction: &Transaction) -> Result<(), LedgerError> {
    ledger.initialize()?;
    ledger.append(transaction)
}

/// Print the transaction table and summary, or the no-results notice.
pub fn write_report<W: Write + ?Sized>(
    out: &mut W,
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    date_format: &str,
) -> io::Result<()> {
    let summary = Summary::compute(transactions);
    if summary.is_empty() {
        writeln!(out, "{NO_RESULTS}")?;
        return Ok(());
    }

    writeln!(
        out,
        "Transactions from {} to {}",
        start.format(date_format),
        end.format(date_format)
    )?;
    for line in format_table(transactions, date_format) {
        writeln!(out, "{line}")?;
    }

    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "Total Income: ${}", format_money(summary.total_income))?;
    writeln!(out, "Total Expense: ${}", format_money(summary.total_expense))?;
    writeln!(out, "Net Savings: ${}", format_money(summary.net))?;
    Ok(())
}

/// Fixed-width rows: header first, amounts right-aligned.
pub fn format_table(transactions: &[Transaction], date_format: &str) -> Vec<String> {
    let rows: Vec<[String; 4]> = transactions
        .iter()
        .map(|t| {
            [
                t.date.format(date_format).to_string(),
                t.amount_display(),
                t.category.to_string(),
                t.description.clone(),
            ]
        })
        .collect();

    let header = ["date", "amount", "category", "description"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: [&str; 4]| {
        format!(
            "{:<dw$}  {:>aw$}  {:<cw$}  {}",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            dw = widths[0],
            aw = widths[1],
            cw = widths[2],
        )
        .trim_end()
        .to_string()
    };

    let mut lines = vec![render(header)];
    lines.extend(
        rows.iter()
            .map(|r| render([r[0].as_str(), r[1].as_str(), r[2].as_str(), r[3].as_str()])),
    );
    lines
}

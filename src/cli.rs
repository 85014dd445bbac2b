// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn req(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn loan_term_args(cmd: Command) -> Command {
    cmd.arg(req("principal", "Amount borrowed"))
        .arg(req("rate", "Annual interest rate in percent, e.g. 5.5"))
        .arg(
            Arg::new("term")
                .long("term")
                .required(true)
                .value_parser(value_parser!(u32))
                .help("Term in months"),
        )
        .arg(opt("start", "First payment date YYYY-MM-DD (default today)"))
}

fn days_arg(help: &'static str) -> Arg {
    Arg::new("days")
        .long("days")
        .value_parser(value_parser!(u32))
        .help(help)
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn export_target(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("format")
            .long("format")
            .default_value("csv")
            .value_parser(["csv", "json"]),
    )
    .arg(req("out", "Output file"))
}

pub fn build_cli() -> Command {
    Command::new("cashcast")
        .about("Personal finance forecasting: cash flow, loans, goals, salary")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("config")
                .about("Engine settings")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(req("name", "Account name"))
                        .arg(opt("type", "checking|savings|credit|cash").default_value("checking"))
                        .arg(opt("currency", "ISO code").default_value("USD"))
                        .arg(opt("opening", "Opening balance").default_value("0")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(req("name", "Account name"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(req("date", "YYYY-MM-DD"))
                        .arg(req("amount", "Signed amount; negative is spending"))
                        .arg(req("description", "Payee or memo"))
                        .arg(opt("account", "Account name"))
                        .arg(opt("category", "Category")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(opt("month", "YYYY-MM"))
                        .arg(opt("account", "Account name"))
                        .arg(opt("category", "Category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("transactions")
                    .about("CSV with date,description,amount,category,account")
                    .arg(req("path", "CSV file")),
            ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring transactions that drive the forecast")
                .subcommand(
                    Command::new("add")
                        .arg(req("amount", "Signed amount; positive is income"))
                        .arg(req("category", "Category"))
                        .arg(req("frequency", "daily|weekly|biweekly|monthly|quarterly|annual"))
                        .arg(req("next-date", "Next occurrence YYYY-MM-DD"))
                        .arg(opt("description", "Memo")),
                )
                .subcommand(json_flags(Command::new("list").arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include inactive entries"),
                )))
                .subcommand(Command::new("deactivate").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(json_flags(
            Command::new("forecast")
                .about("Project daily cash flow from recurring transactions")
                .arg(days_arg("Days to project (default: forecast_days setting)"))
                .arg(opt("start", "First projected day (default today)"))
                .arg(
                    Arg::new("view")
                        .long("view")
                        .default_value("daily")
                        .value_parser(["daily", "weekly", "monthly"]),
                )
                .arg(opt("opening", "Opening balance for alerts (default: account total)"))
                .arg(
                    Arg::new("save")
                        .long("save")
                        .action(ArgAction::SetTrue)
                        .help("Store daily predictions for later validation"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("validate")
                .about("Compare saved predictions with actual transactions")
                .arg(days_arg("Window length in days").default_value("30"))
                .arg(opt("end", "Last day of the window (default today)")),
        ))
        .subcommand(
            Command::new("loan")
                .about("Loans and amortization")
                .subcommand(json_flags(loan_term_args(
                    Command::new("schedule").about("Compute a schedule without saving"),
                )))
                .subcommand(loan_term_args(
                    Command::new("add").arg(req("name", "Loan name")),
                ))
                .subcommand(
                    Command::new("pay")
                        .arg(req("name", "Loan name"))
                        .arg(opt("amount", "Payment (default: the scheduled payment)"))
                        .arg(opt("extra", "Extra principal").default_value("0"))
                        .arg(opt("date", "Payment date (default today)")),
                )
                .subcommand(json_flags(
                    Command::new("show")
                        .arg(req("name", "Loan name"))
                        .arg(
                            Arg::new("schedule")
                                .long("schedule")
                                .action(ArgAction::SetTrue)
                                .help("Show the original schedule instead of payments"),
                        ),
                ))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(req("name", "Goal name"))
                        .arg(req("target", "Target amount"))
                        .arg(opt("date", "Target date YYYY-MM-DD"))
                        .arg(opt("category", "Category")),
                )
                .subcommand(
                    Command::new("contribute")
                        .arg(req("name", "Goal name"))
                        .arg(req("amount", "Amount; negative withdraws")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("salary")
                .about("Salary journal")
                .subcommand(
                    Command::new("add")
                        .arg(req("company", "Employer"))
                        .arg(req("position", "Job title"))
                        .arg(req("amount", "Annual salary"))
                        .arg(opt("date", "Date the pay applies from (default today)"))
                        .arg(opt("bonus", "Annual bonus").default_value("0"))
                        .arg(opt("commission", "Annual commission").default_value("0"))
                        .arg(opt("notes", "Free text")),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(
                    Command::new("summary")
                        .arg(opt("as-of", "Last day of the window (default today)"))
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("6")
                                .value_parser(value_parser!(u32)),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Reports over stored transactions")
                .subcommand(json_flags(
                    Command::new("cashflow").arg(
                        Arg::new("months")
                            .long("months")
                            .default_value("12")
                            .value_parser(value_parser!(u32)),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category").arg(opt("month", "YYYY-MM")),
                )),
        )
        .subcommand(
            Command::new("stocks")
                .about("Holdings and cached stock prices")
                .subcommand(
                    Command::new("add")
                        .arg(req("symbol", "Ticker"))
                        .arg(req("shares", "Share count"))
                        .arg(
                            Arg::new("cost")
                                .long("cost")
                                .default_value("0")
                                .help("Total cost basis of the position"),
                        ),
                )
                .subcommand(Command::new("rm").arg(req("symbol", "Ticker")))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("refresh").arg(
                        Arg::new("force")
                            .long("force")
                            .action(ArgAction::SetTrue)
                            .help("Fetch regardless of cache age and market hours"),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write schedules and forecasts to files")
                .subcommand(export_target(loan_term_args(Command::new("schedule"))))
                .subcommand(export_target(
                    Command::new("forecast")
                        .arg(days_arg("Days to project (default: forecast_days setting)"))
                        .arg(opt("start", "First projected day (default today)")),
                )),
        )
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const PERIODS: [&str; 3] = ["monthly", "quarterly", "yearly"];

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON document per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id as shown by the list command")
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse income and expenses")
        .subcommand(
            Command::new("add")
                .about("Add a transaction")
                .arg(
                    req("type", "income or expense")
                        .value_parser(["income", "expense"]),
                )
                .arg(req("amount", "Non-negative amount"))
                .arg(opt("category", "Category label (defaults to Other)"))
                .arg(opt("date", "YYYY-MM-DD, defaults to today"))
                .arg(opt("description", "Free text"))
                .arg(opt("source", "Payment source, e.g. cash or bank transfer")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(opt("start", "Earliest date, YYYY-MM-DD"))
                .arg(opt("end", "Latest date, YYYY-MM-DD"))
                .arg(opt("category", "Only this category"))
                .arg(opt("type", "Only income or expense").value_parser(["income", "expense"]))
                .arg(opt("limit", "Maximum rows").value_parser(value_parser!(usize))),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change fields of a transaction")
                .arg(id_arg())
                .arg(opt("type", "income or expense").value_parser(["income", "expense"]))
                .arg(opt("amount", "Non-negative amount"))
                .arg(opt("category", "Category label"))
                .arg(opt("date", "YYYY-MM-DD"))
                .arg(opt("description", "Free text"))
                .arg(opt("source", "Payment source")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(id_arg()),
        )
}

fn fund_cmd() -> Command {
    Command::new("fund")
        .about("Track mutual fund positions")
        .subcommand(
            Command::new("add")
                .about("Add a fund position")
                .arg(req("name", "Fund name"))
                .arg(
                    opt("investment-type", "sip, lump-sum or additional-investment")
                        .default_value("sip"),
                )
                .arg(req("fund-type", "equity, debt, hybrid, index or elss"))
                .arg(req("initial", "Amount invested"))
                .arg(opt("current", "Current value, defaults to the amount invested"))
                .arg(opt("date", "Investment date YYYY-MM-DD, defaults to today"))
                .arg(opt("notes", "Free text")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List fund positions"),
        ))
        .subcommand(
            Command::new("update-value")
                .about("Record a new valuation")
                .arg(id_arg())
                .arg(req("value", "New current value"))
                .arg(opt("note", "Note stored with the valuation"))
                .arg(opt("date", "Valuation date YYYY-MM-DD, defaults to today")),
        )
        .subcommand(
            Command::new("invest")
                .about("Add money to an existing position")
                .arg(id_arg())
                .arg(req("amount", "Additional amount invested"))
                .arg(opt("date", "YYYY-MM-DD, defaults to today")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of a fund position")
                .arg(id_arg())
                .arg(opt("name", "Fund name"))
                .arg(opt("investment-type", "sip, lump-sum or additional-investment"))
                .arg(opt("fund-type", "equity, debt, hybrid, index or elss"))
                .arg(opt("initial", "Amount invested"))
                .arg(opt("current", "Current value"))
                .arg(opt("date", "Investment date YYYY-MM-DD"))
                .arg(opt("notes", "Free text")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a fund position")
                .arg(id_arg()),
        )
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("Show or change goals and preferences")
        .subcommand(json_flags(Command::new("show").about("Show the profile")))
        .subcommand(
            Command::new("set")
                .about("Update profile fields")
                .arg(opt("income-goal", "Monthly income goal"))
                .arg(opt("savings-target", "Monthly savings target"))
                .arg(opt("currency", "Preferred currency code"))
                .arg(
                    opt("quotes", "Show motivational quotes (true/false)")
                        .value_parser(value_parser!(bool)),
                ),
        )
}

fn invoice_cmd() -> Command {
    Command::new("invoice")
        .about("Create invoices and book them as transactions")
        .subcommand(
            Command::new("add")
                .about("Create a draft invoice")
                .arg(req("from-name", "Issuer name"))
                .arg(opt("from-email", "Issuer email"))
                .arg(opt("from-address", "Issuer address"))
                .arg(opt("from-phone", "Issuer phone"))
                .arg(req("to-name", "Client name"))
                .arg(opt("to-email", "Client email"))
                .arg(opt("to-address", "Client address"))
                .arg(opt("to-phone", "Client phone"))
                .arg(opt("date", "Invoice date YYYY-MM-DD, defaults to today"))
                .arg(opt("due-date", "Due date YYYY-MM-DD"))
                .arg(
                    Arg::new("item")
                        .long("item")
                        .required(true)
                        .action(ArgAction::Append)
                        .help("Line item as description:quantity:rate, repeatable"),
                )
                .arg(opt("tax-rate", "Tax percentage on the subtotal").default_value("0"))
                .arg(opt("notes", "Free text")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List invoices, newest first"),
        ))
        .subcommand(
            Command::new("book")
                .about("Record an invoice total as income or expense")
                .arg(id_arg())
                .arg(
                    opt("type", "income or expense")
                        .value_parser(["income", "expense"])
                        .default_value("income"),
                )
                .arg(opt("date", "Transaction date YYYY-MM-DD, defaults to today")),
        )
        .subcommand(
            Command::new("status")
                .about("Change the status of an invoice")
                .arg(id_arg())
                .arg(
                    req("set", "draft, sent, paid or cancelled")
                        .value_parser(["draft", "sent", "paid", "cancelled"]),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an invoice")
                .arg(id_arg()),
        )
}

fn backup_cmd() -> Command {
    Command::new("backup")
        .about("Write or restore a full JSON backup")
        .subcommand(
            Command::new("export")
                .about("Write all records to a JSON file")
                .arg(req("out", "Output file")),
        )
        .subcommand(
            Command::new("restore")
                .about("Replace all records with the contents of a backup file")
                .arg(req("path", "Backup file")),
        )
}

pub fn build_cli() -> Command {
    Command::new("financeflow")
        .version(clap::crate_version!())
        .about("Personal income, expense and mutual fund tracker")
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(tx_cmd())
        .subcommand(fund_cmd())
        .subcommand(profile_cmd())
        .subcommand(invoice_cmd())
        .subcommand(json_flags(
            Command::new("analytics")
                .about("Monthly, category, fund and net worth series")
                .arg(
                    opt("period", "monthly, quarterly or yearly")
                        .value_parser(PERIODS)
                        .default_value("monthly"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("health").about("Financial health score for last month"),
        ))
        .subcommand(json_flags(
            Command::new("dashboard").about("This month at a glance"),
        ))
        .subcommand(json_flags(
            Command::new("report")
                .about("Summary report for a period or an explicit date range")
                .arg(
                    opt("type", "monthly, quarterly or yearly")
                        .value_parser(PERIODS)
                        .default_value("monthly"),
                )
                .arg(opt("start", "Range start YYYY-MM-DD, requires --end"))
                .arg(opt("end", "Range end YYYY-MM-DD, requires --start")),
        ))
        .subcommand(
            Command::new("rollover")
                .about("Carry last month's positive savings into this month")
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show the entry without recording it"),
                ),
        )
        .subcommand(backup_cmd())
        .subcommand(
            Command::new("export")
                .about("Export records to CSV or JSON")
                .subcommand(
                    Command::new("transactions")
                        .arg(opt("format", "csv or json").default_value("csv"))
                        .arg(req("out", "Output file")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the database and data quality"))
}

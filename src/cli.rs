// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, crate_version, value_parser};

fn month_arg() -> Arg {
    arg!(--month <MONTH> "Month as YYYY-MM (defaults to the current month)").required(false)
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(arg!(--jsonl "Print as JSON lines").action(ArgAction::SetTrue))
}

pub fn build_cli() -> Command {
    Command::new("monthwise")
        .version(crate_version!())
        .about("Month-partitioned personal budget, recurring transactions, and crypto portfolio")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(arg!(--date <DATE> "Date as YYYY-MM-DD or RFC 3339").required(true))
                        .arg(arg!(--amount <AMOUNT> "Positive amount").required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--note <NOTE>).required(false))
                        .arg(arg!(--income "Record income instead of an expense").action(ArgAction::SetTrue))
                        .arg(arg!(--recurring "Also create a monthly repeat rule").action(ArgAction::SetTrue)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List a month's transactions")
                        .arg(month_arg())
                        .arg(
                            arg!(--limit <N> "Show at most N transactions")
                                .required(false)
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction, moving it between months if the date changed")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(month_arg().help("Month the transaction currently lives in"))
                        .arg(arg!(--date <DATE> "New date").required(false))
                        .arg(arg!(--amount <AMOUNT> "New amount").required(false))
                        .arg(arg!(--category <CATEGORY> "New category").required(false))
                        .arg(arg!(--note <NOTE> "New note").required(false))
                        .arg(arg!(--recurring "Turn recurrence on").action(ArgAction::SetTrue))
                        .arg(
                            arg!(--"no-recurring" "Turn recurrence off")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("recurring"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction from a month")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(month_arg()),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Inspect and retract monthly repeat rules")
                .subcommand(json_flags(Command::new("list").about("List all rules")))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a rule, optionally purging its future instances")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(
                            arg!(--date <DATE> "Purge generated instances dated after this")
                                .required(false),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending ceiling")
                .subcommand(
                    Command::new("set")
                        .about("Set the budget for a month")
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(month_arg()),
                )
                .subcommand(Command::new("show").about("Show a month's budget").arg(month_arg()))
                .subcommand(
                    Command::new("status")
                        .about("Budget, spent and remaining for a month")
                        .arg(month_arg()),
                ),
        )
        .subcommand(
            Command::new("crypto")
                .about("Crypto portfolio")
                .subcommand(
                    Command::new("add")
                        .about("Add to a holding (merges with an existing position)")
                        .arg(arg!(--id <ID> "Coin id, e.g. 'bitcoin'").required(true))
                        .arg(arg!(--symbol <SYMBOL> "e.g. 'btc'").required(true))
                        .arg(arg!(--name <NAME>).required(false))
                        .arg(arg!(--amount <AMOUNT> "Quantity bought").required(true))
                        .arg(arg!(--price <PRICE> "Buy price per unit in USD").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List holdings")
                        .arg(arg!(--live "Fetch live prices and show P/L").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a holding")
                        .arg(arg!(--id <ID>).required(true)),
                )
                .subcommand(
                    Command::new("search")
                        .about("Search coins by name")
                        .arg(Arg::new("query").required(true)),
                )
                .subcommand(
                    Command::new("chart")
                        .about("Price history for a coin")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(
                            arg!(--days <DAYS>)
                                .required(false)
                                .value_parser(value_parser!(u32))
                                .default_value("7"),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries over the ledger")
                .subcommand(
                    Command::new("month")
                        .about("Income, expenses, budget and remaining for a month")
                        .arg(month_arg()),
                )
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Per-category expense breakdown for a month")
                        .arg(month_arg()),
                ))
                .subcommand(
                    Command::new("trend")
                        .about("Income and expenses over the trailing months")
                        .arg(
                            arg!(--months <N>)
                                .required(false)
                                .value_parser(value_parser!(u32))
                                .default_value("6"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export every month's transactions")
                        .arg(arg!(--format <FORMAT> "csv or json").required(false).default_value("csv"))
                        .arg(arg!(--out <PATH>).required(true)),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Bulk deletion")
                .subcommand(
                    Command::new("transactions")
                        .about("Delete all transactions, keeping rules, budgets and portfolio"),
                )
                .subcommand(Command::new("all").about("Delete everything")),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON value per line"),
    )
}

fn granularity_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .value_parser(["daily", "weekly", "monthly"])
        .default_value("monthly")
        .help(help)
}

fn step_arg() -> Arg {
    Arg::new("step")
        .long("step")
        .value_parser(value_parser!(i32))
        .allow_negative_numbers(true)
        .default_value("0")
        .help("Move the period by this many months (negative goes back)")
}

pub fn build_cli() -> Command {
    Command::new("spendview")
        .about("Track income and expenses, budgets and running balance")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income | expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change fields of an existing transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("desc").long("desc"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List transactions, newest first"),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget and minimum balance")
                .subcommand(
                    Command::new("set")
                        .about("Set the monthly expense budget")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        ),
                )
                .subcommand(
                    Command::new("min-balance")
                        .about("Set the minimum balance")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        ),
                )
                .subcommand(Command::new("show").about("Show current limits")),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries and charts")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Monthly income/expense/balance and alerts")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(step_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("charts")
                        .about("Category pie/bar and running balance")
                        .arg(
                            Arg::new("anchor")
                                .long("anchor")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(step_arg())
                        .arg(granularity_arg("pie", "Pie chart period"))
                        .arg(granularity_arg("bar", "Bar chart period"))
                        .arg(granularity_arg("balance", "Balance chart period")),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .about("Expense totals per day, week or month")
                        .arg(granularity_arg("by", "Bucket size")),
                )),
        )
        .subcommand(
            Command::new("notify")
                .about("Alert history")
                .subcommand(json_flags(Command::new("list").about("List notifications")))
                .subcommand(
                    Command::new("rm").about("Delete a notification").arg(
                        Arg::new("index")
                            .long("index")
                            .required(true)
                            .value_parser(value_parser!(usize)),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Write all transactions to a file")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print JSON lines"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("plata")
        .version(crate_version!())
        .about("Trip budget tracker: how much is left and how much you can spend per day")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Use this database file instead of the platform data dir"),
        )
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(
            Command::new("status")
                .about("Remaining budget, spent total and safe spend per day")
                .arg(
                    Arg::new("as-of")
                        .long("as-of")
                        .value_name("YYYY-MM-DD")
                        .help("Compute for this date instead of today"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("config")
                .about("Trip settings")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show trip settings").args(json_args()))
                .subcommand(
                    Command::new("set")
                        .about("Change trip settings; omitted values are kept")
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .allow_hyphen_values(true)
                                .help("Total budget"),
                        )
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .allow_hyphen_values(true)
                                .help("Trip length in days"),
                        )
                        .arg(
                            Arg::new("reserved")
                                .long("reserved")
                                .allow_hyphen_values(true)
                                .help("Amount set aside and excluded from spending"),
                        )
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .value_name("YYYY-MM-DD")
                                .help("First day of the trip"),
                        ),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Record, list and delete expenses")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record an expense now")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Amount, '12.50' or '12,50'"),
                        )
                        .arg(Arg::new("category").long("category").help("Defaults to 'Otros'"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List expenses, most recent first")
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an expense by id or by listed position")
                        .arg(
                            Arg::new("id")
                                .value_parser(value_parser!(u64))
                                .required_unless_present("pos")
                                .conflicts_with("pos"),
                        )
                        .arg(
                            Arg::new("pos")
                                .long("pos")
                                .value_parser(value_parser!(usize))
                                .help("1-based position as shown by 'expense list'"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export expenses")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
        )
        .subcommand(
            Command::new("reset").about("Delete all data").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Skip the confirmation prompt"),
            ),
        )
}

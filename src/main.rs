// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;
use tracing_subscriber::{EnvFilter, fmt};

use spendview::{cli, commands, db, session::Session};

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let mut session = Session::open(conn, Local::now().date_naive());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut session, sub)?,
        Some(("notify", sub)) => commands::notifications::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

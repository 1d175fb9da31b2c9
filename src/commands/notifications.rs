// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::storage::KvStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: KvStore>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let data = session.notifications();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .enumerate()
                    .map(|(i, n)| vec![i.to_string(), n.time.clone(), n.text.clone()])
                    .collect();
                println!("{}", pretty_table(&["#", "Time", "Message"], rows));
            }
        }
        Some(("rm", sub)) => {
            let index = *sub.get_one::<usize>("index").context("Missing --index")?;
            if session
                .delete_notification(index)
                .context("Failed to save notifications")?
            {
                println!("Removed notification {}", index);
            } else {
                println!("No notification at {}", index);
            }
        }
        _ => {}
    }
    Ok(())
}

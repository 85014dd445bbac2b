// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::settings;
use crate::utils::{arg, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = arg(sub, "key")?;
            let value = arg(sub, "value")?;
            settings::set(conn, key, value)?;
            info!(key, value, "setting updated");
            println!("{} = {}", key, value);
        }
        Some(("get", sub)) => {
            println!("{}", settings::get(conn, arg(sub, "key")?)?);
        }
        Some(("list", sub)) => {
            let all = settings::list(conn)?;
            let items: Vec<_> = all
                .iter()
                .map(|(k, v)| json!({ "key": k, "value": v }))
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let rows = all.into_iter().map(|(k, v)| vec![k, v]).collect();
                println!("{}", pretty_table(&["Key", "Value"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

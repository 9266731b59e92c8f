use std::io::Write;

use anyhow::Context;
use memodict_store::{EntryFilter, OrderBy};

use crate::render::{delete_ack, flag_ack, render_table};
use crate::state::AppState;

pub async fn list(
    state: &AppState,
    lemma: &str,
    freq: &str,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let entries = state
        .client
        .list(state.config.store.fetch_limit, OrderBy::Key)
        .await
        .context("Failed to fetch entries")?;

    let rows = state.client.filter(&entries, &EntryFilter::new(lemma, freq));
    tracing::debug!("{} of {} entries match", rows.len(), entries.len());

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write!(out, "{}", render_table(&rows, state.colorize))?;
    }

    Ok(())
}

/// Toggle the flag of `id`, deciding from `current` when given and from
/// the stored record otherwise
pub async fn flag(
    state: &AppState,
    id: &str,
    current: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let updated = match current {
        Some(status) => state.client.toggle_flag(id, status).await,
        None => state.client.toggle_stored_flag(id).await,
    }
    .with_context(|| format!("Failed to update record {id}"))?;

    writeln!(out, "{}", flag_ack(id, &updated))?;
    Ok(())
}

pub async fn delete(state: &AppState, id: &str, out: &mut impl Write) -> anyhow::Result<()> {
    state
        .client
        .delete_entry(id)
        .await
        .with_context(|| format!("Failed to delete record {id}"))?;

    writeln!(out, "{}", delete_ack(id))?;
    Ok(())
}

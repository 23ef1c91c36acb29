//! One-shot request commands.

use highlighter_config::Config;
use highlighter_core::{InvocationContext, Surface};
use highlighter_protocols::{Envelope, Reply, ReplyPayload, Request};
use highlighter_storage::{keys, HistoryEntry, LastSelection, LocalStore};

use crate::server::build_dispatcher;

fn print_reply(reply: &Reply) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(reply)?);
    Ok(())
}

pub(crate) async fn run_send(
    config: &Config,
    kind: String,
    payload: Option<String>,
    tab: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = match payload {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| format!("--payload is not valid JSON: {}", e))?,
        None => serde_json::Value::Null,
    };

    let mut ctx = InvocationContext::new(Surface::Cli);
    if let Some(tab) = tab {
        ctx = ctx.with_tab(tab);
    }

    let dispatcher = build_dispatcher(config)?;
    let reply = dispatcher
        .dispatch_envelope(Envelope::new(kind, payload), ctx)
        .await;
    print_reply(&reply)?;

    if !reply.ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Text to summarize and whether it came from the stored selection.
///
/// The selection stays in the store; it is consumed only once a summary
/// has been produced for it.
async fn summary_input(
    store: &LocalStore,
    text: Option<String>,
) -> Result<(String, bool), Box<dyn std::error::Error>> {
    if let Some(text) = text {
        return Ok((text, false));
    }
    match store.get::<LastSelection>(keys::LAST_SELECTION).await? {
        Some(selection) => Ok((selection.text, true)),
        None => Err("No text given and no stored selection".into()),
    }
}

pub(crate) async fn run_summarize(
    config: &Config,
    text: Option<String>,
    save: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open(config.storage.resolved_data_dir()).await?;
    let (text, from_selection) = summary_input(&store, text).await?;

    let dispatcher = build_dispatcher(config)?;
    let reply = dispatcher
        .dispatch(
            Request::SummarizeText { text: text.clone() },
            InvocationContext::new(Surface::Cli),
        )
        .await;

    match &reply.payload {
        Some(ReplyPayload::Summary { summary }) if reply.ok => {
            println!("{}", summary);
            if from_selection {
                store.remove(keys::LAST_SELECTION).await?;
            }
            if save {
                let history = store
                    .record_summary(
                        HistoryEntry::new(text, summary.clone()),
                        config.storage.history_limit,
                    )
                    .await?;
                eprintln!("Saved ({} entries in history)", history.len());
            }
            Ok(())
        }
        _ => {
            let message = reply.message.clone().unwrap_or_else(|| "summarize failed".to_string());
            Err(message.into())
        }
    }
}

pub(crate) async fn run_events(
    config: &Config,
    max: u32,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dispatcher = build_dispatcher(config)?;
    let reply = dispatcher
        .dispatch(
            Request::ListEvents { max_results: max },
            InvocationContext::new(Surface::Cli),
        )
        .await;

    let events = match &reply.payload {
        Some(ReplyPayload::Events { events }) if reply.ok => events,
        _ => {
            let message = reply.message.clone().unwrap_or_else(|| "listing events failed".to_string());
            return Err(message.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(events)?);
        return Ok(());
    }
    if events.is_empty() {
        println!("No upcoming events");
        return Ok(());
    }
    for event in events {
        println!("{}  {}", event.start, event.summary);
    }
    Ok(())
}

pub(crate) async fn run_history(
    config: &Config,
    clear: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open(config.storage.resolved_data_dir()).await?;

    if clear {
        store.clear_history().await?;
        println!("History cleared");
        return Ok(());
    }

    let history = store.history(config.storage.history_limit).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&history.to_vec())?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No summaries yet");
        return Ok(());
    }

    for entry in history.iter() {
        println!(
            "[{}] {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            preview(&entry.original_text, 60)
        );
        for line in entry.summary.lines() {
            println!("    {}", line);
        }
        println!();
    }
    Ok(())
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}

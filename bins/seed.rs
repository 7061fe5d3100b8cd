//! Populate a running glossary service with the starter web-components terms.
//!
//! Usage:
//!   glossary-seed [--host <host>] [--port <port>]

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use gateway::client::RpcClient;
use service::api::GlossaryApi;
use service::rpc::TermMessage;
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "glossary-seed")]
#[command(about = "Seed the glossary service with starter terms")]
struct Args {
    /// Host of the glossary RPC service
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port of the glossary RPC service
    #[arg(long, default_value_t = 50051)]
    port: u16,
}

struct Seed {
    term: &'static str,
    definition: &'static str,
    tags: &'static [&'static str],
    sources: &'static [&'static str],
}

const TERMS: &[Seed] = &[
    Seed {
        term: "Web Components",
        definition: "A set of web standards (Custom Elements, Shadow DOM, HTML Templates) for building reusable UI components without tying them to a framework.",
        tags: &["standard", "frontend", "ui"],
        sources: &["https://www.w3.org/standards/"],
    },
    Seed {
        term: "Custom Elements",
        definition: "A specification for declaring your own HTML tags and controlling their lifecycle.",
        tags: &["web-components", "standard"],
        sources: &["https://developer.mozilla.org/"],
    },
    Seed {
        term: "Shadow DOM",
        definition: "DOM and CSS encapsulation that isolates a component's internal structure from the outer page.",
        tags: &["web-components", "standard"],
        sources: &["https://developer.mozilla.org/"],
    },
    Seed {
        term: "Virtual DOM",
        definition: "A UI approach where changes are applied to a virtual tree first and then synchronised efficiently with the real DOM.",
        tags: &["react", "frontend"],
        sources: &["https://react.dev/"],
    },
    Seed {
        term: "Hydration",
        definition: "Bringing server-rendered HTML to life on the client by attaching event handlers and state.",
        tags: &["ssr", "frontend"],
        sources: &["https://nextjs.org/"],
    },
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the upsert messages with ids assigned up front so relations can
/// point at terms that have not been written yet.
fn seed_messages() -> Vec<TermMessage> {
    let ids: HashMap<&str, String> = TERMS.iter().map(|s| (s.term, Uuid::new_v4().to_string())).collect();
    TERMS
        .iter()
        .map(|s| {
            let related_ids = if s.term == "Web Components" {
                vec![ids["Custom Elements"].clone(), ids["Shadow DOM"].clone()]
            } else {
                Vec::new()
            };
            TermMessage {
                id: ids[s.term].clone(),
                term: s.term.to_string(),
                definition: s.definition.to_string(),
                sources: strings(s.sources),
                tags: strings(s.tags),
                related_ids,
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    common::utils::logging::init_logging_default();
    let args = Args::parse();

    let url = format!("http://{}:{}", args.host, args.port);
    info!(%url, "seeding glossary");
    let client = RpcClient::new(url, Duration::from_secs(10))?;

    let messages = seed_messages();
    for msg in &messages {
        let saved = client.upsert_term(msg.clone()).await?;
        info!(id = %saved.id, term = %saved.term, "seeded term");
    }

    println!("Seeded {} terms", messages.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_web_components_carries_relations() {
        let msgs = seed_messages();
        assert_eq!(msgs.len(), 5);
        let wc = &msgs[0];
        assert_eq!(wc.related_ids, vec![msgs[1].id.clone(), msgs[2].id.clone()]);
        assert!(msgs[1..].iter().all(|m| m.related_ids.is_empty()));
        assert!(msgs.iter().all(|m| m.clone().into_term().is_ok()));
    }
}

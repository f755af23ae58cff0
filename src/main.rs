//! Configuration relay.
//!
//! Fetches a remote configuration document, overlays named sections from a
//! local file, and serves the result with a managed-config banner.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 CONF RELAY                   │
//!   Client Request       │  ┌────────┐   ┌─────────┐   ┌─────────────┐  │
//!   ─────────────────────┼─▶│  http  │──▶│ routing │──▶│    merge    │◀─┼──── Remote
//!                        │  │ server │   │ path +  │   │   engine    │  │     Document
//!                        │  └────────┘   │  query  │   └──────┬──────┘  │
//!                        │               └─────────┘          │         │
//!                        │                                    ▼         │
//!   Client Response      │  ┌──────────┐              ┌─────────────┐   │
//!   ◀────────────────────┼──│ response │◀─────────────│  sections   │◀──┼──── Local File
//!                        │  └──────────┘              └─────────────┘   │
//!                        │                                              │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use conf_relay::lifecycle::{self, Cli};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = lifecycle::run(cli).await {
        tracing::error!(error = %e, "Fatal startup error");
        return Err(e.into());
    }

    Ok(())
}

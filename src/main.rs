//! Label Manager CLI
//!
//! Drives a [`LabelSelectionStore`] from the command line against the
//! configured label data service (or an in-memory one with `--offline`).

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use label_manager::config::Config;
use label_manager::service::{HttpLabelService, InMemoryLabelService};
use label_manager::{Color, Item, Label, LabelSelectionStore, LabelService};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "label-manager", version, about = "Manage labels on a label data service")]
struct Cli {
    /// Use an in-memory service seeded with sample labels
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the label catalog
    List,
    /// Create a label
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Hex color (`#RRGGBB`)
        #[arg(long, default_value = "#808080")]
        color: Color,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a label by ID
    Delete {
        /// Label to delete
        label_id: String,
    },
    /// Replace an item's labels with the given label IDs
    Assign {
        /// Item to update
        item_id: String,
        /// Labels to apply, in order
        #[arg(required = true)]
        label_ids: Vec<String>,
    },
}

/// Sample catalog for offline mode
fn sample_labels() -> Vec<Label> {
    vec![
        Label::new("newsletter", "Newsletter", "#F26522"),
        Label::new("favorite", "Favorite", "#FFD234").with_description("Worth re-reading"),
        Label::new("work", "Work", "#7CFF7B"),
    ]
}

fn build_service(cli: &Cli) -> anyhow::Result<Arc<dyn LabelService>> {
    if cli.offline {
        info!("Using in-memory label service");
        return Ok(Arc::new(InMemoryLabelService::with_labels(sample_labels())));
    }

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config.service.base_url);
    let service = HttpLabelService::from_config(&config.service)
        .context("Failed to build label service client")?;
    Ok(Arc::new(service))
}

fn print_labels(labels: &[Label]) {
    if labels.is_empty() {
        println!("(no labels)");
        return;
    }
    for label in labels {
        match &label.description {
            Some(description) => {
                println!("{}\t{}\t{}\t{}", label.id, label.name, label.color, description)
            }
            None => println!("{}\t{}\t{}", label.id, label.name, label.color),
        }
    }
}

async fn run(store: &LabelSelectionStore, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List => {
            store.load_labels(None).await?;
            print_labels(&store.snapshot().all_labels);
        }
        Command::Create {
            name,
            color,
            description,
        } => {
            let label = store
                .create_label(&name, color, description.as_deref())
                .await?;
            print_labels(&[label]);
        }
        Command::Delete { label_id } => {
            store.delete_label(&label_id).await?;
            println!("Deleted {}", label_id);
        }
        Command::Assign { item_id, label_ids } => {
            // Start from an empty selection so the saved set is exactly `label_ids`.
            let item = Item::new(item_id.clone(), Vec::new());
            store.load_labels(Some(&item)).await?;

            let mut seen = HashSet::new();
            let label_ids: Vec<String> = label_ids
                .into_iter()
                .filter(|id| seen.insert(id.clone()))
                .collect();

            let state = store.snapshot();
            // Each add prepends, so walk backwards to keep the requested order.
            for label_id in label_ids.iter().rev() {
                let label = state
                    .label(label_id)
                    .cloned()
                    .ok_or_else(|| anyhow!("Unknown label: {}", label_id))?;
                store.add_label_to_item(label);
            }

            let mut applied = Vec::new();
            store
                .save_item_label_changes(&item_id, |labels| applied = labels)
                .await?;
            print_labels(&applied);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = build_service(&cli)?;
    let store = LabelSelectionStore::new(service);

    let observer = store.on_change(|state| {
        debug!(
            is_loading = state.is_loading,
            labels = state.all_labels.len(),
            selected = state.selected_labels.len(),
            "Label state changed"
        );
    });

    let result = run(&store, cli.command).await;

    store.close();
    if let Err(e) = observer.await {
        warn!(error = %e, "Label state observer ended abnormally");
    }
    result
}

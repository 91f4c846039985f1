use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

use folio::config::Config;
use folio::entry::{Entry, EntryList};
use folio::remote::{HttpRemote, RemoteItemKind, RemoteService};
use folio::sync::{ActionOutcome, Coordinator};
use folio::tree::{FeedItem, FolderTree, TapAction};
use folio::view::{FeedView, FolderView, ImportView};

/// Get the config directory path (~/.config/folio/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("folio"))
}

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Controller CLI for a folder-based feed reader")]
struct Args {
    /// Server base URL (overrides config file)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the contents of a folder
    List { folder_key: String },
    /// Add a sub-folder
    AddFolder { folder_key: String, name: String },
    /// Subscribe a feed by URL
    AddFeed { folder_key: String, url: String },
    /// Rename a feed or folder inside a folder
    Rename {
        folder_key: String,
        item_key: String,
        new_name: String,
    },
    /// Remove a feed or folder from a folder
    Remove {
        folder_key: String,
        item_key: String,
    },
    /// Mark one entry read
    Read { feed_key: String, link: String },
    /// Mark every entry of a feed read
    ReadFeed { feed_key: String },
    /// Mark everything under a folder read
    ReadFolder { folder_key: String },
    /// Refresh a feed and merge new entries
    RefreshFeed { feed_key: String },
    /// Refresh every feed under a folder
    RefreshFolder { folder_key: String },
    /// Start the server-side import job for a folder
    Import { folder_key: String },
}

/// Build the folder view projection from the server.
async fn load_folder_view(
    remote: &HttpRemote,
    key: &str,
    config: &Config,
) -> Result<FolderView> {
    let items = remote
        .load_folder(key)
        .await
        .with_context(|| format!("Failed to load folder {}", key))?;
    let items: Vec<FeedItem> = items
        .into_iter()
        .map(|i| match i.kind {
            RemoteItemKind::Feed => FeedItem::feed(i.key.as_str(), i.name, i.unread),
            RemoteItemKind::Folder => FeedItem::folder(i.key.as_str(), i.name),
        })
        .collect();
    let tree = FolderTree::new(items).with_edit_binding_for_new_items(config.edit_binds_new_items);
    Ok(FolderView::new(key, tree))
}

/// Build the feed view projection from the server.
///
/// The server lists a feed's unread entries in display order (newest
/// first), so the batch becomes the list as-is.
async fn load_feed_view(remote: &HttpRemote, key: &str) -> Result<FeedView> {
    let batch = remote
        .load_feed(key)
        .await
        .with_context(|| format!("Failed to load feed {}", key))?;
    let entries = batch
        .into_iter()
        .map(|e| Entry::new(e.link, e.title))
        .collect();
    Ok(FeedView::new(key, EntryList::from_entries(entries)))
}

/// Select `item_key` as the edit target by driving the tree through its
/// edit-mode pass, the same way a tap sequence would.
fn select_target(view: &FolderView, item_key: &str) -> Result<()> {
    let mut tree = view.tree.borrow_mut();
    tree.toggle_mode();
    let index = tree
        .items()
        .iter()
        .position(|i| &*i.key == item_key)
        .with_context(|| format!("No item {} in this folder", item_key))?;
    match tree.tap(index) {
        TapAction::OpenFeedMenu { name } | TapAction::OpenFolderMenu { name } => {
            tracing::debug!(item_key, current_name = %name, "edit target selected");
            Ok(())
        }
        other => anyhow::bail!("item {} did not open an edit menu: {:?}", item_key, other),
    }
}

/// Map an outcome to user-visible notices and an exit code.
///
/// Read-marking failures are low severity and degrade to a log line; every
/// other remote failure is a visible notice. Busy outcomes are debounced
/// taps and stay silent.
fn report(outcome: ActionOutcome, lenient_network: bool) -> u8 {
    match outcome {
        ActionOutcome::Busy => 0,
        ActionOutcome::Invalid(e) => {
            eprintln!("Rejected: {}", e);
            2
        }
        ActionOutcome::Failed(e) if lenient_network => {
            tracing::warn!(error = %e, "network error");
            0
        }
        ActionOutcome::Failed(e) => {
            eprintln!("Operation failed: {}", e);
            1
        }
        ActionOutcome::FolderAdded { key } => {
            println!("Folder added ({})", key);
            0
        }
        ActionOutcome::FeedAdded { key, name, unread } => {
            println!("Subscribed: {} ({}, {} unread)", name, key, unread);
            0
        }
        ActionOutcome::DuplicateFeed => {
            println!("That feed is already registered.");
            0
        }
        ActionOutcome::FeedNotFound => {
            println!("No feed was found at that URL.");
            0
        }
        ActionOutcome::Renamed { name } => {
            println!("Renamed to {}", name);
            0
        }
        ActionOutcome::Removed { kind } => {
            println!("Removed {:?}", kind);
            0
        }
        ActionOutcome::EntryRead => 0,
        ActionOutcome::FeedCleared => {
            println!("All entries marked read.");
            0
        }
        ActionOutcome::FolderCountsCleared => {
            println!("Folder marked read.");
            0
        }
        ActionOutcome::FeedRefreshed { added: 0 } => {
            println!("No new entries.");
            0
        }
        ActionOutcome::FeedRefreshed { added } => {
            println!("{} new entries.", added);
            0
        }
        ActionOutcome::FolderRefreshed { any_new } => {
            println!(
                "{}",
                if any_new {
                    "New entries arrived."
                } else {
                    "No new entries."
                }
            );
            0
        }
        ActionOutcome::ImportStarted { folder_key } => {
            println!("Import started for folder {}.", folder_key);
            0
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = get_config_dir()?.join("config.toml");
    let config = Config::load(&config_path).context("Failed to load configuration")?;

    let server = args
        .server
        .or_else(|| config.server_url.clone())
        .context("No server configured: pass --server or set server_url in config.toml")?;
    let base = Url::parse(&server).context("Invalid server URL")?;

    let remote = HttpRemote::new(base, std::time::Duration::from_secs(config.timeout_secs))
        .context("Failed to build HTTP client")?;
    let coordinator = Coordinator::new(remote);

    let code = match args.command {
        Command::List { folder_key } => {
            let view = load_folder_view(coordinator.remote(), &folder_key, &config).await?;
            for item in view.items() {
                match item.kind {
                    folio::tree::ItemKind::Feed => {
                        println!("feed    {}  {} ({} unread)", item.key, item.name, item.unread)
                    }
                    folio::tree::ItemKind::Folder => {
                        println!("folder  {}  {}", item.key, item.name)
                    }
                }
            }
            0
        }
        Command::AddFolder { folder_key, name } => {
            let view = load_folder_view(coordinator.remote(), &folder_key, &config).await?;
            report(coordinator.add_folder(&view, &name).await, false)
        }
        Command::AddFeed { folder_key, url } => {
            let view = load_folder_view(coordinator.remote(), &folder_key, &config).await?;
            report(coordinator.add_feed(&view, &url).await, false)
        }
        Command::Rename {
            folder_key,
            item_key,
            new_name,
        } => {
            let view = load_folder_view(coordinator.remote(), &folder_key, &config).await?;
            select_target(&view, &item_key)?;
            report(coordinator.rename_target(&view, &new_name).await, false)
        }
        Command::Remove {
            folder_key,
            item_key,
        } => {
            let view = load_folder_view(coordinator.remote(), &folder_key, &config).await?;
            select_target(&view, &item_key)?;
            report(coordinator.remove_target(&view).await, false)
        }
        Command::Read { feed_key, link } => {
            let view = load_feed_view(coordinator.remote(), &feed_key).await?;
            report(coordinator.read_entry(&view, &link).await, true)
        }
        Command::ReadFeed { feed_key } => {
            let view = load_feed_view(coordinator.remote(), &feed_key).await?;
            report(coordinator.read_all_feed(&view).await, false)
        }
        Command::ReadFolder { folder_key } => {
            let view = load_folder_view(coordinator.remote(), &folder_key, &config).await?;
            report(coordinator.read_all_folder(&view).await, false)
        }
        Command::RefreshFeed { feed_key } => {
            let view = load_feed_view(coordinator.remote(), &feed_key).await?;
            report(coordinator.refresh_feed(&view).await, false)
        }
        Command::RefreshFolder { folder_key } => {
            let view = load_folder_view(coordinator.remote(), &folder_key, &config).await?;
            report(coordinator.refresh_folder(&view).await, false)
        }
        Command::Import { folder_key } => {
            let view = ImportView::new(folder_key.as_str());
            report(coordinator.start_import(&view).await, false)
        }
    };

    if code != 0 {
        std::process::exit(code.into());
    }
    Ok(())
}

//! # Tweetfeed
//!
//! Command line front end for the tweetfeed library: browse feeds and act on
//! tweets through the TweetApp HTTP API.
//!
//! ## Environment Variables
//!
//! - `TWEETAPP_HANDLE`: Handle of the logged-in user
//! - `TWEETAPP_TOKEN`: Authorization token issued at login
//! - `TWEETAPP_API_URL`: Base URL of the Tweet API (defaults to `http://localhost:8080`)
//!
//! ## Example Usage
//!
//! ```bash
//! # Global feed with replies expanded
//! tweetfeed feed --expand
//!
//! # Edit one of your tweets with debug logging
//! RUST_LOG=debug tweetfeed edit 42 "fixed the typo"
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info, warn};

use tweetfeed::{
    ClientConfig, FeedResult, FeedScope, FeedSyncController, HttpTweetApi, Session, SessionStore,
    ToggleField, TweetId, TweetView,
};

#[derive(Parser, Debug)]
#[command(name = "tweetfeed", version, about = "Browse and manage tweets on a TweetApp server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the global feed, or one user's tweets
    Feed {
        /// Only tweets by this user
        #[arg(long)]
        user: Option<String>,
        /// Show replies under each tweet
        #[arg(long)]
        expand: bool,
    },
    /// Post a new tweet
    Post { message: String },
    /// Reply to a tweet
    Reply { id: String, message: String },
    /// Replace the message of one of your tweets
    Edit { id: String, message: String },
    /// Delete one of your tweets
    Delete { id: String },
    /// Like a tweet
    Like { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logging system
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("tweetfeed failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> FeedResult<()> {
    let config = ClientConfig::from_env()?;
    let sessions = SessionStore::new();
    sessions.login(Session::from_env()?);

    let result = execute(cli.command, &config, &sessions).await;
    sessions.logout();
    result
}

async fn execute(command: Command, config: &ClientConfig, sessions: &SessionStore) -> FeedResult<()> {
    let session = sessions
        .current()
        .ok_or_else(|| tweetfeed::FeedError::Config("not logged in".into()))?;
    let own_scope = FeedScope::user(session.handle.clone());
    let api = HttpTweetApi::new(config)?;
    let feed = FeedSyncController::new(api, session, config);

    let outcome = match command {
        Command::Feed { user, expand } => {
            let scope = user.map(FeedScope::User).unwrap_or(FeedScope::All);
            let result = feed.fetch_feed(scope).await;
            if result.is_ok() && expand {
                for tweet in feed.tweets() {
                    feed.toggle(&tweet.id, ToggleField::RepliesExpanded);
                }
            }
            result.map(|count| info!("{} tweets loaded", count))
        }
        Command::Post { message } => feed.post_tweet(&message).await.map(|_| ()),
        Command::Reply { id, message } => {
            let id = TweetId::from(id);
            // Replying does not need the feed.
            if let Err(e) = feed.fetch_feed(FeedScope::All).await {
                warn!("Replying without a loaded feed: {}", e);
            }
            feed.toggle(&id, ToggleField::ReplyComposerOpen);
            feed.set_reply_draft(&id, &message);
            feed.submit_reply(&id, &message).await.map(|_| ())
        }
        Command::Edit { id, message } => match feed.fetch_feed(own_scope).await {
            Ok(_) => {
                let id = TweetId::from(id);
                feed.toggle(&id, ToggleField::EditMode);
                feed.set_edit_draft(&id, &message);
                feed.submit_edit(&id, &message).await.map(|_| ())
            }
            Err(e) => Err(e),
        },
        Command::Delete { id } => match feed.fetch_feed(own_scope).await {
            Ok(_) => feed.delete_tweet(&TweetId::from(id)).await.map(|_| ()),
            Err(e) => Err(e),
        },
        Command::Like { id } => match feed.fetch_feed(FeedScope::All).await {
            Ok(_) => feed.like_tweet(&TweetId::from(id)).await.map(|_| ()),
            Err(e) => Err(e),
        },
    };

    for view in feed.view(chrono::Utc::now()) {
        print_tweet(&view);
    }
    for notice in feed.drain_notices() {
        println!("{}", notice);
    }
    outcome
}

fn print_tweet(view: &TweetView) {
    let mut actions = vec!["reply", "show replies"];
    if view.controls.edit {
        actions.push("edit");
    }
    if view.controls.delete {
        actions.push("delete");
    }
    println!(
        "[{}] @{} ({}, {} likes, {} replies)",
        view.tweet.id,
        view.tweet.handle,
        view.age,
        view.tweet.likes,
        view.reply_count()
    );
    println!("    {}", view.message_text);
    for reply in view.visible_replies() {
        println!("      ↳ @{}: {}", reply.handle, reply.message);
    }
    println!("    actions: {}", actions.join(", "));
}

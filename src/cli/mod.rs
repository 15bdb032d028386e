//! CLI module for the document chat backend.

pub mod commands;

use clap::{Parser, Subcommand};

/// Document-grounded chat backend.
#[derive(Debug, Parser)]
#[command(name = "docchat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Create the database schema (pgvector extension, tables, indexes)
    InitDb,

    /// Upload a PDF document into a conversation
    Upload(commands::UploadArgs),

    /// Send a chat message and print the grounded answer
    Chat(commands::ChatArgs),

    /// List conversations
    Conversations,

    /// List a conversation's messages in order
    Messages(commands::MessagesArgs),
}

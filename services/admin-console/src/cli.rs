//! Command-line surface

use std::path::PathBuf;

use admin_api::{Profession, SupportCategory, WorkerStatus};
use clap::{ArgGroup, Args, Parser, Subcommand};

/// Administrative console for the services marketplace
#[derive(Parser, Debug)]
#[command(name = "marketplace-admin", version)]
pub struct Cli {
    /// Path to the TOML config file (overrides CONFIG_PATH)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as an administrator and store the session
    Login {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// Keep name and phone for the next login
        #[arg(long)]
        remember: bool,
    },
    /// Drop the stored session, keeping a remembered login
    Logout,
    /// Show the stored identity
    Whoami,
    #[command(subcommand)]
    Workers(WorkersCommand),
    #[command(subcommand)]
    Customers(CustomersCommand),
    #[command(subcommand)]
    Complaints(ComplaintsCommand),
    #[command(subcommand)]
    Faqs(FaqsCommand),
    #[command(subcommand)]
    Tickets(TicketsCommand),
    #[command(subcommand)]
    BasePrice(BasePriceCommand),
}

#[derive(Args, Debug, Clone, Copy)]
pub struct Paging {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Defaults to the dashboard page size for the resource
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum WorkersCommand {
    /// List workers, optionally by status (code or name)
    List {
        #[arg(long)]
        status: Option<WorkerStatus>,
        #[command(flatten)]
        paging: Paging,
    },
    Get {
        id: String,
    },
    #[command(group(ArgGroup::new("by").required(true).args(["name", "id"])))]
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: String,
    },
    #[command(group(ArgGroup::new("length").required(true).args(["days", "permanent"])))]
    Suspend {
        id: String,
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        permanent: bool,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CustomersCommand {
    List {
        /// Status filter; 0 lists every status
        #[arg(long, default_value_t = admin_api::ACTIVE_CUSTOMER_STATUS)]
        status: u8,
        #[command(flatten)]
        paging: Paging,
    },
    Get {
        id: String,
    },
    Search {
        id: String,
    },
    Suspend {
        id: String,
        #[arg(long)]
        days: u32,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ComplaintsCommand {
    List {
        #[command(flatten)]
        paging: Paging,
    },
    Approve {
        id: String,
        #[arg(long)]
        remarks: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FaqsCommand {
    List {
        #[command(flatten)]
        paging: Paging,
    },
    Create {
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        #[arg(long)]
        category: Option<u32>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TicketsCommand {
    /// List open support tickets
    List {
        #[arg(long)]
        category: Option<SupportCategory>,
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Subcommand, Debug)]
pub enum BasePriceCommand {
    Set {
        #[arg(long)]
        profession: Profession,
        #[arg(long)]
        price: u64,
    },
}

//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    call, login, logout, quotas, records, refresh, register, report, reset_pass, set_new_pass,
    whoami,
};

/// Command-line client for the Birracraft back-office API.
#[derive(Parser, Debug)]
#[command(name = "birra")]
#[command(author, version = env!("BIRRA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL [default: http://localhost:8680/api]
    #[arg(long, env = "BIRRA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Session file [default: session.json in the user data directory]
    #[arg(long, env = "BIRRA_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login(login::LoginArgs),

    /// Forget the stored session
    Logout(logout::LogoutArgs),

    /// Display the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// Exchange the refresh token for a new pair
    Refresh(refresh::RefreshArgs),

    /// Send an authenticated request and print the JSON answer
    Call(call::CallArgs),

    /// Manage back-office records
    Records(records::RecordsArgs),

    /// List the quotas of a payment
    Quotas(quotas::QuotasArgs),

    /// Ask the backend to mail a report
    Report(report::ReportArgs),

    /// Register a new account
    Register(register::RegisterArgs),

    /// Request a password-reset email
    ResetPass(reset_pass::ResetPassArgs),

    /// Set a new password after a reset
    SetNewPass(set_new_pass::SetNewPassArgs),
}

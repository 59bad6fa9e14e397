//! Sign-in and sign-out commands.

use clap::Args;

use crate::output;
use officehub_backend::AttendanceBackend;
use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_core::types::MemberId;

/// A single member identity
#[derive(Debug, Args)]
pub struct MemberArg {
    /// Chat user id of the member
    pub member: String,
}

/// Confirmation bypass
#[derive(Debug, Args)]
pub struct ConfirmArg {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Sign a member in
pub async fn sign_in(args: &MemberArg, config: &AppConfig) -> Result<(), AppError> {
    let backend = super::backend_client(config)?;
    backend.sign_in(&MemberId::new(args.member.trim())).await?;
    output::print_success(&format!("Signed in {}", args.member));
    Ok(())
}

/// Sign a member out
pub async fn sign_out(args: &MemberArg, config: &AppConfig) -> Result<(), AppError> {
    let backend = super::backend_client(config)?;
    backend.sign_out(&MemberId::new(args.member.trim())).await?;
    output::print_success(&format!("Signed out {}", args.member));
    Ok(())
}

/// Sign everyone out
pub async fn sign_out_all(args: &ConfirmArg, config: &AppConfig) -> Result<(), AppError> {
    if !output::confirm("Sign out everyone currently in the office?", args.yes)? {
        return Ok(());
    }
    let backend = super::backend_client(config)?;
    backend.sign_out_all().await?;
    output::print_success("Signed out all users");
    Ok(())
}

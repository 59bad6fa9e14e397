//! Member management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use officehub_backend::{AttendanceBackend, Member, NewMember};
use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_core::types::MemberId;

/// Arguments for member commands
#[derive(Debug, Args)]
pub struct MembersArgs {
    /// Member subcommand
    #[command(subcommand)]
    pub command: MembersCommand,
}

/// Member subcommands
#[derive(Debug, Subcommand)]
pub enum MembersCommand {
    /// List registered members
    List,
    /// Register a member
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Badge or student UID
        #[arg(short, long)]
        uid: String,
        /// Chat user id to link
        #[arg(short, long)]
        member: String,
    },
    /// Remove a member by UID
    Remove {
        /// Badge or student UID
        uid: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Member display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MemberRow {
    /// Name
    name: String,
    /// UID
    uid: String,
    /// Linked chat id
    discord_id: String,
}

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        Self {
            name: m.name.clone(),
            uid: m.uid.clone(),
            discord_id: m.discord_id.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute member commands
pub async fn execute(
    args: &MembersArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let backend = super::backend_client(config)?;

    match &args.command {
        MembersCommand::List => {
            let members = backend.list_members().await?;
            let rows: Vec<MemberRow> = members.iter().map(MemberRow::from).collect();
            output::print_list(&rows, format);
        }
        MembersCommand::Add { name, uid, member } => {
            let name = name.trim();
            let uid = uid.trim();
            if name.is_empty() || uid.is_empty() || member.trim().is_empty() {
                return Err(AppError::validation("name, uid and member must not be empty"));
            }
            backend
                .create_member(&NewMember {
                    name: name.to_string(),
                    uid: uid.to_string(),
                    discord_id: MemberId::new(member.trim()),
                })
                .await?;
            output::print_success(&format!("Member '{}' registered with UID {}", name, uid));
        }
        MembersCommand::Remove { uid, yes } => {
            if !output::confirm(&format!("Remove member with UID '{}'?", uid), *yes)? {
                return Ok(());
            }
            backend.delete_member(uid).await?;
            output::print_success(&format!("Member with UID '{}' removed", uid));
        }
    }

    Ok(())
}

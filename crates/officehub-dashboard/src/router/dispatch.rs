//! Interaction router.
//!
//! Each interaction moves through received → capability checked →
//! cooldown checked (refresh only) → executed, and may be rejected at either
//! check. Every outcome becomes an [`InteractionReply`]; no error escapes.

use std::sync::Arc;

use officehub_backend::{AttendanceBackend, NewMember, VisitRange};
use officehub_core::config::DashboardConfig;
use officehub_core::types::{CapabilityMode, ChannelId, CommunityId, SurfaceId};
use officehub_report::ReportEngine;

use crate::cooldown::CooldownTracker;
use crate::registry::SurfaceRegistry;
use crate::sync::SyncHandle;
use crate::trigger::RefreshTrigger;

use super::error::InteractionError;
use super::interaction::{AdminCommand, ButtonAction, Caller, Interaction, InteractionReply};

/// Visits shown by the history command when no limit is given.
const DEFAULT_HISTORY_LIMIT: usize = 10;

type DispatchResult = Result<InteractionReply, InteractionError>;

/// Routes interactions to the backend, the report engine or the sync loop.
#[derive(Debug)]
pub struct InteractionRouter {
    backend: Arc<dyn AttendanceBackend>,
    registry: Arc<SurfaceRegistry>,
    reports: ReportEngine,
    cooldowns: CooldownTracker,
    sync: SyncHandle,
    config: DashboardConfig,
}

impl InteractionRouter {
    /// Creates a new router.
    pub fn new(
        backend: Arc<dyn AttendanceBackend>,
        registry: Arc<SurfaceRegistry>,
        reports: ReportEngine,
        sync: SyncHandle,
        config: DashboardConfig,
    ) -> Self {
        Self {
            cooldowns: CooldownTracker::new(config.manual_cooldown_seconds),
            backend,
            registry,
            reports,
            sync,
            config,
        }
    }

    /// Handle one interaction and produce the caller's reply.
    pub async fn handle(&self, interaction: Interaction) -> InteractionReply {
        let community = interaction.community();
        let identity = interaction.caller().identity.clone();
        tracing::debug!(community = %community, caller = %identity, "Interaction received");

        match self.dispatch(interaction).await {
            Ok(reply) => {
                tracing::debug!(community = %community, caller = %identity, "Interaction executed");
                reply
            }
            Err(err) => {
                match &err {
                    InteractionError::Backend(e) => {
                        tracing::error!(community = %community, caller = %identity, error = %e, "Interaction failed")
                    }
                    other => {
                        tracing::info!(community = %community, caller = %identity, reason = %other, "Interaction rejected")
                    }
                }
                InteractionReply::failure(err.user_message())
            }
        }
    }

    async fn dispatch(&self, interaction: Interaction) -> DispatchResult {
        match interaction {
            Interaction::Button {
                community,
                custom_id,
                caller,
            } => {
                let action = ButtonAction::from_custom_id(&custom_id)
                    .ok_or(InteractionError::UnknownControl(custom_id))?;
                self.press(community, &caller, action).await
            }
            Interaction::Command {
                community,
                channel,
                caller,
                command,
            } => self.command(community, channel, &caller, command).await,
        }
    }

    /// Mode of a community: its registered surface, else its configuration.
    fn mode(&self, community: CommunityId) -> Option<CapabilityMode> {
        self.registry
            .mode(community)
            .or_else(|| self.config.mode_for(community))
    }

    async fn press(&self, community: CommunityId, caller: &Caller, action: ButtonAction) -> DispatchResult {
        match action {
            ButtonAction::Leave => {
                let mode = self
                    .mode(community)
                    .ok_or(InteractionError::UnconfiguredCommunity(community))?;
                if !mode.allows_leave() {
                    return Err(InteractionError::Permission(
                        "Signing out is only available from the control dashboard.".to_string(),
                    ));
                }
                tracing::debug!(community = %community, caller = %caller.identity, "Capability checked");

                self.backend.sign_out(&caller.identity).await?;
                tracing::info!(caller = %caller.identity, "Member signed out from dashboard");
                self.notify(RefreshTrigger::state_change(Some(caller.identity.clone())));
                Ok(InteractionReply::message("👋 You have been signed out of the office."))
            }
            ButtonAction::Refresh => {
                if self.registry.get(community).is_none() {
                    return Err(InteractionError::NoSurface(community));
                }
                tracing::debug!(community = %community, caller = %caller.identity, "Capability checked");

                self.cooldowns
                    .try_acquire(&caller.identity, community)
                    .map_err(|remaining_seconds| InteractionError::Cooldown { remaining_seconds })?;
                tracing::debug!(community = %community, caller = %caller.identity, "Cooldown checked");

                if let Err(err) = self.submit(RefreshTrigger::manual(caller.identity.clone(), community)) {
                    self.cooldowns.release(&caller.identity, community);
                    return Err(err);
                }
                Ok(InteractionReply::message("🔄 Refreshing dashboard..."))
            }
            ButtonAction::Page { key, page } => {
                self.require_control(community)?;
                let document = self.reports.listing_page(key, page).await?;
                Ok(InteractionReply::document(document))
            }
        }
    }

    fn require_control(&self, community: CommunityId) -> Result<(), InteractionError> {
        match self.config.mode_for(community) {
            Some(CapabilityMode::Control) => Ok(()),
            _ => Err(InteractionError::Permission(
                "Admin commands are only available in the control server.".to_string(),
            )),
        }
    }

    fn submit(&self, trigger: RefreshTrigger) -> Result<(), InteractionError> {
        if self.sync.submit(trigger) {
            Ok(())
        } else {
            Err(InteractionError::Unavailable)
        }
    }

    /// Queue a refresh after a backend state change that already succeeded.
    fn notify(&self, trigger: RefreshTrigger) {
        let identity = trigger.identity.clone();
        if !self.sync.submit(trigger) {
            tracing::warn!(
                identity = ?identity,
                "Refresh loop stopped; dashboards not updated after state change"
            );
        }
    }

    async fn command(
        &self,
        community: CommunityId,
        channel: ChannelId,
        caller: &Caller,
        command: AdminCommand,
    ) -> DispatchResult {
        if !command.allowed_anywhere() {
            self.require_control(community)?;
        }
        if command.is_privileged() && !caller.is_admin {
            return Err(InteractionError::Permission(
                "This command requires administrator permissions.".to_string(),
            ));
        }
        tracing::debug!(community = %community, command = command.name(), "Capability checked");

        match command {
            AdminCommand::Setup => {
                let mode = self
                    .config
                    .mode_for(community)
                    .ok_or(InteractionError::UnconfiguredCommunity(community))?;
                self.registry.register(SurfaceId::new(community, channel), mode);
                self.submit(RefreshTrigger::admin(
                    Some(caller.identity.clone()),
                    Some(community),
                ))?;
                Ok(InteractionReply::message(format!(
                    "✅ Office dashboard set up in this channel ({mode} mode)."
                )))
            }
            AdminCommand::SignIn { member } => {
                let member = member.unwrap_or_else(|| caller.identity.clone());
                self.backend.sign_in(&member).await?;
                self.notify(RefreshTrigger::state_change(Some(member.clone())));
                Ok(InteractionReply::message(format!(
                    "✅ <@{member}> has been signed in to the office."
                )))
            }
            AdminCommand::SignOut { member } => {
                let member = member.unwrap_or_else(|| caller.identity.clone());
                self.backend.sign_out(&member).await?;
                self.notify(RefreshTrigger::state_change(Some(member.clone())));
                Ok(InteractionReply::message(format!(
                    "✅ <@{member}> has been signed out from the office."
                )))
            }
            AdminCommand::SignOutAll => {
                self.backend.sign_out_all().await?;
                tracing::info!(caller = %caller.identity, "All members signed out");
                self.notify(RefreshTrigger::state_change(Some(caller.identity.clone())));
                Ok(InteractionReply::message(
                    "✅ All members have been signed out from the office.",
                ))
            }
            AdminCommand::AddMember { name, uid, member } => {
                let name = name.trim().to_string();
                let uid = uid.trim().to_string();
                if name.is_empty() || uid.is_empty() {
                    return Err(InteractionError::Validation(
                        "Name and UID must not be empty.".to_string(),
                    ));
                }
                self.backend
                    .create_member(&NewMember {
                        name,
                        uid: uid.clone(),
                        discord_id: member.clone(),
                    })
                    .await?;
                Ok(InteractionReply::message(format!(
                    "✅ Successfully added <@{member}> with UID `{uid}`."
                )))
            }
            AdminCommand::RemoveMember { uid } => {
                self.backend.delete_member(uid.trim()).await?;
                Ok(InteractionReply::message(format!("✅ Removed member with UID `{}`.", uid.trim())))
            }
            AdminCommand::ListMembers { page } => {
                Ok(InteractionReply::document(self.reports.members_page(page).await?))
            }
            AdminCommand::History { limit, page } => {
                let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
                Ok(InteractionReply::document(
                    self.reports.history_page(limit, page).await?,
                ))
            }
            AdminCommand::ScanHistory { page } => {
                Ok(InteractionReply::document(self.reports.scans_page(page).await?))
            }
            AdminCommand::Leaderboard {
                metric,
                period,
                top_n,
                page,
            } => {
                let top_n = top_n.unwrap_or_else(|| self.reports.default_top_n()).max(1);
                Ok(InteractionReply::document(
                    self.reports
                        .leaderboard_page(metric, period, top_n, page)
                        .await?,
                ))
            }
            AdminCommand::DeleteVisits { since, until } => {
                let range = VisitRange::new(since, until)?;
                let deleted = self.backend.delete_visits(&range).await?;
                tracing::info!(caller = %caller.identity, deleted, "Visit records deleted");
                Ok(InteractionReply::message(format!(
                    "🗑️ Deleted {deleted} visit record{}.",
                    if deleted == 1 { "" } else { "s" }
                )))
            }
            AdminCommand::Refresh { target } => {
                if let Some(target) = target
                    && self.registry.get(target).is_none()
                {
                    return Err(InteractionError::NoSurface(target));
                }
                self.submit(RefreshTrigger::admin(Some(caller.identity.clone()), target))?;
                Ok(InteractionReply::message("🔄 Dashboard refresh requested."))
            }
        }
    }
}

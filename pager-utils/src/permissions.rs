use twilight_http::Client;
use twilight_model::{
    channel::{ChannelType, permission_overwrite::PermissionOverwrite},
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker},
    },
};
use twilight_util::permission_calculator::PermissionCalculator;

/// Resolve a member's effective permissions in one guild channel.
///
/// Guild roles, the owner and administrator overrides, then the channel's
/// permission overwrites are all applied.
pub async fn resolve_channel_permissions(
    http: &Client,
    guild_id: Id<GuildMarker>,
    channel_id: Id<ChannelMarker>,
    user_id: Id<UserMarker>,
) -> anyhow::Result<Permissions> {
    let guild = http.guild(guild_id).await?.model().await?;
    let member = http.guild_member(guild_id, user_id).await?.model().await?;
    let channel = http.channel(channel_id).await?.model().await?;

    Ok(channel_permissions(
        guild_id,
        guild.owner_id,
        user_id,
        &member.roles,
        guild.roles.iter().map(|role| (role.id, role.permissions)),
        channel.kind,
        channel.permission_overwrites.as_deref().unwrap_or_default(),
    ))
}

/// Split guild roles into `@everyone` and the member's own roles, then run the
/// channel permission calculation.
pub fn channel_permissions(
    guild_id: Id<GuildMarker>,
    owner_id: Id<UserMarker>,
    user_id: Id<UserMarker>,
    member_roles: &[Id<RoleMarker>],
    guild_roles: impl IntoIterator<Item = (Id<RoleMarker>, Permissions)>,
    channel_kind: ChannelType,
    overwrites: &[PermissionOverwrite],
) -> Permissions {
    let mut everyone = Permissions::empty();
    let mut assigned = Vec::new();

    for (role_id, permissions) in guild_roles {
        if role_id == guild_id.cast() {
            everyone = permissions;
        } else if member_roles.contains(&role_id) {
            assigned.push((role_id, permissions));
        }
    }

    PermissionCalculator::new(guild_id, user_id, everyone, &assigned)
        .owner_id(owner_id)
        .in_channel(channel_kind, overwrites)
}

/// Check whether a guild member holds `required` in the given channel.
pub async fn has_channel_permission(
    http: &Client,
    guild_id: Id<GuildMarker>,
    channel_id: Id<ChannelMarker>,
    user_id: Id<UserMarker>,
    required: Permissions,
) -> anyhow::Result<bool> {
    let perms = resolve_channel_permissions(http, guild_id, channel_id, user_id).await?;
    Ok(perms.contains(required))
}

// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_model::guild::Permissions;
use twilight_model::http::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::id::Id;
use twilight_model::id::marker::{RoleMarker, UserMarker};

/// The permissions granted to (or, on removal, denied to) each participant of a ticket channel.
pub fn ticket_permissions() -> Permissions {
	Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::READ_MESSAGE_HISTORY
}

/// Overwrite letting a member see and talk in a ticket channel.
pub fn member_access_overwrite(user_id: Id<UserMarker>) -> PermissionOverwrite {
	PermissionOverwrite {
		allow: Some(ticket_permissions()),
		deny: Some(Permissions::empty()),
		id: user_id.cast(),
		kind: PermissionOverwriteType::Member,
	}
}

/// Overwrite locking a member out of a ticket channel.
pub fn member_revoke_overwrite(user_id: Id<UserMarker>) -> PermissionOverwrite {
	PermissionOverwrite {
		allow: Some(Permissions::empty()),
		deny: Some(ticket_permissions()),
		id: user_id.cast(),
		kind: PermissionOverwriteType::Member,
	}
}

pub fn role_access_overwrite(role_id: Id<RoleMarker>) -> PermissionOverwrite {
	PermissionOverwrite {
		allow: Some(ticket_permissions()),
		deny: Some(Permissions::empty()),
		id: role_id.cast(),
		kind: PermissionOverwriteType::Role,
	}
}

/// Whether a member with the given roles counts as support staff. Without a configured support role, nobody does.
pub fn is_support_staff(member_roles: &[Id<RoleMarker>], support_role_id: Option<Id<RoleMarker>>) -> bool {
	match support_role_id {
		Some(support_role_id) => member_roles.contains(&support_role_id),
		None => false,
	}
}

/// Reasons a ticket command refuses to act. Each is reported to the invoking user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Refusal {
	OpenForOtherUser,
	RemoveSelf,
	RemoveBot,
	RemoveStaff,
	NotTicketChannel,
}

impl Refusal {
	pub fn message(&self) -> &'static str {
		match self {
			Self::OpenForOtherUser => "You do not have permission to open a ticket for another user.",
			Self::RemoveSelf => "You cannot remove yourself from the ticket.",
			Self::RemoveBot => "You cannot remove the bot from the ticket.",
			Self::RemoveStaff => "You cannot remove a staff member from the ticket.",
			Self::NotTicketChannel => "This command can only be used in a ticket channel.",
		}
	}
}

/// Only support staff may open a ticket on behalf of someone else.
pub fn check_open(invoker: Id<UserMarker>, target: Id<UserMarker>, invoker_is_staff: bool) -> Result<(), Refusal> {
	if target != invoker && !invoker_is_staff {
		return Err(Refusal::OpenForOtherUser);
	}
	Ok(())
}

/// Checks on a removal target that need no lookups. Staff status is checked separately once the target's roles are
/// known.
pub fn check_removal_target(
	invoker: Id<UserMarker>,
	target: Id<UserMarker>,
	bot_user: Id<UserMarker>,
) -> Result<(), Refusal> {
	if target == invoker {
		return Err(Refusal::RemoveSelf);
	}
	if target == bot_user {
		return Err(Refusal::RemoveBot);
	}
	Ok(())
}

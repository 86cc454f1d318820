//! Channel descriptors and the request payload sent to the authorization endpoint.

pub mod id;

pub use id::*;

// self
use crate::_prelude::*;

/// Error returned when a channel name or socket id fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ChannelError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (channel, socket).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (channel, socket).
		kind: &'static str,
	},
	/// The identifier contains a character outside the protocol charset.
	#[error("{kind} identifier contains the invalid character `{invalid}`.")]
	InvalidCharacter {
		/// Kind of identifier (channel, socket).
		kind: &'static str,
		/// First offending character.
		invalid: char,
	},
	/// The identifier exceeded the allowed length.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (channel, socket).
		kind: &'static str,
		/// Maximum permitted length.
		max: usize,
	},
}

/// Channel category derived from the name prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
	/// Public channel; joins without authorization.
	Public,
	/// `private-*` channel.
	Private,
	/// `private-encrypted-*` channel.
	EncryptedPrivate,
	/// `presence-*` channel; authorization also carries member data.
	Presence,
}
impl ChannelKind {
	/// Derives the channel kind from its name.
	pub fn from_name(name: &str) -> Self {
		if name.starts_with("private-encrypted-") {
			ChannelKind::EncryptedPrivate
		} else if name.starts_with("private-") {
			ChannelKind::Private
		} else if name.starts_with("presence-") {
			ChannelKind::Presence
		} else {
			ChannelKind::Public
		}
	}

	/// Whether the transport must obtain credentials before joining.
	pub const fn requires_authorization(self) -> bool {
		!matches!(self, ChannelKind::Public)
	}

	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ChannelKind::Public => "public",
			ChannelKind::Private => "private",
			ChannelKind::EncryptedPrivate => "private_encrypted",
			ChannelKind::Presence => "presence",
		}
	}
}

/// Channel the transport wants to join.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelDescriptor {
	/// Validated channel name.
	pub name: ChannelName,
}
impl ChannelDescriptor {
	/// Wraps a validated channel name.
	pub fn new(name: ChannelName) -> Self {
		Self { name }
	}

	/// Validates `name` and wraps it.
	pub fn parse(name: impl AsRef<str>) -> Result<Self, ChannelError> {
		ChannelName::new(name).map(Self::new)
	}

	/// Kind derived from the channel name.
	pub fn kind(&self) -> ChannelKind {
		ChannelKind::from_name(&self.name)
	}
}

/// JSON body posted to the authorization endpoint for one join attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthorizationRequest<'a> {
	/// Connection the credentials will be bound to.
	pub socket_id: &'a SocketId,
	/// Channel being joined.
	pub channel_name: &'a ChannelName,
}
impl<'a> AuthorizationRequest<'a> {
	/// Pairs a connection with a channel.
	pub fn new(socket_id: &'a SocketId, channel: &'a ChannelDescriptor) -> Self {
		Self { socket_id, channel_name: &channel.name }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kinds_follow_name_prefixes() {
		assert_eq!(ChannelKind::from_name("orders"), ChannelKind::Public);
		assert_eq!(ChannelKind::from_name("private-orders"), ChannelKind::Private);
		assert_eq!(ChannelKind::from_name("private-encrypted-dm"), ChannelKind::EncryptedPrivate);
		assert_eq!(ChannelKind::from_name("presence-lobby"), ChannelKind::Presence);
		assert!(!ChannelKind::Public.requires_authorization());
		assert!(ChannelKind::Presence.requires_authorization());
	}

	#[test]
	fn request_serializes_wire_field_names() {
		let socket = SocketId::new("1234.5678").expect("Socket fixture should be valid.");
		let channel =
			ChannelDescriptor::parse("private-orders").expect("Channel fixture should be valid.");
		let body = serde_json::to_value(AuthorizationRequest::new(&socket, &channel))
			.expect("Request should serialize to JSON.");

		assert_eq!(
			body,
			serde_json::json!({ "socket_id": "1234.5678", "channel_name": "private-orders" })
		);
	}
}

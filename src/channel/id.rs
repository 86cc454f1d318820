//! Validated channel names and connection identifiers.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::{_prelude::*, channel::ChannelError};

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $validate:path) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, ChannelError> {
				let view = value.as_ref();

				$validate($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = ChannelError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				$validate($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = ChannelError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

/// Longest channel name accepted by Pusher-protocol servers.
pub const CHANNEL_NAME_MAX_LEN: usize = 164;

const SOCKET_ID_MAX_LEN: usize = 128;

def_id! { ChannelName, "Name of a broadcasting channel.", "Channel", validate_channel_name }
def_id! { SocketId, "Transport-assigned identifier of the live connection.", "Socket", validate_socket_id }

fn validate_channel_name(kind: &'static str, view: &str) -> Result<(), ChannelError> {
	validate_common(kind, view, CHANNEL_NAME_MAX_LEN)?;

	if let Some(invalid) = view.chars().find(|c| !is_channel_char(*c)) {
		return Err(ChannelError::InvalidCharacter { kind, invalid });
	}

	Ok(())
}

fn validate_socket_id(kind: &'static str, view: &str) -> Result<(), ChannelError> {
	validate_common(kind, view, SOCKET_ID_MAX_LEN)
}

fn validate_common(kind: &'static str, view: &str, max: usize) -> Result<(), ChannelError> {
	if view.is_empty() {
		return Err(ChannelError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(ChannelError::ContainsWhitespace { kind });
	}
	if view.len() > max {
		return Err(ChannelError::TooLong { kind, max });
	}

	Ok(())
}

fn is_channel_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '=' | '@' | ',' | '.' | ';')
}

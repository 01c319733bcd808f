//! Open modes for the backing sink.
//!
//! [`OpenMode`] names the three presets append writers normally use and keeps
//! an escape hatch for arbitrary [`OpenFlags`] combinations. Write access is
//! always implied.

use std::borrow::Cow;
use std::fmt;
use std::fs::OpenOptions;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Native open flags understood by sinks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct OpenFlags(u8);

impl OpenFlags {
    /// Create the target when it does not exist.
    pub const CREATE: Self = Self(1 << 0);
    /// Fail when the target already exists.
    pub const EXCLUSIVE: Self = Self(1 << 1);
    /// Discard existing content on open.
    pub const TRUNCATE: Self = Self(1 << 2);
    /// Position every write at the end of the target.
    pub const APPEND: Self = Self(1 << 3);

    const ALL: u8 = 0b1111;

    /// Returns a set with no flags.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a set from raw bits, rejecting bits that name no flag.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Reports whether every flag in `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for OpenFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for OpenFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// How the backing sink is opened.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum OpenMode {
    /// Create the target, failing if it already exists.
    Create,
    /// Create the target or truncate it if it exists.
    Overwrite,
    /// Create the target or append to it if it exists.
    #[default]
    Append,
    /// Any other combination of native flags.
    Custom(OpenFlags),
}

impl OpenMode {
    /// Returns the native flags this mode opens with.
    #[must_use]
    pub const fn flags(self) -> OpenFlags {
        match self {
            Self::Create => OpenFlags::CREATE.union(OpenFlags::EXCLUSIVE),
            Self::Overwrite => OpenFlags::CREATE.union(OpenFlags::TRUNCATE),
            Self::Append => OpenFlags::CREATE.union(OpenFlags::APPEND),
            Self::Custom(flags) => flags,
        }
    }

    /// Maps a flag set back to a preset when it matches one exactly.
    #[must_use]
    pub fn from_flags(flags: OpenFlags) -> Self {
        [Self::Create, Self::Overwrite, Self::Append]
            .into_iter()
            .find(|preset| preset.flags() == flags)
            .unwrap_or(Self::Custom(flags))
    }

    /// Returns the mode's name: `create`, `overwrite`, `append` or
    /// `custom(<bits>)`.
    #[must_use]
    pub fn name(self) -> Cow<'static, str> {
        match self {
            Self::Create => Cow::Borrowed("create"),
            Self::Overwrite => Cow::Borrowed("overwrite"),
            Self::Append => Cow::Borrowed("append"),
            Self::Custom(flags) => Cow::Owned(format!("custom({})", flags.bits())),
        }
    }

    /// Builds [`OpenOptions`] for this mode.
    ///
    /// `permissions` applies to files created by the open on Unix and is
    /// ignored elsewhere.
    #[must_use]
    pub fn open_options(self, permissions: u32) -> OpenOptions {
        let flags = self.flags();
        let mut options = OpenOptions::new();
        options
            .write(true)
            .create(flags.contains(OpenFlags::CREATE))
            .create_new(flags.contains(OpenFlags::EXCLUSIVE))
            .truncate(flags.contains(OpenFlags::TRUNCATE))
            .append(flags.contains(OpenFlags::APPEND));

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(permissions);
        }
        #[cfg(not(unix))]
        let _ = permissions;

        options
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Error returned when a mode name cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unsupported open mode: {input} (expected create, overwrite, append or custom(<bits>))")]
pub struct OpenModeParseError {
    input: String,
}

impl OpenModeParseError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for OpenMode {
    type Err = OpenModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "create" => Ok(Self::Create),
            "overwrite" | "truncate" => Ok(Self::Overwrite),
            "append" => Ok(Self::Append),
            other => other
                .strip_prefix("custom(")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|bits| bits.trim().parse::<u8>().ok())
                .and_then(OpenFlags::from_bits)
                .map(Self::from_flags)
                .ok_or_else(|| OpenModeParseError {
                    input: s.trim().to_owned(),
                }),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OpenMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OpenMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

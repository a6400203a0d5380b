//!
//! Process role tags.
//!
//! A role tag is the value of the `--type` switch. The main process carries
//! no tag at all, which is represented here by the empty string. Tags the
//! host runtime introduces later are carried through verbatim so that an
//! older bootstrap layer never rejects a newer child process.
//!

use crate::{ids::switches, model::ProcessInvocation};
use derive_more::Display;
use std::{borrow::Borrow, borrow::Cow, str::FromStr};

///
/// ProcessRole
///
/// Stored as `Cow<'static, str>` so the known tags are zero-copy while
/// unknown tags allocate only when seen.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProcessRole(pub Cow<'static, str>);

impl ProcessRole {
    pub const MAIN: Self = Self(Cow::Borrowed(""));
    pub const RENDERER: Self = Self(Cow::Borrowed("renderer"));
    pub const UTILITY: Self = Self(Cow::Borrowed("utility"));
    pub const ZYGOTE: Self = Self(Cow::Borrowed("zygote"));
    pub const GPU: Self = Self(Cow::Borrowed("gpu-process"));
    pub const RELAUNCHER: Self = Self(Cow::Borrowed("relauncher"));
    pub const PRINT_SERVICE: Self = Self(Cow::Borrowed("service"));

    #[must_use]
    pub const fn new(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }

    #[must_use]
    pub const fn owned(s: String) -> Self {
        Self(Cow::Owned(s))
    }

    /// Derive the role from the invocation. Absence of the role switch (or
    /// an empty value) means the main role; any other value is returned
    /// unchanged. Never fails.
    #[must_use]
    pub fn from_invocation(invocation: &ProcessInvocation) -> Self {
        match invocation.switch_value(switches::PROCESS_TYPE) {
            None | Some("") => Self::MAIN,
            Some(tag) => Self::from(tag.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_main(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-facing label; the main role has no tag, so it is named here.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.is_main() { "main" } else { self.as_str() }
    }

    /// Convert into an owned string (avoids an extra allocation for owned variants).
    #[must_use]
    pub fn into_string(self) -> String {
        self.0.into_owned()
    }
}

impl Default for ProcessRole {
    fn default() -> Self {
        Self::MAIN
    }
}

impl FromStr for ProcessRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::owned(s.to_string()))
    }
}

impl From<&'static str> for ProcessRole {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for ProcessRole {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl From<ProcessRole> for String {
    fn from(role: ProcessRole) -> Self {
        role.into_string()
    }
}

impl AsRef<str> for ProcessRole {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ProcessRole {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ProcessRole {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::ProcessRole;
    use crate::model::ProcessInvocation;

    fn role_of(args: &[&str]) -> ProcessRole {
        ProcessRole::from_invocation(&ProcessInvocation::from_args(args.iter().copied()))
    }

    #[test]
    fn missing_switch_is_main() {
        assert!(role_of(&["host"]).is_main());
        assert!(role_of(&["host", "--user-data-dir=/tmp/x", "page.html"]).is_main());
        assert!(role_of(&["host", "--type="]).is_main());
        assert_eq!(role_of(&["host"]).label(), "main");
    }

    #[test]
    fn known_and_unknown_tags_round_trip() {
        assert_eq!(role_of(&["host", "--type=renderer"]), ProcessRole::RENDERER);
        assert_eq!(role_of(&["host", "--type=relauncher"]), ProcessRole::RELAUNCHER);

        let future = role_of(&["host", "--type=ml-inference"]);
        assert_eq!(future.as_str(), "ml-inference");
        assert!(!future.is_main());
    }

    #[test]
    fn basic_traits_and_utils() {
        let b: ProcessRole = "utility".into();
        assert_eq!(b, ProcessRole::UTILITY);
        assert_eq!(b.as_ref(), "utility");
        let s: String = b.into();
        assert_eq!(s, "utility");
        assert_eq!(ProcessRole::default(), ProcessRole::MAIN);
    }
}

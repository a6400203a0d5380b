use derive_more::Display;

///
/// PathKey
///
/// Keys of the path-override registry populated during pre-sandbox startup.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum PathKey {
    /// `<user-data>/Extensions`, registered once the user-data dir resolves.
    ComponentUser,
    /// The host runtime's own view of the user-data directory.
    HostUserData,
    /// System-wide native messaging host manifests.
    NativeMessaging,
    /// The resolved user-data directory.
    UserData,
    /// Per-user native messaging hosts of the related vendor application.
    UserNativeMessaging,
}

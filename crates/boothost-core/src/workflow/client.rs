//!
//! Role clients and the factory that owns them.
//!
//! A process plays exactly one of the browser, renderer or utility roles and
//! therefore owns exactly one role client. The factory creates it on first
//! request and keeps it for the rest of the process lifetime. Creation is
//! single-threaded (it happens during bootstrap) and happens-before any
//! later shared access, so the cache needs no lock.
//!

use crate::{ids::ProcessRole, log, log::Topic};
use derive_more::Display;

///
/// ClientKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ClientKind {
    #[display("browser")]
    Browser,
    #[display("renderer")]
    Renderer,
    #[display("utility")]
    Utility,
}

impl ClientKind {
    /// The client a role owns. Roles without their own client (zygote,
    /// relauncher, print-service, unknown) fall back to utility.
    #[must_use]
    pub fn for_role(role: &ProcessRole) -> Self {
        if role.is_main() {
            Self::Browser
        } else if *role == ProcessRole::RENDERER {
            Self::Renderer
        } else {
            Self::Utility
        }
    }
}

///
/// ContentClient
///
/// The role-independent collaborator, created once per process.
///

pub trait ContentClient: Send + Sync {
    fn name(&self) -> &str;
}

///
/// RoleClient
///

pub trait RoleClient: Send + Sync {
    fn kind(&self) -> ClientKind;

    fn name(&self) -> &str;
}

///
/// ClientProvider
///
/// Host-supplied constructors for the concrete client implementations.
///

pub trait ClientProvider {
    fn create_content_client(&self) -> Box<dyn ContentClient>;

    fn create_client(&self, kind: ClientKind) -> Box<dyn RoleClient>;

    /// Utility-role setup that must run before the sandbox is engaged.
    fn utility_pre_sandbox_startup(&self) {}
}

///
/// ClientFactory
///

pub struct ClientFactory {
    role: ProcessRole,
    provider: Box<dyn ClientProvider>,
    client: Option<Box<dyn RoleClient>>,
}

impl ClientFactory {
    #[must_use]
    pub fn new(role: ProcessRole, provider: Box<dyn ClientProvider>) -> Self {
        Self {
            role,
            provider,
            client: None,
        }
    }

    #[must_use]
    pub const fn role(&self) -> &ProcessRole {
        &self.role
    }

    /// Follow a role change after a fork. A cached client of the wrong kind
    /// is dropped; the next request creates the right one.
    pub fn rebind(&mut self, role: ProcessRole) {
        let kind = ClientKind::for_role(&role);
        if self.client.as_ref().is_some_and(|c| c.kind() != kind) {
            self.client = None;
        }
        self.role = role;
    }

    #[must_use]
    pub fn provider(&self) -> &dyn ClientProvider {
        self.provider.as_ref()
    }

    /// The client created so far, if any.
    #[must_use]
    pub fn current(&self) -> Option<&dyn RoleClient> {
        self.client.as_deref()
    }

    pub fn browser_client(&mut self) -> &dyn RoleClient {
        self.get(ClientKind::Browser)
    }

    pub fn renderer_client(&mut self) -> &dyn RoleClient {
        self.get(ClientKind::Renderer)
    }

    pub fn utility_client(&mut self) -> &dyn RoleClient {
        self.get(ClientKind::Utility)
    }

    /// Create-once accessor. Asking for a kind the role does not own is a
    /// caller bug: it is logged and the requested client replaces the
    /// cached one, so the factory still owns a single client.
    pub fn get(&mut self, kind: ClientKind) -> &dyn RoleClient {
        let expected = ClientKind::for_role(&self.role);
        if kind != expected {
            log!(
                Topic::Client,
                Error,
                "{kind} client requested by the {} role (expected {expected})",
                self.role.label()
            );
        }

        if self.client.as_ref().is_some_and(|c| c.kind() != kind) {
            self.client = None;
        }

        let provider = &self.provider;
        let client = self.client.get_or_insert_with(|| {
            log!(Topic::Client, Debug, "creating {kind} client");
            provider.create_client(kind)
        });

        &**client
    }
}

impl std::fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientFactory")
            .field("role", &self.role)
            .field("client", &self.client.as_ref().map(|c| c.kind()))
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    struct Named(ClientKind);

    impl RoleClient for Named {
        fn kind(&self) -> ClientKind {
            self.0
        }

        fn name(&self) -> &str {
            "named"
        }
    }

    struct Content;

    impl ContentClient for Content {
        fn name(&self) -> &str {
            "content"
        }
    }

    struct Counting(Arc<AtomicUsize>);

    impl ClientProvider for Counting {
        fn create_content_client(&self) -> Box<dyn ContentClient> {
            Box::new(Content)
        }

        fn create_client(&self, kind: ClientKind) -> Box<dyn RoleClient> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Box::new(Named(kind))
        }
    }

    #[test]
    fn kind_follows_role() {
        assert_eq!(ClientKind::for_role(&ProcessRole::MAIN), ClientKind::Browser);
        assert_eq!(
            ClientKind::for_role(&ProcessRole::RENDERER),
            ClientKind::Renderer
        );
        assert_eq!(
            ClientKind::for_role(&ProcessRole::UTILITY),
            ClientKind::Utility
        );
        assert_eq!(
            ClientKind::for_role(&ProcessRole::new("future-role")),
            ClientKind::Utility
        );
    }

    #[test]
    fn created_once_and_cached() {
        let created = Arc::new(AtomicUsize::new(0));
        let mut factory =
            ClientFactory::new(ProcessRole::RENDERER, Box::new(Counting(created.clone())));

        assert!(factory.current().is_none());
        assert_eq!(factory.renderer_client().kind(), ClientKind::Renderer);
        assert_eq!(factory.renderer_client().kind(), ClientKind::Renderer);
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wrong_kind_replaces_single_client() {
        let created = Arc::new(AtomicUsize::new(0));
        let mut factory =
            ClientFactory::new(ProcessRole::MAIN, Box::new(Counting(created.clone())));

        factory.browser_client();
        assert_eq!(factory.utility_client().kind(), ClientKind::Utility);
        assert_eq!(factory.current().map(RoleClient::kind), Some(ClientKind::Utility));
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }
}

//! Read-only access to referenced objects during admission.
//!
//! Admission handlers resolve cross-object references (a Plugin's
//! PluginDefinition, a TeamRoleBinding's Team) through the [`ObjectStore`]
//! trait. `KubeStore` backs it with point lookups against the API server;
//! `MemoryStore` backs the test suites without a live cluster.
//!
//! Every lookup distinguishes `NotFound` from all other failures: callers
//! must never conflate a missing reference with a transient store error.

use std::collections::{HashMap, HashSet};
use std::fmt;

use async_trait::async_trait;
use kube::{Api, Client};
use thiserror::Error;

use crate::crd::{Cluster, PluginDefinition, Team, TeamRole};

/// Kind of a referenced object resolvable through the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Cluster,
    PluginDefinition,
    Team,
    TeamRole,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReferenceKind::Cluster => "Cluster",
            ReferenceKind::PluginDefinition => "PluginDefinition",
            ReferenceKind::Team => "Team",
            ReferenceKind::TeamRole => "TeamRole",
        };
        f.write_str(s)
    }
}

/// Error returned by store lookups.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced object does not exist.
    #[error("{kind} \"{name}\" not found")]
    NotFound { kind: ReferenceKind, name: String },

    /// The store failed for reasons unrelated to the reference.
    #[error("api error: {0}")]
    Api(#[source] kube::Error),
}

impl StoreError {
    /// Whether this error is a missing reference rather than a store failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    fn from_kube(kind: ReferenceKind, name: &str, err: kube::Error) -> Self {
        match err {
            kube::Error::Api(ref resp) if resp.code == 404 => StoreError::NotFound {
                kind,
                name: name.to_string(),
            },
            other => StoreError::Api(other),
        }
    }
}

/// Read-only accessor for objects referenced during admission.
///
/// Implementations must be safe for concurrent use; handlers issue multiple
/// sequential lookups per decision and hold no lock across them.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Point lookup for a PluginDefinition.
    async fn plugin_definition(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<PluginDefinition, StoreError>;

    /// Existence check for a named reference.
    async fn check_exists(
        &self,
        kind: ReferenceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError>;
}

/// Store backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for KubeStore {
    async fn plugin_definition(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<PluginDefinition, StoreError> {
        let api: Api<PluginDefinition> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|e| StoreError::from_kube(ReferenceKind::PluginDefinition, name, e))
    }

    async fn check_exists(
        &self,
        kind: ReferenceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        let result = match kind {
            ReferenceKind::Cluster => {
                let api: Api<Cluster> = Api::namespaced(self.client.clone(), namespace);
                api.get(name).await.map(|_| ())
            }
            ReferenceKind::PluginDefinition => {
                let api: Api<PluginDefinition> = Api::namespaced(self.client.clone(), namespace);
                api.get(name).await.map(|_| ())
            }
            ReferenceKind::Team => {
                let api: Api<Team> = Api::namespaced(self.client.clone(), namespace);
                api.get(name).await.map(|_| ())
            }
            ReferenceKind::TeamRole => {
                let api: Api<TeamRole> = Api::namespaced(self.client.clone(), namespace);
                api.get(name).await.map(|_| ())
            }
        };
        result.map_err(|e| StoreError::from_kube(kind, name, e))
    }
}

/// In-memory store used by the admission test suites.
///
/// Populate it with the objects a test expects to exist, then pass it to a
/// handler or the dispatcher. `fail_lookups` simulates a store outage so the
/// internal-error path can be exercised.
#[derive(Default)]
pub struct MemoryStore {
    definitions: HashMap<(String, String), PluginDefinition>,
    objects: HashSet<(ReferenceKind, String, String)>,
    fail_lookups: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a PluginDefinition, retrievable by content and existence.
    pub fn insert_plugin_definition(&mut self, namespace: &str, definition: PluginDefinition) {
        use kube::ResourceExt;
        let name = definition.name_any();
        self.definitions
            .insert((namespace.to_string(), name), definition);
    }

    /// Register a named object for existence checks.
    pub fn insert(&mut self, kind: ReferenceKind, namespace: &str, name: &str) {
        self.objects
            .insert((kind, namespace.to_string(), name.to_string()));
    }

    /// Make every subsequent lookup fail with a non-NotFound store error.
    pub fn fail_lookups(&mut self) {
        self.fail_lookups = true;
    }

    fn outage() -> StoreError {
        StoreError::Api(kube::Error::Api(kube::core::ErrorResponse {
            status: "Failure".to_string(),
            message: "the server is currently unable to handle the request".to_string(),
            reason: "ServiceUnavailable".to_string(),
            code: 503,
        }))
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn plugin_definition(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<PluginDefinition, StoreError> {
        if self.fail_lookups {
            return Err(Self::outage());
        }
        self.definitions
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: ReferenceKind::PluginDefinition,
                name: name.to_string(),
            })
    }

    async fn check_exists(
        &self,
        kind: ReferenceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        if self.fail_lookups {
            return Err(Self::outage());
        }
        let key = (kind, namespace.to_string(), name.to_string());
        let found = self.objects.contains(&key)
            || (kind == ReferenceKind::PluginDefinition
                && self
                    .definitions
                    .contains_key(&(namespace.to_string(), name.to_string())));
        if found {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                kind,
                name: name.to_string(),
            })
        }
    }
}

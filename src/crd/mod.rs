//! Custom Resource Definitions for the Greenhouse fleet-management platform.
//!
//! All resources live in the `greenhouse.sap` API group:
//! - `PluginDefinition`: a reusable deployable unit with a typed option schema
//! - `Plugin`: an instantiation of a PluginDefinition for a target cluster
//! - `Cluster`: a managed Kubernetes cluster onboarded to the platform
//! - `Organization`: a tenant (cluster-scoped, maps to a namespace)
//! - `Team` / `TeamRole` / `TeamRoleBinding`: RBAC for teams across clusters

mod cluster;
mod organization;
mod plugin;
mod plugin_definition;
mod team;
mod team_role;
mod team_role_binding;

pub use cluster::*;
pub use organization::*;
pub use plugin::*;
pub use plugin_definition::*;
pub use team::*;
pub use team_role::*;
pub use team_role_binding::*;

/// API group of all Greenhouse resources.
pub const GROUP: &str = "greenhouse.sap";

/// Prefix of labels owned by the platform.
pub const LABEL_PREFIX: &str = "greenhouse.sap/";

/// Label carrying the name of the PluginDefinition a Plugin was created from.
/// Set during defaulting so Plugins can be looked up when a definition changes.
pub const LABEL_PLUGIN_DEFINITION: &str = "greenhouse.sap/plugindefinition";

/// Label carrying the cluster a Plugin is deployed to.
pub const LABEL_CLUSTER: &str = "greenhouse.sap/cluster";

/// Namespace of the central Greenhouse installation. Plugins in this
/// namespace are exempt from the cluster-scoping requirement.
pub const CENTRAL_NAMESPACE: &str = "greenhouse";

/// Secret type for kubeconfig secrets used to onboard clusters.
pub const SECRET_TYPE_KUBECONFIG: &str = "greenhouse.sap/kubeconfig";

//! Builders for RBAC objects: policy rules, roles, role bindings and the service accounts they
//! bind to.
pub mod policy_rule;
pub mod role;
pub mod role_binding;
pub mod service_account;

/// API group of [`Role`](role::Role) and [`RoleBinding`](role_binding::RoleBinding).
pub const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";

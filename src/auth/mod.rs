//! Demo authentication: static credential table, session tokens, middleware.

pub mod credentials;
pub mod jwt;
pub mod middleware;

pub use credentials::{CredentialRecord, CredentialTable, PermissionSet, Role};
pub use jwt::{authorize, create_token, verify_token, Claims, JwtConfig};
pub use middleware::{
    auth_middleware, permission_middleware, AuthState, AuthenticatedUser, RequiredPermission,
};

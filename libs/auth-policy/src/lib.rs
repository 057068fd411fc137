//! # Authorization policy for the CitiWatch gateway
//!
//! One pure decision pipeline shared by the edge request gate and the
//! client-side route guard: token codec -> claims evaluator -> route
//! classifier -> gate policy.
//!
//! Nothing in this crate performs I/O, and nothing in this crate verifies a
//! token signature. The gateway only reads the payload segment of the bearer
//! token; the remote backend re-checks every forwarded credential.
//!
//! ## Modules
//! - `token`: payload-segment codec
//! - `claims`: expiration and role evaluation
//! - `routes`: protected/admin/exempt prefix classification
//! - `gate`: the allow/redirect decision

pub mod claims;
pub mod gate;
pub mod routes;
pub mod token;

pub use claims::{evaluate, Role, TokenStatus};
pub use gate::{authorize, authorize_token, GateDecision};
pub use routes::{
    classify, RouteClass, ADMIN_HOME_PATH, DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH,
};
pub use token::{decode_claims, Claims, ROLE_CLAIM_KEY};

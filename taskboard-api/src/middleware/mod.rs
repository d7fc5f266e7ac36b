/// Request middleware
///
/// - `auth`: the authorization gate — bearer-token authentication and
///   the admin role requirement

pub mod auth;

//! SEO metadata: the static per-route baseline and the resolver that merges
//! it with admin-managed overrides and global defaults.

mod resolver;
mod routes;

pub use resolver::{GlobalSeoDefaults, SeoMetadata, SeoOverride, SeoResolver, SeoSettings};
pub use routes::{route_metadata, route_for_path, static_routes, RouteEntry};

//! Shared cache-control policies for HTTP handlers.

/// Point data must be fetched fresh on every page load.
pub const NO_STORE: &str = "no-store";

/// Backend files are content-addressed and never change once stored.
pub const PUBLIC_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Header tuple for JSON responses that must not be cached.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}

/// Header tuple for proxied files.
pub const fn immutable_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_IMMUTABLE)
}

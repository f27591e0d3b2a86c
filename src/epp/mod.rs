//! EPP Command Encoding
//!
//! This module implements the outbound half of the Extensible
//! Provisioning Protocol: turning loosely shaped caller data into
//! schema-valid command XML for a specific registry provider.
//!
//! # Module Structure
//!
//! * `tree` - Ordered element tree, the canonical intermediate form
//! * `config` - Per-provider namespace tables and extension lists
//! * `fields` - Normalizers for the recurring field groups
//! * `envelope` - Outer command/hello envelope assembly
//! * `session`, `domain`, `contact`, `host` - Command builders per verb
//! * `extensions` - secDNS and key/value extension builders
//! * `encoder` - Factory producing per-provider encoder instances
//! * `render` - Generic tree to XML text serialization
//!
//! Everything is a synchronous, side-effect-free transformation: for the
//! same input data and configuration the produced tree is identical on
//! every call, and encoder instances can be shared across threads.

/// Per-provider namespace and extension configuration
pub mod config;

/// Contact object command builders
pub mod contact;

/// Domain object command builders
pub mod domain;

/// Encoder factory and per-provider instances
pub mod encoder;

/// Outer protocol envelope assembly
pub mod envelope;

/// Typed validation and configuration errors
pub mod errors;

/// Protocol extension builders (secDNS, key/value)
pub mod extensions;

/// Field normalizers for recurring field groups
pub mod fields;

/// Host object command builders
pub mod host;

/// Tree to XML text rendering
pub mod render;

/// Session command builders (hello, login, logout)
pub mod session;

/// Ordered element tree
pub mod tree;

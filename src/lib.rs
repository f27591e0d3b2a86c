//! Scribe EPP Command Encoder
//!
//! A schema-faithful command encoder for the Extensible Provisioning
//! Protocol (RFC 5730 family), the XML protocol domain registrars speak
//! to registries.
//!
//! # Features
//!
//! * All session and object commands: hello, login, logout, plus
//!   check/create/delete/update for domains, contacts and hosts and
//!   domain transfer
//! * Flexible caller input: every field group accepts its short and
//!   verbose forms and normalizes to one canonical tree
//! * Exact schema element ordering preserved through an ordered tree
//! * Per-provider configuration of namespaces and enabled extensions
//! * DNSSEC delegation (secDNS) and registry key/value extensions,
//!   composed at encoder construction
//!
//! # Architecture
//!
//! The `epp` module holds the whole pipeline: field normalizers feed
//! command builders, an envelope assembler wraps the result, and a
//! generic renderer turns the tree into XML text. Transport, session
//! management and response parsing are deliberately out of scope.

/// EPP command encoding and rendering
pub mod epp;

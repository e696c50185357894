//! Networking: the Supabase auth provider and its wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `supabase` implements `access::AuthProvider` over GoTrue and PostgREST;
//! `types` defines the response schema and the mapping into `Identity`.

pub mod supabase;
pub mod types;

pub mod provider;
pub mod supabase;

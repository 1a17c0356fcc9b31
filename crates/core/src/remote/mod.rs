pub mod traits;

// Hosted backend implementation
pub mod supabase;

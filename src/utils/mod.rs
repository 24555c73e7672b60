pub mod email_cache;
pub mod pagination;
pub mod validation;

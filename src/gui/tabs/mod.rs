pub mod presentation;
pub mod sidebar;
pub mod topics;
pub mod translator;

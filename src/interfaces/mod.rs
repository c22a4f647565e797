pub mod callback;
pub mod messages;
pub mod script;
pub mod stdout;

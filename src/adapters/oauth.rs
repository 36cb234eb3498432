pub mod delegate;
pub mod installed_flow;
pub mod token;

pub mod agent;
pub mod gig;
pub mod gig_agent;
pub mod reference;
pub mod schedule;

pub mod enrollment_service;
pub mod match_service;
pub mod notification;
pub mod sync_service;

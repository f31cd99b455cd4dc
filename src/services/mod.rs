pub mod appointments_service;
pub mod context;
pub mod notifications_service;
pub mod sessions_service;
pub mod teams_service;

pub use appointments_service::AppointmentsService;
pub use context::RequestContext;
pub use notifications_service::NotificationsService;
pub use sessions_service::SessionsService;
pub use teams_service::TeamsService;

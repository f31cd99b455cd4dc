pub mod appointments;
pub mod notifications;
pub mod sessions;
pub mod teams;

pub use appointments::AppointmentsRepo;
pub use notifications::NotificationsRepo;
pub use sessions::SessionsRepo;
pub use teams::TeamsRepo;

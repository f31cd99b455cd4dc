pub mod api;
pub mod appointment;
pub mod notification;
pub mod session;
pub mod team;

pub use api::{ApiResponse, ErrorDetail};
pub use appointment::{
    Appointment, AppointmentChangeset, AppointmentFilter, CreateAppointmentRequest, NewAppointment,
    UpdateAppointmentRequest,
};
pub use notification::{
    CreateNotificationRequest, NewNotification, Notification, NotificationFilter,
    UpdateNotificationRequest,
};
pub use session::{CreateSessionRequest, NewSession, Session, SessionResponse};
pub use team::{NewTeam, Team, TeamInfo};

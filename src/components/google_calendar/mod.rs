pub mod models;
pub mod publish;
pub mod token;

pub use models::{CalendarEvent, EventDateTime};
pub use publish::CalendarPublisher;
pub use token::{AuthFlow, ClientSecrets, Credential, InstalledAppFlow, TokenManager};

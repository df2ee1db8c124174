// Export components
pub mod automation;
pub mod parser;
pub mod query;
pub mod recents;

// Re-export the calendar automation seam
pub use automation::{CalendarAutomation, OsaScriptAutomation};
// Re-export the recent-invitee list manager
pub use recents::RecentInvitees;

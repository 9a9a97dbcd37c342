//! Subject and body rendering for queued mail.

use residence_db::models::mail::NewMail;
use residence_db::models::meeting::{Meeting, MeetingRegistration};
use residence_db::models::notification::CreateNotification;

/// Prefix applied to every subject line.
const SUBJECT_PREFIX: &str = "[Residence]";

/// Subject and body for a broadcast notification. The same text goes to
/// every recipient.
pub fn notification(input: &CreateNotification) -> (String, String) {
    let subject = format!("{SUBJECT_PREFIX} {}", input.title);
    let body = format!(
        "{}\n\n{}\n\n-- \nResidence management office",
        input.title, input.content
    );
    (subject, body)
}

/// Confirmation sent to a resident who registered for a meeting.
pub fn meeting_confirmation(meeting: &Meeting, registration: &MeetingRegistration) -> NewMail {
    let mut body = format!(
        "Hello {},\n\nYou are registered for \"{}\".\n\nWhen: {}\nWhere: {}\n",
        registration.name,
        meeting.title,
        meeting.meeting_at.format("%Y-%m-%d %H:%M UTC"),
        meeting.location,
    );
    if let Some(organizer) = &meeting.organizer {
        body.push_str(&format!("Organizer: {organizer}\n"));
    }
    body.push_str("\n-- \nResidence management office");

    NewMail {
        recipient: registration.email.clone(),
        subject: format!("{SUBJECT_PREFIX} Registration confirmed: {}", meeting.title),
        body,
    }
}

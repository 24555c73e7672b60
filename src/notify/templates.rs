use super::OutgoingMail;
use chrono::{Days, Local, NaiveDate};
use rand::Rng;

pub const INTERVIEW_TIME: &str = "10:00 AM";
const SIGNATURE: &str = "Vishakan Builders";

/// "Monday, March 2, 2026 at 10:00 AM"
pub fn appointment_on(today: NaiveDate, days_ahead: u64) -> String {
    let date = today
        .checked_add_days(Days::new(days_ahead))
        .unwrap_or(today);
    format!("{} at {}", date.format("%A, %B %-d, %Y"), INTERVIEW_TIME)
}

pub fn random_appointment() -> String {
    let days_ahead = rand::rng().random_range(1..=7);
    appointment_on(Local::now().date_naive(), days_ahead)
}

/// Applicant names are user input; they go into the body as text only.
fn display_name(name: &str) -> String {
    html_escape::encode_safe(name).into_owned()
}

pub fn approval(name: &str, email: &str, appointment: String) -> OutgoingMail {
    let safe_name = display_name(name);
    OutgoingMail {
        to_name: name.to_string(),
        to_email: email.to_string(),
        subject: "Application Approved - Appointment Scheduled".to_string(),
        html_body: format!(
            r#"<p>Dear {safe_name},</p>
<p>Congratulations! Your application has been approved.</p>
<p>We're excited to inform you that your interview is scheduled on:</p>
<h3 style="color:green;">{appointment}</h3>
<p>Please be available. We'll share more details soon.</p>
<p>Best regards,<br>{SIGNATURE}</p>"#
        ),
    }
}

pub fn denial(name: &str, email: &str) -> OutgoingMail {
    let safe_name = display_name(name);
    OutgoingMail {
        to_name: name.to_string(),
        to_email: email.to_string(),
        subject: "Application Status".to_string(),
        html_body: format!(
            "<p>Dear {safe_name},</p><p>We regret to inform you that your application has been denied.</p>\
             <p>Best regards,<br>{SIGNATURE}</p>"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_is_formatted_for_humans() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(); // a Monday
        assert_eq!(appointment_on(today, 1), "Tuesday, October 20, 2026 at 10:00 AM");
        assert_eq!(appointment_on(today, 7), "Monday, October 26, 2026 at 10:00 AM");
    }

    #[test]
    fn random_appointment_is_within_a_week() {
        let today = Local::now().date_naive();
        let window: Vec<String> = (1..=7).map(|d| appointment_on(today, d)).collect();

        for _ in 0..50 {
            let picked = random_appointment();
            // a run straddling midnight can shift the window by a day
            let tomorrow = appointment_on(today, 8);
            assert!(window.contains(&picked) || picked == tomorrow, "{}", picked);
        }
    }

    #[test]
    fn denial_is_fixed_text() {
        let mail = denial("Arun", "arun@example.com");
        assert_eq!(mail.subject, "Application Status");
        assert!(mail.html_body.contains("Dear Arun"));
        assert!(mail.html_body.contains("has been denied"));
    }

    #[test]
    fn markup_in_names_is_rendered_as_text() {
        let name = r#"<a href="http://evil.example">Click</a>"#;

        let approved = approval(name, "x@example.com", "Tuesday".to_string());
        let denied = denial(name, "x@example.com");

        for body in [&approved.html_body, &denied.html_body] {
            assert!(!body.contains("<a href"), "{}", body);
            assert!(body.contains("&lt;a href="));
        }
        // the envelope keeps the name as given
        assert_eq!(approved.to_name, name);
    }
}

//! Closed set of message templates. Each variant carries its required fields
//! as a typed record validated at construction, so rendering cannot fail.

use std::fmt::Write as _;

use serde::Serialize;

use crate::workflows::screening::domain::Candidate;
use crate::workflows::screening::scheduling::InterviewBooking;

/// Which bulk template the dispatcher should build per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Selected,
    Rejected,
}

impl TemplateKind {
    pub(crate) fn for_candidate(self, candidate: &Candidate) -> MessageTemplate {
        match self {
            TemplateKind::Selected => {
                MessageTemplate::Selected(SelectedTemplate::for_candidate(candidate))
            }
            TemplateKind::Rejected => MessageTemplate::Rejected(RejectedTemplate),
        }
    }
}

/// A subject/body pair ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("interview invitation requires a named interviewer")]
    MissingInterviewer,
    #[error("interview invitation requires a location")]
    MissingLocation,
}

/// Closed enumeration of message kinds.
#[derive(Debug, Clone)]
pub enum MessageTemplate {
    Selected(SelectedTemplate),
    Rejected(RejectedTemplate),
    InterviewInvitation(InterviewTemplate),
}

impl MessageTemplate {
    pub fn render(
        &self,
        candidate: &Candidate,
        job_title: &str,
        company_name: &str,
    ) -> RenderedMessage {
        match self {
            MessageTemplate::Selected(template) => {
                template.render(candidate, job_title, company_name)
            }
            MessageTemplate::Rejected(template) => {
                template.render(candidate, job_title, company_name)
            }
            MessageTemplate::InterviewInvitation(template) => {
                template.render(candidate, job_title, company_name)
            }
        }
    }
}

/// Selection notice carrying per-candidate highlight copy.
#[derive(Debug, Clone)]
pub struct SelectedTemplate {
    highlight_reasons: String,
}

impl SelectedTemplate {
    pub fn for_candidate(candidate: &Candidate) -> Self {
        Self {
            highlight_reasons: highlight_reasons(candidate),
        }
    }

    fn render(&self, candidate: &Candidate, job_title: &str, company_name: &str) -> RenderedMessage {
        let subject =
            "Congratulations! You have been selected for the next phase".to_string();

        let mut body = String::new();
        writeln!(body, "Dear {},", candidate.name).expect("write greeting");
        body.push('\n');
        writeln!(
            body,
            "Congratulations! We are pleased to inform you that you have been selected to continue in the selection process for the {job_title} position."
        )
        .expect("write selection notice");
        body.push('\n');
        writeln!(
            body,
            "Your profile stood out among all candidates for {}.",
            self.highlight_reasons
        )
        .expect("write highlights");
        body.push('\n');
        writeln!(body, "Next steps:").expect("write next steps");
        writeln!(
            body,
            "- We will contact you in the coming days to coordinate an interview"
        )
        .expect("write step");
        writeln!(
            body,
            "- We will send you a calendar so you can pick the time that suits you best"
        )
        .expect("write step");
        body.push('\n');
        writeln!(
            body,
            "If you have any questions, do not hesitate to contact us."
        )
        .expect("write contact note");
        push_signature(&mut body, company_name);

        RenderedMessage { subject, body }
    }
}

/// Courtesy rejection notice.
#[derive(Debug, Clone, Copy)]
pub struct RejectedTemplate;

impl RejectedTemplate {
    fn render(&self, candidate: &Candidate, job_title: &str, company_name: &str) -> RenderedMessage {
        let subject = "Update on your application".to_string();

        let mut body = String::new();
        writeln!(body, "Dear {},", candidate.name).expect("write greeting");
        body.push('\n');
        writeln!(
            body,
            "Thank you for your interest in the {job_title} position and for taking the time to send your application."
        )
        .expect("write thanks");
        body.push('\n');
        writeln!(
            body,
            "After carefully reviewing your profile alongside the other candidates, we regret to inform you that we will not be moving forward with your application at this time."
        )
        .expect("write decision");
        body.push('\n');
        writeln!(
            body,
            "We want to thank you for your interest in joining our team and encourage you to keep an eye on our future openings."
        )
        .expect("write encouragement");
        body.push('\n');
        writeln!(body, "We wish you every success in your search.").expect("write wishes");
        push_signature(&mut body, company_name);

        RenderedMessage { subject, body }
    }
}

/// Interview invitation built from a confirmed booking.
#[derive(Debug, Clone)]
pub struct InterviewTemplate {
    booking: InterviewBooking,
}

impl InterviewTemplate {
    pub fn new(booking: InterviewBooking) -> Result<Self, TemplateError> {
        if booking.interviewer.trim().is_empty() {
            return Err(TemplateError::MissingInterviewer);
        }
        if booking.location.trim().is_empty() {
            return Err(TemplateError::MissingLocation);
        }
        Ok(Self { booking })
    }

    fn render(&self, candidate: &Candidate, job_title: &str, company_name: &str) -> RenderedMessage {
        let subject = format!("Interview invitation - {job_title}");

        let mut body = String::new();
        writeln!(body, "Dear {},", candidate.name).expect("write greeting");
        body.push('\n');
        writeln!(
            body,
            "We are pleased to invite you to an interview for the {job_title} position."
        )
        .expect("write invitation");
        body.push('\n');
        writeln!(body, "Interview details:").expect("write details header");
        writeln!(body, "- Date: {}", self.booking.slot.date).expect("write date");
        writeln!(body, "- Time: {}", self.booking.slot.time.format("%H:%M")).expect("write time");
        writeln!(
            body,
            "- Duration: {} minutes",
            self.booking.slot.duration_minutes
        )
        .expect("write duration");
        writeln!(body, "- Interviewer: {}", self.booking.interviewer).expect("write interviewer");
        writeln!(body, "- Location: {}", self.booking.location).expect("write location");
        body.push('\n');
        writeln!(
            body,
            "Please confirm your attendance by replying to this message."
        )
        .expect("write confirmation");
        push_signature(&mut body, company_name);

        RenderedMessage { subject, body }
    }
}

fn push_signature(body: &mut String, company_name: &str) {
    body.push('\n');
    writeln!(body, "Kind regards,").expect("write signoff");
    writeln!(body, "Human Resources Team").expect("write team");
    writeln!(body, "{company_name}").expect("write company");
}

/// Score-, experience-, and skill-driven praise copy for selection notices.
pub(crate) fn highlight_reasons(candidate: &Candidate) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if candidate.match_score >= 90 {
        reasons.push("your excellent technical profile");
    } else if candidate.match_score >= 80 {
        reasons.push("your solid experience");
    } else if candidate.match_score >= 70 {
        reasons.push("your strong fit for the required profile");
    }

    if candidate.experience_years >= 5 {
        reasons.push("your extensive professional experience");
    }

    if candidate.skills.len() >= 5 {
        reasons.push("your breadth of technical skills");
    }

    if reasons.is_empty() {
        "your professional profile".to_string()
    } else {
        reasons.join(" and ")
    }
}

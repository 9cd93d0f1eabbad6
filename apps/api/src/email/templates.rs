//! Built-in prompt starters. User-saved templates live in the browser only.

use crate::email::models::PromptTemplate;

pub const PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        id: "job",
        label: "Job Application",
        content: "Write a job application email applying for the position of...",
    },
    PromptTemplate {
        id: "complaint",
        label: "Complaint",
        content: "Write a complaint email regarding the issue of...",
    },
    PromptTemplate {
        id: "followup",
        label: "Follow-up",
        content: "Write a follow-up email after the previous discussion about...",
    },
    PromptTemplate {
        id: "leave",
        label: "Leave Request",
        content: "Write a leave request email for...",
    },
    PromptTemplate {
        id: "apology",
        label: "Apology",
        content: "Write an apology email for...",
    },
    PromptTemplate {
        id: "meeting",
        label: "Meeting Request",
        content: "Write an email requesting a meeting for...",
    },
    PromptTemplate {
        id: "offer",
        label: "Offer Acceptance",
        content: "Write an offer acceptance email for the role of...",
    },
    PromptTemplate {
        id: "resignation",
        label: "Resignation",
        content: "Write a resignation email with a 1-month notice period...",
    },
    PromptTemplate {
        id: "reminder",
        label: "Reminder",
        content: "Write a gentle reminder email about...",
    },
    PromptTemplate {
        id: "support",
        label: "Customer Support",
        content: "Write a customer support email describing the issue...",
    },
    PromptTemplate {
        id: "refund",
        label: "Refund Request",
        content: "Write a refund request email for the product...",
    },
    PromptTemplate {
        id: "thanks",
        label: "Thank You",
        content: "Write a thank-you email appreciating...",
    },
    PromptTemplate {
        id: "inquiry",
        label: "Inquiry",
        content: "Write an inquiry email asking about...",
    },
    PromptTemplate {
        id: "marketing",
        label: "Marketing",
        content: "Write a marketing email promoting...",
    },
    PromptTemplate {
        id: "feedback",
        label: "Feedback",
        content: "Write a feedback email regarding...",
    },
];

pub fn find_template(id: &str) -> Option<&'static PromptTemplate> {
    PROMPT_TEMPLATES.iter().find(|t| t.id == id)
}

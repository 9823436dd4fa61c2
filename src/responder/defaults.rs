//! Built-in reply pools for the conversational assistant.

pub const GREETINGS: &[&str] = &[
    "Hello! I'm your health information assistant. How can I help you today?",
    "Hi there! I can help verify health information or connect you with a doctor. What would you like to do?",
    "Welcome to HealthVerify. I'm here to help you find accurate health information. What can I assist with?",
];

pub const VERIFIED_RELIABLE: &[&str] = &[
    "This information appears to be from a reliable source. Is there anything specific you'd like to know about it?",
    "I've verified this information, and it comes from a trusted health source. How else can I help?",
    "Good news! This content is from a credible health authority. Do you have any questions about it?",
];

pub const VERIFIED_UNRELIABLE: &[&str] = &[
    "This information may contain misleading claims. Would you like me to explain why?",
    "I've found some concerning phrases in this content that are common in health misinformation. Should we discuss alternatives?",
    "This doesn't seem to come from a reliable health source. Would you like me to suggest trusted resources instead?",
];

pub const VERIFIED_UNCERTAIN: &[&str] = &[
    "I don't have enough information to fully verify this content. Can you provide more details or the original source?",
    "This is in a grey area - I can't definitively say if it's reliable or not. Would you like me to connect you with a healthcare professional?",
    "I'm not certain about the reliability of this information. Would you like me to suggest some trusted sources on this topic?",
];

pub const FOLLOW_UP_QUESTIONS: &[&str] = &[
    "Are you experiencing any health issues related to this information?",
    "Would you like to speak with a healthcare professional about this topic?",
    "Would you like to see the latest verified news about this health topic?",
];

pub const COULD_NOT_VERIFY: &str = "I couldn't verify that information. Could you please provide more details or a link to the source?";

pub const CONSULTATION: &str = "I can help you book a consultation with a healthcare professional. Would you like to schedule an appointment now? You can visit our Doctor Consultation page.";

pub const NEWS: &str = "Would you like to see the latest health news? You can visit our News section for verified health updates.";

pub const FALLBACK: &str = "I'm here to help verify health information, connect you with doctors, or show you the latest health news. What would you like to do?";

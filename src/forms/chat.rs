use serde::Deserialize;
use validator::Validate;

use crate::domain::chat::ConsultationStatus;
use crate::domain::types::{MessageContent, VisitorContact, VisitorName};
use crate::forms::FormError;

/// Visitor registration shown before the first message.
#[derive(Debug, Deserialize, Validate)]
pub struct StartChatForm {
    #[validate(length(min = 1, max = 50))]
    pub visitor_name: String,
    #[validate(length(min = 1, max = 100))]
    pub visitor_contact: String,
    #[validate(length(min = 1, max = 2000))]
    pub initial_inquiry: String,
}

#[derive(Debug)]
pub struct StartChatPayload {
    pub visitor_name: VisitorName,
    pub visitor_contact: VisitorContact,
    pub initial_inquiry: MessageContent,
}

impl TryFrom<StartChatForm> for StartChatPayload {
    type Error = FormError;

    fn try_from(form: StartChatForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            visitor_name: VisitorName::new(form.visitor_name).map_err(|_| FormError::InvalidName)?,
            visitor_contact: VisitorContact::new(form.visitor_contact)
                .map_err(|_| FormError::InvalidName)?,
            initial_inquiry: blank_message("initial_inquiry", form.initial_inquiry)?,
        })
    }
}

/// A single chat line, from either side.
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageForm {
    #[validate(length(min = 1, max = 2000))]
    pub message_content: String,
}

impl TryFrom<SendMessageForm> for MessageContent {
    type Error = FormError;

    fn try_from(form: SendMessageForm) -> Result<Self, Self::Error> {
        form.validate()?;
        blank_message("message_content", form.message_content)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub status: String,
}

impl TryFrom<UpdateStatusForm> for ConsultationStatus {
    type Error = FormError;

    fn try_from(form: UpdateStatusForm) -> Result<Self, Self::Error> {
        ConsultationStatus::try_from(form.status.as_str()).map_err(|_| FormError::InvalidStatus)
    }
}

/// Whitespace-only or markup-only text is reported against `field`.
fn blank_message(field: &'static str, text: String) -> Result<MessageContent, FormError> {
    MessageContent::new(text).map_err(|_| {
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, validator::ValidationError::new("length"));
        FormError::Validation(errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_requires_every_field() {
        let form = StartChatForm {
            visitor_name: "Kim".to_string(),
            visitor_contact: String::new(),
            initial_inquiry: String::new(),
        };
        let err = StartChatPayload::try_from(form).unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["initial_inquiry".to_string(), "visitor_contact".to_string()]
        );
    }

    #[test]
    fn whitespace_message_is_rejected() {
        let form = SendMessageForm {
            message_content: "   ".to_string(),
        };
        let err = MessageContent::try_from(form).unwrap_err();
        assert_eq!(err.fields(), vec!["message_content".to_string()]);
    }

    #[test]
    fn overlong_message_is_rejected() {
        let form = SendMessageForm {
            message_content: "a".repeat(2001),
        };
        let err = MessageContent::try_from(form).unwrap_err();
        assert_eq!(err.fields(), vec!["message_content".to_string()]);
    }

    #[test]
    fn markup_characters_survive_validation() {
        let form = SendMessageForm {
            message_content: "a < b & c".to_string(),
        };
        let content = MessageContent::try_from(form).unwrap();
        assert_eq!(content.as_str(), "a < b & c");
    }

    #[test]
    fn status_uses_display_labels() {
        let status = ConsultationStatus::try_from(UpdateStatusForm {
            status: "In Progress".to_string(),
        })
        .unwrap();
        assert_eq!(status, ConsultationStatus::InProgress);
        assert!(matches!(
            ConsultationStatus::try_from(UpdateStatusForm {
                status: "Archived".to_string()
            }),
            Err(FormError::InvalidStatus)
        ));
    }
}
